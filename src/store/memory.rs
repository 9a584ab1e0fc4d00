use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::models::log_entry::LogEntry;
use crate::models::user::{NewUser, User};

/// Process-local store for tests and database-free runs.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    // Keyed by (user, date) so iteration is already date-ordered per user.
    logs: RwLock<BTreeMap<(Uuid, NaiveDate), LogEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn user_logs<T>(&self, user_id: Uuid, f: impl Fn(&LogEntry) -> T) -> Vec<T> {
        let logs = self.logs.read().await;
        logs.range((user_id, NaiveDate::MIN)..=(user_id, NaiveDate::MAX))
            .map(|(_, entry)| f(entry))
            .collect()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail);
        }
        let created = User {
            user_id: user.user_id,
            name: user.name,
            email: user.email,
            password: user.password,
            streak: 0,
            created_at: Utc::now(),
        };
        users.insert(created.user_id, created.clone());
        Ok(created)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.get(&user_id).cloned())
    }

    async fn set_streak(&self, user_id: Uuid, streak: u32) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if let Some(user) = users.get_mut(&user_id) {
            user.streak = i32::try_from(streak).unwrap_or(i32::MAX);
        }
        Ok(())
    }

    async fn upsert_log(&self, entry: &LogEntry) -> Result<(), StoreError> {
        let mut logs = self.logs.write().await;
        logs.insert((entry.user_id, entry.date), entry.clone());
        Ok(())
    }

    async fn find_log(&self, user_id: Uuid, date: NaiveDate) -> Result<Option<LogEntry>, StoreError> {
        let logs = self.logs.read().await;
        Ok(logs.get(&(user_id, date)).cloned())
    }

    async fn logs_since(&self, user_id: Uuid, from: NaiveDate) -> Result<Vec<LogEntry>, StoreError> {
        let logs = self.logs.read().await;
        Ok(logs
            .range((user_id, from)..=(user_id, NaiveDate::MAX))
            .map(|(_, entry)| entry.clone())
            .collect())
    }

    async fn log_dates_desc(&self, user_id: Uuid) -> Result<Vec<NaiveDate>, StoreError> {
        let mut dates = self.user_logs(user_id, |entry| entry.date).await;
        dates.reverse();
        Ok(dates)
    }

    async fn log_totals(&self, user_id: Uuid) -> Result<Vec<f64>, StoreError> {
        Ok(self.user_logs(user_id, |entry| entry.co2.total).await)
    }
}
