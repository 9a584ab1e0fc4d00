pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::log_entry::LogEntry;
use crate::models::user::{NewUser, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Persistence for users and their daily logs.
#[async_trait]
pub trait Store: Send + Sync {
    /// Fails with [`StoreError::DuplicateEmail`] if the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<User>, StoreError>;

    async fn set_streak(&self, user_id: Uuid, streak: u32) -> Result<(), StoreError>;

    /// Inserts or wholly replaces the entry for `(entry.user_id, entry.date)`.
    async fn upsert_log(&self, entry: &LogEntry) -> Result<(), StoreError>;

    async fn find_log(&self, user_id: Uuid, date: NaiveDate) -> Result<Option<LogEntry>, StoreError>;

    /// Entries on or after `from`, oldest first.
    async fn logs_since(&self, user_id: Uuid, from: NaiveDate) -> Result<Vec<LogEntry>, StoreError>;

    /// Every logged date, most recent first.
    async fn log_dates_desc(&self, user_id: Uuid) -> Result<Vec<NaiveDate>, StoreError>;

    /// `co2.total` of every entry, in no particular order.
    async fn log_totals(&self, user_id: Uuid) -> Result<Vec<f64>, StoreError>;
}
