use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{Store, StoreError};
use crate::models::activity::{ActivityRecord, Diet, EmissionResult, Energy, Travel};
use crate::models::log_entry::LogEntry;
use crate::models::user::{NewUser, User};

const USER_COLUMNS: &str = "user_id, name, email, password, streak, created_at";
const LOG_COLUMNS: &str = "user_id, log_date, travel, energy, diet, co2, updated_at";

#[derive(FromRow)]
struct LogRow {
    user_id: Uuid,
    log_date: NaiveDate,
    travel: Json<Travel>,
    energy: Json<Energy>,
    diet: Json<Diet>,
    co2: Json<EmissionResult>,
    updated_at: DateTime<Utc>,
}

impl LogRow {
    fn into_entry(self) -> LogEntry {
        LogEntry {
            user_id: self.user_id,
            date: self.log_date,
            activity: ActivityRecord {
                travel: self.travel.0,
                energy: self.energy.0,
                diet: self.diet.0,
            },
            co2: self.co2.0,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects and applies pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url).await?;
        sqlx::migrate!().run(&pool).await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let query = format!(
            "INSERT INTO users (user_id, name, email, password, streak, created_at)
             VALUES ($1, $2, $3, $4, 0, NOW())
             ON CONFLICT (email) DO NOTHING
             RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, User>(&query)
            .bind(user.user_id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::DuplicateEmail)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn set_streak(&self, user_id: Uuid, streak: u32) -> Result<(), StoreError> {
        sqlx::query("UPDATE users SET streak = $1 WHERE user_id = $2")
            .bind(i32::try_from(streak).unwrap_or(i32::MAX))
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn upsert_log(&self, entry: &LogEntry) -> Result<(), StoreError> {
        // Every column is overwritten so a repeat save replaces the whole day.
        sqlx::query(
            "INSERT INTO logs (user_id, log_date, travel, energy, diet, co2, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (user_id, log_date) DO UPDATE SET
                 travel = EXCLUDED.travel,
                 energy = EXCLUDED.energy,
                 diet = EXCLUDED.diet,
                 co2 = EXCLUDED.co2,
                 updated_at = EXCLUDED.updated_at",
        )
        .bind(entry.user_id)
        .bind(entry.date)
        .bind(Json(&entry.activity.travel))
        .bind(Json(&entry.activity.energy))
        .bind(Json(&entry.activity.diet))
        .bind(Json(&entry.co2))
        .bind(entry.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_log(&self, user_id: Uuid, date: NaiveDate) -> Result<Option<LogEntry>, StoreError> {
        let query = format!("SELECT {LOG_COLUMNS} FROM logs WHERE user_id = $1 AND log_date = $2");
        let row = sqlx::query_as::<_, LogRow>(&query)
            .bind(user_id)
            .bind(date)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(LogRow::into_entry))
    }

    async fn logs_since(&self, user_id: Uuid, from: NaiveDate) -> Result<Vec<LogEntry>, StoreError> {
        let query = format!(
            "SELECT {LOG_COLUMNS} FROM logs WHERE user_id = $1 AND log_date >= $2 ORDER BY log_date ASC"
        );
        let rows = sqlx::query_as::<_, LogRow>(&query)
            .bind(user_id)
            .bind(from)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(LogRow::into_entry).collect())
    }

    async fn log_dates_desc(&self, user_id: Uuid) -> Result<Vec<NaiveDate>, StoreError> {
        let dates = sqlx::query_scalar::<_, NaiveDate>(
            "SELECT log_date FROM logs WHERE user_id = $1 ORDER BY log_date DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(dates)
    }

    async fn log_totals(&self, user_id: Uuid) -> Result<Vec<f64>, StoreError> {
        let totals = sqlx::query_scalar::<_, f64>(
            "SELECT (co2->>'total')::float8 FROM logs WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(totals)
    }
}
