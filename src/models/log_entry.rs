use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::activity::{ActivityRecord, EmissionResult};

/// One user's log for one calendar day. (user_id, date) is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub user_id: Uuid,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub activity: ActivityRecord,
    pub co2: EmissionResult,
    pub updated_at: DateTime<Utc>,
}
