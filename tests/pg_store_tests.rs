//! `PgStore` against a real database. Runs only when `DATABASE_URL` is set.

use chrono::{DateTime, NaiveDate, Utc};
use dotenv::dotenv;
use uuid::Uuid;

use carbon_tracker_backend::models::activity::{ActivityRecord, Diet, EmissionResult, Energy, Travel};
use carbon_tracker_backend::models::log_entry::LogEntry;
use carbon_tracker_backend::models::user::{NewUser, User};
use carbon_tracker_backend::store::{PgStore, Store, StoreError};

async fn connect() -> Option<PgStore> {
    dotenv().ok();
    let url = std::env::var("DATABASE_URL").ok()?;
    Some(PgStore::connect(&url).await.expect("connect to DATABASE_URL"))
}

macro_rules! store_or_skip {
    () => {
        match connect().await {
            Some(store) => store,
            None => {
                eprintln!("DATABASE_URL not set, skipping");
                return;
            }
        }
    };
}

// Postgres keeps microseconds, so whole seconds compare cleanly after a round trip.
fn now_secs() -> DateTime<Utc> {
    DateTime::from_timestamp(Utc::now().timestamp(), 0).unwrap()
}

async fn fresh_user(store: &PgStore) -> User {
    let id = Uuid::now_v7();
    store
        .create_user(NewUser {
            user_id: id,
            name: "Ada".to_string(),
            email: format!("{}@example.com", id),
            password: "hash".to_string(),
        })
        .await
        .unwrap()
}

fn day(n: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, n).unwrap()
}

fn entry(user_id: Uuid, date: NaiveDate, total: f64) -> LogEntry {
    LogEntry {
        user_id,
        date,
        activity: ActivityRecord::default(),
        co2: EmissionResult {
            travel: total,
            energy: 0.0,
            diet: 0.0,
            total,
        },
        updated_at: now_secs(),
    }
}

#[tokio::test]
async fn duplicate_email_is_reported() {
    let store = store_or_skip!();
    let user = fresh_user(&store).await;

    let err = store
        .create_user(NewUser {
            user_id: Uuid::now_v7(),
            name: "Other".to_string(),
            email: user.email.clone(),
            password: "hash".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateEmail));
}

#[tokio::test]
async fn upsert_replaces_the_whole_row() {
    let store = store_or_skip!();
    let user = fresh_user(&store).await;

    let mut first = entry(user.user_id, day(10), 13.53);
    first.activity = ActivityRecord {
        travel: Travel {
            mode: "car".to_string(),
            distance: 10.0,
        },
        energy: Energy {
            level: "medium".to_string(),
            ac_hours: 2.0,
            washing_machine: 1.0,
            location: Some("urban".to_string()),
            season: Some("summer".to_string()),
        },
        diet: Diet {
            morning: [("redMeat".to_string(), 1)].into_iter().collect(),
            ..Default::default()
        },
    };
    store.upsert_log(&first).await.unwrap();

    let second = entry(user.user_id, day(10), 0.92);
    store.upsert_log(&second).await.unwrap();

    let stored = store.find_log(user.user_id, day(10)).await.unwrap();
    assert_eq!(stored, Some(second));
    assert_eq!(store.log_totals(user.user_id).await.unwrap(), vec![0.92]);
}

#[tokio::test]
async fn activity_columns_round_trip() {
    let store = store_or_skip!();
    let user = fresh_user(&store).await;

    let mut log = entry(user.user_id, day(11), 1.92);
    log.activity.travel.distance = 10.0;
    log.activity.energy.season = Some("winter".to_string());
    log.activity.diet.evening = [("plant".to_string(), 3)].into_iter().collect();
    store.upsert_log(&log).await.unwrap();

    assert_eq!(store.find_log(user.user_id, day(11)).await.unwrap(), Some(log));
    assert_eq!(store.find_log(user.user_id, day(12)).await.unwrap(), None);
}

#[tokio::test]
async fn date_queries_are_ordered_and_scoped() {
    let store = store_or_skip!();
    let user = fresh_user(&store).await;
    let other = fresh_user(&store).await;

    for n in [5, 2, 8, 3] {
        store.upsert_log(&entry(user.user_id, day(n), n as f64)).await.unwrap();
    }
    store.upsert_log(&entry(other.user_id, day(6), 99.0)).await.unwrap();

    let since: Vec<NaiveDate> = store
        .logs_since(user.user_id, day(3))
        .await
        .unwrap()
        .into_iter()
        .map(|log| log.date)
        .collect();
    assert_eq!(since, vec![day(3), day(5), day(8)]);

    assert_eq!(
        store.log_dates_desc(user.user_id).await.unwrap(),
        vec![day(8), day(5), day(3), day(2)]
    );

    let mut totals = store.log_totals(user.user_id).await.unwrap();
    totals.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(totals, vec![2.0, 3.0, 5.0, 8.0]);
}

#[tokio::test]
async fn streak_is_persisted() {
    let store = store_or_skip!();
    let user = fresh_user(&store).await;
    assert_eq!(user.streak(), 0);

    store.set_streak(user.user_id, 4).await.unwrap();
    let reloaded = store.find_user_by_id(user.user_id).await.unwrap().unwrap();
    assert_eq!(reloaded.streak(), 4);
}
