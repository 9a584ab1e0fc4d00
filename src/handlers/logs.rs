use actix_web::{web, HttpResponse};
use chrono::Duration;
use log::info;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::activity::{ActivityRecord, EmissionResult};
use crate::models::log_entry::LogEntry;
use crate::services::{emissions, streak};
use crate::state::AppState;
use crate::utils::session::SessionUser;
use crate::utils::validation::validate_payload;

/// Trailing window for the weekly query, counted back from today.
pub const WEEKLY_WINDOW_DAYS: i64 = 7;

#[derive(Serialize)]
struct SaveLogResponse {
    success: bool,
    co2: EmissionResult,
}

#[derive(Serialize)]
struct TodayResponse {
    success: bool,
    log: LogEntry,
}

#[derive(Serialize)]
struct WeeklyResponse {
    success: bool,
    logs: Vec<LogEntry>,
}

/// Recomputes the streak from the full history and stores it on the user.
pub async fn refresh_streak(state: &AppState, user_id: Uuid) -> Result<u32, AppError> {
    let dates = state.store.log_dates_desc(user_id).await?;
    let value = streak::current_streak(&dates);
    state.store.set_streak(user_id, value).await?;
    Ok(value)
}

pub async fn weekly_logs(state: &AppState, user_id: Uuid) -> Result<Vec<LogEntry>, AppError> {
    let since = state.clock.today() - Duration::days(WEEKLY_WINDOW_DAYS);
    Ok(state.store.logs_since(user_id, since).await?)
}

// POST /api/save-log
pub async fn save_log(
    session: SessionUser,
    state: web::Data<AppState>,
    payload: web::Json<ActivityRecord>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;

    let activity = payload.into_inner();
    let co2 = emissions::calculate(&activity, &state.factors)?;

    let now = state.clock.now();
    let entry = LogEntry {
        user_id: session.user_id,
        date: now.date_naive(),
        activity,
        co2,
        updated_at: now,
    };
    state.store.upsert_log(&entry).await?;

    let streak = refresh_streak(&state, session.user_id).await?;
    info!(
        "Saved log for user {} on {} (total {:.2} kg, streak {})",
        session.user_id, entry.date, co2.total, streak
    );

    Ok(HttpResponse::Ok().json(SaveLogResponse { success: true, co2 }))
}

// GET /api/get-today
pub async fn get_today(
    session: SessionUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let log = state
        .store
        .find_log(session.user_id, state.clock.today())
        .await?
        .ok_or_else(|| AppError::NotFound("No data for today".to_string()))?;

    Ok(HttpResponse::Ok().json(TodayResponse { success: true, log }))
}

// GET /api/get-weekly
pub async fn get_weekly(
    session: SessionUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let logs = weekly_logs(&state, session.user_id).await?;
    Ok(HttpResponse::Ok().json(WeeklyResponse { success: true, logs }))
}
