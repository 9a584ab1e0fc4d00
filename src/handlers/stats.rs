use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::errors::AppError;
use crate::handlers::logs::weekly_logs;
use crate::services::insights::{self, Insights};
use crate::services::stats::{self, Stats};
use crate::state::AppState;
use crate::utils::session::SessionUser;

#[derive(Serialize)]
struct StatsResponse {
    success: bool,
    stats: Stats,
}

#[derive(Serialize)]
struct InsightsResponse {
    success: bool,
    insights: Insights,
}

// GET /api/get-stats
pub async fn get_stats(
    session: SessionUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = state
        .store
        .find_user_by_id(session.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let totals = state.store.log_totals(user.user_id).await?;
    let stats = stats::summarize(user.streak(), &totals);

    Ok(HttpResponse::Ok().json(StatsResponse { success: true, stats }))
}

// GET /api/get-insights
pub async fn get_insights(
    session: SessionUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = state
        .store
        .find_user_by_id(session.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let today = state.clock.today();
    let today_co2 = state
        .store
        .find_log(user.user_id, today)
        .await?
        .map(|log| log.co2)
        .unwrap_or_default();
    let weekly = weekly_logs(&state, user.user_id).await?;

    let insights = insights::build(today, &today_co2, user.streak(), &weekly);
    Ok(HttpResponse::Ok().json(InsightsResponse { success: true, insights }))
}
