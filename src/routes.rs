use actix_web::web;

use crate::errors::AppError;
use crate::handlers;

/// Registers every route. Shared by `main` and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json = web::JsonConfig::default()
        .error_handler(|err, _req| AppError::Validation(err.to_string()).into());

    cfg.app_data(json)
        .route("/", web::get().to(handlers::pages::index))
        .route("/dashboard", web::get().to(handlers::pages::dashboard))
        .route("/register", web::post().to(handlers::auth::register))
        .route("/login", web::post().to(handlers::auth::login))
        .route("/logout", web::get().to(handlers::auth::logout))
        .service(
            web::scope("/api")
                .route("/save-log", web::post().to(handlers::logs::save_log))
                .route("/get-today", web::get().to(handlers::logs::get_today))
                .route("/get-weekly", web::get().to(handlers::logs::get_weekly))
                .route("/get-stats", web::get().to(handlers::stats::get_stats))
                .route("/get-insights", web::get().to(handlers::stats::get_insights)),
        );
}
