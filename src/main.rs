use std::collections::HashMap;
use std::io;
use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use actix_web_prom::PrometheusMetricsBuilder;
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use carbon_tracker_backend::config::{Config, StoreBackend};
use carbon_tracker_backend::routes;
use carbon_tracker_backend::services::factors::EmissionFactors;
use carbon_tracker_backend::state::AppState;
use carbon_tracker_backend::store::{MemoryStore, PgStore, Store};
use carbon_tracker_backend::utils::clock::SystemClock;
use carbon_tracker_backend::utils::session::SessionManager;

fn startup_error(err: impl std::fmt::Display) -> io::Error {
    error!("Startup failed: {}", err);
    io::Error::new(io::ErrorKind::Other, err.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(startup_error)?;

    let factors = match &config.emission_factors_path {
        Some(path) => {
            info!("Loading emission factors from {}", path);
            EmissionFactors::from_file(path).map_err(startup_error)?
        }
        None => EmissionFactors::default(),
    };

    let store: Arc<dyn Store> = match config.store_backend {
        StoreBackend::Postgres => {
            let url = config.database_url.as_deref().unwrap_or_default();
            Arc::new(PgStore::connect(url).await.map_err(startup_error)?)
        }
        StoreBackend::Memory => {
            info!("Using in-memory store; data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let state = web::Data::new(AppState {
        store,
        factors,
        sessions: SessionManager::new(&config.jwt_secret, config.session_ttl_hours, config.cookie_secure),
        clock: Arc::new(SystemClock),
        bcrypt_cost: config.bcrypt_cost,
    });

    let mut labels = HashMap::new();
    labels.insert("app".to_string(), "carbon_tracker".to_string());
    let prometheus = PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics")
        .const_labels(labels)
        .build()
        .map_err(startup_error)?;

    info!("Starting server at {} with {} workers", config.bind_address, config.workers);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(prometheus.clone())
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .workers(config.workers)
    .bind(&config.bind_address)?
    .run()
    .await
}
