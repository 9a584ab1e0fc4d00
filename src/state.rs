use std::sync::Arc;

use crate::services::factors::EmissionFactors;
use crate::store::Store;
use crate::utils::clock::Clock;
use crate::utils::session::SessionManager;

/// Everything a request handler needs, shared across workers through `web::Data`.
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub factors: EmissionFactors,
    pub sessions: SessionManager,
    pub clock: Arc<dyn Clock>,
    pub bcrypt_cost: u32,
}
