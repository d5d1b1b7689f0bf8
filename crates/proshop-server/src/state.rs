use proshop::OriginPolicy;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::routes::modules::RouteTable;

/// Shared application state, built once and cloned into every worker.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub policy: Arc<OriginPolicy>,
    pub routes: Arc<RouteTable>,
}

impl AppState {
    pub fn new(config: ServerConfig, routes: RouteTable) -> Self {
        let policy = OriginPolicy::new(config.allowed_origins.clone());
        Self {
            config: Arc::new(config),
            policy: Arc::new(policy),
            routes: Arc::new(routes),
        }
    }
}
