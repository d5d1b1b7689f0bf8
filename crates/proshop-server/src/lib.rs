pub mod app;
pub mod config;
pub mod cors;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use app::build_app;
pub use config::{ConfigError, ServerConfig};
pub use error::ServerError;
pub use routes::modules::{Detached, RouteModule, RouteTable};
pub use state::AppState;
