use serde::Serialize;
use std::fmt;

use crate::constants::DEFAULT_DEV_ORIGINS;

/// Deployment mode, read once from `NODE_ENV` at start-up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    #[default]
    Development,
    Production,
}

impl RuntimeMode {
    /// `production` selects production. Anything else, including an unset
    /// variable, is development.
    pub fn from_node_env(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("production") => RuntimeMode::Production,
            _ => RuntimeMode::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == RuntimeMode::Production
    }

    /// Origins to fall back on when nothing is configured. Production fails
    /// closed.
    pub fn default_origins(self) -> &'static [&'static str] {
        match self {
            RuntimeMode::Development => DEFAULT_DEV_ORIGINS,
            RuntimeMode::Production => &[],
        }
    }
}

impl fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeMode::Development => write!(f, "development"),
            RuntimeMode::Production => write!(f, "production"),
        }
    }
}
