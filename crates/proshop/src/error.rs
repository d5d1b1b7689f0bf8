use thiserror::Error;

/// Errors returned by proshop helpers.
#[derive(Debug, Error)]
pub enum ProshopError {
    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("base URL must be http or https: {0}")]
    UnsupportedScheme(String),
}
