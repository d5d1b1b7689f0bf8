//! API URL map handed to the storefront frontend.
//!
//! The frontend is built against one base URL (local backend by default) and
//! derives every endpoint from it.

use serde::Serialize;
use url::Url;

use crate::constants::{
    DEFAULT_PUBLIC_BASE_URL, ORDERS_PATH, PAYPAL_CONFIG_PATH, PRODUCTS_PATH, UPLOAD_PATH,
    USERS_PATH,
};
use crate::error::ProshopError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEndpoints {
    pub base_url: String,
    pub products_url: String,
    pub users_url: String,
    pub orders_url: String,
    pub upload_url: String,
    pub paypal_url: String,
}

impl ApiEndpoints {
    /// Derive the map from `base`. A trailing slash or path on the base is
    /// dropped; only scheme, host and port are kept.
    pub fn from_base(base: &str) -> Result<Self, ProshopError> {
        let parsed = Url::parse(base.trim()).map_err(|source| ProshopError::InvalidBaseUrl {
            url: base.to_string(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ProshopError::UnsupportedScheme(base.to_string()));
        }

        let base_url = parsed.origin().ascii_serialization();
        let join = |path: &str| format!("{base_url}{path}");

        Ok(Self {
            products_url: join(PRODUCTS_PATH),
            users_url: join(USERS_PATH),
            orders_url: join(ORDERS_PATH),
            upload_url: join(UPLOAD_PATH),
            paypal_url: join(PAYPAL_CONFIG_PATH),
            base_url,
        })
    }
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        let base_url = DEFAULT_PUBLIC_BASE_URL.to_string();
        Self {
            products_url: format!("{base_url}{PRODUCTS_PATH}"),
            users_url: format!("{base_url}{USERS_PATH}"),
            orders_url: format!("{base_url}{ORDERS_PATH}"),
            upload_url: format!("{base_url}{UPLOAD_PATH}"),
            paypal_url: format!("{base_url}{PAYPAL_CONFIG_PATH}"),
            base_url,
        }
    }
}
