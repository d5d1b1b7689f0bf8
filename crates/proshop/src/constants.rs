/// Origins allowed when nothing is configured and the server runs in development.
pub const DEFAULT_DEV_ORIGINS: &[&str] = &["http://localhost:3000"];

/// Methods advertised to browsers in preflight responses.
pub const ALLOWED_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"];

/// Request headers a cross-origin caller may send.
pub const ALLOWED_HEADERS: &[&str] = &["content-type", "authorization", "accept", "x-requested-with"];

/// How long browsers may cache a preflight answer.
pub const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// PayPal sandbox client id, used when `PAYPAL_CLIENT_ID` is unset.
pub const DEFAULT_PAYPAL_CLIENT_ID: &str = "sb";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default base URL the frontend talks to.
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:5000";

/// Liveness route. Answers regardless of origin or allow-list.
pub const HEALTH_PATH: &str = "/health";

pub const PRODUCTS_PATH: &str = "/api/products";
pub const USERS_PATH: &str = "/api/users";
pub const ORDERS_PATH: &str = "/api/orders";
pub const UPLOAD_PATH: &str = "/api/upload";
pub const PAYPAL_CONFIG_PATH: &str = "/api/config/paypal";

/// Prefix shared by every API route. Unmatched paths under it never fall back
/// to the single-page bundle.
pub const API_PREFIX: &str = "/api/";
