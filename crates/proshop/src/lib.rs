//! Cross-origin policy for the proshop storefront backend.
//!
//! Decides which browser origins may make credentialed cross-origin calls to
//! the storefront API. The policy is pure: it never performs I/O and can be
//! evaluated from any HTTP framework adapter.
//!
//! # Pieces
//!
//! - **Loader** ([`OriginAllowList`]) — parses comma-separated configuration
//!   into a normalized, deduplicated set of origins
//! - **Validator** ([`OriginPolicy`], [`is_allowed`]) — answers per request with
//!   a [`CorsDecision`]
//! - **Mode** ([`RuntimeMode`]) — development vs production, read once at start
//!
//! # Example
//!
//! ```
//! use proshop::{OriginAllowList, OriginPolicy, CorsDecision};
//!
//! let list = OriginAllowList::load([Some("https://shop.example.com/")], &[]);
//! let policy = OriginPolicy::new(list);
//!
//! assert!(policy.is_allowed(Some("https://shop.example.com")));
//! assert!(policy.is_allowed(None));
//! assert!(matches!(
//!     policy.decide(Some("https://evil.example")),
//!     CorsDecision::Denied(_)
//! ));
//! ```

pub mod allow_list;
pub mod constants;
pub mod endpoints;
pub mod error;
pub mod mode;
pub mod policy;

pub use allow_list::{normalize_origin, OriginAllowList};
pub use constants::{
    ALLOWED_HEADERS, ALLOWED_METHODS, DEFAULT_DEV_ORIGINS, DEFAULT_PAYPAL_CLIENT_ID,
    PREFLIGHT_MAX_AGE_SECS,
};
pub use endpoints::ApiEndpoints;
pub use error::ProshopError;
pub use mode::RuntimeMode;
pub use policy::{is_allowed, CorsDecision, CorsGrant, Denial, DenyReason, OriginPolicy};
