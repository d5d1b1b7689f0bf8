//! Mount points for the storefront's route collaborators.
//!
//! Products, users, orders and uploads live outside this crate. Each plugs in
//! as a [`RouteModule`] under its path prefix; the table keeps registration
//! order so the first matching prefix wins.

use actix_web::{web, HttpResponse};
use proshop::constants::{ORDERS_PATH, PRODUCTS_PATH, UPLOAD_PATH, USERS_PATH};
use std::fmt;
use std::sync::Arc;

use crate::error::ServerError;

/// A collaborator that owns every route under one prefix.
pub trait RouteModule: Send + Sync {
    /// Short name for logs and error messages.
    fn name(&self) -> &str;

    /// Register routes relative to the mount prefix.
    fn configure(&self, cfg: &mut web::ServiceConfig);
}

/// Placeholder for a collaborator that is not linked into this binary.
///
/// Answers everything under its prefix with 501 so the prefix stays
/// reserved and requests never fall through to the SPA bundle.
#[derive(Debug, Clone)]
pub struct Detached {
    name: String,
}

impl Detached {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl RouteModule for Detached {
    fn name(&self) -> &str {
        &self.name
    }

    fn configure(&self, cfg: &mut web::ServiceConfig) {
        let name = self.name.clone();
        let handler = move || {
            let name = name.clone();
            async move { Err::<HttpResponse, _>(ServerError::NotImplemented(name)) }
        };
        cfg.route("", web::to(handler.clone()))
            .route("/{tail:.*}", web::to(handler));
    }
}

#[derive(Clone)]
pub struct Mount {
    pub prefix: String,
    pub module: Arc<dyn RouteModule>,
}

impl fmt::Debug for Mount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mount")
            .field("prefix", &self.prefix)
            .field("module", &self.module.name())
            .finish()
    }
}

/// Ordered prefix → module table. Read-only once the server starts.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    mounts: Vec<Mount>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a module under `prefix`. A trailing slash on the prefix is
    /// ignored.
    pub fn mount(mut self, prefix: &str, module: impl RouteModule + 'static) -> Self {
        let prefix = prefix.trim_end_matches('/');
        debug_assert!(prefix.starts_with('/'), "mount prefix must start with '/'");
        self.mounts.push(Mount {
            prefix: prefix.to_string(),
            module: Arc::new(module),
        });
        self
    }

    /// The storefront's four API collaborators at their standard prefixes.
    pub fn storefront(
        products: impl RouteModule + 'static,
        users: impl RouteModule + 'static,
        orders: impl RouteModule + 'static,
        upload: impl RouteModule + 'static,
    ) -> Self {
        Self::new()
            .mount(PRODUCTS_PATH, products)
            .mount(USERS_PATH, users)
            .mount(ORDERS_PATH, orders)
            .mount(UPLOAD_PATH, upload)
    }

    /// Storefront table with every collaborator detached.
    pub fn detached() -> Self {
        Self::storefront(
            Detached::new("products"),
            Detached::new("users"),
            Detached::new("orders"),
            Detached::new("upload"),
        )
    }

    pub fn mounts(&self) -> &[Mount] {
        &self.mounts
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.mounts.iter().map(|m| m.prefix.as_str())
    }

    /// Register one scope per mount, in table order.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        for mount in &self.mounts {
            let module = mount.module.clone();
            cfg.service(web::scope(&mount.prefix).configure(move |scope| module.configure(scope)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storefront_prefixes_in_order() {
        let table = RouteTable::detached();
        assert_eq!(
            table.prefixes().collect::<Vec<_>>(),
            vec!["/api/products", "/api/users", "/api/orders", "/api/upload"]
        );
        assert_eq!(table.mounts()[2].module.name(), "orders");
    }

    #[test]
    fn test_mount_ignores_trailing_slash() {
        let table = RouteTable::new().mount("/api/reviews/", Detached::new("reviews"));
        assert_eq!(table.prefixes().collect::<Vec<_>>(), vec!["/api/reviews"]);
    }
}
