use actix_web::{web, HttpResponse};
use proshop_server::{AppState, Detached, RouteModule, RouteTable, ServerConfig, ServerError};
use std::collections::HashMap;

pub const SHOP_ORIGIN: &str = "https://shop.example.com";
pub const EVIL_ORIGIN: &str = "https://evil.example";

/// Build state from an explicit variable set; nothing is read from the
/// process environment.
pub fn state(vars: &[(&str, &str)], routes: RouteTable) -> AppState {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let config = ServerConfig::from_lookup(|key| vars.get(key).cloned()).expect("valid config");
    AppState::new(config, routes)
}

/// Products module that echoes JSON bodies back with 201.
pub struct EchoProducts;

impl RouteModule for EchoProducts {
    fn name(&self) -> &str {
        "products"
    }

    fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.service(
            web::resource("")
                .route(web::post().to(|body: web::Json<serde_json::Value>| async move {
                    HttpResponse::Created().json(body.into_inner())
                }))
                .route(web::get().to(|| async { HttpResponse::Ok().json(serde_json::json!([])) })),
        );
    }
}

/// Orders module whose lookup always fails downstream.
pub struct FailingOrders;

impl RouteModule for FailingOrders {
    fn name(&self) -> &str {
        "orders"
    }

    fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.route(
            "/{id}",
            web::get().to(|| async {
                Err::<HttpResponse, _>(ServerError::Internal(
                    "database connection lost".to_string(),
                ))
            }),
        );
    }
}

pub fn table() -> RouteTable {
    RouteTable::storefront(
        EchoProducts,
        Detached::new("users"),
        FailingOrders,
        Detached::new("upload"),
    )
}
