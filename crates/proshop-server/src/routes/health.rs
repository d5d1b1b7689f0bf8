use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, HttpRequest, HttpResponse};
use proshop::constants::HEALTH_PATH;
use subtle::ConstantTimeEq;

use crate::error::ServerError;
use crate::metrics::metrics_output;
use crate::state::AppState;

/// GET /health - Liveness check, independent of every collaborator
pub async fn health() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("OK")
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// GET /metrics - Prometheus metrics endpoint (optionally auth-gated)
pub async fn metrics(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ServerError> {
    if let Some(ref expected_token) = state.config.metrics_token {
        let authorized = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|token| constant_time_eq(token.as_bytes(), expected_token.as_bytes()))
            .unwrap_or(false);

        if !authorized {
            return Err(ServerError::Unauthorized);
        }
    }

    let output = metrics_output()
        .map_err(|e| ServerError::Internal(format!("failed to encode metrics: {}", e)))?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(output))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(HEALTH_PATH, web::get().to(health))
        .route("/metrics", web::get().to(metrics));
}
