//! What answers when no API route matched.
//!
//! In production unmatched non-API paths get the frontend bundle's entry
//! document so client-side routing can take over. In development the root
//! path returns a readiness string. Everything else is a JSON 404.

use actix_files::NamedFile;
use actix_web::guard::{self, Guard};
use actix_web::{web, HttpRequest, HttpResponse};

use crate::error::ServerError;
use crate::state::AppState;

pub const READINESS_MESSAGE: &str = "API is running....";

/// `/api` and everything below it.
pub fn is_api_path(path: &str) -> bool {
    path == "/api" || path.starts_with(proshop::constants::API_PREFIX)
}

/// GET / in development
pub async fn readiness() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(READINESS_MESSAGE)
}

/// Entry document of the production bundle.
pub async fn spa_index(state: web::Data<AppState>) -> Result<NamedFile, ServerError> {
    let index = state.config.spa_index();
    NamedFile::open_async(&index).await.map_err(|e| {
        ServerError::Internal(format!(
            "frontend entry document {} unavailable: {}",
            index.display(),
            e
        ))
    })
}

/// Which requests the bundle may answer: GET/HEAD outside `/api`.
pub fn spa_guard() -> impl Guard {
    guard::All(guard::Any(guard::Get()).or(guard::Head()))
        .and(guard::fn_guard(|ctx| !is_api_path(ctx.head().uri.path())))
}

/// Default service: structured 404 naming the requested URL.
pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, ServerError> {
    Err(ServerError::NotFound(req.uri().to_string()))
}
