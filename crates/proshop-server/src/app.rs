//! Request pipeline assembly.
//!
//! Middleware, outermost first:
//!
//! 1. access log
//! 2. origin guard (denied origin → 403, nothing below runs; `/health` is
//!    exempt)
//! 3. CORS preflight responder / response annotation
//! 4. development-only error detail
//! 5. panic recovery (a panicking handler still gets one JSON 500)
//!
//! Then routing: health and metrics, PayPal config, the route table's
//! collaborator scopes, `/uploads`, the mode-dependent fallback and finally
//! the JSON 404.

use actix_files::Files;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::{Condition, ErrorHandlerResponse, ErrorHandlers, Logger};
use actix_web::{web, App, HttpResponse};

use crate::cors;
use crate::error::ServerError;
use crate::middleware;
use crate::routes::{fallback, health, paypal};
use crate::state::AppState;

/// Assemble the application for one worker.
pub fn build_app(
    state: AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let config = state.config.clone();
    let routes = state.routes.clone();
    let guard_policy = state.policy.clone();
    let cors_policy = state.policy.clone();
    let production = config.mode.is_production();
    let body_limit = config.json_body_limit;

    let mut app = App::new()
        .app_data(web::Data::new(state))
        .app_data(web::PayloadConfig::new(body_limit))
        .app_data(
            web::JsonConfig::default()
                .limit(body_limit)
                .error_handler(|err, _req| ServerError::BadRequest(err.to_string()).into()),
        )
        .app_data(
            web::FormConfig::default()
                .limit(body_limit)
                .error_handler(|err, _req| ServerError::BadRequest(err.to_string()).into()),
        )
        .configure(health::configure)
        .configure(paypal::configure)
        .configure(|cfg| routes.configure(cfg))
        .service(
            Files::new("/uploads", &config.uploads_dir)
                .default_handler(web::to(fallback::not_found)),
        );

    if production {
        // Serve the SPA bundle last (catch-all) for non-API GETs
        app = app.service(
            Files::new("/", &config.spa_dir)
                .index_file("index.html")
                .guard(fallback::spa_guard())
                .default_handler(web::to(fallback::spa_index)),
        );
    } else {
        app = app.route("/", web::get().to(fallback::readiness));
    }

    app.default_service(web::to(fallback::not_found))
        .wrap_fn(move |req, srv| middleware::catch_panic(!production, req, srv))
        .wrap(Condition::new(
            !production,
            ErrorHandlers::new().default_handler(attach_error_detail),
        ))
        .wrap(cors::build_cors(cors_policy))
        .wrap_fn(move |req, srv| cors::origin_guard(&guard_policy, req, srv))
        .wrap(Logger::default())
}

/// Rewrite an error response body to carry the error's debug detail under
/// `"stack"`. Development only.
fn attach_error_detail<B>(
    res: ServiceResponse<B>,
) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let status = res.status();
    let detailed = res.response().error().map(|err| {
        let mut body = match err.as_error::<ServerError>() {
            Some(server_err) => server_err.body(),
            None => serde_json::json!({
                "error": status.canonical_reason().unwrap_or("error"),
                "message": err.to_string(),
            }),
        };
        body["stack"] = serde_json::json!(format!("{:?}", err));
        body
    });

    let Some(body) = detailed else {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    };

    let (req, _) = res.into_parts();
    let response = HttpResponse::build(status).json(body);
    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, response).map_into_right_body(),
    ))
}
