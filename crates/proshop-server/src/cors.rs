//! CORS configuration for the storefront API.
//!
//! Two pieces share one [`OriginPolicy`]:
//!
//! - [`origin_guard`] runs first and turns a denied origin into a 403 before
//!   anything else sees the request.
//! - [`build_cors`] answers preflights and annotates permitted responses with
//!   the echoed origin, credentials flag, methods and headers.
//!
//! Because both consult the same policy, a preflight and the request that
//! follows it always get the same verdict.

use actix_cors::Cors;
use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse};
use actix_web::http::header::{self, HeaderName};
use actix_web::Error;
use futures::future::{self, Either, Ready};
use proshop::constants::HEALTH_PATH;
use proshop::{CorsDecision, OriginPolicy, ALLOWED_HEADERS, ALLOWED_METHODS, PREFLIGHT_MAX_AGE_SECS};
use std::future::Future;
use std::sync::Arc;

use crate::error::ServerError;
use crate::metrics::CORS_DECISIONS;

/// Build the CORS middleware (preflight responder) from the origin policy.
pub fn build_cors(policy: Arc<OriginPolicy>) -> Cors {
    let headers = ALLOWED_HEADERS
        .iter()
        .copied()
        .map(HeaderName::from_static)
        .collect::<Vec<_>>();

    Cors::default()
        .allowed_origin_fn(move |origin, _req_head| {
            // Origins that are not visible ASCII can never be on the list.
            origin
                .to_str()
                .map(|o| policy.is_allowed(Some(o)))
                .unwrap_or(false)
        })
        .allowed_methods(ALLOWED_METHODS.iter().copied())
        .allowed_headers(headers)
        .supports_credentials()
        .max_age(PREFLIGHT_MAX_AGE_SECS)
        // Denied origins are rejected by `origin_guard`; anything that gets
        // here unlisted (the health route) is served without CORS headers.
        .block_on_origin_mismatch(false)
}

/// Label for the decision counter.
fn decision_label(decision: &CorsDecision) -> &'static str {
    match decision {
        CorsDecision::SameOrigin => "same_origin",
        CorsDecision::Allowed(_) => "allowed",
        CorsDecision::Denied(_) => "denied",
    }
}

/// Reject requests whose `Origin` is not allowed, before CORS handling,
/// body parsing or routing. The health route is never checked.
/// Used with `App::wrap_fn`.
pub fn origin_guard<S, B>(
    policy: &OriginPolicy,
    req: ServiceRequest,
    srv: &S,
) -> Either<
    Ready<Result<ServiceResponse<EitherBody<B, BoxBody>>, Error>>,
    impl Future<Output = Result<ServiceResponse<EitherBody<B, BoxBody>>, Error>>,
>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
{
    if req.path() != HEALTH_PATH {
        let origin = req.headers().get(header::ORIGIN).map(|value| {
            // Same decoding as `build_cors`: a value that is not visible
            // ASCII can never be on the list.
            value.to_str().unwrap_or_default()
        });

        let decision = policy.check(origin);
        CORS_DECISIONS
            .with_label_values(&[decision_label(&decision)])
            .inc();

        if let CorsDecision::Denied(denial) = decision {
            let res = req
                .error_response(ServerError::OriginDenied(denial.origin))
                .map_into_right_body();
            return Either::Left(future::ready(Ok(res)));
        }
    }

    let fut = srv.call(req);
    Either::Right(async move { fut.await.map(ServiceResponse::map_into_left_body) })
}
