use actix_web::dev::{Service, ServiceRequest, ServiceResponse};
use actix_web::Error;
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use crate::error::ServerError;

/// Turn a panic raised while serving a request into a JSON 500 for that
/// request instead of dropping the connection. Used with `App::wrap_fn`
/// inside the CORS layer.
///
/// The request belongs to the router by the time a handler panics, so the
/// failure comes back as an `Error`. actix renders it through
/// [`ServerError`]'s `ResponseError` impl and the CORS layer still adds its
/// headers.
pub fn catch_panic<S, B>(
    expose_detail: bool,
    req: ServiceRequest,
    srv: &S,
) -> impl Future<Output = Result<ServiceResponse<B>, Error>>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
{
    let method = req.method().clone();
    let path = req.path().to_owned();
    let call = panic::catch_unwind(AssertUnwindSafe(|| srv.call(req)));

    async move {
        let outcome = match call {
            Ok(fut) => AssertUnwindSafe(fut).catch_unwind().await,
            Err(payload) => Err(payload),
        };

        outcome.unwrap_or_else(|payload| {
            let detail = panic_message(payload.as_ref());
            tracing::error!(%method, %path, "Handler panicked: {}", detail);
            Err(ServerError::Panicked {
                detail,
                expose: expose_detail,
            }
            .into())
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
