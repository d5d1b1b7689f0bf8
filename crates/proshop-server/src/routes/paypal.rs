use actix_web::web;
use proshop::constants::PAYPAL_CONFIG_PATH;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaypalConfig {
    pub client_id: String,
}

/// GET /api/config/paypal - Client id for the checkout button
pub async fn paypal_config(state: web::Data<AppState>) -> web::Json<PaypalConfig> {
    web::Json(PaypalConfig {
        client_id: state.config.paypal_client_id.clone(),
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(PAYPAL_CONFIG_PATH, web::get().to(paypal_config));
}
