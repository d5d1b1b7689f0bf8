use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::LazyLock;

pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

// CORS decisions, labelled same_origin / allowed / denied
pub static CORS_DECISIONS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new("proshop_cors_decisions_total", "CORS origin decisions"),
        &["decision"],
    )
    .expect("valid metric definition")
});

// Error responses by error code
pub static ERROR_RESPONSES: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new("proshop_error_responses_total", "Error responses by code"),
        &["code"],
    )
    .expect("valid metric definition")
});

/// Register all metrics with the registry. Call once at start-up.
pub fn register_metrics() -> prometheus::Result<()> {
    REGISTRY.register(Box::new(CORS_DECISIONS.clone()))?;
    REGISTRY.register(Box::new(ERROR_RESPONSES.clone()))?;
    Ok(())
}

/// Registry contents in the Prometheus text format.
pub fn metrics_output() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&REGISTRY.gather(), &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
