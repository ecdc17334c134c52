use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Default directives when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info,service=debug,tower_http=info,sea_orm=warn";

/// Initialize tracing subscriber with sensible defaults and stdout writer.
/// - Respects `RUST_LOG` if set
/// - Falls back to `DEFAULT_FILTER`
pub fn init_logging_default() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Initialize tracing subscriber with JSON structured output.
/// - Respects `RUST_LOG` if set
/// - Emits one JSON object per event, including span fields
pub fn init_logging_json() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .json()
        .with_current_span(true)
        .with_writer(io::stdout)
        .try_init();
}

/// Pick the subscriber by the configured format name; unknown names fall back to compact.
pub fn init_logging(format: &str) {
    match format.trim().to_ascii_lowercase().as_str() {
        "json" => init_logging_json(),
        _ => init_logging_default(),
    }
}
