use once_cell::sync::OnceCell;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Installs the global subscriber. Later calls are no-ops.
///
/// `json` selects machine-readable output (production); otherwise logs are
/// pretty-printed. The filter comes from `RUST_LOG`, defaulting to `info`.
pub fn init_logger(service_name: &'static str, json: bool) {
    LOGGER_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let base = fmt::layer()
            .with_target(true) // <-- shows crate/module path
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .with_span_events(fmt::format::FmtSpan::CLOSE);

        if json {
            tracing_subscriber::registry()
                .with(filter)
                .with(base.json())
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(base.pretty())
                .init();
        }

        tracing::debug!(service = service_name, json, "logger initialized");
    });
}
