//! Logging setup for the CLI.
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "warn,gitstake_api=info,gitstake_cli=info";

/// Initializes the global subscriber. Logs go to stderr so stdout stays
/// parseable with `--json`.
pub(crate) fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let log_line_num = std::env::var("LOG_LINE_NUM").is_ok_and(|v| v == "1");

    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_line_number(log_line_num)
        .with_writer(std::io::stderr)
        .init();

    debug!("logging started");
}
