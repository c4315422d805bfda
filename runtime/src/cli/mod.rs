//! CLI subcommand implementations for the `job-scout` binary.

pub mod doctor;
pub mod search;
pub mod serve;

/// Set to `json` to emit structured log lines.
pub const LOG_FORMAT_ENV: &str = "JOBSCOUT_LOG_FORMAT";

/// Install the global tracing subscriber. Logs go to stderr so `search`
/// output on stdout stays machine-readable.
///
/// `RUST_LOG` wins over `default_level` when set.
pub fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    let json = std::env::var(LOG_FORMAT_ENV)
        .map(|v| v.trim().eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
