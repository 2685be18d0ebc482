use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_LOG_LEVEL: &str = "info";

/// Install the global subscriber. Logs go to stderr; stdout is reserved for
/// the response document.
///
/// `RUST_LOG` takes precedence over `log_level`. An unparseable level falls
/// back to `info` and is reported once the subscriber is installed.
pub fn init(log_format: &str, log_level: &str) {
    let (env_filter, invalid_level) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, None),
        Err(_) => level_filter(log_level),
    };

    let format = normalize_log_format(log_format);

    if format == "json" {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_writer(std::io::stderr)
                    .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339()),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .init();
    }

    if let Some(error) = invalid_level {
        tracing::warn!(
            log_level = log_level,
            error = %error,
            "Invalid log level, defaulting to '{}'",
            DEFAULT_LOG_LEVEL
        );
    }

    tracing::debug!(
        log_format = format,
        log_level = log_level,
        "Logging system initialized"
    );
}

/// Parse `log_level` as a filter directive, falling back to the default level.
/// The parse error is returned alongside the fallback filter.
fn level_filter(log_level: &str) -> (EnvFilter, Option<String>) {
    match EnvFilter::try_new(log_level) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new(DEFAULT_LOG_LEVEL), Some(e.to_string())),
    }
}

fn normalize_log_format(format: &str) -> &'static str {
    match format.to_lowercase().as_str() {
        "json" => "json",
        "pretty" | "compact" | "text" => "pretty",
        _ => {
            eprintln!(
                "WARN: Invalid log format '{}', defaulting to 'json'. Valid options: json, pretty",
                format
            );
            "json"
        }
    }
}
