//! Logging setup utilities for the studyroom binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the calling crate and the binary itself, and can be
/// overridden with the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "studyroom-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info")
///
/// # Examples
///
/// ```no_run
/// use studyroom_shared::logger::setup_logger;
///
/// setup_logger("studyroom-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the default filter directive used when `RUST_LOG` is not set.
///
/// Every studyroom crate and `tower_http` share the default level so that a
/// binary shows logs from the libraries it links.
fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    [
        "studyroom_shared",
        "studyroom_server",
        "studyroom_client",
        "tower_http",
    ]
    .iter()
    .map(|target| format!("{}={}", target, default_log_level))
    .chain(std::iter::once(format!(
        "{}={}",
        binary_name.replace('-', "_"),
        default_log_level
    )))
    .collect::<Vec<_>>()
    .join(",")
}
