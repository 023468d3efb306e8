use std::str::FromStr;

/// Initialize tracing/logging for the application.
///
/// Unrecognized level names fall back to `info`.
pub fn init(default_level: &str) {
    let lvl = tracing::Level::from_str(default_level).unwrap_or(tracing::Level::INFO);

    // Use try_init so tests and libraries can call this multiple times without panicking
    let _ = tracing_subscriber::fmt()
        .with_max_level(lvl)
        .with_target(false)
        .try_init();
}
