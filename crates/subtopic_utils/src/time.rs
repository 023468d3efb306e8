use chrono::Utc;

/// Milliseconds since the UNIX epoch.
///
/// All cache freshness arithmetic runs on this scale; keeping the clock
/// read in one place keeps the representation consistent across crates.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
