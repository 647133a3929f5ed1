//! Host glue
//!
//! Browser/native differences the core needs: the calendar day used for the
//! daily challenge reset.

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Calendar-day marker for today (days since the Unix epoch, UTC)
#[cfg(target_arch = "wasm32")]
pub fn today_key() -> String {
    day_key(js_sys::Date::now())
}

/// Calendar-day marker for today (days since the Unix epoch, UTC)
#[cfg(not(target_arch = "wasm32"))]
pub fn today_key() -> String {
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0);
    day_key(millis)
}

/// Day marker for a Unix timestamp in milliseconds
pub fn day_key(unix_millis: f64) -> String {
    format!("{}", (unix_millis / MILLIS_PER_DAY).floor() as i64)
}
