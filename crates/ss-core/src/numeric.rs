use crate::ConfigError;

/// Reject NaN and infinities before they reach an engine directive.
pub fn ensure_finite(v: f64, what: &str) -> Result<f64, ConfigError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ConfigError::NonFinite {
            what: what.to_string(),
            value: v,
        })
    }
}

/// Render a value the way it appears inside case identifiers and column names.
///
/// Whole numbers keep a trailing `.0` (`5.0`, `10.0`), everything else uses the
/// shortest representation that round-trips.
pub fn format_value(v: f64) -> String {
    format!("{v:?}")
}
