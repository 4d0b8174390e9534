use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Malformed or inconsistent batch declaration.
///
/// Raised while a declaration is resolved into typed plans, before any case
/// touches the engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing key '{key}' in {context}")]
    MissingKey { context: String, key: &'static str },

    #[error("Range step must be non-zero in {context}")]
    ZeroStep { context: String },

    #[error("Range in {context} never reaches its end value (from={from}, to={to}, step={step})")]
    EmptyRange {
        context: String,
        from: f64,
        to: f64,
        step: f64,
    },

    #[error("Non-finite value for {what}: {value}")]
    NonFinite { what: String, value: f64 },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Duplicate name '{name}' in {context}")]
    DuplicateName { name: String, context: String },

    #[error("Unsupported feature: {feature} - {reason}")]
    Unsupported { feature: String, reason: String },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, value: impl ToString, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
