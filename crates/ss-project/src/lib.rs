//! ss-project: scenario declaration format, loading and validation.

pub mod migrate;
pub mod schema;
pub mod validate;

pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{ValidationError, validate_declaration};

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ss_core::ConfigError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Parse YAML with externally tagged enums written as single-key maps
/// (`thrust curve: {...}`, `object: {line: 1}`) at any depth.
pub fn from_yaml_str<T: DeserializeOwned>(content: &str) -> Result<T, serde_yaml::Error> {
    serde_yaml::with::singleton_map_recursive::deserialize(serde_yaml::Deserializer::from_str(content))
}

/// Inverse of [`from_yaml_str`]: enums are written as single-key maps, never `!tags`.
pub fn to_yaml_string<T: Serialize>(value: &T) -> ProjectResult<String> {
    let mut buffer = Vec::new();
    let mut serializer = serde_yaml::Serializer::new(&mut buffer);
    serde_yaml::with::singleton_map_recursive::serialize(value, &mut serializer)?;
    Ok(String::from_utf8(buffer)?)
}

pub fn load_yaml(path: &Path) -> ProjectResult<Declaration> {
    let content = std::fs::read_to_string(path)?;
    let declaration: Declaration = from_yaml_str(&content)?;
    finish_load(declaration)
}

pub fn save_yaml(path: &Path, declaration: &Declaration) -> ProjectResult<()> {
    validate_declaration(declaration)?;
    let content = to_yaml_string(declaration)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<Declaration> {
    let content = std::fs::read_to_string(path)?;
    let declaration: Declaration = serde_json::from_str(&content)?;
    finish_load(declaration)
}

pub fn save_json(path: &Path, declaration: &Declaration) -> ProjectResult<()> {
    validate_declaration(declaration)?;
    let content = serde_json::to_string_pretty(declaration)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a declaration, choosing the format from the file extension
/// (`.json` is JSON, anything else YAML).
pub fn load(path: &Path) -> ProjectResult<Declaration> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json { load_json(path) } else { load_yaml(path) }
}

fn finish_load(declaration: Declaration) -> ProjectResult<Declaration> {
    let declaration = migrate_to_latest(declaration)?;
    validate_declaration(&declaration)?;
    Ok(declaration)
}
