//! pd-project: network input documents, the typed component model and
//! schema validation between them.

pub mod model;
pub mod schema;
pub mod validate;

pub use model::*;
pub use schema::NetworkDocument;
pub use validate::build_network;

use pd_core::NetworkError;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Network(#[from] NetworkError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn from_yaml_str(content: &str) -> ProjectResult<NetworkSpec> {
    let doc: NetworkDocument = serde_yaml::from_str(content)?;
    Ok(build_network(&doc)?)
}

pub fn from_json_str(content: &str) -> ProjectResult<NetworkSpec> {
    let doc: NetworkDocument = serde_json::from_str(content)?;
    Ok(build_network(&doc)?)
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<NetworkSpec> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<NetworkSpec> {
    let content = std::fs::read_to_string(path)?;
    from_json_str(&content)
}

/// Load by extension: `.json` is JSON, anything else is YAML.
pub fn load(path: &std::path::Path) -> ProjectResult<NetworkSpec> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path),
        _ => load_yaml(path),
    }
}
