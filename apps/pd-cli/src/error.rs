use pd_project::ProjectError;
use pd_solver::SolveFailure;
use std::path::PathBuf;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to load {path}: {source}")]
    Load {
        path: PathBuf,
        source: ProjectError,
    },

    #[error("Topology error: {0}")]
    Topology(#[from] pd_core::NetworkError),

    #[error("Solve failed: {0}")]
    Solve(#[from] SolveFailure),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
