// Domain service interface for solving optimization problems
// Defines the contract that any engine adapter must follow

use std::io;
use std::path::PathBuf;

use super::config::SolveOptions;
use super::models::Model;

/// Error types for the solver service
///
/// Infeasible, unbounded and inconclusive outcomes are not errors; they are
/// reported through the model's status.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("Solver not available: {engine} at '{}': {source}", path.display())]
    SolverNotAvailable {
        engine: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Working directory '{}' is not usable: {source}", path.display())]
    WorkingDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write model file '{}': {source}", path.display())]
    ModelFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Model cannot be written as {format}: {reason}")]
    Format { format: &'static str, reason: String },

    #[error("Solver execution failed: {0}")]
    ExecutionFailed(String),
}

impl SolverError {
    /// True for failures of the environment (binary or directory), as
    /// opposed to a model that cannot be represented.
    pub fn is_environment(&self) -> bool {
        matches!(
            self,
            SolverError::SolverNotAvailable { .. }
                | SolverError::WorkingDirectory { .. }
                | SolverError::ModelFile { .. }
        )
    }

    /// Semantic error code for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::SolverNotAvailable { .. } => "SOLVER_NOT_AVAILABLE",
            SolverError::WorkingDirectory { .. } => "DIRECTORY_UNUSABLE",
            SolverError::ModelFile { .. } => "MODEL_FILE_IO",
            SolverError::Format { .. } => "MODEL_FORMAT",
            SolverError::ExecutionFailed(_) => "SOLVER_EXECUTION",
        }
    }

    pub(crate) fn format(format: &'static str, reason: impl Into<String>) -> Self {
        SolverError::Format {
            format,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SolverError>;

/// Domain service interface for optimization solvers
///
/// A solve writes its outcome onto `model` (status, objective value, variable
/// values) and returns nothing else. Swapping backends does not change the
/// calling code.
pub trait SolverService: Send + Sync {
    /// Solve `model` in place.
    fn solve(&self, model: &mut Model, options: &SolveOptions) -> Result<()>;

    /// Get the name of this solver backend
    fn name(&self) -> &str;
}
