use std::sync::Arc;

use crate::domain::{
    config::EngineConfig, solver_service::SolverService, value_objects::SolverBackend,
};
use crate::solver::{CoinCbcSolver, CplexSolver, GlpkSolver, LpSolveSolver};

/// Factory for creating solver instances based on configuration
pub struct SolverFactory;

impl SolverFactory {
    /// Create a solver for a specific backend with its default configuration
    pub fn create_from_backend(backend: SolverBackend) -> Arc<dyn SolverService> {
        match backend {
            SolverBackend::CoinCbc => Arc::new(CoinCbcSolver::new()),
            SolverBackend::Cplex => Arc::new(CplexSolver::new()),
            SolverBackend::Glpk => Arc::new(GlpkSolver::new()),
            SolverBackend::LpSolve => Arc::new(LpSolveSolver::new()),
        }
    }

    /// Create a solver for `backend` with adapter-level defaults from `config`
    pub fn create_with_config(backend: SolverBackend, config: EngineConfig) -> Arc<dyn SolverService> {
        match backend {
            SolverBackend::CoinCbc => Arc::new(CoinCbcSolver::with_config(config)),
            SolverBackend::Cplex => Arc::new(CplexSolver::with_config(config)),
            SolverBackend::Glpk => Arc::new(GlpkSolver::with_config(config)),
            SolverBackend::LpSolve => Arc::new(LpSolveSolver::with_config(config)),
        }
    }

    /// Get the default solver (CBC)
    pub fn default_solver() -> Arc<dyn SolverService> {
        Arc::new(CoinCbcSolver::new())
    }
}
