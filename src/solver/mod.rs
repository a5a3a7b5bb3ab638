// Solver adapters module
//
// Every engine is an external executable. An adapter only describes how to
// talk to it; `cli::run` does the file and process work for all of them.

use std::ffi::OsString;
use std::path::Path;

use crate::domain::{EngineConfig, FileType, Model, Result, SolveOptions, SolverService};
use crate::format::ModelFormat;
use crate::reader::SolutionReader;

pub mod cli;
pub mod coin_cbc_solver;
pub mod cplex_solver;
pub mod factory;
pub mod glpk_solver;
pub mod lp_solve_solver;

pub use cli::SolveStage;
pub use coin_cbc_solver::CoinCbcSolver;
pub use cplex_solver::CplexSolver;
pub use factory::SolverFactory;
pub use glpk_solver::GlpkSolver;
pub use lp_solve_solver::LpSolveSolver;

/// Where an engine puts its report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputConvention {
    /// The report is the engine's standard output, redirected into the result file.
    Stdout,
    /// The engine writes the result file named on its command line.
    SolutionFile,
}

/// Description of one external command-line engine.
pub trait EngineAdapter: Send + Sync {
    /// Display name used in logs and errors
    fn engine_name(&self) -> &str;

    /// Adapter-level defaults
    fn config(&self) -> &EngineConfig;

    /// Dialect the engine reads for `file_type`
    fn model_format(&self, file_type: FileType) -> ModelFormat;

    fn reader(&self) -> SolutionReader;

    fn output_convention(&self) -> OutputConvention;

    /// Extension of the result file
    fn result_extension(&self) -> &'static str {
        "sol"
    }

    /// Engine arguments for one solve, without the executable.
    ///
    /// `extra` holds the resolved extra arguments, adapter defaults before
    /// call-site ones. The adapter places them where the engine still applies
    /// them to the solve.
    fn arguments(
        &self,
        file_type: FileType,
        model: &Path,
        result: &Path,
        extra: &[OsString],
    ) -> Vec<OsString>;

    /// Reject file paths the engine cannot be handed.
    fn check_paths(&self, _model: &Path, _result: &Path) -> Result<()> {
        Ok(())
    }
}

impl<T: EngineAdapter> SolverService for T {
    fn solve(&self, model: &mut Model, options: &SolveOptions) -> Result<()> {
        cli::run(self, model, options)
    }

    fn name(&self) -> &str {
        self.engine_name()
    }
}
