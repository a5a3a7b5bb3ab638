// Domain layer: models, configuration and the solver contract
pub mod domain;

// Model writers: CPLEX LP, lp_solve LP and MPS
pub mod format;

// Engine report readers
pub mod reader;

// Solver adapters: external command-line engines behind SolverService
pub mod solver;

// Re-export commonly used types
pub use domain::{
    Constraint, EngineConfig, FileType, LinearExpression, Model, ModelError, Objective,
    OptimizationType, Relation, Solution, SolutionStatus, SolveOptions, SolverBackend,
    SolverError, SolverService, Variable, VariableId,
};

pub use format::ModelFormat;
pub use reader::SolutionReader;

pub use solver::{
    CoinCbcSolver, CplexSolver, EngineAdapter, GlpkSolver, LpSolveSolver, OutputConvention,
    SolverFactory,
};
