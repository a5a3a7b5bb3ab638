// Domain value objects representing core business concepts

use std::fmt;
use std::str::FromStr;

/// Direction of optimization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptimizationType {
    /// Minimize the objective function
    #[default]
    Minimize,
    /// Maximize the objective function
    Maximize,
}

impl OptimizationType {
    pub fn is_maximize(self) -> bool {
        self == OptimizationType::Maximize
    }
}

/// Relational bound placed on a linear expression
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Relation {
    /// expression ≤ b
    LessEqual(f64),
    /// expression ≥ b
    GreaterEqual(f64),
    /// expression = b
    Equal(f64),
    /// lower ≤ expression ≤ upper, both sides finite and lower < upper
    Range { lower: f64, upper: f64 },
}

impl Relation {
    /// Bring a relation into canonical form.
    ///
    /// A range with one infinite side collapses to the one-sided relation and
    /// a range with equal sides becomes an equality. Returns `None` if the
    /// relation cannot bound anything (NaN, reversed or both sides infinite).
    pub fn normalized(self) -> Option<Relation> {
        match self {
            Relation::LessEqual(b) | Relation::GreaterEqual(b) | Relation::Equal(b) => {
                b.is_finite().then_some(self)
            }
            Relation::Range { lower, upper } => {
                if lower.is_nan() || upper.is_nan() || lower > upper {
                    return None;
                }
                match (lower.is_finite(), upper.is_finite()) {
                    (true, true) if lower == upper => Some(Relation::Equal(lower)),
                    (true, true) => Some(self),
                    (false, true) if lower < 0.0 => Some(Relation::LessEqual(upper)),
                    (true, false) if upper > 0.0 => Some(Relation::GreaterEqual(lower)),
                    _ => None,
                }
            }
        }
    }

    /// Shift every bound by `delta` (used to move an expression constant to the right-hand side).
    pub fn shifted(self, delta: f64) -> Relation {
        match self {
            Relation::LessEqual(b) => Relation::LessEqual(b + delta),
            Relation::GreaterEqual(b) => Relation::GreaterEqual(b + delta),
            Relation::Equal(b) => Relation::Equal(b + delta),
            Relation::Range { lower, upper } => Relation::Range {
                lower: lower + delta,
                upper: upper + delta,
            },
        }
    }
}

/// Canonical status of a solve
///
/// Every engine's native vocabulary maps onto exactly one of these.
/// Values reported alongside `Infeasible` or `Unbounded` are whatever the
/// engine printed and must not be treated as meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SolutionStatus {
    /// Values are meaningful and optimal
    Optimal,
    /// No feasible point exists
    Infeasible,
    /// Objective is unbounded in the optimization direction
    Unbounded,
    /// The engine reached no conclusive verdict (or nothing could be parsed)
    #[default]
    Undefined,
}

impl SolutionStatus {
    /// True for every verdict except `Undefined`.
    pub fn is_conclusive(self) -> bool {
        !matches!(self, SolutionStatus::Undefined)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SolutionStatus::Optimal => "optimal",
            SolutionStatus::Infeasible => "infeasible",
            SolutionStatus::Unbounded => "unbounded",
            SolutionStatus::Undefined => "undefined",
        }
    }
}

impl fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolutionStatus::Optimal => write!(f, "Optimal"),
            SolutionStatus::Infeasible => write!(f, "Infeasible"),
            SolutionStatus::Unbounded => write!(f, "Unbounded"),
            SolutionStatus::Undefined => write!(f, "Undefined"),
        }
    }
}

/// Model file type requested from an engine adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// The engine's algebraic dialect
    Lp,
    /// Fixed-column MPS
    Mps,
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Lp => write!(f, "lp"),
            FileType::Mps => write!(f, "mps"),
        }
    }
}

impl FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lp" => Ok(FileType::Lp),
            "mps" => Ok(FileType::Mps),
            other => Err(format!("unknown file type '{}' (expected 'lp' or 'mps')", other)),
        }
    }
}

/// Solver backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverBackend {
    /// COIN-OR CBC
    CoinCbc,
    /// IBM ILOG CPLEX interactive optimizer
    Cplex,
    /// GNU Linear Programming Kit (glpsol)
    Glpk,
    /// lp_solve
    LpSolve,
}

impl fmt::Display for SolverBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverBackend::CoinCbc => write!(f, "COIN-OR CBC"),
            SolverBackend::Cplex => write!(f, "CPLEX"),
            SolverBackend::Glpk => write!(f, "GLPK"),
            SolverBackend::LpSolve => write!(f, "lp_solve"),
        }
    }
}

impl FromStr for SolverBackend {
    type Err = String;

    /// Parse a backend name (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cbc" | "coin_cbc" | "coin-cbc" => Ok(SolverBackend::CoinCbc),
            "cplex" => Ok(SolverBackend::Cplex),
            "glpk" | "glpsol" => Ok(SolverBackend::Glpk),
            "lp_solve" | "lpsolve" | "lp-solve" => Ok(SolverBackend::LpSolve),
            other => Err(format!("unknown solver backend '{}'", other)),
        }
    }
}
