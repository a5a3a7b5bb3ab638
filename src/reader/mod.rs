//! Engine report readers.
//!
//! A reader turns the text an engine produced into a [`Solution`]. Readers
//! never fail: a report that is empty, truncated or unrecognised yields
//! [`crate::domain::SolutionStatus::Undefined`] with whatever could be recovered.

use crate::domain::{ModelView, Solution};

pub mod cbc;
pub mod cplex;
pub mod glpk;
pub mod lp_solve;

/// Report layout an engine produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionReader {
    /// CBC `-solution` file
    Cbc,
    /// CPLEX interactive optimizer transcript
    Cplex,
    /// `glpsol -o` report
    Glpk,
    /// lp_solve standard output
    LpSolve,
}

impl SolutionReader {
    pub fn name(self) -> &'static str {
        match self {
            SolutionReader::Cbc => "CBC",
            SolutionReader::Cplex => "CPLEX",
            SolutionReader::Glpk => "GLPK",
            SolutionReader::LpSolve => "lp_solve",
        }
    }

    /// Parse `text` against the model seen through `view`.
    pub fn read(self, text: &str, view: &ModelView<'_>) -> Solution {
        let solution = if text.trim().is_empty() {
            Solution::undefined("empty engine report")
        } else {
            match self {
                SolutionReader::Cbc => cbc::read(text, view),
                SolutionReader::Cplex => cplex::read(text, view),
                SolutionReader::Glpk => glpk::read(text, view),
                SolutionReader::LpSolve => lp_solve::read(text, view),
            }
        };

        tracing::debug!(
            component = "reader",
            operation = "read",
            reader = self.name(),
            status = %solution.status,
            objective = ?solution.objective_value,
            reported = solution.variable_values.iter().filter(|v| v.is_some()).count(),
            message = %solution.message,
            "Parsed engine report"
        );
        solution
    }
}

/// Parse one numeric token as engines print it (`30`, `1.3e+02`, `-1e+30`).
pub(crate) fn parse_value(token: &str) -> Option<f64> {
    token.trim().parse::<f64>().ok()
}

/// Variable values collected from a report, aligned with model order.
pub(crate) struct ValueTable<'v, 'a> {
    view: &'v ModelView<'a>,
    values: Vec<Option<f64>>,
}

impl<'v, 'a> ValueTable<'v, 'a> {
    pub(crate) fn new(view: &'v ModelView<'a>) -> Self {
        Self {
            view,
            values: vec![None; view.num_variables()],
        }
    }

    /// Record `value` for the variable called `name`, or at `position` when
    /// the name is unknown.
    pub(crate) fn set(&mut self, name: &str, position: Option<usize>, value: f64) {
        let index = self
            .view
            .variable_index(name)
            .or_else(|| position.filter(|p| *p < self.values.len()));
        match index {
            Some(index) => self.values[index] = Some(value),
            None => tracing::debug!(
                component = "reader",
                operation = "assign",
                variable = name,
                "Ignoring value for unknown variable"
            ),
        }
    }

    /// Variables the report did not list take `value`.
    pub(crate) fn fill_missing(&mut self, value: f64) {
        for slot in self.values.iter_mut().filter(|v| v.is_none()) {
            *slot = Some(value);
        }
    }

    pub(crate) fn into_values(self) -> Vec<Option<f64>> {
        self.values
    }
}
