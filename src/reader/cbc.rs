//! CBC `-solution` file reader.
//!
//! ```text
//! Optimal - objective value 130.00000000
//!       0 x1                    30                       0
//!       1 x2                    20                       0
//! ```
//!
//! Rows flagged `**` violate a bound or constraint; their values are kept.
//! CBC only prints nonzero columns, so after a conclusive verdict the
//! variables it leaves out are zero.

use super::{parse_value, ValueTable};
use crate::domain::{ModelView, Solution, SolutionStatus};

const OBJECTIVE_MARKER: &str = " - objective value ";

pub fn read(text: &str, view: &ModelView<'_>) -> Solution {
    let mut lines = text.lines().skip_while(|line| line.trim().is_empty());
    let header = lines.next().map(str::trim).unwrap_or_default();

    let Some((verdict, objective)) = header.split_once(OBJECTIVE_MARKER) else {
        return Solution::undefined(format!("unrecognised CBC header '{}'", header));
    };
    let verdict = verdict.trim();
    let objective = objective.split_whitespace().next().and_then(parse_value);

    let mut table = ValueTable::new(view);
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let line = line.strip_prefix("**").map(str::trim_start).unwrap_or(line);
        let mut tokens = line.split_whitespace();
        let (Some(index), Some(name), Some(value)) = (tokens.next(), tokens.next(), tokens.next())
        else {
            break;
        };
        let (Ok(index), Some(value)) = (index.parse::<usize>(), parse_value(value)) else {
            break;
        };
        table.set(name, Some(index), value);
    }
    let status = status(verdict);
    if status.is_conclusive() {
        table.fill_missing(0.0);
    }

    Solution::new(status, format!("CBC: {}", verdict))
        .with_objective(objective)
        .with_values(table.into_values())
}

fn status(verdict: &str) -> SolutionStatus {
    let verdict = verdict.to_ascii_lowercase();
    if verdict.starts_with("optimal") {
        SolutionStatus::Optimal
    } else if verdict.starts_with("infeasible") || verdict.starts_with("integer infeasible") {
        SolutionStatus::Infeasible
    } else if verdict.starts_with("unbounded") {
        SolutionStatus::Unbounded
    } else {
        SolutionStatus::Undefined
    }
}
