//! CPLEX interactive optimizer transcript reader.
//!
//! The verdict comes from the solve summary
//! (`Dual simplex - Optimal:  Objective =  1.3000000000e+02`), the values from
//! the table printed by `display solution variables -`. CPLEX lists only
//! nonzero variables and closes with "All other variables ... are 0.".

use super::{parse_value, ValueTable};
use crate::domain::{ModelView, Solution, SolutionStatus};

const PROMPT: &str = "CPLEX>";
const OBJECTIVE_MARKER: &str = "Objective =";

pub fn read(text: &str, view: &ModelView<'_>) -> Solution {
    let Some((verdict, objective)) = text.lines().find_map(summary) else {
        return Solution::undefined("CPLEX reported no solution summary");
    };

    let mut table = ValueTable::new(view);
    let mut lines = text.lines().map(strip_prompt);
    if lines
        .by_ref()
        .any(|line| line.contains("Variable Name") && line.contains("Solution Value"))
    {
        for line in lines {
            if line.is_empty() || line.starts_with("All other variables") {
                break;
            }
            let mut tokens = line.split_whitespace();
            let (Some(name), Some(value)) = (tokens.next(), tokens.next().and_then(parse_value))
            else {
                break;
            };
            table.set(name, None, value);
        }
    }
    let status = status(&verdict);
    if status.is_conclusive() {
        table.fill_missing(0.0);
    }

    Solution::new(status, format!("CPLEX: {}", verdict))
        .with_objective(objective)
        .with_values(table.into_values())
}

/// `<method> - <verdict>:  Objective = <value>` split into verdict and value.
fn summary(line: &str) -> Option<(String, Option<f64>)> {
    let (head, value) = strip_prompt(line).split_once(OBJECTIVE_MARKER)?;
    let head = head.trim_end().strip_suffix(':')?;
    let (_, verdict) = head.split_once(" - ")?;
    let value = value.split_whitespace().next().and_then(parse_value);
    Some((verdict.trim().to_string(), value))
}

fn strip_prompt(line: &str) -> &str {
    let line = line.trim();
    line.strip_prefix(PROMPT).map(str::trim).unwrap_or(line)
}

fn status(verdict: &str) -> SolutionStatus {
    let verdict = verdict.to_ascii_lowercase();
    if verdict.starts_with("optimal") || verdict.starts_with("integer optimal") {
        SolutionStatus::Optimal
    } else if verdict.starts_with("unbounded") || verdict.starts_with("dual infeasible") {
        SolutionStatus::Unbounded
    } else if verdict.starts_with("infeasible")
        || verdict.starts_with("primal infeasible")
        || verdict.starts_with("integer infeasible")
    {
        SolutionStatus::Infeasible
    } else {
        SolutionStatus::Undefined
    }
}
