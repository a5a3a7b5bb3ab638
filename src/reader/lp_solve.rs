//! lp_solve standard output reader.
//!
//! lp_solve prints values with six significant digits, so values read here
//! are only as precise as that.

use super::{parse_value, ValueTable};
use crate::domain::{ModelView, Solution, SolutionStatus};

const INFEASIBLE: &str = "This problem is infeasible";
const UNBOUNDED: &str = "This problem is unbounded";
const SUB_OPTIMAL: &str = "The model is sub-optimal";
const OBJECTIVE: &str = "Value of objective function:";
const VARIABLES: &str = "Actual values of the variables";
const CONSTRAINTS: &str = "Actual values of the constraints";

pub fn read(text: &str, view: &ModelView<'_>) -> Solution {
    if text.contains(INFEASIBLE) {
        return Solution::new(SolutionStatus::Infeasible, format!("lp_solve: {}", INFEASIBLE));
    }
    if text.contains(UNBOUNDED) {
        return Solution::new(SolutionStatus::Unbounded, format!("lp_solve: {}", UNBOUNDED));
    }

    let Some(objective) = text
        .lines()
        .find_map(|line| line.trim().strip_prefix(OBJECTIVE))
    else {
        return Solution::undefined("lp_solve reported no objective value");
    };
    let objective = objective.split_whitespace().next().and_then(parse_value);

    let mut table = ValueTable::new(view);
    let mut lines = text.lines().map(str::trim);
    if lines.by_ref().any(|line| line.starts_with(VARIABLES)) {
        for line in lines {
            if line.is_empty() || line.starts_with(CONSTRAINTS) {
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

    let (status, message) = if text.contains(SUB_OPTIMAL) {
        (SolutionStatus::Undefined, format!("lp_solve: {}", SUB_OPTIMAL))
    } else {
        (SolutionStatus::Optimal, "lp_solve: optimal".to_string())
    };
    Solution::new(status, message)
        .with_objective(objective)
        .with_values(table.into_values())
}
