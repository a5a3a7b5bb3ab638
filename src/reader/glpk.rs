//! `glpsol -o` report reader.

use super::{parse_value, ValueTable};
use crate::domain::{ModelView, Solution, SolutionStatus};

/// Column status codes printed between the name and the activity.
const COLUMN_STATES: &[&str] = &["B", "NL", "NU", "NF", "NS", "*"];

pub fn read(text: &str, view: &ModelView<'_>) -> Solution {
    let Some(verdict) = field(text, "Status:") else {
        return Solution::undefined("GLPK report has no status line");
    };
    let objective = field(text, "Objective:").and_then(|value| {
        let value = value.split_once('=').map_or(value, |(_, v)| v);
        value.split_whitespace().next().and_then(parse_value)
    });

    let mut table = ValueTable::new(view);
    let mut lines = text.lines();
    if lines.by_ref().any(|line| line.contains("Column name")) {
        let rows = lines.skip_while(|line| line.trim_start().starts_with("---"));
        let mut pending: Option<(usize, String)> = None;
        for line in rows {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.is_empty() {
                break;
            }
            // A long name is printed alone and its data continues on the next line.
            let (number, name, data) = match pending.take() {
                Some((number, name)) => (number, name, &tokens[..]),
                None => {
                    let Ok(number) = tokens[0].parse::<usize>() else {
                        break;
                    };
                    let Some(name) = tokens.get(1) else {
                        break;
                    };
                    if tokens.len() == 2 {
                        pending = Some((number, name.to_string()));
                        continue;
                    }
                    (number, name.to_string(), &tokens[2..])
                }
            };
            let data = match data.first() {
                Some(state) if COLUMN_STATES.contains(state) => &data[1..],
                _ => data,
            };
            let Some(value) = data.first().and_then(|token| parse_value(token)) else {
                break;
            };
            table.set(&name, number.checked_sub(1), value);
        }
    }

    Solution::new(status(verdict), format!("GLPK: {}", verdict))
        .with_objective(objective)
        .with_values(table.into_values())
}

/// Trimmed text after `label` on the first line starting with it.
fn field<'t>(text: &'t str, label: &str) -> Option<&'t str> {
    text.lines()
        .find_map(|line| line.trim_start().strip_prefix(label))
        .map(str::trim)
}

fn status(verdict: &str) -> SolutionStatus {
    match verdict.to_ascii_uppercase().as_str() {
        "OPTIMAL" | "INTEGER OPTIMAL" => SolutionStatus::Optimal,
        "INFEASIBLE (FINAL)" | "INTEGER EMPTY" | "EMPTY" => SolutionStatus::Infeasible,
        "UNBOUNDED" => SolutionStatus::Unbounded,
        _ => SolutionStatus::Undefined,
    }
}
