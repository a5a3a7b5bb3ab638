//! Fixed-column MPS writer.
//!
//! Field layout: type in columns 2-3, names in 5-12 and 15-22, numbers
//! starting at column 25 and at most 12 characters wide. Names longer than
//! eight characters are rejected rather than truncated.

use std::fmt::Write as _;

use super::{check_objective_row, format_fixed_width};
use crate::domain::{ModelView, Relation, Result, RowRef, SolverError, OBJECTIVE_ROW};

const FORMAT: &str = "MPS";
const NAME_WIDTH: usize = 8;
const NUMBER_WIDTH: usize = 12;

const RHS_SET: &str = "RHS";
const RANGE_SET: &str = "RNG";
const BOUND_SET: &str = "BND";

pub fn render(view: &ModelView<'_>) -> Result<String> {
    check_name("model", view.name())?;
    for variable in view.variables() {
        check_name("column", variable.name())?;
    }
    for constraint in view.constraints() {
        check_name("row", constraint.name())?;
    }
    check_objective_row(FORMAT, view)?;

    let relations: Vec<Relation> = view.constraints().iter().map(|c| c.rhs_relation()).collect();
    let row_name = |row: RowRef| match row {
        RowRef::Objective => OBJECTIVE_ROW,
        RowRef::Constraint(i) => view.constraints()[i].name(),
    };

    let mut out = String::new();
    let _ = writeln!(out, "NAME          {}", view.name());
    if view.direction().is_maximize() {
        out.push_str("OBJSENSE\n    MAX\n");
    }

    out.push_str("ROWS\n");
    push_line(&mut out, "N", OBJECTIVE_ROW, "", None);
    for (constraint, relation) in view.constraints().iter().zip(&relations) {
        let kind = match relation {
            Relation::LessEqual(_) => "L",
            Relation::GreaterEqual(_) | Relation::Range { .. } => "G",
            Relation::Equal(_) => "E",
        };
        push_line(&mut out, kind, constraint.name(), "", None);
    }

    out.push_str("COLUMNS\n");
    for (index, variable) in view.variables().iter().enumerate() {
        if view.is_orphan(index) {
            push_line(&mut out, "", variable.name(), OBJECTIVE_ROW, Some(0.0));
            continue;
        }
        for (row, coefficient) in view.column(index) {
            push_line(&mut out, "", variable.name(), row_name(*row), Some(*coefficient));
        }
    }

    out.push_str("RHS\n");
    for (constraint, relation) in view.constraints().iter().zip(&relations) {
        let rhs = match *relation {
            Relation::LessEqual(b) | Relation::GreaterEqual(b) | Relation::Equal(b) => b,
            Relation::Range { lower, .. } => lower,
        };
        if rhs != 0.0 {
            push_line(&mut out, "", RHS_SET, constraint.name(), Some(rhs));
        }
    }

    let ranges: Vec<(&str, f64)> = view
        .constraints()
        .iter()
        .zip(&relations)
        .filter_map(|(constraint, relation)| match *relation {
            Relation::Range { lower, upper } => Some((constraint.name(), upper - lower)),
            _ => None,
        })
        .collect();
    if !ranges.is_empty() {
        out.push_str("RANGES\n");
        for (name, width) in ranges {
            push_line(&mut out, "", RANGE_SET, name, Some(width));
        }
    }

    let bounded: Vec<_> = view
        .variables()
        .iter()
        .filter(|v| !v.has_default_bounds())
        .collect();
    if !bounded.is_empty() {
        out.push_str("BOUNDS\n");
    }
    for variable in bounded {
        let name = variable.name();
        let (lower, upper) = (variable.lower_bound, variable.upper_bound);
        match (lower.is_finite(), upper.is_finite()) {
            (true, true) if lower == upper => push_line(&mut out, "FX", BOUND_SET, name, Some(lower)),
            (true, true) => {
                // UP < 0 alone implies MI for most readers.
                if lower != 0.0 || upper < 0.0 {
                    push_line(&mut out, "LO", BOUND_SET, name, Some(lower));
                }
                push_line(&mut out, "UP", BOUND_SET, name, Some(upper));
            }
            (true, false) => push_line(&mut out, "LO", BOUND_SET, name, Some(lower)),
            (false, true) => {
                push_line(&mut out, "MI", BOUND_SET, name, None);
                push_line(&mut out, "UP", BOUND_SET, name, Some(upper));
            }
            (false, false) => push_line(&mut out, "FR", BOUND_SET, name, None),
        }
    }

    out.push_str("ENDATA\n");
    Ok(out)
}

fn check_name(kind: &str, name: &str) -> Result<()> {
    if name.is_empty() || name.len() > NAME_WIDTH || name.chars().any(|c| !c.is_ascii_graphic()) {
        return Err(SolverError::format(
            FORMAT,
            format!(
                "{} name '{}' must be 1 to {} printable characters without spaces",
                kind, name, NAME_WIDTH
            ),
        ));
    }
    Ok(())
}

fn push_line(out: &mut String, kind: &str, first: &str, second: &str, value: Option<f64>) {
    let number = value.map(|v| format_fixed_width(v, NUMBER_WIDTH)).unwrap_or_default();
    let line = format!(
        " {:<2} {:<8}  {:<8}  {}",
        kind, first, second, number
    );
    out.push_str(line.trim_end());
    out.push('\n');
}
