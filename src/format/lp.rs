//! CPLEX LP writer (read by CBC, CPLEX and `glpsol --lp`).

use std::fmt::Write as _;

use super::{check_lp_name, check_objective_row, format_number, write_terms};
use crate::domain::{ModelView, OptimizationType, Relation, Result, VariableId, OBJECTIVE_ROW};

const FORMAT: &str = "CPLEX LP";

pub fn render(view: &ModelView<'_>) -> Result<String> {
    for variable in view.variables() {
        check_lp_name(FORMAT, variable.name())?;
    }
    for constraint in view.constraints() {
        check_lp_name(FORMAT, constraint.name())?;
    }
    check_objective_row(FORMAT, view)?;

    let mut out = String::new();
    let _ = writeln!(out, "\\* {} *\\", view.name());
    out.push_str(match view.direction() {
        OptimizationType::Maximize => "max\n",
        OptimizationType::Minimize => "min\n",
    });

    let mut objective: Vec<(VariableId, f64)> = view.objective().expression.terms.clone();
    objective.extend(
        (0..view.num_variables())
            .filter(|&i| view.is_orphan(i))
            .map(|i| (VariableId::new(i), 0.0)),
    );
    objective.sort_by_key(|(id, _)| *id);
    let _ = write!(out, " {}: ", OBJECTIVE_ROW);
    write_terms(&mut out, view, &objective);
    out.push('\n');

    out.push_str("subject to\n");
    for constraint in view.constraints() {
        let _ = write!(out, " {}: ", constraint.name());
        let terms = &constraint.expression.terms;
        match constraint.rhs_relation() {
            Relation::LessEqual(b) => {
                write_terms(&mut out, view, terms);
                let _ = write!(out, " <= {}", format_number(b));
            }
            Relation::GreaterEqual(b) => {
                write_terms(&mut out, view, terms);
                let _ = write!(out, " >= {}", format_number(b));
            }
            Relation::Equal(b) => {
                write_terms(&mut out, view, terms);
                let _ = write!(out, " = {}", format_number(b));
            }
            Relation::Range { lower, upper } => {
                let _ = write!(out, "{} <= ", format_number(lower));
                write_terms(&mut out, view, terms);
                let _ = write!(out, " <= {}", format_number(upper));
            }
        }
        out.push('\n');
    }

    let bounds: Vec<String> = view
        .variables()
        .iter()
        .filter(|v| !v.has_default_bounds())
        .map(|v| bound_line(v.name(), v.lower_bound, v.upper_bound))
        .collect();
    if !bounds.is_empty() {
        out.push_str("bounds\n");
        for line in bounds {
            let _ = writeln!(out, " {}", line);
        }
    }

    out.push_str("end\n");
    Ok(out)
}

fn bound_line(name: &str, lower: f64, upper: f64) -> String {
    match (lower.is_finite(), upper.is_finite()) {
        (true, true) if lower == upper => format!("{} = {}", name, format_number(lower)),
        (true, true) => format!("{} <= {} <= {}", format_number(lower), name, format_number(upper)),
        (true, false) => format!("{} >= {}", name, format_number(lower)),
        (false, true) => format!("-inf <= {} <= {}", name, format_number(upper)),
        (false, false) => format!("{} free", name),
    }
}
