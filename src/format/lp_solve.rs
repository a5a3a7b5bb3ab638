//! lp_solve native LP writer.
//!
//! Every statement ends in `;`. Constraints always carry a label so that a
//! single-variable row stays a row instead of becoming a bound. Infinity is
//! lp_solve's `1e30`.

use std::fmt::Write as _;

use super::{check_lp_name, check_objective_row, format_number, write_terms};
use crate::domain::{ModelView, OptimizationType, Relation, Result, VariableId};

const FORMAT: &str = "lp_solve LP";
const INFINITY: &str = "1e30";

pub fn render(view: &ModelView<'_>) -> Result<String> {
    for variable in view.variables() {
        check_lp_name(FORMAT, variable.name())?;
    }
    for constraint in view.constraints() {
        check_lp_name(FORMAT, constraint.name())?;
    }
    check_objective_row(FORMAT, view)?;

    let mut out = String::new();
    let _ = writeln!(out, "/* {} */", view.name());

    let mut objective: Vec<(VariableId, f64)> = view.objective().expression.terms.clone();
    objective.extend(
        (0..view.num_variables())
            .filter(|&i| view.is_orphan(i))
            .map(|i| (VariableId::new(i), 0.0)),
    );
    objective.sort_by_key(|(id, _)| *id);
    out.push_str(match view.direction() {
        OptimizationType::Maximize => "max: ",
        OptimizationType::Minimize => "min: ",
    });
    if !objective.is_empty() {
        write_terms(&mut out, view, &objective);
    }
    out.push_str(";\n");

    if !view.constraints().is_empty() {
        out.push_str("\n/* constraints */\n");
    }
    for constraint in view.constraints() {
        let _ = write!(out, "{}: ", constraint.name());
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
        out.push_str(";\n");
    }

    let bounded: Vec<_> = view
        .variables()
        .iter()
        .filter(|v| !v.has_default_bounds())
        .collect();
    if !bounded.is_empty() {
        out.push('\n');
    }
    for variable in bounded {
        let name = variable.name();
        let (lower, upper) = (variable.lower_bound, variable.upper_bound);
        let _ = match (lower.is_finite(), upper.is_finite()) {
            (true, true) => writeln!(
                out,
                "{} <= {} <= {};",
                format_number(lower),
                name,
                format_number(upper)
            ),
            (true, false) => writeln!(out, "{} >= {};", name, format_number(lower)),
            (false, true) => writeln!(out, "-{} <= {} <= {};", INFINITY, name, format_number(upper)),
            (false, false) => writeln!(out, "{} >= -{};", name, INFINITY),
        };
    }

    Ok(out)
}
