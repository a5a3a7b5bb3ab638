//! Model writers.
//!
//! Three dialects share one interface, selected by [`ModelFormat`]:
//! the CPLEX LP algebraic format, lp_solve's own LP format and fixed-column
//! MPS. Every writer is deterministic.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::domain::{Model, ModelView, Result, SolverError, VariableId, OBJECTIVE_ROW};

pub mod lp;
pub mod lp_solve;
pub mod mps;
mod number;

pub use number::{format_fixed_width, format_number};

/// Dialect a model file is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    /// CPLEX LP
    Lp,
    /// lp_solve LP
    LpSolve,
    /// Fixed-column MPS
    Mps,
}

impl ModelFormat {
    pub fn name(self) -> &'static str {
        match self {
            ModelFormat::Lp => "CPLEX LP",
            ModelFormat::LpSolve => "lp_solve LP",
            ModelFormat::Mps => "MPS",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ModelFormat::Lp | ModelFormat::LpSolve => "lp",
            ModelFormat::Mps => "mps",
        }
    }

    /// Render `view` to a string.
    pub fn render(self, view: &ModelView<'_>) -> Result<String> {
        match self {
            ModelFormat::Lp => lp::render(view),
            ModelFormat::LpSolve => lp_solve::render(view),
            ModelFormat::Mps => mps::render(view),
        }
    }
}

/// A model file on disk, owned by the solve that created it.
///
/// The file is removed only by [`ModelFile::delete`]; dropping a `ModelFile`
/// leaves it in place.
#[derive(Debug)]
pub struct ModelFile {
    format: ModelFormat,
    path: PathBuf,
}

impl ModelFile {
    pub fn new(format: ModelFormat, path: impl Into<PathBuf>) -> Self {
        Self {
            format,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Materialize `model` at this file's path.
    pub fn write(&self, model: &Model) -> Result<()> {
        let view = ModelView::new(model);
        let text = self.format.render(&view)?;

        let io_error = |source: io::Error| SolverError::ModelFile {
            path: self.path.clone(),
            source,
        };
        let mut out = BufWriter::new(File::create(&self.path).map_err(io_error)?);
        out.write_all(text.as_bytes()).map_err(io_error)?;
        out.flush().map_err(io_error)?;

        tracing::debug!(
            component = "format",
            operation = "write",
            format = self.format.name(),
            path = %self.path.display(),
            bytes = text.len(),
            "Wrote model file"
        );
        Ok(())
    }

    /// Remove the file; a file that is already gone is not an error.
    pub fn delete(&self) -> io::Result<()> {
        remove_if_exists(&self.path)
    }
}

pub(crate) fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Characters that cannot appear in an algebraic-dialect name.
const LP_RESERVED: &[char] = &['+', '-', '*', '/', '^', '<', '>', '=', ':', '[', ']', '\\'];

/// Check a row or column name for the algebraic dialects.
pub(crate) fn check_lp_name(format: &'static str, name: &str) -> Result<()> {
    let first = name
        .chars()
        .next()
        .ok_or_else(|| SolverError::format(format, "empty name"))?;
    if name.len() > 255 {
        return Err(SolverError::format(
            format,
            format!("name '{}' exceeds 255 characters", name),
        ));
    }
    if first.is_ascii_digit() || first == '.' {
        return Err(SolverError::format(
            format,
            format!("name '{}' must not start with a digit or '.'", name),
        ));
    }
    if let Some(c) = name
        .chars()
        .find(|c| !c.is_ascii_graphic() || LP_RESERVED.contains(c))
    {
        return Err(SolverError::format(
            format,
            format!("name '{}' contains invalid character {:?}", name, c),
        ));
    }
    Ok(())
}

/// Reject a constraint that would collide with the objective row.
pub(crate) fn check_objective_row(format: &'static str, view: &ModelView<'_>) -> Result<()> {
    if view.constraints().iter().any(|c| c.name() == OBJECTIVE_ROW) {
        return Err(SolverError::format(
            format,
            format!("constraint name '{}' is reserved for the objective", OBJECTIVE_ROW),
        ));
    }
    Ok(())
}

/// Append a signed term list, e.g. `3 x1 - 2 x2`.
///
/// An empty list is written as `0 <first variable>` so that every dialect
/// receives a syntactically complete row.
pub(crate) fn write_terms(out: &mut String, view: &ModelView<'_>, terms: &[(VariableId, f64)]) {
    if terms.is_empty() {
        match view.variables().first() {
            Some(first) => {
                out.push_str("0 ");
                out.push_str(first.name());
            }
            None => out.push('0'),
        }
        return;
    }

    for (i, (id, coefficient)) in terms.iter().enumerate() {
        let magnitude = format_number(coefficient.abs());
        match (i, *coefficient < 0.0) {
            (0, false) => {}
            (0, true) => out.push_str("- "),
            (_, false) => out.push_str(" + "),
            (_, true) => out.push_str(" - "),
        }
        out.push_str(&magnitude);
        out.push(' ');
        out.push_str(view.variable_name(*id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LinearExpression, Variable};

    #[test]
    fn test_check_lp_name() {
        assert!(check_lp_name("LP", "x1").is_ok());
        assert!(check_lp_name("LP", "flow_a.b").is_ok());
        assert!(check_lp_name("LP", "").is_err());
        assert!(check_lp_name("LP", "1x").is_err());
        assert!(check_lp_name("LP", ".x").is_err());
        assert!(check_lp_name("LP", "a b").is_err());
        assert!(check_lp_name("LP", "a-b").is_err());
        assert!(check_lp_name("LP", &"v".repeat(256)).is_err());
    }

    #[test]
    fn test_write_terms_signs() {
        let mut model = Model::new();
        let x = model.add_variable(Variable::new()).unwrap();
        let y = model.add_variable(Variable::new()).unwrap();
        let view = ModelView::new(&model);

        let mut out = String::new();
        write_terms(&mut out, &view, &[(x, -1.5), (y, 2.0)]);
        assert_eq!(out, "- 1.5 x1 + 2 x2");

        let mut out = String::new();
        write_terms(&mut out, &view, &[]);
        assert_eq!(out, "0 x1");
    }

    #[test]
    fn test_model_file_delete_is_explicit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.lp");
        let mut model = Model::new();
        let x = model.add_variable(Variable::new()).unwrap();
        model.minimize(LinearExpression::new().term(x, 1.0)).unwrap();

        {
            let file = ModelFile::new(ModelFormat::Lp, &path);
            file.write(&model).unwrap();
        }
        assert!(path.exists());

        let file = ModelFile::new(ModelFormat::Lp, &path);
        file.delete().unwrap();
        assert!(!path.exists());
        file.delete().unwrap();
    }

    #[test]
    fn test_model_file_unwritable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("m.mps");
        let model = Model::new();
        let err = ModelFile::new(ModelFormat::Mps, &path).write(&model).unwrap_err();
        assert!(matches!(err, SolverError::ModelFile { .. }));
    }
}
