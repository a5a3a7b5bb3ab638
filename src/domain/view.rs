//! Read-only traversal surface over a [`Model`] shared by writers and readers.

use std::collections::HashMap;

use super::models::{Constraint, Model, Objective, Variable, VariableId};
use super::value_objects::OptimizationType;

/// Name of the objective row in every dialect.
pub const OBJECTIVE_ROW: &str = "obj";

/// Row a coefficient belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRef {
    Objective,
    Constraint(usize),
}

/// Ordered, read-only view of a model.
///
/// Variable order is column order and constraint order is row order in
/// every dialect; readers resolve names back to positions through
/// [`ModelView::variable_index`].
pub struct ModelView<'a> {
    model: &'a Model,
    columns: Vec<Vec<(RowRef, f64)>>,
    by_name: HashMap<&'a str, usize>,
}

impl<'a> ModelView<'a> {
    pub fn new(model: &'a Model) -> Self {
        let mut columns: Vec<Vec<(RowRef, f64)>> = vec![Vec::new(); model.num_variables()];
        for (id, coefficient) in &model.objective().expression.terms {
            columns[id.index()].push((RowRef::Objective, *coefficient));
        }
        for (row, constraint) in model.constraints().iter().enumerate() {
            for (id, coefficient) in &constraint.expression.terms {
                columns[id.index()].push((RowRef::Constraint(row), *coefficient));
            }
        }

        let by_name = model
            .variables()
            .iter()
            .enumerate()
            .map(|(i, v)| (v.name(), i))
            .collect();

        Self {
            model,
            columns,
            by_name,
        }
    }

    pub fn name(&self) -> &'a str {
        self.model.name()
    }

    pub fn direction(&self) -> OptimizationType {
        self.model.objective().optimization_type
    }

    pub fn objective(&self) -> &'a Objective {
        self.model.objective()
    }

    pub fn variables(&self) -> &'a [Variable] {
        self.model.variables()
    }

    pub fn variable_name(&self, id: VariableId) -> &'a str {
        self.model.variables()[id.index()].name()
    }

    pub fn constraints(&self) -> &'a [Constraint] {
        self.model.constraints()
    }

    pub fn num_variables(&self) -> usize {
        self.model.num_variables()
    }

    /// Nonzero entries of column `index`: objective first, then constraints in row order.
    pub fn column(&self, index: usize) -> &[(RowRef, f64)] {
        &self.columns[index]
    }

    /// True when the variable appears in no row; writers still have to declare it.
    pub fn is_orphan(&self, index: usize) -> bool {
        self.columns[index].is_empty()
    }

    /// Position of the variable called `name`
    pub fn variable_index(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }
}
