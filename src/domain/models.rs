use std::collections::HashSet;

use super::value_objects::{OptimizationType, Relation, SolutionStatus};

/// Error raised while building a model
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("Variable '{name}' has invalid bounds [{lower}, {upper}]")]
    InvalidVariableBounds { name: String, lower: f64, upper: f64 },

    #[error("Constraint '{name}' has an invalid relation: {relation:?}")]
    InvalidRelation { name: String, relation: Relation },

    #[error("Coefficient {coefficient} is not finite")]
    InvalidCoefficient { coefficient: f64 },

    #[error("Variable {0} does not exist in this model")]
    UnknownVariable(usize),

    #[error("Name '{0}' is already used in this model")]
    DuplicateName(String),
}

/// Stable identity of a decision variable: its position in the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(usize);

impl VariableId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Decision variable in an optimization problem
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: Option<String>,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl Default for Variable {
    fn default() -> Self {
        Self::new()
    }
}

impl Variable {
    /// Continuous variable in `[0, +inf)`, named by the model
    pub fn new() -> Self {
        Self {
            name: None,
            lower_bound: 0.0,
            upper_bound: f64::INFINITY,
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new()
        }
    }

    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }

    pub fn with_lower_bound(mut self, lower: f64) -> Self {
        self.lower_bound = lower;
        self
    }

    pub fn with_upper_bound(mut self, upper: f64) -> Self {
        self.upper_bound = upper;
        self
    }

    /// Unbounded in both directions
    pub fn free(self) -> Self {
        self.with_bounds(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Name assigned by the model (always set once the variable is added).
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// True for the implicit `[0, +inf)` bounds shared by every dialect
    pub fn has_default_bounds(&self) -> bool {
        self.lower_bound == 0.0 && self.upper_bound == f64::INFINITY
    }
}

/// Weighted sum of decision variables plus a constant
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpression {
    pub terms: Vec<(VariableId, f64)>,
    pub constant: f64,
}

impl LinearExpression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(mut self, variable: VariableId, coefficient: f64) -> Self {
        self.terms.push((variable, coefficient));
        self
    }

    pub fn constant(mut self, constant: f64) -> Self {
        self.constant += constant;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Coefficient of `variable`, zero when absent
    pub fn coefficient(&self, variable: VariableId) -> f64 {
        self.terms
            .iter()
            .filter(|(id, _)| *id == variable)
            .map(|(_, c)| c)
            .sum()
    }
}

impl From<Vec<(VariableId, f64)>> for LinearExpression {
    fn from(terms: Vec<(VariableId, f64)>) -> Self {
        Self {
            terms,
            constant: 0.0,
        }
    }
}

/// Linear constraint on variables
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub name: Option<String>,
    pub expression: LinearExpression,
    pub relation: Relation,
}

impl Constraint {
    pub fn new(expression: impl Into<LinearExpression>, relation: Relation) -> Self {
        Self {
            name: None,
            expression: expression.into(),
            relation,
        }
    }

    pub fn le(expression: impl Into<LinearExpression>, bound: f64) -> Self {
        Self::new(expression, Relation::LessEqual(bound))
    }

    pub fn ge(expression: impl Into<LinearExpression>, bound: f64) -> Self {
        Self::new(expression, Relation::GreaterEqual(bound))
    }

    pub fn eq(expression: impl Into<LinearExpression>, bound: f64) -> Self {
        Self::new(expression, Relation::Equal(bound))
    }

    pub fn range(expression: impl Into<LinearExpression>, lower: f64, upper: f64) -> Self {
        Self::new(expression, Relation::Range { lower, upper })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Relation with the expression constant moved to the right-hand side
    pub fn rhs_relation(&self) -> Relation {
        self.relation.shifted(-self.expression.constant)
    }
}

/// Objective function to minimize or maximize
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Objective {
    pub optimization_type: OptimizationType,
    pub expression: LinearExpression,
}

impl Objective {
    pub fn new(optimization_type: OptimizationType, expression: impl Into<LinearExpression>) -> Self {
        Self {
            optimization_type,
            expression: expression.into(),
        }
    }
}

/// Result of reading one engine report
///
/// `variable_values` is aligned with the model's variable order; `None` means
/// the engine reported nothing for that variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub status: SolutionStatus,
    pub objective_value: Option<f64>,
    pub variable_values: Vec<Option<f64>>,
    pub message: String,
}

impl Solution {
    pub fn new(status: SolutionStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            objective_value: None,
            variable_values: Vec::new(),
            message: message.into(),
        }
    }

    /// Inconclusive result with no values
    pub fn undefined(message: impl Into<String>) -> Self {
        Self::new(SolutionStatus::Undefined, message)
    }

    pub fn with_objective(mut self, value: Option<f64>) -> Self {
        self.objective_value = value;
        self
    }

    pub fn with_values(mut self, values: Vec<Option<f64>>) -> Self {
        self.variable_values = values;
        self
    }
}

/// Complete optimization problem together with its last solve result
#[derive(Debug, Clone)]
pub struct Model {
    pub(crate) name: String,
    pub(crate) variables: Vec<Variable>,
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) objective: Objective,
    names: HashSet<String>,
    status: SolutionStatus,
    objective_value: Option<f64>,
    values: Vec<Option<f64>>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    pub fn new() -> Self {
        Self {
            name: "model".to_string(),
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: Objective::default(),
            names: HashSet::new(),
            status: SolutionStatus::Undefined,
            objective_value: None,
            values: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, id: VariableId) -> Option<&Variable> {
        self.variables.get(id.0)
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Add a variable; an unnamed variable is called `x<n>` (1-based position).
    pub fn add_variable(&mut self, mut variable: Variable) -> Result<VariableId, ModelError> {
        let name = variable
            .name
            .take()
            .unwrap_or_else(|| format!("x{}", self.variables.len() + 1));

        if variable.lower_bound.is_nan()
            || variable.upper_bound.is_nan()
            || variable.lower_bound > variable.upper_bound
            || variable.lower_bound == f64::INFINITY
            || variable.upper_bound == f64::NEG_INFINITY
        {
            return Err(ModelError::InvalidVariableBounds {
                name,
                lower: variable.lower_bound,
                upper: variable.upper_bound,
            });
        }
        self.claim_name(&name)?;

        variable.name = Some(name);
        let id = VariableId(self.variables.len());
        self.variables.push(variable);
        self.values.push(None);

        tracing::debug!(
            component = "model",
            operation = "add_variable",
            index = id.0,
            name = self.variables[id.0].name(),
            "Added variable"
        );
        Ok(id)
    }

    /// Add a constraint; an unnamed constraint is called `c<n>` (1-based position).
    pub fn add_constraint(&mut self, mut constraint: Constraint) -> Result<usize, ModelError> {
        let name = constraint
            .name
            .take()
            .unwrap_or_else(|| format!("c{}", self.constraints.len() + 1));

        let relation = constraint
            .relation
            .normalized()
            .ok_or_else(|| ModelError::InvalidRelation {
                name: name.clone(),
                relation: constraint.relation,
            })?;
        let expression = self.normalize(constraint.expression)?;
        self.claim_name(&name)?;

        let index = self.constraints.len();
        self.constraints.push(Constraint {
            name: Some(name),
            expression,
            relation,
        });
        Ok(index)
    }

    /// Set the objective function.
    pub fn set_objective(&mut self, objective: Objective) -> Result<(), ModelError> {
        let expression = self.normalize(objective.expression)?;
        self.objective = Objective {
            optimization_type: objective.optimization_type,
            expression,
        };
        tracing::debug!(
            component = "model",
            operation = "set_objective",
            sense = ?objective.optimization_type,
            terms = self.objective.expression.terms.len(),
            "Set objective function"
        );
        Ok(())
    }

    pub fn maximize(&mut self, expression: impl Into<LinearExpression>) -> Result<(), ModelError> {
        self.set_objective(Objective::new(OptimizationType::Maximize, expression))
    }

    pub fn minimize(&mut self, expression: impl Into<LinearExpression>) -> Result<(), ModelError> {
        self.set_objective(Objective::new(OptimizationType::Minimize, expression))
    }

    pub fn status(&self) -> SolutionStatus {
        self.status
    }

    /// Objective value of the last solve, `None` when the engine reported none
    pub fn objective_value(&self) -> Option<f64> {
        self.objective_value
    }

    /// Value of `variable` from the last solve, `None` when unset
    pub fn value(&self, variable: VariableId) -> Option<f64> {
        self.values.get(variable.0).copied().flatten()
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Replace the whole solve-result state with `solution`.
    ///
    /// Variables missing from `solution` are reset to `None`, so nothing from
    /// an earlier solve survives. The objective constant is added to the
    /// engine-reported objective value.
    pub fn apply_solution(&mut self, solution: Solution) {
        let constant = self.objective.expression.constant;
        self.status = solution.status;
        self.objective_value = solution.objective_value.map(|v| v + constant);
        self.values = (0..self.variables.len())
            .map(|i| solution.variable_values.get(i).copied().flatten())
            .collect();
    }

    /// Reset the solve-result state, keeping variables, constraints and objective.
    pub fn clear(&mut self) {
        self.status = SolutionStatus::Undefined;
        self.objective_value = None;
        self.values = vec![None; self.variables.len()];
    }

    fn claim_name(&mut self, name: &str) -> Result<(), ModelError> {
        if !self.names.insert(name.to_string()) {
            return Err(ModelError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    /// Sort terms by variable order, merge duplicates and drop exact zeros.
    fn normalize(&self, expression: LinearExpression) -> Result<LinearExpression, ModelError> {
        if !expression.constant.is_finite() {
            return Err(ModelError::InvalidCoefficient {
                coefficient: expression.constant,
            });
        }

        let mut dense: Vec<Option<f64>> = vec![None; self.variables.len()];
        for (id, coefficient) in expression.terms {
            if !coefficient.is_finite() {
                return Err(ModelError::InvalidCoefficient { coefficient });
            }
            let slot = dense
                .get_mut(id.0)
                .ok_or(ModelError::UnknownVariable(id.0))?;
            *slot = Some(slot.unwrap_or(0.0) + coefficient);
        }

        let terms = dense
            .into_iter()
            .enumerate()
            .filter_map(|(i, c)| c.filter(|c| *c != 0.0).map(|c| (VariableId(i), c)))
            .collect();

        Ok(LinearExpression {
            terms,
            constant: expression.constant,
        })
    }
}
