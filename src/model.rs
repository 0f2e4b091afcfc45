use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use glpk::{ColumnKind, Problem};

use crate::domain::bounds::Bound;
use crate::domain::matrix::SparseMatrix;
use crate::domain::validate::{validate_arity, validate_name, validate_ownership};
use crate::error::{ModelError, Result};
use crate::logger::Logger;
use crate::models::{Direction, VariableKind};
use crate::option::{self, ModelOption, Settings};

/// Identity of a model, distinct for every construction and clone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ModelId(u64);

impl ModelId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        ModelId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to a decision variable of one [`Model`].
///
/// Handles are cheap to copy. A model rejects handles created by any other
/// model, including its own clones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variable {
    pub(crate) model: ModelId,
    pub(crate) index: usize,
}

impl Variable {
    /// 0-based position in the model
    pub fn index(&self) -> usize {
        self.index
    }

    /// GLPK column number
    pub(crate) fn col(&self) -> usize {
        self.index + 1
    }
}

/// A linear or mixed-integer program backed by a GLPK problem object.
///
/// Constraints are kept as triplets and loaded into GLPK when a solve
/// starts. GLPK state is thread-local, so a model stays on the thread that
/// created it.
pub struct Model {
    id: ModelId,
    pub(crate) problem: Problem,
    kinds: Vec<VariableKind>,
    names: HashSet<String>,
    pub(crate) matrix: SparseMatrix,
    pub(crate) settings: Settings,
}

impl Model {
    pub fn new(name: &str, direction: Direction) -> Result<Self> {
        Self::with_options(name, direction, Vec::new())
    }

    /// Build a model, applying `options` in order
    pub fn with_options<I>(name: &str, direction: Direction, options: I) -> Result<Self>
    where
        I: IntoIterator<Item = ModelOption>,
    {
        let settings = option::apply(options)?;
        let c_name = validate_name(name)?;

        let mut problem = Problem::new();
        problem.set_name(&c_name);
        problem.set_sense(direction.into());
        log::debug!(
            "created model {:?} ({:?}, {:?})",
            name,
            direction,
            settings
        );

        Ok(Model {
            id: ModelId::next(),
            problem,
            kinds: Vec::new(),
            names: HashSet::new(),
            matrix: SparseMatrix::new(),
            settings,
        })
    }

    pub fn name(&self) -> String {
        self.problem.name()
    }

    pub fn direction(&self) -> Direction {
        self.problem.sense().into()
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.problem.set_sense(direction.into());
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.settings.verbose = verbose;
    }

    pub fn set_presolve(&mut self, presolve: bool) {
        self.settings.presolve = presolve;
    }

    pub fn set_logger(&mut self, logger: Arc<dyn Logger>) {
        self.settings.logger = logger;
    }

    pub fn variable_count(&self) -> usize {
        debug_assert_eq!(self.kinds.len(), self.problem.num_cols());
        self.kinds.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.problem.num_rows()
    }

    /// Number of stored constraint coefficients
    pub fn nonzero_count(&self) -> usize {
        self.matrix.len()
    }

    /// All variables, in creation order
    pub fn variables(&self) -> Vec<Variable> {
        (0..self.kinds.len())
            .map(|index| self.handle(index))
            .collect()
    }

    pub fn variable(&self, index: usize) -> Option<Variable> {
        (index < self.kinds.len()).then(|| self.handle(index))
    }

    /// Continuous, unbounded, objective coefficient 1
    pub fn add_variable(&mut self, name: &str) -> Result<Variable> {
        self.add_defined_variable(
            name,
            VariableKind::Continuous,
            1.0,
            f64::NEG_INFINITY,
            f64::INFINITY,
        )
    }

    /// Bounded to `[0, 1]`, objective coefficient 1
    pub fn add_binary_variable(&mut self, name: &str) -> Result<Variable> {
        self.add_defined_variable(name, VariableKind::Binary, 1.0, 0.0, 1.0)
    }

    /// Unbounded integer, objective coefficient 1
    pub fn add_integer_variable(&mut self, name: &str) -> Result<Variable> {
        self.add_defined_variable(
            name,
            VariableKind::Integer,
            1.0,
            f64::NEG_INFINITY,
            f64::INFINITY,
        )
    }

    /// Add a column with every attribute given.
    ///
    /// An empty `name` is replaced by `V{index}`, suffixed until it is
    /// unused. Binary variables ignore `lower` and `upper`.
    pub fn add_defined_variable(
        &mut self,
        name: &str,
        kind: VariableKind,
        coefficient: f64,
        lower: f64,
        upper: f64,
    ) -> Result<Variable> {
        let bound = match kind {
            VariableKind::Binary => Bound::Double(0.0, 1.0),
            _ => Bound::encode(lower, upper)?,
        };
        let index = self.kinds.len();
        let name = if name.is_empty() {
            self.generated_name(index)
        } else {
            name.to_string()
        };
        let c_name = validate_name(&name)?;

        let col = self.problem.add_cols(1);
        debug_assert_eq!(col, index + 1);
        self.problem.set_col_name(col, &c_name);
        self.problem.set_col_kind(col, column_kind(kind));
        self.apply_bound(col, bound);
        self.problem.set_obj_coef(col, coefficient);

        log::debug!(
            "added {:?} variable {} as column {} with {:?}",
            kind,
            name,
            col,
            bound
        );
        self.kinds.push(kind);
        self.names.insert(name);
        Ok(self.handle(index))
    }

    pub fn variable_name(&self, variable: Variable) -> Result<String> {
        let col = self.check(variable)?;
        Ok(self.problem.col_name(col))
    }

    pub fn variable_kind(&self, variable: Variable) -> Result<VariableKind> {
        self.check(variable)?;
        Ok(self.kinds[variable.index])
    }

    /// Change the kind; switching to binary also resets bounds to `[0, 1]`
    pub fn set_variable_kind(&mut self, variable: Variable, kind: VariableKind) -> Result<()> {
        let col = self.check(variable)?;
        self.problem.set_col_kind(col, column_kind(kind));
        if kind == VariableKind::Binary {
            self.apply_bound(col, Bound::Double(0.0, 1.0));
        }
        self.kinds[variable.index] = kind;
        Ok(())
    }

    /// `(lower, upper)`, infinite on unbounded sides
    pub fn bounds(&self, variable: Variable) -> Result<(f64, f64)> {
        let col = self.check(variable)?;
        Ok(self.column_bound(col).interval())
    }

    /// Binary variables keep `[0, 1]`; the request is ignored for them
    pub fn set_bounds(&mut self, variable: Variable, lower: f64, upper: f64) -> Result<()> {
        let col = self.check(variable)?;
        let bound = Bound::encode(lower, upper)?;
        if self.kinds[variable.index] == VariableKind::Binary {
            log::debug!("ignoring bounds {:?} for binary column {}", bound, col);
            return Ok(());
        }
        self.apply_bound(col, bound);
        Ok(())
    }

    pub fn coefficient(&self, variable: Variable) -> Result<f64> {
        let col = self.check(variable)?;
        Ok(self.problem.obj_coef(col))
    }

    pub fn set_coefficient(&mut self, variable: Variable, coefficient: f64) -> Result<()> {
        let col = self.check(variable)?;
        self.problem.set_obj_coef(col, coefficient);
        Ok(())
    }

    /// Set the objective coefficient of each listed variable.
    /// Variables not listed keep their coefficient.
    pub fn set_objective_function(
        &mut self,
        coefficients: &[f64],
        variables: &[Variable],
    ) -> Result<()> {
        validate_arity(variables.len(), coefficients.len())?;
        validate_ownership(self.id, self.kinds.len(), variables)?;
        for (variable, &coefficient) in variables.iter().zip(coefficients) {
            self.problem.set_obj_coef(variable.col(), coefficient);
        }
        Ok(())
    }

    /// Add `lower <= sum(coefficients[i] * variables[i]) <= upper`.
    ///
    /// A row without finite bounds is kept as a free, non-binding row.
    pub fn add_constraint(
        &mut self,
        lower: f64,
        upper: f64,
        variables: &[Variable],
        coefficients: &[f64],
    ) -> Result<()> {
        validate_arity(variables.len(), coefficients.len())?;
        validate_ownership(self.id, self.kinds.len(), variables)?;
        let bound = Bound::encode(lower, upper)?;

        let row = self.problem.add_rows(1);
        let (kind, lb, ub) = bound.to_glpk();
        self.problem.set_row_bounds(row, kind, lb, ub);
        self.matrix.push_row(
            row,
            variables
                .iter()
                .map(Variable::col)
                .zip(coefficients.iter().copied()),
        );
        log::debug!(
            "added row {} with {:?} over {} variables",
            row,
            bound,
            variables.len()
        );
        Ok(())
    }

    /// Grow to `count` variables with default attributes; never shrinks
    pub fn set_variable_count(&mut self, count: usize) -> Result<()> {
        let current = self.variable_count();
        if count < current {
            return Err(ModelError::NotSupported {
                what: "variable",
                current,
                requested: count,
            }
            .into());
        }
        for _ in current..count {
            self.add_variable("")?;
        }
        Ok(())
    }

    /// Grow to `count` rows with free, empty rows; never shrinks
    pub fn set_constraint_count(&mut self, count: usize) -> Result<()> {
        let current = self.constraint_count();
        if count < current {
            return Err(ModelError::NotSupported {
                what: "constraint",
                current,
                requested: count,
            }
            .into());
        }
        if count > current {
            self.problem.add_rows(count - current);
        }
        Ok(())
    }

    /// True when branch-and-cut is needed
    pub fn has_integer_variables(&self) -> bool {
        self.kinds.iter().any(|kind| kind.is_integral())
    }

    pub(crate) fn check(&self, variable: Variable) -> Result<usize> {
        validate_ownership(self.id, self.kinds.len(), &[variable])?;
        Ok(variable.col())
    }

    fn handle(&self, index: usize) -> Variable {
        Variable {
            model: self.id,
            index,
        }
    }

    fn apply_bound(&mut self, col: usize, bound: Bound) {
        let (kind, lower, upper) = bound.to_glpk();
        self.problem.set_col_bounds(col, kind, lower, upper);
    }

    fn column_bound(&self, col: usize) -> Bound {
        Bound::decode(
            self.problem.col_bound_type(col),
            self.problem.col_lower(col),
            self.problem.col_upper(col),
        )
    }

    /// Round fractional bounds of integral columns inward, since
    /// `glp_intopt` refuses them.
    ///
    /// Returns the replaced bounds for [`restore_bounds`](Self::restore_bounds),
    /// or `None` without touching anything when an integral column admits no
    /// integer value.
    pub(crate) fn round_integral_bounds(&mut self) -> Option<Vec<(usize, Bound)>> {
        let mut rounded = Vec::new();
        for (index, kind) in self.kinds.iter().enumerate() {
            if !kind.is_integral() {
                continue;
            }
            let col = index + 1;
            let bound = self.column_bound(col);
            let inward = bound.round_inward()?;
            if inward != bound {
                rounded.push((col, bound, inward));
            }
        }
        let mut replaced = Vec::with_capacity(rounded.len());
        for (col, bound, inward) in rounded {
            log::debug!(
                "rounding bounds of column {} from {:?} to {:?}",
                col,
                bound,
                inward
            );
            self.apply_bound(col, inward);
            replaced.push((col, bound));
        }
        Some(replaced)
    }

    pub(crate) fn restore_bounds(&mut self, bounds: Vec<(usize, Bound)>) {
        for (col, bound) in bounds {
            self.apply_bound(col, bound);
        }
    }

    fn generated_name(&self, index: usize) -> String {
        let base = format!("V{}", index);
        if !self.names.contains(&base) {
            return base;
        }
        let mut suffix = 1;
        loop {
            let candidate = format!("{}_{}", base, suffix);
            if !self.names.contains(&candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }
}

fn column_kind(kind: VariableKind) -> ColumnKind {
    match kind {
        VariableKind::Continuous => ColumnKind::Continuous,
        VariableKind::Integer | VariableKind::Binary => ColumnKind::Integer,
    }
}

impl Clone for Model {
    /// Deep copy with a new identity; use [`Model::variables`] on the copy
    /// to obtain its handles
    fn clone(&self) -> Self {
        Model {
            id: ModelId::next(),
            problem: self.problem.clone(),
            kinds: self.kinds.clone(),
            names: self.names.clone(),
            matrix: self.matrix.clone(),
            settings: self.settings.clone(),
        }
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("name", &self.name())
            .field("direction", &self.direction())
            .field("variables", &self.kinds.len())
            .field("constraints", &self.constraint_count())
            .field("settings", &self.settings)
            .finish()
    }
}
