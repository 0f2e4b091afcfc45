use std::collections::HashMap;

use crate::error::{ModelError, Result};
use crate::model::{Model, Variable};
use crate::models::{Solution, SolveMethod, SolveStatus};

/// Read-only view of the solution GLPK holds after a successful solve.
///
/// The result borrows its model, so the model cannot be changed or solved
/// again while the result is alive.
#[derive(Debug)]
pub struct SolveResult<'a> {
    model: &'a Model,
    status: SolveStatus,
    method: SolveMethod,
}

impl<'a> SolveResult<'a> {
    pub(crate) fn new(model: &'a Model, status: SolveStatus, method: SolveMethod) -> Self {
        SolveResult {
            model,
            status,
            method,
        }
    }

    /// `Suboptimal` means a feasible solution without proof of optimality
    pub fn status(&self) -> SolveStatus {
        self.status
    }

    pub fn method(&self) -> SolveMethod {
        self.method
    }

    pub fn model(&self) -> &'a Model {
        self.model
    }

    pub fn value(&self, variable: Variable) -> Result<f64> {
        self.primal_value(variable)
    }

    // Columns are addressed directly: variable i is GLPK column i + 1
    pub fn primal_value(&self, variable: Variable) -> Result<f64> {
        let col = self.model.check(variable)?;
        let problem = &self.model.problem;
        Ok(match self.method {
            SolveMethod::Simplex => problem.col_prim(col),
            SolveMethod::BranchCut => problem.mip_col_val(col),
        })
    }

    /// Reduced cost of the variable.
    ///
    /// Only simplex results carry one; after branch-and-cut the basic
    /// solution GLPK holds is stale or undefined, so this returns
    /// [`ModelError::DualUnavailable`].
    pub fn dual_value(&self, variable: Variable) -> Result<f64> {
        let col = self.model.check(variable)?;
        match self.method {
            SolveMethod::Simplex => Ok(self.model.problem.col_dual(col)),
            SolveMethod::BranchCut => Err(ModelError::DualUnavailable.into()),
        }
    }

    pub fn objective_value(&self) -> f64 {
        match self.method {
            SolveMethod::Simplex => self.model.problem.obj_val(),
            SolveMethod::BranchCut => self.model.problem.mip_obj_val(),
        }
    }

    /// Primal values of all variables, in creation order
    pub fn values(&self) -> Vec<f64> {
        let problem = &self.model.problem;
        (1..=self.model.variable_count())
            .map(|col| match self.method {
                SolveMethod::Simplex => problem.col_prim(col),
                SolveMethod::BranchCut => problem.mip_col_val(col),
            })
            .collect()
    }

    /// Owned copy keyed by variable name; later duplicates of a name win
    pub fn to_solution(&self) -> Solution {
        let problem = &self.model.problem;
        let values: HashMap<String, f64> = self
            .values()
            .into_iter()
            .enumerate()
            .map(|(index, value)| (problem.col_name(index + 1), value))
            .collect();
        Solution {
            status: self.status,
            method: self.method,
            objective: self.objective_value(),
            values,
        }
    }
}
