use std::sync::Arc;
use std::time::Duration;

use glpk::{IntOptParams, SimplexMethod, SimplexParams, TerminalHookGuard};

use crate::domain::bridge;
use crate::domain::cancel::{CancelContext, CancelReason};
use crate::domain::registry::{CANCELS, LOGGERS};
use crate::domain::status::{self, Outcome};
use crate::error::{Error, Result, SolveError};
use crate::model::Model;
use crate::models::{SolveMethod, SolveStatus};
use crate::result::SolveResult;

impl Model {
    /// Solve with branch-and-cut if any variable is integer or binary,
    /// otherwise with the simplex method
    pub fn solve(&mut self) -> Result<SolveResult<'_>> {
        let method = self.preferred_method();
        self.run(method, SimplexMethod::Primal, None)
    }

    /// Solve the LP relaxation, ignoring integrality
    pub fn solve_simplex(&mut self) -> Result<SolveResult<'_>> {
        self.run(SolveMethod::Simplex, SimplexMethod::Primal, None)
    }

    /// Solve the LP relaxation with the dual simplex method, falling back to
    /// the primal method if the dual one fails
    pub fn solve_simplex_dual(&mut self) -> Result<SolveResult<'_>> {
        self.run(SolveMethod::Simplex, SimplexMethod::DualPrimal, None)
    }

    pub fn solve_branch_cut(&mut self) -> Result<SolveResult<'_>> {
        self.run(SolveMethod::BranchCut, SimplexMethod::Primal, None)
    }

    /// Like [`solve`](Self::solve), but stops once `ctx` is done.
    ///
    /// The deadline caps GLPK's time limit. An explicit cancel is polled by
    /// branch-and-cut at its own pace; the simplex method only honours the
    /// deadline. When the solve stops because of `ctx`, the error is
    /// [`Error::Canceled`] with the context's reason.
    pub fn solve_with_context(&mut self, ctx: &CancelContext) -> Result<SolveResult<'_>> {
        if let Some(reason) = ctx.err() {
            return Err(Error::Canceled(reason));
        }
        let method = self.preferred_method();
        match self.run(method, SimplexMethod::Primal, Some(ctx)) {
            Err(Error::Solve(err @ (SolveError::UserAbort | SolveError::Timeout))) => {
                Err(stopped_by(ctx, err))
            }
            other => other,
        }
    }

    fn preferred_method(&self) -> SolveMethod {
        if self.has_integer_variables() {
            SolveMethod::BranchCut
        } else {
            SolveMethod::Simplex
        }
    }

    fn run(
        &mut self,
        method: SolveMethod,
        simplex: SimplexMethod,
        ctx: Option<&CancelContext>,
    ) -> Result<SolveResult<'_>> {
        let outcome = self.execute(method, simplex, ctx);
        log::debug!(
            "{:?} on {:?} finished with {:?}",
            method,
            self.name(),
            outcome
        );
        let status = match outcome {
            Outcome::Optimal => SolveStatus::Optimal,
            Outcome::Suboptimal => SolveStatus::Suboptimal,
            Outcome::Failed(err) => return Err(err.into()),
            Outcome::Unexpected(code) => return Err(contract_violation(code)),
        };
        Ok(SolveResult::new(self, status, method))
    }

    fn execute(
        &mut self,
        method: SolveMethod,
        simplex: SimplexMethod,
        ctx: Option<&CancelContext>,
    ) -> Outcome {
        self.matrix.load_into(&mut self.problem);

        let logger = LOGGERS.register(Arc::clone(&self.settings.logger));
        // SAFETY: the registration outlives the hook, which is dropped first
        let _hook = unsafe { TerminalHookGuard::install(bridge::forward_output, logger.as_ptr()) };

        match method {
            SolveMethod::Simplex => self.run_simplex(simplex, ctx),
            SolveMethod::BranchCut => self.run_branch_cut(simplex, ctx),
        }
    }

    fn run_simplex(&mut self, simplex: SimplexMethod, ctx: Option<&CancelContext>) -> Outcome {
        let params = SimplexParams::new()
            .verbose(self.settings.verbose)
            .presolve(self.settings.presolve)
            .method(simplex)
            .time_limit(remaining(ctx));
        let code = self.problem.simplex(&params);
        status::simplex_outcome(code, self.problem.status())
    }

    fn run_branch_cut(&mut self, simplex: SimplexMethod, ctx: Option<&CancelContext>) -> Outcome {
        let Some(replaced) = self.round_integral_bounds() else {
            return Outcome::Failed(SolveError::ModelInfeasible);
        };
        let outcome = self.search(simplex, ctx);
        self.restore_bounds(replaced);
        outcome
    }

    fn search(&mut self, simplex: SimplexMethod, ctx: Option<&CancelContext>) -> Outcome {
        // without the MIP presolver glp_intopt needs an optimal basis
        if !self.settings.presolve {
            let params = SimplexParams::new()
                .verbose(self.settings.verbose)
                .method(simplex)
                .time_limit(remaining(ctx));
            let code = self.problem.simplex(&params);
            if let Some(outcome) = status::root_relaxation_outcome(code, self.problem.status()) {
                return outcome;
            }
        }

        let cancel = ctx.map(|ctx| CANCELS.register(ctx.clone()));
        let mut params = IntOptParams::new()
            .verbose(self.settings.verbose)
            .presolve(self.settings.presolve)
            .time_limit(remaining(ctx));
        if let Some(registration) = &cancel {
            let info = registration.as_ptr();
            // SAFETY: `cancel` is alive until intopt returns
            params = unsafe { params.callback(bridge::poll_cancellation, info) };
        }
        let code = self.problem.intopt(&params);
        status::branch_cut_outcome(code, self.problem.mip_status())
    }
}

fn remaining(ctx: Option<&CancelContext>) -> Option<Duration> {
    ctx.and_then(CancelContext::remaining)
}

/// Error for a solve under `ctx` that stopped early.
///
/// GLPK's time limit is the deadline truncated to whole milliseconds, so a
/// timeout can fire just before `ctx` reports the deadline as passed.
fn stopped_by(ctx: &CancelContext, err: SolveError) -> Error {
    match ctx.err() {
        Some(reason) => Error::Canceled(reason),
        None if err == SolveError::Timeout && ctx.deadline().is_some() => {
            Error::Canceled(CancelReason::DeadlineExceeded)
        }
        None => Error::Solve(err),
    }
}

fn contract_violation(code: i32) -> Error {
    log::error!("GLPK returned undocumented outcome code {}", code);
    if cfg!(debug_assertions) {
        panic!("GLPK returned undocumented outcome code {}", code);
    }
    Error::ContractViolation { code }
}
