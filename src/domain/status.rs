//! Translation of GLPK return codes and solution statuses.

use glpk::{ReturnCode, Status};

use crate::error::SolveError;

/// What a solver call produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Optimal,
    Suboptimal,
    Failed(SolveError),
    /// GLPK broke its documented contract; carries the raw code
    Unexpected(i32),
}

fn basic_status(status: Status) -> Outcome {
    match status {
        Status::Optimal => Outcome::Optimal,
        Status::Feasible => Outcome::Suboptimal,
        Status::Infeasible | Status::NoFeasible => {
            Outcome::Failed(SolveError::ModelInfeasible)
        }
        Status::Unbounded => Outcome::Failed(SolveError::ModelUnbounded),
        Status::Undefined => Outcome::Failed(SolveError::NoFeasibleFound),
        Status::Other(code) => Outcome::Unexpected(code),
    }
}

/// Outcome of `glp_simplex` given its return code and the basic solution status
pub(crate) fn simplex_outcome(code: ReturnCode, status: Status) -> Outcome {
    match code {
        ReturnCode::Ok => basic_status(status),
        ReturnCode::IterationLimit | ReturnCode::TimeLimit if status.is_feasible() => {
            Outcome::Suboptimal
        }
        ReturnCode::IterationLimit | ReturnCode::TimeLimit => {
            Outcome::Failed(SolveError::Timeout)
        }
        ReturnCode::ObjectiveLowerLimit | ReturnCode::ObjectiveUpperLimit
            if status.is_feasible() =>
        {
            Outcome::Suboptimal
        }
        ReturnCode::ObjectiveLowerLimit | ReturnCode::ObjectiveUpperLimit => {
            Outcome::Failed(SolveError::BranchCutBreak)
        }
        ReturnCode::BadBasis
        | ReturnCode::SingularBasis
        | ReturnCode::IllConditioned
        | ReturnCode::Failure => Outcome::Failed(SolveError::NumericalFailure),
        ReturnCode::BadBounds | ReturnCode::NoPrimalFeasible => {
            Outcome::Failed(SolveError::ModelInfeasible)
        }
        ReturnCode::NoDualFeasible => Outcome::Failed(SolveError::ModelUnbounded),
        ReturnCode::Stopped => Outcome::Failed(SolveError::UserAbort),
        ReturnCode::RootNotOptimal | ReturnCode::MipGap => Outcome::Unexpected(code.raw()),
        ReturnCode::Other(raw) => Outcome::Unexpected(raw),
    }
}

/// Outcome of the LP relaxation solved ahead of branch-and-cut.
///
/// `None` means the relaxation is optimal and the search may start.
pub(crate) fn root_relaxation_outcome(code: ReturnCode, status: Status) -> Option<Outcome> {
    match (code, simplex_outcome(code, status)) {
        (ReturnCode::Ok, Outcome::Optimal) => None,
        (ReturnCode::IterationLimit | ReturnCode::TimeLimit, _) => {
            Some(Outcome::Failed(SolveError::Timeout))
        }
        (_, Outcome::Optimal | Outcome::Suboptimal) => {
            Some(Outcome::Failed(SolveError::FeasibleFound))
        }
        (_, outcome) => Some(outcome),
    }
}

/// Outcome of `glp_intopt` given its return code and the MIP solution status
pub(crate) fn branch_cut_outcome(code: ReturnCode, status: Status) -> Outcome {
    let incumbent = status.is_feasible();
    match code {
        ReturnCode::Ok => match status {
            Status::Optimal => Outcome::Optimal,
            Status::Feasible => Outcome::Suboptimal,
            Status::NoFeasible | Status::Undefined => {
                Outcome::Failed(SolveError::NoFeasibleFound)
            }
            Status::Infeasible => Outcome::Failed(SolveError::ModelInfeasible),
            Status::Unbounded => Outcome::Failed(SolveError::ModelUnbounded),
            Status::Other(raw) => Outcome::Unexpected(raw),
        },
        ReturnCode::MipGap => Outcome::Suboptimal,
        ReturnCode::TimeLimit | ReturnCode::IterationLimit if incumbent => Outcome::Suboptimal,
        ReturnCode::TimeLimit | ReturnCode::IterationLimit => Outcome::Failed(SolveError::Timeout),
        ReturnCode::Stopped if incumbent => Outcome::Suboptimal,
        ReturnCode::Stopped => Outcome::Failed(SolveError::UserAbort),
        ReturnCode::Failure | ReturnCode::RootNotOptimal => {
            Outcome::Failed(SolveError::BranchCutFail)
        }
        ReturnCode::ObjectiveLowerLimit | ReturnCode::ObjectiveUpperLimit => {
            Outcome::Failed(SolveError::BranchCutBreak)
        }
        ReturnCode::BadBasis | ReturnCode::SingularBasis | ReturnCode::IllConditioned => {
            Outcome::Failed(SolveError::NumericalFailure)
        }
        ReturnCode::BadBounds | ReturnCode::NoPrimalFeasible => {
            Outcome::Failed(SolveError::ModelInfeasible)
        }
        ReturnCode::NoDualFeasible => Outcome::Failed(SolveError::ModelUnbounded),
        ReturnCode::Other(raw) => Outcome::Unexpected(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simplex_success_tier() {
        assert_eq!(
            simplex_outcome(ReturnCode::Ok, Status::Optimal),
            Outcome::Optimal
        );
        assert_eq!(
            simplex_outcome(ReturnCode::Ok, Status::Feasible),
            Outcome::Suboptimal
        );
        assert_eq!(
            simplex_outcome(ReturnCode::TimeLimit, Status::Feasible),
            Outcome::Suboptimal
        );
    }

    #[test]
    fn test_simplex_failure_tier() {
        assert_eq!(
            simplex_outcome(ReturnCode::Ok, Status::NoFeasible),
            Outcome::Failed(SolveError::ModelInfeasible)
        );
        assert_eq!(
            simplex_outcome(ReturnCode::Ok, Status::Unbounded),
            Outcome::Failed(SolveError::ModelUnbounded)
        );
        assert_eq!(
            simplex_outcome(ReturnCode::TimeLimit, Status::Undefined),
            Outcome::Failed(SolveError::Timeout)
        );
        assert_eq!(
            simplex_outcome(ReturnCode::SingularBasis, Status::Undefined),
            Outcome::Failed(SolveError::NumericalFailure)
        );
        assert_eq!(
            simplex_outcome(ReturnCode::NoPrimalFeasible, Status::Undefined),
            Outcome::Failed(SolveError::ModelInfeasible)
        );
    }

    #[test]
    fn test_simplex_unknown_codes() {
        assert_eq!(
            simplex_outcome(ReturnCode::Other(42), Status::Optimal),
            Outcome::Unexpected(42)
        );
        assert_eq!(
            simplex_outcome(ReturnCode::Ok, Status::Other(9)),
            Outcome::Unexpected(9)
        );
    }

    #[test]
    fn test_root_relaxation() {
        assert_eq!(
            root_relaxation_outcome(ReturnCode::Ok, Status::Optimal),
            None
        );
        assert_eq!(
            root_relaxation_outcome(ReturnCode::TimeLimit, Status::Feasible),
            Some(Outcome::Failed(SolveError::Timeout))
        );
        assert_eq!(
            root_relaxation_outcome(ReturnCode::Ok, Status::Feasible),
            Some(Outcome::Failed(SolveError::FeasibleFound))
        );
        assert_eq!(
            root_relaxation_outcome(ReturnCode::Ok, Status::NoFeasible),
            Some(Outcome::Failed(SolveError::ModelInfeasible))
        );
    }

    #[test]
    fn test_branch_cut_stop_depends_on_incumbent() {
        assert_eq!(
            branch_cut_outcome(ReturnCode::Stopped, Status::Feasible),
            Outcome::Suboptimal
        );
        assert_eq!(
            branch_cut_outcome(ReturnCode::Stopped, Status::Undefined),
            Outcome::Failed(SolveError::UserAbort)
        );
        assert_eq!(
            branch_cut_outcome(ReturnCode::TimeLimit, Status::Undefined),
            Outcome::Failed(SolveError::Timeout)
        );
    }

    #[test]
    fn test_branch_cut_statuses() {
        assert_eq!(
            branch_cut_outcome(ReturnCode::Ok, Status::Optimal),
            Outcome::Optimal
        );
        assert_eq!(
            branch_cut_outcome(ReturnCode::Ok, Status::NoFeasible),
            Outcome::Failed(SolveError::NoFeasibleFound)
        );
        assert_eq!(
            branch_cut_outcome(ReturnCode::MipGap, Status::Feasible),
            Outcome::Suboptimal
        );
        assert_eq!(
            branch_cut_outcome(ReturnCode::RootNotOptimal, Status::Undefined),
            Outcome::Failed(SolveError::BranchCutFail)
        );
        assert_eq!(
            branch_cut_outcome(ReturnCode::Other(77), Status::Undefined),
            Outcome::Unexpected(77)
        );
    }
}
