use thiserror::Error;

use crate::domain::cancel::CancelReason;

/// Result type for model building and solving
pub type Result<T> = std::result::Result<T, Error>;

/// Problems detected locally, before GLPK is called
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Variable and coefficient lists differ in length
    #[error("got {variables} variables but {coefficients} coefficients")]
    ArityMismatch { variables: usize, coefficients: usize },

    /// The variable was created by a different model
    #[error("variable {index} does not belong to this model")]
    ForeignVariable { index: usize },

    /// Name GLPK cannot store
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// NaN or inverted bound
    #[error("invalid bounds [{lower}, {upper}]")]
    InvalidBound { lower: f64, upper: f64 },

    /// Row and column counts only grow
    #[error("cannot reduce {what} count from {current} to {requested}: not supported")]
    NotSupported {
        what: &'static str,
        current: usize,
        requested: usize,
    },

    /// Branch-and-cut leaves no dual solution behind
    #[error("dual values are only available after the simplex method")]
    DualUnavailable,

    /// A construction option was rejected
    #[error("invalid option: {0}")]
    InvalidOption(String),
}

/// Solver outcomes that yield no usable solution
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    #[error("model is infeasible")]
    ModelInfeasible,
    #[error("model is unbounded")]
    ModelUnbounded,
    #[error("model is degenerate")]
    ModelDegenerate,
    #[error("numerical failure while solving")]
    NumericalFailure,
    #[error("aborted by user abort function")]
    UserAbort,
    #[error("timeout occurred before any integer solution could be found")]
    Timeout,
    #[error("branch-and-cut failure")]
    BranchCutFail,
    #[error("branch-and-cut stopped at breakpoint")]
    BranchCutBreak,
    #[error("feasible but non-integer solution found")]
    FeasibleFound,
    #[error("no feasible solution found")]
    NoFeasibleFound,
    #[error("ran out of memory while solving")]
    NoMemory,
    #[error("model was presolved")]
    Presolved,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Solve(#[from] SolveError),

    /// The solve was stopped through its [`CancelContext`](crate::CancelContext)
    #[error("solve canceled: {0}")]
    Canceled(CancelReason),

    /// GLPK reported an outcome this crate does not know
    #[error("solver returned unknown outcome code {code}")]
    ContractViolation { code: i32 },
}
