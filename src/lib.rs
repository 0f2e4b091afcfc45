//! Linear and mixed-integer programming models solved with GLPK.
//!
//! Variables, bounds, an objective and linear constraints are declared on a
//! [`Model`] using 0-based handles. The model translates them into GLPK's
//! 1-based column/row representation, runs the simplex method or
//! branch-and-cut, and maps GLPK's return codes to [`SolveStatus`] or a
//! typed [`Error`].
//!
//! ```
//! use glpk_model::{Direction, Model, SolveStatus, VariableKind};
//!
//! let mut model = Model::new("mip", Direction::Maximize)?;
//! let x1 = model.add_defined_variable("x1", VariableKind::Continuous, 1.0, 0.0, 40.0)?;
//! let x2 = model.add_defined_variable("x2", VariableKind::Continuous, 2.0, 0.0, f64::INFINITY)?;
//! let x3 = model.add_defined_variable("x3", VariableKind::Continuous, 3.0, 0.0, f64::INFINITY)?;
//! let x4 = model.add_defined_variable("x4", VariableKind::Integer, 1.0, 2.0, 3.0)?;
//!
//! model.add_constraint(0.0, 20.0, &[x1, x2, x3, x4], &[-1.0, 1.0, 1.0, 10.0])?;
//! model.add_constraint(0.0, 30.0, &[x1, x2, x3], &[1.0, -3.0, 1.0])?;
//! model.add_constraint(0.0, 0.0, &[x2, x4], &[1.0, -3.5])?;
//!
//! let result = model.solve()?;
//! assert_eq!(result.status(), SolveStatus::Optimal);
//! assert!((result.objective_value() - 122.5).abs() < 1e-7);
//! assert!((result.value(x4)? - 3.0).abs() < 1e-7);
//! # Ok::<(), glpk_model::Error>(())
//! ```
//!
//! GLPK keeps per-thread state, so a [`Model`] is neither `Send` nor `Sync`.
//! Build and solve each model on one thread; separate models on separate
//! threads are independent.

pub mod config;
pub mod domain;
pub mod error;
pub mod logger;
pub mod model;
pub mod models;
pub mod option;
pub mod result;
mod solve;

pub use config::SolverConfig;
pub use domain::bounds::Bound;
pub use domain::cancel::{CancelContext, CancelReason};
pub use domain::registry::registries_are_empty;
pub use error::{Error, ModelError, Result, SolveError};
pub use logger::{LogForwarder, Logger, NoopLogger};
pub use model::{Model, Variable};
pub use models::{Direction, Solution, SolveMethod, SolveStatus, VariableKind};
pub use option::{
    with_config, with_env_config, with_logger, with_presolve, with_shared_logger, with_verbose,
    ModelOption, Settings,
};
pub use result::SolveResult;
