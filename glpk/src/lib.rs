//! Safe Rust bindings for GLPK (GNU Linear Programming Kit)
//!
//! This crate provides a safe, idiomatic Rust interface over `glpk-sys`.
//! Rows and columns keep GLPK's 1-based numbering; callers translate.
//!
//! GLPK keeps its environment in thread-local storage, so a [`Problem`] is
//! neither `Send` nor `Sync`.

use glpk_sys::*;
use libc::{c_char, c_int};
use std::ffi::{c_void, CStr};
use std::marker::PhantomData;
use std::ptr;
use std::time::Duration;

mod params;

pub use params::{IntOptParams, SimplexParams};

/// Search tree handed to branch-and-cut callbacks
pub type SearchTree = glp_tree;

/// Callback invoked by `glp_intopt` at each search event
pub type SearchCallback = unsafe extern "C" fn(tree: *mut SearchTree, info: *mut c_void);

/// Hook receiving everything GLPK would print to the terminal.
/// A non-zero return value suppresses the default output.
pub type TerminalHook = unsafe extern "C" fn(info: *mut c_void, text: *const c_char) -> c_int;

/// Optimization direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

impl Sense {
    fn raw(self) -> c_int {
        match self {
            Sense::Minimize => GLP_MIN,
            Sense::Maximize => GLP_MAX,
        }
    }
}

impl From<c_int> for Sense {
    fn from(raw: c_int) -> Self {
        match raw {
            GLP_MAX => Sense::Maximize,
            _ => Sense::Minimize,
        }
    }
}

/// Row/column bound type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundType {
    /// -inf < x < +inf
    Free,
    /// lb <= x < +inf
    Lower,
    /// -inf < x <= ub
    Upper,
    /// lb <= x <= ub
    Double,
    /// x = lb = ub
    Fixed,
}

impl BoundType {
    fn raw(self) -> c_int {
        match self {
            BoundType::Free => GLP_FR,
            BoundType::Lower => GLP_LO,
            BoundType::Upper => GLP_UP,
            BoundType::Double => GLP_DB,
            BoundType::Fixed => GLP_FX,
        }
    }
}

impl From<c_int> for BoundType {
    fn from(raw: c_int) -> Self {
        match raw {
            GLP_LO => BoundType::Lower,
            GLP_UP => BoundType::Upper,
            GLP_DB => BoundType::Double,
            GLP_FX => BoundType::Fixed,
            _ => BoundType::Free,
        }
    }
}

/// Simplex algorithm used by `glp_simplex`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimplexMethod {
    #[default]
    Primal,
    /// Dual simplex, falling back to the primal method if it fails
    DualPrimal,
    Dual,
}

impl SimplexMethod {
    fn raw(self) -> c_int {
        match self {
            SimplexMethod::Primal => GLP_PRIMAL,
            SimplexMethod::DualPrimal => GLP_DUALP,
            SimplexMethod::Dual => GLP_DUAL,
        }
    }
}

/// Column kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Continuous,
    Integer,
    /// Integer column GLPK clamps to [0, 1]
    Binary,
}

impl ColumnKind {
    fn raw(self) -> c_int {
        match self {
            ColumnKind::Continuous => GLP_CV,
            ColumnKind::Integer => GLP_IV,
            ColumnKind::Binary => GLP_BV,
        }
    }
}

impl From<c_int> for ColumnKind {
    fn from(raw: c_int) -> Self {
        match raw {
            GLP_IV => ColumnKind::Integer,
            GLP_BV => ColumnKind::Binary,
            _ => ColumnKind::Continuous,
        }
    }
}

/// Status of a basic or MIP solution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Undefined,
    Feasible,
    Infeasible,
    NoFeasible,
    Optimal,
    Unbounded,
    Other(i32),
}

impl Status {
    pub fn raw(self) -> i32 {
        match self {
            Status::Undefined => GLP_UNDEF,
            Status::Feasible => GLP_FEAS,
            Status::Infeasible => GLP_INFEAS,
            Status::NoFeasible => GLP_NOFEAS,
            Status::Optimal => GLP_OPT,
            Status::Unbounded => GLP_UNBND,
            Status::Other(code) => code,
        }
    }

    /// True when the solution satisfies every constraint
    pub fn is_feasible(self) -> bool {
        matches!(self, Status::Feasible | Status::Optimal)
    }
}

impl From<c_int> for Status {
    fn from(raw: c_int) -> Self {
        match raw {
            GLP_UNDEF => Status::Undefined,
            GLP_FEAS => Status::Feasible,
            GLP_INFEAS => Status::Infeasible,
            GLP_NOFEAS => Status::NoFeasible,
            GLP_OPT => Status::Optimal,
            GLP_UNBND => Status::Unbounded,
            other => Status::Other(other),
        }
    }
}

/// Return code of `glp_simplex` / `glp_intopt`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnCode {
    Ok,
    /// GLP_EBADB: invalid initial basis
    BadBasis,
    /// GLP_ESING: singular basis matrix
    SingularBasis,
    /// GLP_ECOND: ill-conditioned basis matrix
    IllConditioned,
    /// GLP_EBOUND: incorrect double bounds
    BadBounds,
    /// GLP_EFAIL: solver failure
    Failure,
    /// GLP_EOBJLL: objective lower limit reached
    ObjectiveLowerLimit,
    /// GLP_EOBJUL: objective upper limit reached
    ObjectiveUpperLimit,
    /// GLP_EITLIM: iteration limit exceeded
    IterationLimit,
    /// GLP_ETMLIM: time limit exceeded
    TimeLimit,
    /// GLP_ENOPFS: no primal feasible solution
    NoPrimalFeasible,
    /// GLP_ENODFS: no dual feasible solution
    NoDualFeasible,
    /// GLP_EROOT: root LP optimum not provided
    RootNotOptimal,
    /// GLP_ESTOP: search terminated by the application
    Stopped,
    /// GLP_EMIPGAP: relative MIP gap tolerance reached
    MipGap,
    Other(i32),
}

impl ReturnCode {
    pub fn raw(self) -> i32 {
        match self {
            ReturnCode::Ok => 0,
            ReturnCode::BadBasis => GLP_EBADB,
            ReturnCode::SingularBasis => GLP_ESING,
            ReturnCode::IllConditioned => GLP_ECOND,
            ReturnCode::BadBounds => GLP_EBOUND,
            ReturnCode::Failure => GLP_EFAIL,
            ReturnCode::ObjectiveLowerLimit => GLP_EOBJLL,
            ReturnCode::ObjectiveUpperLimit => GLP_EOBJUL,
            ReturnCode::IterationLimit => GLP_EITLIM,
            ReturnCode::TimeLimit => GLP_ETMLIM,
            ReturnCode::NoPrimalFeasible => GLP_ENOPFS,
            ReturnCode::NoDualFeasible => GLP_ENODFS,
            ReturnCode::RootNotOptimal => GLP_EROOT,
            ReturnCode::Stopped => GLP_ESTOP,
            ReturnCode::MipGap => GLP_EMIPGAP,
            ReturnCode::Other(code) => code,
        }
    }
}

impl From<c_int> for ReturnCode {
    fn from(raw: c_int) -> Self {
        match raw {
            0 => ReturnCode::Ok,
            GLP_EBADB => ReturnCode::BadBasis,
            GLP_ESING => ReturnCode::SingularBasis,
            GLP_ECOND => ReturnCode::IllConditioned,
            GLP_EBOUND => ReturnCode::BadBounds,
            GLP_EFAIL => ReturnCode::Failure,
            GLP_EOBJLL => ReturnCode::ObjectiveLowerLimit,
            GLP_EOBJUL => ReturnCode::ObjectiveUpperLimit,
            GLP_EITLIM => ReturnCode::IterationLimit,
            GLP_ETMLIM => ReturnCode::TimeLimit,
            GLP_ENOPFS => ReturnCode::NoPrimalFeasible,
            GLP_ENODFS => ReturnCode::NoDualFeasible,
            GLP_EROOT => ReturnCode::RootNotOptimal,
            GLP_ESTOP => ReturnCode::Stopped,
            GLP_EMIPGAP => ReturnCode::MipGap,
            other => ReturnCode::Other(other),
        }
    }
}

/// A GLPK problem object
///
/// Released with `glp_delete_prob` when dropped.
pub struct Problem {
    ptr: *mut glp_prob,
}

impl Problem {
    /// Create an empty problem
    pub fn new() -> Self {
        unsafe {
            let ptr = glp_create_prob();
            assert!(!ptr.is_null(), "glp_create_prob returned null");
            Problem { ptr }
        }
    }

    /// Set the problem name. An empty name removes it.
    pub fn set_name(&mut self, name: &CStr) {
        unsafe {
            glp_set_prob_name(self.ptr, name.as_ptr());
        }
    }

    /// Get the problem name (empty if unset)
    pub fn name(&self) -> String {
        unsafe { owned_name(glp_get_prob_name(self.ptr)) }
    }

    pub fn set_sense(&mut self, sense: Sense) {
        unsafe {
            glp_set_obj_dir(self.ptr, sense.raw());
        }
    }

    pub fn sense(&self) -> Sense {
        unsafe { Sense::from(glp_get_obj_dir(self.ptr)) }
    }

    /// Append `count` columns, returning the number of the first one
    pub fn add_cols(&mut self, count: usize) -> usize {
        let count = to_int(count);
        unsafe { glp_add_cols(self.ptr, count) as usize }
    }

    /// Append `count` rows, returning the number of the first one
    pub fn add_rows(&mut self, count: usize) -> usize {
        let count = to_int(count);
        unsafe { glp_add_rows(self.ptr, count) as usize }
    }

    pub fn num_cols(&self) -> usize {
        unsafe { glp_get_num_cols(self.ptr) as usize }
    }

    pub fn num_rows(&self) -> usize {
        unsafe { glp_get_num_rows(self.ptr) as usize }
    }

    pub fn set_col_name(&mut self, col: usize, name: &CStr) {
        let col = self.col(col);
        unsafe {
            glp_set_col_name(self.ptr, col, name.as_ptr());
        }
    }

    pub fn col_name(&self, col: usize) -> String {
        let col = self.col(col);
        unsafe { owned_name(glp_get_col_name(self.ptr, col)) }
    }

    pub fn set_col_bounds(&mut self, col: usize, kind: BoundType, lower: f64, upper: f64) {
        let col = self.col(col);
        unsafe {
            glp_set_col_bnds(self.ptr, col, kind.raw(), lower, upper);
        }
    }

    pub fn col_bound_type(&self, col: usize) -> BoundType {
        let col = self.col(col);
        unsafe { BoundType::from(glp_get_col_type(self.ptr, col)) }
    }

    /// Lower bound, `-f64::MAX` when unbounded below
    pub fn col_lower(&self, col: usize) -> f64 {
        let col = self.col(col);
        unsafe { glp_get_col_lb(self.ptr, col) }
    }

    /// Upper bound, `f64::MAX` when unbounded above
    pub fn col_upper(&self, col: usize) -> f64 {
        let col = self.col(col);
        unsafe { glp_get_col_ub(self.ptr, col) }
    }

    pub fn set_col_kind(&mut self, col: usize, kind: ColumnKind) {
        let col = self.col(col);
        unsafe {
            glp_set_col_kind(self.ptr, col, kind.raw());
        }
    }

    pub fn col_kind(&self, col: usize) -> ColumnKind {
        let col = self.col(col);
        unsafe { ColumnKind::from(glp_get_col_kind(self.ptr, col)) }
    }

    pub fn set_obj_coef(&mut self, col: usize, coefficient: f64) {
        let col = self.col(col);
        unsafe {
            glp_set_obj_coef(self.ptr, col, coefficient);
        }
    }

    pub fn obj_coef(&self, col: usize) -> f64 {
        let col = self.col(col);
        unsafe { glp_get_obj_coef(self.ptr, col) }
    }

    pub fn set_row_bounds(&mut self, row: usize, kind: BoundType, lower: f64, upper: f64) {
        let row = self.row(row);
        unsafe {
            glp_set_row_bnds(self.ptr, row, kind.raw(), lower, upper);
        }
    }

    pub fn row_bound_type(&self, row: usize) -> BoundType {
        let row = self.row(row);
        unsafe { BoundType::from(glp_get_row_type(self.ptr, row)) }
    }

    pub fn row_lower(&self, row: usize) -> f64 {
        let row = self.row(row);
        unsafe { glp_get_row_lb(self.ptr, row) }
    }

    pub fn row_upper(&self, row: usize) -> f64 {
        let row = self.row(row);
        unsafe { glp_get_row_ub(self.ptr, row) }
    }

    /// Replace the constraint matrix with the given triplets.
    ///
    /// Position 0 of each slice is ignored, as in `glp_load_matrix`.
    ///
    /// # Panics
    ///
    /// If the slices differ in length, are empty, or reference a row or
    /// column outside the problem.
    pub fn load_matrix(&mut self, rows: &[c_int], cols: &[c_int], values: &[f64]) {
        assert!(
            rows.len() == cols.len() && cols.len() == values.len(),
            "triplet arrays differ in length"
        );
        assert!(!rows.is_empty(), "triplet arrays must reserve position 0");
        let (num_rows, num_cols) = (self.num_rows(), self.num_cols());
        for (&i, &j) in rows.iter().zip(cols).skip(1) {
            assert!(
                i >= 1 && i as usize <= num_rows && j >= 1 && j as usize <= num_cols,
                "triplet ({}, {}) out of range",
                i,
                j
            );
        }
        let count = to_int(rows.len() - 1);
        unsafe {
            glp_load_matrix(
                self.ptr,
                count,
                rows.as_ptr(),
                cols.as_ptr(),
                values.as_ptr(),
            );
        }
    }

    /// Run the simplex method on the problem
    pub fn simplex(&mut self, params: &SimplexParams) -> ReturnCode {
        unsafe { ReturnCode::from(glp_simplex(self.ptr, params.as_ptr())) }
    }

    /// Run the branch-and-cut method on the problem
    pub fn intopt(&mut self, params: &IntOptParams) -> ReturnCode {
        unsafe { ReturnCode::from(glp_intopt(self.ptr, params.as_ptr())) }
    }

    /// Status of the basic solution
    pub fn status(&self) -> Status {
        unsafe { Status::from(glp_get_status(self.ptr)) }
    }

    pub fn obj_val(&self) -> f64 {
        unsafe { glp_get_obj_val(self.ptr) }
    }

    pub fn col_prim(&self, col: usize) -> f64 {
        let col = self.col(col);
        unsafe { glp_get_col_prim(self.ptr, col) }
    }

    pub fn col_dual(&self, col: usize) -> f64 {
        let col = self.col(col);
        unsafe { glp_get_col_dual(self.ptr, col) }
    }

    /// Status of the MIP solution
    pub fn mip_status(&self) -> Status {
        unsafe { Status::from(glp_mip_status(self.ptr)) }
    }

    pub fn mip_obj_val(&self) -> f64 {
        unsafe { glp_mip_obj_val(self.ptr) }
    }

    pub fn mip_col_val(&self, col: usize) -> f64 {
        let col = self.col(col);
        unsafe { glp_mip_col_val(self.ptr, col) }
    }

    fn col(&self, col: usize) -> c_int {
        assert!(
            col >= 1 && col <= self.num_cols(),
            "column {} out of range",
            col
        );
        col as c_int
    }

    fn row(&self, row: usize) -> c_int {
        assert!(
            row >= 1 && row <= self.num_rows(),
            "row {} out of range",
            row
        );
        row as c_int
    }
}

impl Clone for Problem {
    /// Deep copy including names, bounds, matrix and solutions
    fn clone(&self) -> Self {
        let copy = Problem::new();
        unsafe {
            glp_copy_prob(copy.ptr, self.ptr, GLP_ON);
        }
        copy
    }
}

impl Drop for Problem {
    fn drop(&mut self) {
        unsafe {
            if !self.ptr.is_null() {
                glp_delete_prob(self.ptr);
            }
        }
    }
}

impl Default for Problem {
    fn default() -> Self {
        Self::new()
    }
}

/// Redirects GLPK terminal output of the current thread while alive
pub struct TerminalHookGuard {
    // hooks are per-thread; removal must happen on the installing thread
    _marker: PhantomData<*mut ()>,
}

impl TerminalHookGuard {
    /// Install `hook` for the current thread.
    ///
    /// # Safety
    ///
    /// `info` must stay valid for `hook` until the guard is dropped.
    pub unsafe fn install(hook: TerminalHook, info: *mut c_void) -> Self {
        glp_term_hook(Some(hook), info);
        TerminalHookGuard {
            _marker: PhantomData,
        }
    }
}

impl Drop for TerminalHookGuard {
    fn drop(&mut self) {
        unsafe {
            glp_term_hook(None, ptr::null_mut());
        }
    }
}

/// Ask branch-and-cut to stop at the next opportunity.
///
/// # Safety
///
/// `tree` must be the pointer passed to the currently running search callback.
pub unsafe fn terminate_search(tree: *mut SearchTree) {
    glp_ios_terminate(tree);
}

/// Convert a time limit to GLPK milliseconds, saturating at `c_int::MAX`
pub(crate) fn millis(limit: Duration) -> c_int {
    c_int::try_from(limit.as_millis()).unwrap_or(c_int::MAX)
}

fn to_int(count: usize) -> c_int {
    c_int::try_from(count)
        .unwrap_or_else(|_| panic!("count {} exceeds GLPK limits", count))
}

unsafe fn owned_name(name: *const c_char) -> String {
    if name.is_null() {
        String::new()
    } else {
        CStr::from_ptr(name).to_string_lossy().into_owned()
    }
}
