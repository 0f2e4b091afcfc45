use crate::{millis, SearchCallback, SimplexMethod};
use glpk_sys::*;
use libc::c_int;
use std::ffi::c_void;
use std::time::Duration;

fn message_level(verbose: bool) -> c_int {
    if verbose {
        GLP_MSG_ON
    } else {
        GLP_MSG_OFF
    }
}

fn flag(enabled: bool) -> c_int {
    if enabled {
        GLP_ON
    } else {
        GLP_OFF
    }
}

/// Control parameters for `glp_simplex`
///
/// Starts from GLPK's defaults with messages turned off.
pub struct SimplexParams {
    raw: glp_smcp,
}

impl SimplexParams {
    pub fn new() -> Self {
        let mut raw = glp_smcp::default();
        unsafe {
            glp_init_smcp(&mut raw);
        }
        raw.msg_lev = GLP_MSG_OFF;
        SimplexParams { raw }
    }

    /// Emit progress and result messages
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.raw.msg_lev = message_level(verbose);
        self
    }

    /// Run the LP presolver first
    pub fn presolve(mut self, presolve: bool) -> Self {
        self.raw.presolve = flag(presolve);
        self
    }

    pub fn method(mut self, method: SimplexMethod) -> Self {
        self.raw.meth = method.raw();
        self
    }

    /// Wall-clock limit; `None` means unlimited
    pub fn time_limit(mut self, limit: Option<Duration>) -> Self {
        self.raw.tm_lim = limit.map_or(c_int::MAX, millis);
        self
    }

    pub(crate) fn as_ptr(&self) -> *const glp_smcp {
        &self.raw
    }
}

impl Default for SimplexParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Control parameters for `glp_intopt`
///
/// Starts from GLPK's defaults with messages turned off.
pub struct IntOptParams {
    raw: glp_iocp,
}

impl IntOptParams {
    pub fn new() -> Self {
        let mut raw = glp_iocp::default();
        unsafe {
            glp_init_iocp(&mut raw);
        }
        raw.msg_lev = GLP_MSG_OFF;
        IntOptParams { raw }
    }

    /// Emit progress and result messages
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.raw.msg_lev = message_level(verbose);
        self
    }

    /// Run the MIP presolver, which also solves the LP relaxation.
    /// Without it the problem must already hold an optimal basis.
    pub fn presolve(mut self, presolve: bool) -> Self {
        self.raw.presolve = flag(presolve);
        self
    }

    /// Wall-clock limit; `None` means unlimited
    pub fn time_limit(mut self, limit: Option<Duration>) -> Self {
        self.raw.tm_lim = limit.map_or(c_int::MAX, millis);
        self
    }

    /// Register a callback invoked at every search event.
    ///
    /// # Safety
    ///
    /// `info` must stay valid for `callback` for as long as these
    /// parameters are passed to [`Problem::intopt`](crate::Problem::intopt).
    pub unsafe fn callback(mut self, callback: SearchCallback, info: *mut c_void) -> Self {
        self.raw.cb_func = Some(callback);
        self.raw.cb_info = info;
        self
    }

    pub(crate) fn as_ptr(&self) -> *const glp_iocp {
        &self.raw
    }
}

impl Default for IntOptParams {
    fn default() -> Self {
        Self::new()
    }
}
