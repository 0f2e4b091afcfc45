//! `extern "C"` entry points GLPK calls back into.
//!
//! Each trampoline resolves its opaque argument through a registry and
//! never lets a panic unwind into C.

use std::ffi::{c_void, CStr};
use std::panic::{self, AssertUnwindSafe};

use glpk::SearchTree;
use libc::{c_char, c_int};

use crate::domain::registry::{CANCELS, LOGGERS};

/// Terminal hook: hands GLPK output to the registered logger
pub(crate) unsafe extern "C" fn forward_output(info: *mut c_void, text: *const c_char) -> c_int {
    let _ = panic::catch_unwind(AssertUnwindSafe(|| {
        if text.is_null() {
            return;
        }
        let Some(logger) = LOGGERS.resolve_ptr(info) else {
            return;
        };
        let message = unsafe { CStr::from_ptr(text) }.to_string_lossy();
        let message = message.trim_end();
        if !message.is_empty() {
            logger.print(message);
        }
    }));
    // non-zero keeps GLPK from also writing to stdout
    1
}

/// Search callback: stops branch-and-cut once the registered context is done
pub(crate) unsafe extern "C" fn poll_cancellation(tree: *mut SearchTree, info: *mut c_void) {
    let _ = panic::catch_unwind(AssertUnwindSafe(|| {
        let Some(ctx) = CANCELS.resolve_ptr(info) else {
            return;
        };
        if let Some(reason) = ctx.err() {
            log::debug!("terminating branch-and-cut: {}", reason);
            unsafe { glpk::terminate_search(tree) };
        }
    }));
}
