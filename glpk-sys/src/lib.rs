#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(dead_code)]

//! Low-level FFI bindings to GLPK
//!
//! This crate provides unsafe FFI bindings to the GNU Linear Programming Kit.
//! For safe bindings, use the `glpk` crate instead.

include!(concat!(env!("OUT_DIR"), "/bindings.rs"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_problem() {
        unsafe {
            let prob = glp_create_prob();
            assert!(!prob.is_null());
            assert_eq!(glp_get_num_cols(prob), 0);
            glp_delete_prob(prob);
        }
    }

    #[test]
    fn test_constants() {
        assert_eq!(GLP_MIN, 1);
        assert_eq!(GLP_MAX, 2);
        assert_eq!(GLP_FX, 5);
        assert_eq!(GLP_OPT, 5);
    }
}
