use std::ffi::CString;

use crate::error::ModelError;
use crate::model::{ModelId, Variable};

/// Longest name GLPK accepts, in bytes
pub(crate) const MAX_NAME_LEN: usize = 255;

pub(crate) fn validate_arity(variables: usize, coefficients: usize) -> Result<(), ModelError> {
    if variables != coefficients {
        return Err(ModelError::ArityMismatch {
            variables,
            coefficients,
        });
    }
    Ok(())
}

/// Every variable must come from `model` and refer to an existing column
pub(crate) fn validate_ownership(
    model: ModelId,
    count: usize,
    variables: &[Variable],
) -> Result<(), ModelError> {
    for variable in variables {
        if variable.model != model || variable.index >= count {
            return Err(ModelError::ForeignVariable {
                index: variable.index,
            });
        }
    }
    Ok(())
}

/// Names GLPK would abort on are rejected here
pub(crate) fn validate_name(name: &str) -> Result<CString, ModelError> {
    if name.len() > MAX_NAME_LEN {
        return Err(ModelError::InvalidName(format!(
            "name is {} bytes long, at most {} allowed",
            name.len(),
            MAX_NAME_LEN
        )));
    }
    if name.bytes().any(|byte| byte.is_ascii_control()) {
        let reason = format!("{:?} contains a control character", name);
        return Err(ModelError::InvalidName(reason));
    }
    CString::new(name).map_err(|_| {
        let reason = format!("{:?} contains a NUL byte", name);
        ModelError::InvalidName(reason)
    })
}
