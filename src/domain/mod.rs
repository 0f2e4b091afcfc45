pub mod bounds;
pub(crate) mod bridge;
pub mod cancel;
pub(crate) mod matrix;
pub mod registry;
pub(crate) mod status;
pub(crate) mod validate;
