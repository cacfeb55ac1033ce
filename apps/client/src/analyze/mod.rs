pub mod submit;
pub mod validation;
