//! Product rules: id validation and the error taxonomy shared by every layer.

pub mod error;
pub mod validation;

pub use error::*;
pub use validation::*;
