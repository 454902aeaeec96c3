pub mod generate;
pub mod validate;

pub use generate::{generate, GenerateArgs};
pub use validate::{validate, ValidateArgs};
