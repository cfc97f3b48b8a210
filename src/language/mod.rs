pub mod ast;
pub mod builder;
pub mod errors;

pub use builder::{build_expression, build_program};
