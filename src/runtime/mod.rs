pub mod environment;
pub mod error;
pub mod interpreter;
pub mod stack;
pub mod value;

pub use environment::Environment;
pub use error::{RuntimeError, RuntimeResult};
pub use interpreter::{evaluate, Interpreter, Options};
pub use value::Value;
