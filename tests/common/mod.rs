pub mod asserts;
pub mod fixtures;
pub mod generators;

pub use asserts::*;
pub use fixtures::*;
pub use generators::*;
