//! Command implementations.

pub mod completion;
pub mod extract;
pub mod fetch;
pub mod run;
pub mod validate;
