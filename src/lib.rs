pub mod assembly;
pub mod build;
pub mod error;
pub mod geometry;
pub mod kernel;
pub mod math;
pub mod operations;
pub mod reactor;

pub use error::{Result, TokamakError};
