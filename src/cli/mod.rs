pub mod args;
pub mod compile;

pub use args::{Cli, Commands};
