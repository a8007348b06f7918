//! Command line interface for the Lexgate binary.

pub mod args;
pub mod commands;

pub use args::*;
pub use commands::*;
