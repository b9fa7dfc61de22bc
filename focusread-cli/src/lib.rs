//! focusread CLI library
//!
//! This library provides the command-line interface for rendering plain
//! text with bionic emphasis, sentence highlighting and the other
//! focus-reading features of `focusread-engine`.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
