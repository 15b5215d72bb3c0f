//! Wikimeta CLI library.
//!
//! This library provides the core functionality for the wikimeta command-line interface,
//! including configuration management, the front-matter document store, command execution,
//! and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod store;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use store::FrontMatterStore;
