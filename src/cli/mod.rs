//! CLI module for copyloop - command-line interface.

pub mod commands;

pub use commands::Cli;
