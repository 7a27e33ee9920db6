//! # fbot-cli
//!
//! The `fliegerbier` binary's building blocks: argument parsing, config loading and the
//! bundled actions wired into a handler chain.

pub mod actions;
pub mod cli;

pub use actions::build_chain;
pub use cli::{load_config, Cli, Commands};
