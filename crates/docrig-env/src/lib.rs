//! Setup-script loading for documentation builds.
//!
//! Documentation sources often expect project variables (version strings,
//! install paths) that a build normally picks up by sourcing a shell script.
//! This crate reads such a script as `NAME=value` assignments and yields the
//! resulting variables, so they can be merged into a child process
//! environment without spawning a shell.

pub mod env;
pub mod parser;

pub use env::SetupEnv;
pub use parser::{load_setup_file, parse_setup, SetupError};
