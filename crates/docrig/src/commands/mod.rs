//! Command implementations.

pub mod build;
pub mod check;
pub mod clean;
pub mod init;
pub mod install;
pub mod probe;
