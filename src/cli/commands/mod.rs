//! Command implementations

pub mod completions;
pub mod config;
pub mod fields;
pub mod import;
pub mod init;
pub mod list;
