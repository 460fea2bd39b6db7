//! I/O helpers for loadplan commands.

pub mod config;
pub mod init;
pub mod plan_store;
pub mod scenario_file;
