//! Stable exit codes for loadplan CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Unreadable or malformed input, invalid settings or plan, or other I/O errors.
pub const INVALID: i32 = 1;
/// The scenario was rejected before any plan was built.
pub const CONFIGURATION: i32 = 2;
