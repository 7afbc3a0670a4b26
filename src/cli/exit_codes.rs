//! exit codes for media-minmax commands
//!
//! these follow Unix conventions where 0 = success and non-zero = error
//! specific codes help scripts distinguish between failure types

/// command completed successfully
pub const SUCCESS: i32 = 0;

/// general or unknown error
pub const ERROR: i32 = 1;

/// `transform --check` found range syntax that would be rewritten
pub const CHECK_FAILED: i32 = 2;

/// invalid command-line arguments
pub const INVALID_ARGS: i32 = 3;

/// configuration file error
pub const CONFIG_ERROR: i32 = 4;

/// reading or writing a stylesheet failed
pub const IO_ERROR: i32 = 5;
