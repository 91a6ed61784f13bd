//! Exit codes for the bipolar CLI

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// General error (unspecified)
pub const EXIT_ERROR: i32 = 1;

/// Conversion finished but at least one session or format failed
pub const EXIT_PARTIAL_FAILURE: i32 = 2;
