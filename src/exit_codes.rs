//! Process exit codes for the `vaultfmt` binary.
//!
//! Scripts can tell a note that could not be formatted apart from a broken
//! invocation or an aborted batch.

/// The command ran, or there was nothing to format.
pub const SUCCESS: i32 = 0;

/// The active note could not be formatted and was left untouched.
pub const FORMAT_FAILED: i32 = 1;

/// Settings, file access or batch failure.
pub const TOOL_ERROR: i32 = 2;

/// Exit with [`TOOL_ERROR`] after the error has been reported.
pub fn tool_error() -> ! {
    std::process::exit(TOOL_ERROR);
}
