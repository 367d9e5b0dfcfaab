//! Macros for common CLI error handling patterns.

/// Turn a command handler's result into an exit code.
///
/// Errors are written to the given stream as `Error: ...` before
/// returning [`crate::exit_code::ERROR`].
///
/// # Examples
///
/// ```ignore
/// let code = exit_code_for!(err, handle_cfg_command(out, err));
/// ```
#[macro_export]
macro_rules! exit_code_for {
    ($err:expr, $result:expr) => {
        match $result {
            Ok(()) => $crate::exit_code::SUCCESS,
            Err(e) => {
                let _ = writeln!($err, "Error: {}", e);
                $crate::exit_code::ERROR
            }
        }
    };
}
