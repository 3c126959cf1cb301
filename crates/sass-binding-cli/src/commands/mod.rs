//! Command implementations for the sassbind CLI
//!
//! Each command module handles the CLI interface and delegates to
//! sass-binding for the actual work.

pub mod compile;
pub mod styles;

use sass_binding::{ErrorKind, SassError};

/// Process exit code for a failed command.
///
/// Compile failures exit with 1, bad arguments with 2, unreadable input
/// with 3. Errors that did not come from the library (JSON parsing, writing
/// output) exit with 1.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<SassError>().map(SassError::kind) {
        Some(ErrorKind::Configuration | ErrorKind::TypeMismatch | ErrorKind::ValueRange) => 2,
        Some(ErrorKind::IoAccess) => 3,
        Some(ErrorKind::Compile) | None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let config = anyhow::Error::new(
            sass_binding::compile(&sass_binding::RawArgs::new()).unwrap_err(),
        );
        assert_eq!(exit_code(&config), 2);

        let io = anyhow::Error::new(
            sass_binding::compile(
                &sass_binding::RawArgs::new().keyword("filename", "/nonexistent/path.scss"),
            )
            .unwrap_err(),
        );
        assert_eq!(exit_code(&io), 3);

        assert_eq!(exit_code(&anyhow::anyhow!("write failed")), 1);
    }
}
