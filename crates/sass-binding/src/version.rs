//! Version reporting.
//!
//! Packagers can stamp a release identifier at build time through the
//! `SASS_BINDING_VERSION` environment variable; otherwise the Cargo package
//! version is reported.

/// Build-time override, if one was provided
const STAMPED_VERSION: Option<&str> = option_env!("SASS_BINDING_VERSION");

/// Get the version identifier exported alongside the style table
pub fn version() -> &'static str {
    match STAMPED_VERSION {
        Some(stamped) if !stamped.is_empty() => stamped,
        _ => cargo_version(),
    }
}

/// Get the Cargo package version (for internal use)
pub fn cargo_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let version = version();
        assert!(!version.is_empty(), "version should not be empty");
        if STAMPED_VERSION.is_none() {
            assert_eq!(version, cargo_version());
        }
    }

    #[test]
    fn test_cargo_version() {
        let version = cargo_version();
        assert!(!version.is_empty(), "Cargo version should not be empty");
    }
}
