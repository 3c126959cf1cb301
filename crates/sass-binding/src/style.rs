//! Output style names and codes.
//!
//! Copyright (c) 2025 Posit, PBC

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::SassError;
use crate::value::ArgValue;

/// CSS formatting variant requested from the engine.
///
/// The discriminants are the codes exported through [`output_styles`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i32)]
pub enum OutputStyle {
    #[default]
    Nested = 0,
    Expanded = 1,
    Compact = 2,
    Compressed = 3,
}

impl OutputStyle {
    pub const ALL: [OutputStyle; 4] = [
        OutputStyle::Nested,
        OutputStyle::Expanded,
        OutputStyle::Compact,
        OutputStyle::Compressed,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OutputStyle::Nested => "nested",
            OutputStyle::Expanded => "expanded",
            OutputStyle::Compact => "compact",
            OutputStyle::Compressed => "compressed",
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }

    /// Exact, case-sensitive lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|style| style.name() == name)
    }
}

impl fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static OUTPUT_STYLES: Lazy<BTreeMap<&'static str, i32>> = Lazy::new(|| {
    OutputStyle::ALL
        .into_iter()
        .map(|style| (style.name(), style.code()))
        .collect()
});

/// Read-only name → code table of the supported output styles.
pub fn output_styles() -> &'static BTreeMap<&'static str, i32> {
    &OUTPUT_STYLES
}

/// Resolve the `output_style` keyword.
///
/// Absent or `None` selects [`OutputStyle::Nested`].
pub fn resolve_output_style(value: Option<&ArgValue>) -> Result<OutputStyle, SassError> {
    match value {
        None | Some(ArgValue::None) => Ok(OutputStyle::default()),
        Some(ArgValue::Str(name)) => OutputStyle::from_name(name)
            .ok_or_else(|| SassError::value_range("invalid output_style option")),
        Some(_) => Err(SassError::type_mismatch("output_style must be a string")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_known_names_resolve() {
        for (name, expected) in [
            ("nested", OutputStyle::Nested),
            ("expanded", OutputStyle::Expanded),
            ("compact", OutputStyle::Compact),
            ("compressed", OutputStyle::Compressed),
        ] {
            let style = resolve_output_style(Some(&ArgValue::from(name))).unwrap();
            assert_eq!(style, expected);
        }
    }

    #[test]
    fn test_absent_and_none_default_to_nested() {
        assert_eq!(resolve_output_style(None).unwrap(), OutputStyle::Nested);
        assert_eq!(
            resolve_output_style(Some(&ArgValue::None)).unwrap(),
            OutputStyle::Nested
        );
    }

    #[test]
    fn test_lookup_is_case_sensitive_and_exact() {
        for name in ["Nested", "foo", "nest", "compressedx", ""] {
            let err = resolve_output_style(Some(&ArgValue::from(name))).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValueRange, "name {:?}", name);
            assert_eq!(err.to_string(), "invalid output_style option");
        }
    }

    #[test]
    fn test_non_string_is_type_mismatch() {
        let err = resolve_output_style(Some(&ArgValue::Int(3))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        insta::assert_snapshot!(err.to_string(), @"output_style must be a string");
    }

    #[test]
    fn test_exported_table() {
        let table = output_styles();
        assert_eq!(table.len(), 4);
        assert_eq!(table.get("nested"), Some(&0));
        assert_eq!(table.get("expanded"), Some(&1));
        assert_eq!(table.get("compact"), Some(&2));
        assert_eq!(table.get("compressed"), Some(&3));
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&OutputStyle::Compressed).unwrap();
        assert_eq!(json, "\"compressed\"");
        let back: OutputStyle = serde_json::from_str("\"compact\"").unwrap();
        assert_eq!(back, OutputStyle::Compact);
    }
}
