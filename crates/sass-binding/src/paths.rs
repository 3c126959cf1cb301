//! Include path joining.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! The engine takes its include paths as one string delimited by the
//! platform's path-list separator. Joining is done in three separate passes:
//! every element is validated first, then the exact output size is computed,
//! then the output is allocated once and filled.

use crate::error::SassError;
use crate::value::ArgValue;

/// Separator between entries of a joined include path list.
#[cfg(windows)]
pub const PATH_LIST_SEPARATOR: char = ';';
/// Separator between entries of a joined include path list.
#[cfg(not(windows))]
pub const PATH_LIST_SEPARATOR: char = ':';

/// Join path strings with [`PATH_LIST_SEPARATOR`].
///
/// `join_paths(&[])` is `""`, a single segment is returned as is.
pub fn join_paths<S: AsRef<str>>(segments: &[S]) -> String {
    join_validated(segments.iter().map(<S as AsRef<str>>::as_ref), segments.len())
}

/// Join a list-valued `include_paths` keyword.
///
/// Fails on the first element that is not a string, before anything is sized
/// or copied.
pub fn join_include_paths(segments: &[ArgValue]) -> Result<String, SassError> {
    if let Some(index) = segments.iter().position(|item| item.as_str().is_none()) {
        return Err(SassError::type_mismatch(format!(
            "include_paths must consist of only strings, but #{} is not a string",
            index
        )));
    }

    Ok(join_validated(
        segments.iter().filter_map(ArgValue::as_str),
        segments.len(),
    ))
}

/// Resolve the `include_paths` keyword into its joined form.
///
/// A string is taken as already joined and passed through untouched.
pub fn resolve_include_paths(value: Option<&ArgValue>) -> Result<String, SassError> {
    match value {
        None | Some(ArgValue::None) => Ok(String::new()),
        Some(ArgValue::Str(joined)) => Ok(joined.clone()),
        Some(ArgValue::Seq(items)) => join_include_paths(items),
        Some(_) => Err(SassError::type_mismatch(
            "include_paths must be a list or a colon-separated string",
        )),
    }
}

fn join_validated<'a, I>(segments: I, count: usize) -> String
where
    I: Iterator<Item = &'a str> + Clone,
{
    let size = segments.clone().map(str::len).sum::<usize>()
        + count.saturating_sub(1) * PATH_LIST_SEPARATOR.len_utf8();

    let mut joined = String::with_capacity(size);
    for (i, segment) in segments.enumerate() {
        if i > 0 {
            joined.push(PATH_LIST_SEPARATOR);
        }
        joined.push_str(segment);
    }

    debug_assert_eq!(joined.len(), size);
    joined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn sep() -> String {
        PATH_LIST_SEPARATOR.to_string()
    }

    #[test]
    fn test_join_empty() {
        assert_eq!(join_paths::<&str>(&[]), "");
    }

    #[test]
    fn test_join_single_has_no_delimiter() {
        assert_eq!(join_paths(&["a"]), "a");
    }

    #[test]
    fn test_join_many() {
        let expected = ["a", "b", "c"].join(&sep());
        assert_eq!(join_paths(&["a", "b", "c"]), expected);
    }

    #[cfg(unix)]
    #[test]
    fn test_join_uses_colon_on_unix() {
        assert_eq!(join_paths(&["a", "b", "c"]), "a:b:c");
    }

    #[test]
    fn test_joined_length_is_exact() {
        let segments = ["styles", "", "vendor/scss", "ünïcode"];
        let joined = join_paths(&segments);
        let expected = segments.iter().map(|s| s.len()).sum::<usize>() + 3 * sep().len();
        assert_eq!(joined.len(), expected);
        assert_eq!(joined.capacity(), expected);
    }

    #[test]
    fn test_non_string_element_reports_index() {
        let items = vec![
            ArgValue::from("a"),
            ArgValue::from("b"),
            ArgValue::Int(7),
            ArgValue::from("d"),
        ];
        let err = join_include_paths(&items).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        insta::assert_snapshot!(
            err.to_string(),
            @"include_paths must consist of only strings, but #2 is not a string"
        );
    }

    #[test]
    fn test_first_bad_element_wins() {
        let items = vec![ArgValue::None, ArgValue::Int(1)];
        let err = join_include_paths(&items).unwrap_err();
        assert!(err.to_string().ends_with("#0 is not a string"));
    }

    #[test]
    fn test_resolve_include_paths_variants() {
        assert_eq!(resolve_include_paths(None).unwrap(), "");
        assert_eq!(resolve_include_paths(Some(&ArgValue::None)).unwrap(), "");

        let prejoined = format!("x{}y", sep());
        assert_eq!(
            resolve_include_paths(Some(&ArgValue::from(prejoined.as_str()))).unwrap(),
            prejoined
        );

        let list = ArgValue::from(vec!["x", "y"]);
        assert_eq!(resolve_include_paths(Some(&list)).unwrap(), prejoined);
    }

    #[test]
    fn test_resolve_include_paths_rejects_other_types() {
        let err = resolve_include_paths(Some(&ArgValue::Bool(true))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(
            err.to_string(),
            "include_paths must be a list or a colon-separated string"
        );
    }
}
