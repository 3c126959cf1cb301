//! Keyword validation for compile calls.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! [`resolve_arguments`] turns [`RawArgs`] into a [`CompilationRequest`]
//! (which source to compile) and [`CompilationOptions`] (how to compile it).
//! Checks run in a fixed order so that the first reported error is
//! predictable:
//!
//! 1. positional arguments are rejected
//! 2. at least one keyword must be present
//! 3. exactly one of `string`, `filename`, `dirname`
//! 4. `output_style`
//! 5. `include_paths`
//! 6. `image_path`
//! 7. the shape of the selected source value
//!
//! Nothing here touches the engine, so a failure needs no cleanup.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::SassError;
use crate::paths::resolve_include_paths;
use crate::style::{OutputStyle, resolve_output_style};
use crate::value::{ArgValue, RawArgs};

pub const KW_STRING: &str = "string";
pub const KW_FILENAME: &str = "filename";
pub const KW_DIRNAME: &str = "dirname";
pub const KW_OUTPUT_STYLE: &str = "output_style";
pub const KW_INCLUDE_PATHS: &str = "include_paths";
pub const KW_IMAGE_PATH: &str = "image_path";

const KNOWN_KEYWORDS: [&str; 6] = [
    KW_STRING,
    KW_FILENAME,
    KW_DIRNAME,
    KW_OUTPUT_STYLE,
    KW_INCLUDE_PATHS,
    KW_IMAGE_PATH,
];

const DEFAULT_IMAGE_PATH: &str = ".";

const MISSING_SOURCE: &str = "compile() requires one of string, filename, or dirname";
const DIRNAME_SHAPE: &str = "dirname must be a (search_path, output_path) pair";

/// What to compile. Exactly one source kind per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CompilationRequest {
    StringSource { content: String },
    FileSource { path: PathBuf },
    FolderSource {
        search_path: PathBuf,
        output_path: PathBuf,
    },
}

impl CompilationRequest {
    /// Name of the keyword that selected this request.
    pub fn keyword(&self) -> &'static str {
        match self {
            CompilationRequest::StringSource { .. } => KW_STRING,
            CompilationRequest::FileSource { .. } => KW_FILENAME,
            CompilationRequest::FolderSource { .. } => KW_DIRNAME,
        }
    }
}

/// How to compile, shared by all three source kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompilationOptions {
    pub style: OutputStyle,
    /// Already joined with [`crate::PATH_LIST_SEPARATOR`].
    pub include_paths: String,
    pub image_path: String,
}

impl Default for CompilationOptions {
    fn default() -> Self {
        Self {
            style: OutputStyle::default(),
            include_paths: String::new(),
            image_path: DEFAULT_IMAGE_PATH.to_string(),
        }
    }
}

/// Validate raw keyword input.
pub fn resolve_arguments(
    raw: &RawArgs,
) -> Result<(CompilationRequest, CompilationOptions), SassError> {
    if !raw.positional.is_empty() {
        return Err(SassError::configuration("compile() takes only keywords"));
    }
    if raw.keywords.is_empty() {
        return Err(SassError::configuration(MISSING_SOURCE));
    }

    for name in raw.keywords.keys() {
        if !KNOWN_KEYWORDS.contains(&name.as_str()) {
            warn!(keyword = %name, "ignoring unrecognized compile() keyword");
        }
    }

    let (source_keyword, source_value) = select_source(raw)?;

    let options = CompilationOptions {
        style: resolve_output_style(raw.get(KW_OUTPUT_STYLE))?,
        include_paths: resolve_include_paths(raw.get(KW_INCLUDE_PATHS))?,
        image_path: resolve_image_path(raw.get(KW_IMAGE_PATH))?,
    };

    let request = build_request(source_keyword, source_value)?;

    debug!(
        mode = request.keyword(),
        style = %options.style,
        include_paths = %options.include_paths,
        image_path = %options.image_path,
        "resolved compile arguments"
    );

    Ok((request, options))
}

/// Pick the single source keyword.
///
/// A keyword counts as present when it is in the map at all, even with a
/// `None` value; its shape is checked later.
fn select_source(raw: &RawArgs) -> Result<(&'static str, &ArgValue), SassError> {
    let mut present = [KW_STRING, KW_FILENAME, KW_DIRNAME]
        .into_iter()
        .filter_map(|name| raw.get(name).map(|value| (name, value)));

    match (present.next(), present.next()) {
        (None, _) => Err(SassError::configuration(MISSING_SOURCE)),
        (Some(source), None) => Ok(source),
        (Some(_), Some(_)) => Err(SassError::configuration(
            "string, filename, and dirname arguments are exclusive for each other; \
             use only one at a time",
        )),
    }
}

fn resolve_image_path(value: Option<&ArgValue>) -> Result<String, SassError> {
    match value {
        None | Some(ArgValue::None) => Ok(DEFAULT_IMAGE_PATH.to_string()),
        Some(ArgValue::Str(path)) => Ok(path.clone()),
        Some(_) => Err(SassError::type_mismatch("image_path must be a string")),
    }
}

fn build_request(keyword: &str, value: &ArgValue) -> Result<CompilationRequest, SassError> {
    match keyword {
        KW_STRING => match value {
            ArgValue::Str(content) => Ok(CompilationRequest::StringSource {
                content: content.clone(),
            }),
            _ => Err(SassError::type_mismatch("string must be a string")),
        },
        KW_FILENAME => match value {
            ArgValue::Str(path) => Ok(CompilationRequest::FileSource {
                path: PathBuf::from(path),
            }),
            _ => Err(SassError::type_mismatch("filename must be a string")),
        },
        _ => {
            let (search_path, output_path) = dirname_pair(value)?;
            Ok(CompilationRequest::FolderSource {
                search_path: PathBuf::from(search_path),
                output_path: PathBuf::from(output_path),
            })
        }
    }
}

fn dirname_pair(value: &ArgValue) -> Result<(&str, &str), SassError> {
    let Some(items) = value.as_seq() else {
        return Err(SassError::type_mismatch(DIRNAME_SHAPE));
    };
    let [search_path, output_path] = items else {
        return Err(SassError::value_range(DIRNAME_SHAPE));
    };
    match (search_path.as_str(), output_path.as_str()) {
        (Some(search_path), Some(output_path)) => Ok((search_path, output_path)),
        _ => Err(SassError::type_mismatch(DIRNAME_SHAPE)),
    }
}
