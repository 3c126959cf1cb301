//! SASS compilation using the grass crate.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! grass is a pure Rust implementation that targets dart-sass. It has no
//! notion of engine contexts, so [`GrassEngine`] only records them in a
//! [`ContextLedger`].
//!
//! Differences from the four-style model:
//! - grass emits only expanded and compressed CSS; `nested` and `compact`
//!   fall back to expanded output
//! - grass resolves `url()` verbatim, so `image_path` is accepted but unused

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use grass::{Options, OutputStyle as GrassStyle};
use tracing::debug;
use walkdir::WalkDir;

use crate::engine::{
    ContextHandle, ContextKind, ContextLedger, EngineFailure, EngineOptions, EngineResult,
    SassEngine,
};
use crate::style::OutputStyle;

/// Status for a failure reported by the compiler itself.
pub const STATUS_COMPILE_ERROR: i32 = 1;
/// Status for a failure reading sources or writing output.
pub const STATUS_IO_ERROR: i32 = 2;

/// [`SassEngine`] backed by grass.
#[derive(Debug, Default)]
pub struct GrassEngine {
    ledger: ContextLedger,
}

impl GrassEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocation/release counters for the contexts this engine handed out.
    pub fn ledger(&self) -> &ContextLedger {
        &self.ledger
    }
}

impl SassEngine for GrassEngine {
    fn name(&self) -> &'static str {
        "grass"
    }

    fn allocate(&self, kind: ContextKind) -> ContextHandle {
        let context = self.ledger.open(kind);
        debug!(id = context.id(), ?kind, "allocated grass context");
        context
    }

    fn release(&self, context: ContextHandle) {
        debug!(id = context.id(), kind = ?context.kind(), "released grass context");
        self.ledger.close(context);
    }

    fn compile_string(
        &self,
        _context: &ContextHandle,
        content: &str,
        options: &EngineOptions<'_>,
    ) -> EngineResult<String> {
        let load_paths = split_include_paths(options.include_paths);
        let grass_options = grass_options(&load_paths, options);

        grass::from_string(content, &grass_options)
            .map_err(|e| EngineFailure::new(STATUS_COMPILE_ERROR, e.to_string()))
    }

    fn compile_file(
        &self,
        _context: &ContextHandle,
        path: &Path,
        options: &EngineOptions<'_>,
    ) -> EngineResult<String> {
        let load_paths = split_include_paths(options.include_paths);
        let grass_options = grass_options(&load_paths, options);

        grass::from_path(path, &grass_options)
            .map_err(|e| EngineFailure::new(STATUS_COMPILE_ERROR, e.to_string()))
    }

    fn compile_folder(
        &self,
        _context: &ContextHandle,
        search_path: &Path,
        output_path: &Path,
        options: &EngineOptions<'_>,
    ) -> EngineResult<()> {
        if !search_path.is_dir() {
            return Err(EngineFailure::new(
                STATUS_IO_ERROR,
                format!("search path '{}' is not a directory", search_path.display()),
            ));
        }

        let load_paths = split_include_paths(options.include_paths);
        let grass_options = grass_options(&load_paths, options);

        let mut written = 0usize;
        for entry in WalkDir::new(search_path).sort_by_file_name() {
            let entry = entry.map_err(|e| EngineFailure::new(STATUS_IO_ERROR, e.to_string()))?;
            if !entry.file_type().is_file() || !is_compilable(entry.path()) {
                continue;
            }

            let target = output_target(search_path, output_path, entry.path());
            let started = Instant::now();
            let css = grass::from_path(entry.path(), &grass_options)
                .map_err(|e| EngineFailure::new(STATUS_COMPILE_ERROR, e.to_string()))?;

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| io_failure(parent, e))?;
            }
            fs::write(&target, css).map_err(|e| io_failure(&target, e))?;

            debug!(
                source = %entry.path().display(),
                target = %target.display(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "compiled folder entry"
            );
            written += 1;
        }

        debug!(search_path = %search_path.display(), written, "folder compile finished");
        Ok(())
    }
}

/// Split a joined include path string into grass load paths.
pub fn split_include_paths(include_paths: &str) -> Vec<PathBuf> {
    if include_paths.is_empty() {
        return Vec::new();
    }
    std::env::split_paths(include_paths)
        .filter(|path| !path.as_os_str().is_empty())
        .collect()
}

fn grass_style(style: OutputStyle) -> GrassStyle {
    match style {
        OutputStyle::Compressed => GrassStyle::Compressed,
        OutputStyle::Nested | OutputStyle::Expanded | OutputStyle::Compact => GrassStyle::Expanded,
    }
}

fn grass_options<'a>(load_paths: &'a [PathBuf], options: &EngineOptions<'_>) -> Options<'a> {
    debug!(image_path = options.image_path, "image_path is not used by grass");
    Options::default()
        .load_paths(load_paths)
        .style(grass_style(options.style))
}

/// Non-partial `.scss` sources.
fn is_compilable(path: &Path) -> bool {
    let is_scss = path.extension().is_some_and(|ext| ext == "scss");
    let is_partial = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('_'));
    is_scss && !is_partial
}

/// Mirror `source` (somewhere under `search_path`) into `output_path` as `.css`.
fn output_target(search_path: &Path, output_path: &Path, source: &Path) -> PathBuf {
    let relative = source.strip_prefix(search_path).unwrap_or(source);
    output_path.join(relative).with_extension("css")
}

fn io_failure(path: &Path, error: std::io::Error) -> EngineFailure {
    EngineFailure::new(STATUS_IO_ERROR, format!("{}: {}", path.display(), error))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(engine: &GrassEngine, scss: &str, style: OutputStyle) -> EngineResult<String> {
        let engine_options = EngineOptions {
            style,
            include_paths: "",
            image_path: ".",
        };
        let context = engine.allocate(ContextKind::String);
        let result = engine.compile_string(&context, scss, &engine_options);
        engine.release(context);
        result
    }

    #[test]
    fn test_compile_simple_scss() {
        let engine = GrassEngine::new();
        let scss = "$primary: #007bff; .btn { color: $primary; }";
        let css = compile(&engine, scss, OutputStyle::Expanded).unwrap();

        assert!(css.contains(".btn"));
        assert!(css.contains("#007bff"));
        assert_eq!(engine.ledger().live(), 0);
    }

    #[test]
    fn test_compile_scss_compressed() {
        let engine = GrassEngine::new();
        let scss = "$primary: blue;\n\n.btn {\n  color: $primary;\n}";
        let css = compile(&engine, scss, OutputStyle::Compressed).unwrap();

        assert!(!css.contains("\n\n"));
        assert!(css.contains(".btn"));
        assert!(css.contains("blue"));
    }

    #[test]
    fn test_nested_rules_with_default_style() {
        let engine = GrassEngine::new();
        let scss = r#"
            .nav {
                background: white;

                .item {
                    padding: 10px;

                    &:hover {
                        background: gray;
                    }
                }
            }
        "#;

        let css = compile(&engine, scss, OutputStyle::Nested).unwrap();

        assert!(css.contains(".nav .item"));
        assert!(css.contains(".nav .item:hover"));
    }

    #[test]
    fn test_compile_error_is_engine_failure() {
        let engine = GrassEngine::new();
        let scss = ".btn { color: $undefined-variable; }";
        let failure = compile(&engine, scss, OutputStyle::Nested).unwrap_err();

        assert_eq!(failure.status, STATUS_COMPILE_ERROR);
        assert!(failure.message.contains("Undefined variable"), "{}", failure.message);
    }

    #[test]
    fn test_split_include_paths() {
        assert!(split_include_paths("").is_empty());

        let joined = crate::paths::join_paths(&["a", "b/c"]);
        assert_eq!(
            split_include_paths(&joined),
            vec![PathBuf::from("a"), PathBuf::from("b/c")]
        );
    }

    #[test]
    fn test_grass_style_mapping() {
        assert!(matches!(grass_style(OutputStyle::Compressed), GrassStyle::Compressed));
        assert!(matches!(grass_style(OutputStyle::Nested), GrassStyle::Expanded));
        assert!(matches!(grass_style(OutputStyle::Compact), GrassStyle::Expanded));
    }

    #[test]
    fn test_compilable_sources() {
        assert!(is_compilable(Path::new("src/site.scss")));
        assert!(!is_compilable(Path::new("src/_partial.scss")));
        assert!(!is_compilable(Path::new("src/plain.css")));
        assert!(!is_compilable(Path::new("src/README")));
    }

    #[test]
    fn test_output_target_mirrors_layout() {
        let target = output_target(
            Path::new("/src"),
            Path::new("/out"),
            Path::new("/src/pages/home.scss"),
        );
        assert_eq!(target, PathBuf::from("/out/pages/home.css"));
    }
}
