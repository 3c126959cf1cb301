//! The engine seam.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! A [`SassEngine`] exposes three compile entry points (string, file, folder)
//! and hands out a context for each call. Contexts are acquired after the
//! arguments are validated and given back exactly once; the dispatcher
//! wraps them in a guard so that holds on every exit path.

use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crate::args::CompilationOptions;
use crate::style::OutputStyle;

/// Options in the form every entry point receives them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions<'a> {
    pub style: OutputStyle,
    pub include_paths: &'a str,
    pub image_path: &'a str,
}

impl<'a> From<&'a CompilationOptions> for EngineOptions<'a> {
    fn from(options: &'a CompilationOptions) -> Self {
        Self {
            style: options.style,
            include_paths: &options.include_paths,
            image_path: &options.image_path,
        }
    }
}

/// A non-zero engine status together with the engine's message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineFailure {
    pub status: i32,
    pub message: String,
}

impl EngineFailure {
    pub fn new(status: i32, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl fmt::Display for EngineFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "engine status {}: {}", self.status, self.message)
    }
}

pub type EngineResult<T> = Result<T, EngineFailure>;

/// Which entry point a context was acquired for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextKind {
    String,
    File,
    Folder,
}

/// An acquired engine context.
///
/// Deliberately neither `Clone` nor `Copy`: giving it back to
/// [`SassEngine::release`] consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct ContextHandle {
    id: u64,
    kind: ContextKind,
}

impl ContextHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> ContextKind {
        self.kind
    }
}

/// SASS compilation engine with string, file and folder entry points.
pub trait SassEngine: Send + Sync {
    /// Short name for log output.
    fn name(&self) -> &'static str;

    fn allocate(&self, kind: ContextKind) -> ContextHandle;

    fn release(&self, context: ContextHandle);

    fn compile_string(
        &self,
        context: &ContextHandle,
        content: &str,
        options: &EngineOptions<'_>,
    ) -> EngineResult<String>;

    fn compile_file(
        &self,
        context: &ContextHandle,
        path: &Path,
        options: &EngineOptions<'_>,
    ) -> EngineResult<String>;

    /// Compile every source under `search_path` into `output_path`.
    /// Produces files, not text.
    fn compile_folder(
        &self,
        context: &ContextHandle,
        search_path: &Path,
        output_path: &Path,
        options: &EngineOptions<'_>,
    ) -> EngineResult<()>;
}

/// Counts context allocations and releases.
///
/// Engines use it to mint handles; callers read it to check that every
/// acquired context came back.
#[derive(Debug, Default)]
pub struct ContextLedger {
    next_id: AtomicU64,
    allocated: AtomicUsize,
    released: AtomicUsize,
}

impl ContextLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self, kind: ContextKind) -> ContextHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.allocated.fetch_add(1, Ordering::SeqCst);
        ContextHandle { id, kind }
    }

    /// Record the release of `context`, consuming it.
    pub fn close(&self, _context: ContextHandle) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }

    pub fn allocated(&self) -> usize {
        self.allocated.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    /// Contexts acquired but not yet released.
    pub fn live(&self) -> usize {
        self.allocated().saturating_sub(self.released())
    }
}
