//! Mode selection and engine invocation.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Every call walks the same states:
//!
//! ```text
//! Validated -> ModeSelected -> ContextAllocated -> EngineInvoked
//!           -> Succeeded | Failed -> Released -> Returned
//! ```
//!
//! The context is wrapped in a [`ContextGuard`] the moment it is allocated,
//! so it is released exactly once whether the engine succeeds, fails, or
//! panics.

use std::fs::File;
use std::path::Path;
use std::time::Instant;

use tracing::debug;

use crate::args::{CompilationOptions, CompilationRequest};
use crate::engine::{ContextHandle, ContextKind, EngineOptions, SassEngine};
use crate::error::{SassError, translate_engine_failure};

/// Outcome of a successful compile call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompilationResult {
    /// CSS produced by string or file mode.
    Css(String),
    /// Folder mode finished; output went to disk.
    Written,
}

impl CompilationResult {
    pub fn css(&self) -> Option<&str> {
        match self {
            CompilationResult::Css(css) => Some(css),
            CompilationResult::Written => None,
        }
    }

    pub fn into_css(self) -> Option<String> {
        match self {
            CompilationResult::Css(css) => Some(css),
            CompilationResult::Written => None,
        }
    }
}

/// A global execution lock held by an embedding host.
///
/// When present, it is released while the engine runs and reacquired as soon
/// as the engine returns, so a long compile does not starve other work.
pub trait HostLock: Send + Sync {
    fn release(&self);
    fn reacquire(&self);
}

/// Released host lock; reacquires on drop.
struct Suspended<'a> {
    lock: Option<&'a dyn HostLock>,
}

impl<'a> Suspended<'a> {
    fn new(lock: Option<&'a dyn HostLock>) -> Self {
        if let Some(lock) = lock {
            lock.release();
        }
        Self { lock }
    }
}

impl Drop for Suspended<'_> {
    fn drop(&mut self) {
        if let Some(lock) = self.lock.take() {
            lock.reacquire();
        }
    }
}

fn without_host_lock<R>(lock: Option<&dyn HostLock>, f: impl FnOnce() -> R) -> R {
    let _suspended = Suspended::new(lock);
    f()
}

/// Engine context that is released when dropped.
pub struct ContextGuard<'e> {
    engine: &'e dyn SassEngine,
    context: Option<ContextHandle>,
}

impl<'e> ContextGuard<'e> {
    pub fn acquire(engine: &'e dyn SassEngine, kind: ContextKind) -> Self {
        let context = engine.allocate(kind);
        Self {
            engine,
            context: Some(context),
        }
    }

    pub fn handle(&self) -> &ContextHandle {
        self.context
            .as_ref()
            .unwrap_or_else(|| unreachable!("context is only taken in drop"))
    }
}

impl Drop for ContextGuard<'_> {
    fn drop(&mut self) {
        if let Some(context) = self.context.take() {
            self.engine.release(context);
        }
    }
}

/// Run a validated request against `engine`.
pub fn run(
    engine: &dyn SassEngine,
    host_lock: Option<&dyn HostLock>,
    request: &CompilationRequest,
    options: &CompilationOptions,
) -> Result<CompilationResult, SassError> {
    let engine_options = EngineOptions::from(options);
    let started = Instant::now();

    let result = match request {
        CompilationRequest::StringSource { content } => {
            debug!(engine = engine.name(), "compiling string source");
            let guard = ContextGuard::acquire(engine, ContextKind::String);
            without_host_lock(host_lock, || {
                engine.compile_string(guard.handle(), content, &engine_options)
            })
            .map(CompilationResult::Css)
            .map_err(translate_engine_failure)
        }
        CompilationRequest::FileSource { path } => {
            debug!(engine = engine.name(), path = %path.display(), "compiling file source");
            check_readable(path)?;
            let guard = ContextGuard::acquire(engine, ContextKind::File);
            without_host_lock(host_lock, || {
                engine.compile_file(guard.handle(), path, &engine_options)
            })
            .map(CompilationResult::Css)
            .map_err(translate_engine_failure)
        }
        CompilationRequest::FolderSource {
            search_path,
            output_path,
        } => {
            debug!(
                engine = engine.name(),
                search_path = %search_path.display(),
                output_path = %output_path.display(),
                "compiling folder"
            );
            let guard = ContextGuard::acquire(engine, ContextKind::Folder);
            without_host_lock(host_lock, || {
                engine.compile_folder(guard.handle(), search_path, output_path, &engine_options)
            })
            .map(|()| CompilationResult::Written)
            .map_err(translate_engine_failure)
        }
    };

    debug!(
        ok = result.is_ok(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "compile finished"
    );
    result
}

/// Fails without touching the engine when `path` cannot be opened.
fn check_readable(path: &Path) -> Result<(), SassError> {
    File::open(path)
        .map(drop)
        .map_err(|source| SassError::IoAccess {
            path: path.to_path_buf(),
            source,
        })
}
