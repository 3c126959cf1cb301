//! Top-level compile entry points.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! # Example
//!
//! ```rust,ignore
//! use sass_binding::{RawArgs, compile};
//!
//! let css = compile(
//!     &RawArgs::new()
//!         .keyword("string", "a { b: c }")
//!         .keyword("output_style", "compressed"),
//! )?
//! .into_css();
//! ```

use std::sync::Arc;

use crate::args::resolve_arguments;
use crate::dispatch::{CompilationResult, HostLock, run};
use crate::engine::SassEngine;
use crate::error::SassError;
use crate::grass_engine::GrassEngine;
use crate::value::RawArgs;

/// Validates raw arguments and runs them on an engine.
///
/// Holds no per-call state; one `Compiler` can serve any number of calls.
pub struct Compiler<E: SassEngine = GrassEngine> {
    engine: E,
    host_lock: Option<Arc<dyn HostLock>>,
}

impl Compiler<GrassEngine> {
    /// Compiler backed by grass.
    pub fn new() -> Self {
        Self::with_engine(GrassEngine::new())
    }
}

impl Default for Compiler<GrassEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: SassEngine> Compiler<E> {
    pub fn with_engine(engine: E) -> Self {
        Self {
            engine,
            host_lock: None,
        }
    }

    /// Release `lock` for the duration of every engine call.
    pub fn with_host_lock(mut self, lock: Arc<dyn HostLock>) -> Self {
        self.host_lock = Some(lock);
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Validate `raw` and compile it.
    ///
    /// Returns CSS for `string`/`filename` requests and
    /// [`CompilationResult::Written`] for `dirname` requests.
    pub fn compile(&self, raw: &RawArgs) -> Result<CompilationResult, SassError> {
        let (request, options) = resolve_arguments(raw)?;
        run(&self.engine, self.host_lock.as_deref(), &request, &options)
    }
}

/// Compile with a fresh grass-backed [`Compiler`].
pub fn compile(raw: &RawArgs) -> Result<CompilationResult, SassError> {
    Compiler::new().compile(raw)
}
