//! Keyword-driven SASS compilation front end.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! This crate provides:
//! - Argument resolution: raw keyword input → validated request and options
//! - Include path joining and output style lookup
//! - Dispatch to a [`SassEngine`] in string, file, or folder mode, with
//!   scoped release of engine contexts
//! - A grass-backed engine ([`GrassEngine`])

mod args;
mod compile;
mod dispatch;
mod engine;
mod error;
mod grass_engine;
mod paths;
mod style;
mod value;
mod version;

pub use args::{CompilationOptions, CompilationRequest, resolve_arguments};
pub use compile::{Compiler, compile};
pub use dispatch::{CompilationResult, ContextGuard, HostLock, run};
pub use engine::{
    ContextHandle, ContextKind, ContextLedger, EngineFailure, EngineOptions, EngineResult,
    SassEngine,
};
pub use error::{ErrorKind, SassError, translate_engine_failure};
pub use grass_engine::{GrassEngine, STATUS_COMPILE_ERROR, STATUS_IO_ERROR, split_include_paths};
pub use paths::{PATH_LIST_SEPARATOR, join_include_paths, join_paths, resolve_include_paths};
pub use style::{OutputStyle, output_styles, resolve_output_style};
pub use value::{ArgValue, RawArgs};
pub use version::{cargo_version, version};
