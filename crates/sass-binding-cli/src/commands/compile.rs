//! Compile command
//!
//! Flags are forwarded as compile keywords as-is. Exclusivity between
//! `--string`, `--file` and `--dir` is left to the library so the CLI reports
//! the same configuration errors as any other caller.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use sass_binding::{
    CompilationOptions, CompilationRequest, CompilationResult, RawArgs, compile,
    resolve_arguments,
};
use serde::Serialize;
use tracing::info;

/// Arguments for the compile command.
#[derive(Args, Debug, Default)]
pub struct CompileArgs {
    /// SCSS source to compile ('-' reads it from stdin)
    #[arg(long)]
    pub string: Option<String>,

    /// SCSS file to compile
    #[arg(long, value_name = "FILE")]
    pub file: Option<String>,

    /// Compile every stylesheet under SEARCH_PATH into OUTPUT_PATH
    #[arg(long, num_args = 2, value_names = ["SEARCH_PATH", "OUTPUT_PATH"])]
    pub dir: Option<Vec<String>>,

    /// Output style (nested, expanded, compact, compressed)
    #[arg(long)]
    pub style: Option<String>,

    /// Directory searched for @import (repeatable)
    #[arg(short = 'I', long = "include-path", value_name = "DIR")]
    pub include_path: Vec<String>,

    /// Include directories already joined with the platform path separator
    #[arg(long, conflicts_with = "include_path")]
    pub include_paths: Option<String>,

    /// Base directory for image references
    #[arg(long)]
    pub image_path: Option<String>,

    /// Raw compile arguments as JSON (an object of keywords); flags override it
    #[arg(long, value_name = "JSON")]
    pub kwargs: Option<String>,

    /// Write CSS to FILE instead of stdout
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Print the resolved request and options as JSON without compiling
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Serialize)]
struct ResolvedConfig<'a> {
    request: &'a CompilationRequest,
    options: &'a CompilationOptions,
}

impl CompileArgs {
    /// Build the raw keyword input for the library.
    pub fn to_raw_args(&self) -> Result<RawArgs> {
        let mut raw = match &self.kwargs {
            Some(json) => RawArgs::from_json_str(json).context("--kwargs is not valid JSON")?,
            None => RawArgs::new(),
        };

        if let Some(string) = &self.string {
            let content = if string == "-" {
                let mut buffer = String::new();
                io::stdin()
                    .read_to_string(&mut buffer)
                    .context("Failed to read source from stdin")?;
                buffer
            } else {
                string.clone()
            };
            raw = raw.keyword("string", content);
        }
        if let Some(file) = &self.file {
            raw = raw.keyword("filename", file.as_str());
        }
        if let Some(dir) = &self.dir {
            raw = raw.keyword("dirname", dir.clone());
        }
        if let Some(style) = &self.style {
            raw = raw.keyword("output_style", style.as_str());
        }
        if !self.include_path.is_empty() {
            raw = raw.keyword("include_paths", self.include_path.clone());
        }
        if let Some(joined) = &self.include_paths {
            raw = raw.keyword("include_paths", joined.as_str());
        }
        if let Some(image_path) = &self.image_path {
            raw = raw.keyword("image_path", image_path.as_str());
        }

        Ok(raw)
    }
}

/// Execute the compile command.
pub fn execute(args: CompileArgs) -> Result<()> {
    let raw = args.to_raw_args()?;

    if args.dry_run {
        let (request, options) = resolve_arguments(&raw)?;
        let resolved = ResolvedConfig {
            request: &request,
            options: &options,
        };
        println!("{}", serde_json::to_string_pretty(&resolved)?);
        return Ok(());
    }

    match compile(&raw)? {
        CompilationResult::Css(css) => match &args.output {
            Some(path) => {
                fs::write(path, &css)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!(output = %path.display(), bytes = css.len(), "wrote css");
            }
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(css.as_bytes())?;
                stdout.flush()?;
            }
        },
        CompilationResult::Written => {
            info!("folder compiled");
        }
    }

    Ok(())
}
