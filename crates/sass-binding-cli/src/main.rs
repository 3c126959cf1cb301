//! sassbind CLI - Main entry point

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "sassbind")]
#[command(version = sass_binding::version())]
#[command(about = "Compile SASS/SCSS from a string, a file, or a folder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a source string, a file, or a folder of stylesheets
    Compile(commands::compile::CompileArgs),

    /// List the supported output styles and their codes
    Styles,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sassbind=info,sass_binding=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compile(args) => commands::compile::execute(args),
        Commands::Styles => commands::styles::execute(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(commands::exit_code(&err))
        }
    }
}
