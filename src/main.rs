use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use xmarkdown_icons::{generate, BuildPlan};

//===========================================================================//

#[derive(Parser)]
#[command(name = "gen-icons", version)]
#[command(about = "Generates the Xmarkdown icon set from src-tauri/icons/Xmarkdown.png")]
struct Cli {
    /// Project root that the fixed icon paths are relative to.
    #[arg(default_value = ".")]
    root: PathBuf,
}

// Log events go to stderr; stdout carries only the summary.
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .try_init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    let plan = BuildPlan::new(&cli.root);
    match generate(&plan) {
        Ok(summary) => {
            println!("{}", summary);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", err);
            ExitCode::from(err.exit_code())
        }
    }
}

//===========================================================================//
