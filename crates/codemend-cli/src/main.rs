use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod app;
mod review;

#[derive(Parser)]
#[command(name = "codemend")]
#[command(about = "Codemend - automated code repair from the command line")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Repair engine URL (overrides config)
    #[arg(long)]
    backend: Option<String>,

    /// Request timeout in seconds (overrides config)
    #[arg(long)]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Command {
    /// Execute a file on the repair engine and print its output
    Run {
        file: PathBuf,
    },
    /// Run the automated repair loop and review the patches
    Repair {
        file: PathBuf,

        /// Repair iterations (overrides config)
        #[arg(short, long)]
        iterations: Option<u32>,

        /// Accept the result without reviewing individual patches
        #[arg(short = 'y', long)]
        yes: bool,

        /// Where to write the repaired code (defaults to the input file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Request a single corrective patch and review it
    Patch {
        file: PathBuf,

        /// Accept the patch without reviewing it
        #[arg(short = 'y', long)]
        yes: bool,

        /// Where to write the patched code (defaults to the input file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Ask the repair engine a question about a file
    Chat {
        file: PathBuf,

        /// The question to ask
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut settings = codemend_core::Settings::load();

    if let Some(ref backend) = cli.backend {
        settings.backend.base_url = backend.clone();
    }
    if let Some(timeout) = cli.timeout {
        settings.backend.timeout_secs = timeout;
    }

    match cli.command {
        Command::Run { file } => app::run_file(&settings, &file).await?,
        Command::Repair {
            file,
            iterations,
            yes,
            output,
        } => app::repair_file(&settings, &file, iterations, yes, output.as_deref()).await?,
        Command::Patch { file, yes, output } => {
            app::patch_file(&settings, &file, yes, output.as_deref()).await?
        }
        Command::Chat { file, message } => app::chat_once(&settings, &file, &message).await?,
    }

    Ok(())
}
