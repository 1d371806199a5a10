use anyhow::Result;
use clap::{Parser, Subcommand};
use mptpl_cli::{Target, build_cmd};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mptpl", version, about = "Mini-program template compiler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a JSON template AST into mini-program markup.
    Build {
        /// Path to the AST (.json)
        input: PathBuf,
        /// Output directory (default: target/mptpl-gen)
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Target platform dialect
        #[arg(long, value_enum, default_value_t = Target::Weixin)]
        target: Target,
        /// JSON file with component lists, lazy elements and other overrides
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Build {
            input,
            out_dir,
            target,
            config,
        } => {
            build_cmd(&input, out_dir.as_deref(), target, config.as_deref())?;
        }
    }
    Ok(())
}
