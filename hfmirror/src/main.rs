use clap::{Parser, Subcommand};
use hfmirror_core::cli::conf::{self as conf_cli, ConfigCmd};
use hfmirror_core::conf::load_config;
use hfmirror_core::logging::init_logging;
use hfmirror_core::server;
use std::path::PathBuf;

const DEFAULT_CONFIG: &str = "config/hfmirror.hcl";

#[derive(Parser, Debug)]
#[command(
    name = "hfmirror",
    version,
    about = "hfmirror: Pingora-based Hugging Face mirror proxy"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the proxy (default)
    Run {
        /// Config file, or a directory containing hfmirror.hcl
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Config { cmd }) => conf_cli::run(cmd),
        Some(Command::Run { config }) => run(config),
        None => run(PathBuf::from(DEFAULT_CONFIG)),
    };

    if let Err(e) = result {
        eprintln!("hfmirror: {e:#}");
        std::process::exit(1);
    }
}

fn run(config: PathBuf) -> anyhow::Result<()> {
    init_logging();

    let cfg = load_config(&config)?;
    tracing::info!(config = %config.display(), "configuration loaded");

    server::run(cfg)
}
