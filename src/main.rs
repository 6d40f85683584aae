use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotgram::{
    cli,
    config::{self, Config, SpotifyConfig},
    error,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Poll Spotify and post new tracks until interrupted
    Run(RunOptions),

    /// Run a single poll cycle and exit
    Once,

    /// Show the track currently playing
    Now,

    /// Handle the history of posted tracks
    History(HistoryOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct RunOptions {
    /// Seconds between two polls (overrides POLL_INTERVAL)
    #[clap(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Handle the history of posted tracks",
    args_conflicts_with_subcommands = true // disallow mixing --search with subcommands
)]
pub struct HistoryOptions {
    /// Only show tracks containing this text
    #[clap(long)]
    pub search: Option<String>,

    #[command(subcommand)]
    pub command: Option<HistorySubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum HistorySubcommand {
    /// Remove a track so it is posted again
    Forget(ForgetOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct ForgetOpts {
    /// Track key as shown by `history`, e.g. "Song - Artist"
    pub key: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn load_config() -> Config {
    match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Invalid configuration: {}", e),
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Run(opt) => cli::run(&load_config(), opt.interval).await,
        Command::Once => cli::once(&load_config()).await,
        Command::Now => match SpotifyConfig::from_lookup(&config::env_lookup) {
            Ok(spotify) => cli::now(spotify).await,
            Err(e) => error!("Invalid configuration: {}", e),
        },
        Command::History(opt) => {
            let path = config::history_file(&config::env_lookup);
            match opt.command {
                Some(HistorySubcommand::Forget(f)) => cli::forget_history(path, f.key).await,
                None => cli::list_history(path, opt.search).await,
            }
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
