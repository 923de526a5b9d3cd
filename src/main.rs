use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use tokio::sync::Mutex;
use tunesweep::{cli, config, error, types::PkceToken};

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
    /// Authorize with Spotify API
    Auth,

    /// Scan a folder, delete tagged files and add the songs to a playlist
    Sync(SyncOptions),

    /// Scan a folder, delete tagged files and write the processed list
    Scan(ScanOptions),

    /// Add the songs of a processed list to a playlist
    Match(MatchOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SyncOptions {
    /// Folder with the audio files (defaults to TUNESWEEP_MUSIC_DIR)
    #[clap(long)]
    pub dir: Option<PathBuf>,

    /// Playlist id, URI or link (defaults to TUNESWEEP_PLAYLIST_ID)
    #[clap(long)]
    pub playlist: Option<String>,

    /// Where to write every processed song
    #[clap(long, default_value = config::DEFAULT_PROCESSED_FILE)]
    pub processed_file: PathBuf,

    /// Where to write songs without a catalog match
    #[clap(long, default_value = config::DEFAULT_NOTFOUND_FILE)]
    pub notfound_file: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct ScanOptions {
    /// Folder with the audio files (defaults to TUNESWEEP_MUSIC_DIR)
    #[clap(long)]
    pub dir: Option<PathBuf>,

    /// Where to write every processed song
    #[clap(long, default_value = config::DEFAULT_PROCESSED_FILE)]
    pub processed_file: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct MatchOptions {
    /// Song list to match, one song per line
    #[clap(long, default_value = config::DEFAULT_PROCESSED_FILE)]
    pub from: PathBuf,

    /// Playlist id, URI or link (defaults to TUNESWEEP_PLAYLIST_ID)
    #[clap(long)]
    pub playlist: Option<String>,

    /// Where to write songs without a catalog match
    #[clap(long, default_value = config::DEFAULT_NOTFOUND_FILE)]
    pub notfound_file: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Sync(opt) => {
            cli::sync(opt.dir, opt.playlist, opt.processed_file, opt.notfound_file).await
        }
        Command::Scan(opt) => cli::scan(opt.dir, opt.processed_file).await,
        Command::Match(opt) => cli::match_list(opt.from, opt.playlist, opt.notfound_file).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
