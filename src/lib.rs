//! Tunesweep Library
//!
//! This library moves a folder of tagged audio files into a Spotify playlist.
//! It reads artist and title tags from MP3, FLAC and M4A files, deletes each
//! file once its tags were captured, searches the Spotify catalog for every
//! collected song and appends the first hit to a playlist.
//!
//! # Modules
//!
//! - `api` - HTTP API endpoints for the local callback server
//! - `catalog` - Catalog abstraction and the search-and-append loop
//! - `cli` - Command-line interface implementations
//! - `config` - Settings loaded from the environment and validated up front
//! - `management` - Token persistence and refresh
//! - `report` - Plain text song lists written at the end of each phase
//! - `scanner` - Directory scanning and source file deletion
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `tags` - Per-container tag extraction and song name formatting
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use tunesweep::{config, tags::LoftyTags, scanner};
//!
//! #[tokio::main]
//! async fn main() -> tunesweep::Res<()> {
//!     config::load_env().await?;
//!     let summary = scanner::scan_directory("/music/inbox".as_ref(), &LoftyTags)?;
//!     println!("{:?}", summary.songs);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod management;
pub mod report;
pub mod scanner;
pub mod server;
pub mod spotify;
pub mod tags;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds for async contexts.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Example
///
/// ```
/// info!("Scanning {}", dir.display());
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Track added to your playlist. {}", song);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Only used for fatal conditions:
/// invalid settings, an unreadable input directory, a missing token or a
/// failed catalog call.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for per-file and per-song problems that are logged and skipped
/// without stopping the batch.
///
/// # Example
///
/// ```
/// warning!("Error deleting {}: {}", path.display(), err);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
