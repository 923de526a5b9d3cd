//! # CLI Module
//!
//! This module provides the command-line interface layer for Tunesweep. It
//! implements all user-facing commands and coordinates the scanner, the report
//! writer and the Spotify catalog.
//!
//! ## Command Categories
//!
//! ### Authentication
//!
//! - [`auth`] - Initiates Spotify OAuth authentication flow with PKCE security
//!
//! ### Library Operations
//!
//! - [`scan`] - Reads tags from a folder, deletes the captured files and writes
//!   the processed list
//! - [`match_list`] - Searches a processed list in the catalog and appends the
//!   matches to a playlist
//! - [`sync`] - Both of the above in one run
//!
//! ## Data Flow
//!
//! ```text
//! Settings (flags, environment, .env) → validated up front
//!     ↓
//! Scanner → processed list (all-processed_songs.txt)
//!     ↓
//! Catalog matcher → playlist additions, not found list (notfound.txt)
//!     ↓
//! Summary table
//! ```
//!
//! ## Error Handling
//!
//! Problems with a single file or a single missing song are logged with
//! `warning!` and the batch continues. Invalid settings, a directory that
//! cannot be listed, a missing token, a failed catalog call or a report that
//! cannot be written end the process through `error!`.
//!
//! ## Usage Patterns
//!
//! ```bash
//! tunesweep auth                                  # Authenticate with Spotify
//! tunesweep sync --dir ~/inbox --playlist <id>    # Full run
//! tunesweep scan --dir ~/inbox                    # Only collect and delete
//! tunesweep match --from all-processed_songs.txt  # Only search and append
//! ```

mod auth;
mod matching;
mod scan;
mod sync;

use std::path::Path;

use tabled::Table;

use crate::types::SummaryTableRow;

pub use auth::auth;
pub use matching::match_list;
pub use scan::scan;
pub use sync::sync;

fn summary_row(list: &str, songs: usize, file: Option<&Path>) -> SummaryTableRow {
    SummaryTableRow {
        list: list.to_string(),
        songs,
        file: file
            .map(|f| f.display().to_string())
            .unwrap_or_else(|| "-".to_string()),
    }
}

fn print_summary(rows: Vec<SummaryTableRow>) {
    let table = Table::new(rows);
    println!("{}", table);
}
