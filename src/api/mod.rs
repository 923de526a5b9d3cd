//! # API Module
//!
//! HTTP endpoints served by the local callback server while `tunesweep auth`
//! waits for the user to grant access.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the authorization code from Spotify's authorization
//!   server and exchanges it, together with the PKCE verifier, for a token.
//! - [`health`] - Returns application status and version information.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use tunesweep::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
