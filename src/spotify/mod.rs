//! # Spotify Integration Module
//!
//! This module is the integration layer between Tunesweep and the Spotify Web
//! API. It covers the two things a run needs from Spotify: an access token for
//! the user, and a catalog that can search tracks and append them to a
//! playlist.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI)
//!          ↓
//! Catalog trait (search, append)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE, token refresh)
//!     └── Catalog (track search, playlist append)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! ### Authentication Module
//!
//! [`auth`] - Implements the OAuth 2.0 authorization code flow with PKCE:
//! - **Complete Auth Flow**: Handles the full OAuth process from initial request to token storage
//! - **Confidential Clients**: Sends the client secret as basic auth when one is configured
//! - **Token Refresh**: Exchanges the refresh token once the access token is about to expire
//! - **Browser Integration**: Automatic browser launch for user authorization
//! - **Local Callback Server**: Temporary HTTP server for receiving OAuth callbacks
//!
//! ### Catalog Module
//!
//! [`SpotifyCatalog`] - Implements [`crate::catalog::Catalog`]:
//! - **Track Search**: `GET /search` restricted to tracks, raw query string
//! - **Playlist Append**: `POST /playlists/{id}/tracks`, one track per call
//!
//! ## Error Handling
//!
//! Requests are sent once. There is no retry and no rate limit handling: a
//! non-success status becomes a [`crate::catalog::CatalogError`] and stops the
//! run. Timeouts are reqwest's defaults.
//!
//! ## Configuration
//!
//! Endpoints and credentials come from [`crate::config::SpotifySettings`], so
//! tests and alternative deployments can point the client at another host.

pub mod auth;
mod catalog;

pub use catalog::SpotifyCatalog;
