use axum::{Extension, Router, routing::get};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{api, config::SpotifySettings, error, types::PkceToken};

pub fn router(state: Arc<Mutex<Option<PkceToken>>>, settings: Arc<SpotifySettings>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .layer(Extension(state))
        .layer(Extension(settings))
}

pub async fn start_api_server(state: Arc<Mutex<Option<PkceToken>>>, settings: Arc<SpotifySettings>) {
    let addr = settings.server_addr;
    let app = router(state, settings);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to bind callback server to {}: {}", addr, e),
    };

    if let Err(e) = axum::serve(listener, app).await {
        error!("Callback server stopped: {}", e);
    }
}
