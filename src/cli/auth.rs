use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{config::SpotifySettings, error, info, spotify, types::PkceToken};

pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    let settings = match SpotifySettings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("{}", e),
    };

    info!(
        "Waiting for the Spotify callback on http://{}/callback",
        settings.server_addr
    );
    spotify::auth::auth(shared_state, settings).await;
}
