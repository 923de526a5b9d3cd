use std::path::PathBuf;

use chrono::Utc;

use crate::{config::SpotifySettings, spotify, types::Token, utils};

/// Seconds before the real expiry at which a token is treated as expired.
const EXPIRY_MARGIN: u64 = 240;

pub struct TokenManager {
    token: Token,
    settings: SpotifySettings,
}

impl TokenManager {
    pub fn new(token: Token, settings: SpotifySettings) -> Self {
        TokenManager { token, settings }
    }

    pub async fn load(settings: SpotifySettings) -> Result<Self, String> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| format!("{}: {}", path.display(), e))?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { token, settings })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    /// Returns an access token, refreshing and persisting it first when it is
    /// about to expire.
    pub async fn get_valid_token(&mut self) -> Result<String, String> {
        if self.is_expired() {
            let refreshed =
                spotify::auth::refresh_token(&self.settings, &self.token.refresh_token).await?;
            self.token = refreshed;
            self.persist().await?;
        }

        Ok(self.token.access_token.clone())
    }

    pub fn is_expired(&self) -> bool {
        is_expired_at(&self.token, Utc::now().timestamp() as u64)
    }

    fn token_path() -> PathBuf {
        utils::data_dir().join("cache/token.json")
    }
}

fn is_expired_at(token: &Token, now: u64) -> bool {
    now >= (token.obtained_at + token.expires_in).saturating_sub(EXPIRY_MARGIN)
}
