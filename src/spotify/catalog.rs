use reqwest::Client;

use crate::{
    catalog::{Catalog, CatalogError},
    management::TokenManager,
    types::{AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, SearchResponse, Track},
};

/// The Spotify Web API as a [`Catalog`].
pub struct SpotifyCatalog {
    client: Client,
    api_url: String,
    tokens: TokenManager,
}

impl SpotifyCatalog {
    pub fn new(api_url: impl Into<String>, tokens: TokenManager) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            tokens,
        }
    }

    async fn token(&mut self) -> Result<String, CatalogError> {
        self.tokens.get_valid_token().await.map_err(CatalogError::Auth)
    }
}

impl Catalog for SpotifyCatalog {
    async fn search_tracks(&mut self, query: &str) -> Result<Vec<Track>, CatalogError> {
        let token = self.token().await?;
        let api_url = format!("{uri}/search", uri = &self.api_url);

        let response = self
            .client
            .get(&api_url)
            .query(&[("q", query), ("type", "track")])
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;

        let json = response.json::<SearchResponse>().await?;
        Ok(json.tracks.items)
    }

    async fn add_to_playlist(
        &mut self,
        playlist_id: &str,
        track: &Track,
    ) -> Result<(), CatalogError> {
        let token = self.token().await?;
        let api_url = format!(
            "{uri}/playlists/{id}/tracks",
            uri = &self.api_url,
            id = playlist_id
        );

        let uri = if track.uri.is_empty() {
            format!("spotify:track:{}", track.id)
        } else {
            track.uri.clone()
        };
        let body = AddTrackToPlaylistRequest { uris: vec![uri] };

        let response = self
            .client
            .post(&api_url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        response.json::<AddTrackToPlaylistResponse>().await?;
        Ok(())
    }
}
