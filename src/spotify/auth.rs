use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, RequestBuilder, Url};
use tokio::sync::Mutex;

use crate::{
    config::SpotifySettings,
    error,
    management::TokenManager,
    server::start_api_server,
    success,
    types::{PkceToken, Token, TokenResponse},
    utils, warning,
};

/// Runs the authorization code flow with PKCE and persists the token.
///
/// Starts the local callback server, opens the authorize URL in the browser
/// and waits up to 60 seconds for the callback to deliver a token.
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>, settings: SpotifySettings) {
    let redirect_uri = match settings.redirect_uri() {
        Ok(uri) => uri.to_string(),
        Err(e) => error!("{}", e),
    };

    // generate PKCE verifier and challenge
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    // start API server
    let server_state = Arc::clone(&shared_state);
    let server_settings = Arc::new(settings.clone());
    tokio::spawn(async move {
        start_api_server(server_state, server_settings).await;
    });

    let auth_url = match Url::parse_with_params(
        &settings.auth_url,
        &[
            ("client_id", settings.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", redirect_uri.as_str()),
            ("code_challenge", code_challenge.as_str()),
            ("code_challenge_method", "S256"),
            ("scope", settings.scope.as_str()),
        ],
    ) {
        Ok(url) => url.to_string(),
        Err(e) => error!("Invalid authorization URL {}: {}", settings.auth_url, e),
    };

    // Store verifier in shared state before redirect
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier: code_verifier.clone(),
            token: None,
        });
    }

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state).await;

    match token {
        Some(t) => {
            let token_manager = TokenManager::new(t, settings);
            if let Err(e) = token_manager.persist().await {
                error!("Failed to save token to cache: {}", e);
            }

            success!("Authentication successful!");
        }
        None => {
            error!("Authentication failed or timed out.");
        }
    }
}

async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(pkce_token) = lock.as_ref() {
            if let Some(token) = &pkce_token.token {
                return Some(token.clone());
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Identifies the client on a token request: basic auth for a confidential
/// client, a `client_id` form field for a public PKCE client.
fn with_client_auth<'a>(
    request: RequestBuilder,
    settings: &'a SpotifySettings,
    form: &mut Vec<(&'static str, &'a str)>,
) -> RequestBuilder {
    match &settings.client_secret {
        Some(secret) => request.basic_auth(&settings.client_id, Some(secret)),
        None => {
            form.push(("client_id", &settings.client_id));
            request
        }
    }
}

fn into_token(response: TokenResponse, previous_refresh: Option<&str>) -> Token {
    Token {
        access_token: response.access_token,
        refresh_token: response
            .refresh_token
            .or_else(|| previous_refresh.map(str::to_string))
            .unwrap_or_default(),
        scope: response.scope.unwrap_or_default(),
        expires_in: response.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    }
}

pub async fn refresh_token(settings: &SpotifySettings, refresh_token: &str) -> Result<Token, String> {
    let mut form = vec![
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
    ];
    let request = with_client_auth(Client::new().post(&settings.token_url), settings, &mut form);

    let response = request
        .form(&form)
        .send()
        .await
        .and_then(|res| res.error_for_status())
        .map_err(|e| e.to_string())?;
    let json: TokenResponse = response.json().await.map_err(|e| e.to_string())?;

    // Spotify only sends a new refresh token when it rotates the old one.
    Ok(into_token(json, Some(refresh_token)))
}

pub async fn exchange_code_pkce(
    settings: &SpotifySettings,
    code: &str,
    verifier: &str,
) -> Result<Token, reqwest::Error> {
    let redirect_uri = settings.redirect_uri.as_deref().unwrap_or_default();

    let mut form = vec![
        ("grant_type", "authorization_code"),
        ("code", code),
        ("code_verifier", verifier),
        ("redirect_uri", redirect_uri),
    ];
    let request = with_client_auth(Client::new().post(&settings.token_url), settings, &mut form);

    let res = request.form(&form).send().await?.error_for_status()?;
    let json: TokenResponse = res.json().await?;

    Ok(into_token(json, None))
}
