use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex as StdMutex},
};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use chrono::Utc;
use serde_json::{Value, json};
use tokio::{net::TcpListener, sync::Mutex};
use tunesweep::{
    catalog::{Catalog, CatalogError, match_songs},
    config::{self, SpotifySettings},
    management::TokenManager,
    server,
    spotify::SpotifyCatalog,
    types::{PkceToken, Token},
};

#[derive(Default)]
struct Recorded {
    searches: Vec<HashMap<String, String>>,
    auth_headers: Vec<String>,
    appends: Vec<(String, Value)>,
}

type Shared = Arc<StdMutex<Recorded>>;

async fn search(
    State(recorded): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let mut recorded = recorded.lock().unwrap();
    if let Some(auth) = headers.get("authorization") {
        recorded
            .auth_headers
            .push(auth.to_str().unwrap().to_string());
    }
    let query = params.get("q").cloned().unwrap_or_default();
    recorded.searches.push(params);

    let items = if query == "Bohemian Rhapsody Queen" {
        json!([
            { "id": "t1", "name": "Bohemian Rhapsody", "uri": "spotify:track:t1",
              "artists": [{ "id": "a1", "name": "Queen" }] },
            { "id": "t2", "name": "Bohemian Rhapsody - Live",
              "artists": [{ "id": null, "name": "Various Artists" }] }
        ])
    } else {
        json!([])
    };
    Json(json!({ "tracks": { "items": items } }))
}

async fn append(
    State(recorded): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if id == "broken" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": { "status": 500, "message": "boom" } })),
        );
    }
    recorded.lock().unwrap().appends.push((id, body));
    (StatusCode::CREATED, Json(json!({ "snapshot_id": "snap" })))
}

async fn fake_spotify() -> (SocketAddr, Shared) {
    let recorded = Shared::default();
    let app = Router::new()
        .route("/v1/search", get(search))
        .route("/v1/playlists/{id}/tracks", post(append))
        .with_state(Arc::clone(&recorded));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, recorded)
}

fn settings(addr: SocketAddr) -> SpotifySettings {
    let api_url = format!("http://{}/v1", addr);
    let token_url = format!("http://{}/token", addr);
    let lookup = move |var: &str| match var {
        config::SPOTIFY_API_AUTH_CLIENT_ID => Some("client".to_string()),
        config::SPOTIFY_API_URL => Some(api_url.clone()),
        config::SPOTIFY_API_TOKEN_URL => Some(token_url.clone()),
        _ => None,
    };
    SpotifySettings::from_lookup(&lookup).unwrap()
}

fn fresh_token() -> Token {
    Token {
        access_token: "access-123".to_string(),
        refresh_token: "refresh".to_string(),
        scope: "playlist-modify-public".to_string(),
        expires_in: 3600,
        obtained_at: Utc::now().timestamp() as u64,
    }
}

fn catalog(addr: SocketAddr) -> SpotifyCatalog {
    let settings = settings(addr);
    let api_url = settings.api_url.clone();
    SpotifyCatalog::new(api_url, TokenManager::new(fresh_token(), settings))
}

#[tokio::test]
async fn search_sends_track_query_with_bearer_token() {
    let (addr, recorded) = fake_spotify().await;
    let mut catalog = catalog(addr);

    let tracks = catalog
        .search_tracks("Bohemian Rhapsody Queen")
        .await
        .unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].id, "t1");
    assert_eq!(tracks[0].uri, "spotify:track:t1");
    assert_eq!(tracks[1].id, "t2");
    assert_eq!(tracks[1].uri, "");

    let recorded = recorded.lock().unwrap();
    assert_eq!(recorded.searches[0]["q"], "Bohemian Rhapsody Queen");
    assert_eq!(recorded.searches[0]["type"], "track");
    assert_eq!(recorded.auth_headers, vec!["Bearer access-123".to_string()]);
}

#[tokio::test]
async fn append_posts_track_uri() {
    let (addr, recorded) = fake_spotify().await;
    let mut catalog = catalog(addr);

    let tracks = catalog
        .search_tracks("Bohemian Rhapsody Queen")
        .await
        .unwrap();
    catalog.add_to_playlist("P1", &tracks[0]).await.unwrap();

    let recorded = recorded.lock().unwrap();
    assert_eq!(
        recorded.appends,
        vec![("P1".to_string(), json!({ "uris": ["spotify:track:t1"] }))]
    );
}

#[tokio::test]
async fn append_builds_uri_from_id_when_missing() {
    let (addr, recorded) = fake_spotify().await;
    let mut catalog = catalog(addr);

    let tracks = catalog
        .search_tracks("Bohemian Rhapsody Queen")
        .await
        .unwrap();
    catalog.add_to_playlist("P1", &tracks[1]).await.unwrap();

    let recorded = recorded.lock().unwrap();
    assert_eq!(
        recorded.appends,
        vec![("P1".to_string(), json!({ "uris": ["spotify:track:t2"] }))]
    );
}

#[tokio::test]
async fn failed_append_is_an_http_error() {
    let (addr, _recorded) = fake_spotify().await;
    let mut catalog = catalog(addr);

    let tracks = catalog
        .search_tracks("Bohemian Rhapsody Queen")
        .await
        .unwrap();
    let err = catalog
        .add_to_playlist("broken", &tracks[0])
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::Http(_)));
}

#[tokio::test]
async fn match_against_fake_api_splits_found_and_missing() {
    let (addr, recorded) = fake_spotify().await;
    let mut catalog = catalog(addr);
    let songs = vec![
        "Bohemian Rhapsody Queen".to_string(),
        "Nonexistent Song Nobody".to_string(),
    ];

    let summary = match_songs(&mut catalog, "P1", &songs).await.unwrap();

    assert_eq!(summary.added, 1);
    assert_eq!(summary.not_found, vec!["Nonexistent Song Nobody".to_string()]);
    assert_eq!(recorded.lock().unwrap().appends.len(), 1);
}

#[tokio::test]
async fn unreachable_api_fails_the_search() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut catalog = catalog(addr);
    let err = catalog.search_tracks("anything").await.unwrap_err();
    assert!(matches!(err, CatalogError::Http(_)));
}

async fn callback_server(addr: SocketAddr) -> (SocketAddr, Arc<Mutex<Option<PkceToken>>>) {
    let state = Arc::new(Mutex::new(None));
    let app = server::router(Arc::clone(&state), Arc::new(settings(addr)));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let local = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (local, state)
}

#[tokio::test]
async fn health_reports_pending_authorization() {
    let (api, _) = fake_spotify().await;
    let (addr, state) = callback_server(api).await;
    let url = format!("http://{}/health", addr);

    let body: Value = reqwest::get(&url).await.unwrap().json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["name"], "tunesweep");
    assert_eq!(body["awaiting_callback"], false);

    *state.lock().await = Some(PkceToken {
        code_verifier: "verifier".to_string(),
        token: None,
    });
    let body: Value = reqwest::get(&url).await.unwrap().json().await.unwrap();
    assert_eq!(body["awaiting_callback"], true);
}

#[tokio::test]
async fn callback_without_code_is_rejected() {
    let (api, _) = fake_spotify().await;
    let (addr, state) = callback_server(api).await;

    let missing_code = reqwest::get(format!("http://{}/callback", addr))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(missing_code.contains("Missing authorization code"));

    let denied = reqwest::get(format!("http://{}/callback?error=access_denied", addr))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(denied.contains("Authorization denied"));

    let no_verifier = reqwest::get(format!("http://{}/callback?code=abc", addr))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(no_verifier.contains("Missing PKCE code verifier"));

    assert!(state.lock().await.is_none());
}
