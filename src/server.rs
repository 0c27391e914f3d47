use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{Router, http::HeaderValue, routing::get};
use tokio::sync::Mutex;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};

use crate::{
    api, config,
    management::{OauthStateManager, SessionManager},
    spotify::SpotifyClient,
};

/// Development origins always allowed by CORS; a production origin can be
/// added through `PRODUCTION_URL`.
const DEV_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://127.0.0.1:5173",
    "http://localhost:8000",
    "http://127.0.0.1:8000",
];

/// Shared state handed to every handler.
///
/// The registries are in-memory and process-lifetime only; mutation is
/// serialized through the tokio mutexes. This is a deliberate single-node
/// limitation: there is no cross-instance session sharing.
#[derive(Clone)]
pub struct AppState {
    pub spotify: SpotifyClient,
    pub sessions: Arc<Mutex<SessionManager>>,
    pub oauth_states: Arc<Mutex<OauthStateManager>>,
}

impl AppState {
    pub fn new(spotify: SpotifyClient) -> Self {
        Self {
            spotify,
            sessions: Arc::new(Mutex::new(SessionManager::new())),
            oauth_states: Arc::new(Mutex::new(OauthStateManager::new())),
        }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/logout", get(api::logout))
        .route("/api/status", get(api::status))
        .route("/api/analysis", get(api::analysis))
        .route("/api/top-tracks", get(api::top_tracks))
        .route("/api/top-artists", get(api::top_artists))
        .layer(cors_layer())
        .with_state(state)
}

/// Binds the listener and serves until the process exits.
pub async fn serve(state: AppState) -> crate::Res<()> {
    let app = router(state);

    let addr = SocketAddr::from_str(&config::server_addr())?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}

fn cors_layer() -> CorsLayer {
    let mut origins: Vec<HeaderValue> = DEV_ORIGINS
        .iter()
        .map(|origin| HeaderValue::from_static(origin))
        .collect();

    if let Some(production) = config::production_url() {
        match production.parse() {
            Ok(value) => origins.push(value),
            Err(_) => tracing::warn!(production, "ignoring unparseable PRODUCTION_URL"),
        }
    }

    // Credentials rule out wildcard methods/headers, so mirror the request.
    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}
