use tracing_subscriber::EnvFilter;

use tunescope::{config, server::{self, AppState}, spotify::SpotifyClient};

#[tokio::main]
async fn main() {
    config::load_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tunescope=info,tower_http=warn")),
        )
        .init();

    // Fail fast on missing credentials instead of 500ing the first login.
    let _ = config::spotify_client_id();
    let _ = config::spotify_client_secret();

    let state = AppState::new(SpotifyClient::from_config());

    if let Err(e) = server::serve(state).await {
        tracing::error!(error = %e, "server terminated");
        std::process::exit(1);
    }
}
