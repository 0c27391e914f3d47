use tunescope::error::ApiError;
use tunescope::management::{OauthStateManager, STATE_TTL_SECS, SessionManager};
use tunescope::spotify::SpotifyClient;

use chrono::Utc;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Client pointed at an address nothing listens on; any request through it
/// would fail, which the no-op refresh tests rely on.
fn offline_client() -> SpotifyClient {
    SpotifyClient::new(
        "client-id",
        "client-secret",
        "http://localhost:8000/callback",
        "http://127.0.0.1:9/authorize",
        "http://127.0.0.1:9/api/token",
        "http://127.0.0.1:9",
    )
}

fn mock_client(server: &MockServer) -> SpotifyClient {
    SpotifyClient::new(
        "client-id",
        "client-secret",
        "http://localhost:8000/callback",
        format!("{}/authorize", server.uri()),
        format!("{}/api/token", server.uri()),
        server.uri(),
    )
}

#[test]
fn test_state_token_is_single_use() {
    let mut states = OauthStateManager::new();
    let now = Utc::now().timestamp();

    let state = states.issue(now);
    assert!(states.consume(&state, now).is_ok());

    // Second consume of the same token fails: the entry is gone.
    let err = states.consume(&state, now).unwrap_err();
    assert!(matches!(err, ApiError::InvalidState));
}

#[test]
fn test_unknown_state_is_invalid() {
    let mut states = OauthStateManager::new();
    let err = states.consume("never-issued", 0).unwrap_err();
    assert!(matches!(err, ApiError::InvalidState));
}

#[test]
fn test_expired_state_is_rejected_and_removed() {
    let mut states = OauthStateManager::new();

    let state = states.issue(1_000);
    let err = states
        .consume(&state, 1_000 + STATE_TTL_SECS + 1)
        .unwrap_err();
    assert!(matches!(err, ApiError::ExpiredState));

    // Removed as a side effect even on the expiry failure.
    let err = states.consume(&state, 1_000).unwrap_err();
    assert!(matches!(err, ApiError::InvalidState));
}

#[test]
fn test_state_at_ttl_boundary_is_still_valid() {
    let mut states = OauthStateManager::new();
    let state = states.issue(1_000);
    assert!(states.consume(&state, 1_000 + STATE_TTL_SECS).is_ok());
}

#[test]
fn test_issue_sweeps_stale_entries() {
    let mut states = OauthStateManager::new();

    let stale = states.issue(0);
    let _fresh = states.issue(STATE_TTL_SECS + 100);

    // The second issue swept the first entry.
    assert_eq!(states.len(), 1);
    let err = states.consume(&stale, STATE_TTL_SECS + 100).unwrap_err();
    assert!(matches!(err, ApiError::InvalidState));
}

#[test]
fn test_session_create_get_evict() {
    let mut sessions = SessionManager::new();

    let id = sessions.create("access".to_string(), Some("refresh".to_string()), 12345);
    assert!(sessions.contains(&id));

    let session = sessions.get(&id).unwrap();
    assert_eq!(session.access_token, "access");
    assert_eq!(session.refresh_token.as_deref(), Some("refresh"));
    assert_eq!(session.expires_at, 12345);

    sessions.evict(&id);
    assert!(!sessions.contains(&id));
    assert!(sessions.get(&id).is_none());
}

#[tokio::test]
async fn test_refresh_is_noop_when_token_is_fresh() {
    let mut sessions = SessionManager::new();
    let far_future = Utc::now().timestamp() + 3600;
    let id = sessions.create("access".to_string(), Some("refresh".to_string()), far_future);

    // The client cannot reach anything; success proves no call was made.
    let result = sessions.refresh_if_needed(&id, &offline_client()).await;
    assert!(result.is_ok());

    let session = sessions.get(&id).unwrap();
    assert_eq!(session.access_token, "access");
    assert_eq!(session.expires_at, far_future);
}

#[tokio::test]
async fn test_refresh_without_refresh_token_fails_and_leaves_session() {
    let mut sessions = SessionManager::new();
    let id = sessions.create("access".to_string(), None, 0);

    let err = sessions
        .refresh_if_needed(&id, &offline_client())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::RefreshFailed));

    // Session untouched on failure.
    let session = sessions.get(&id).unwrap();
    assert_eq!(session.access_token, "access");
    assert_eq!(session.expires_at, 0);
}

#[tokio::test]
async fn test_refresh_mutates_session_in_place() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh-token",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut sessions = SessionManager::new();
    let id = sessions.create("stale-token".to_string(), Some("refresh".to_string()), 0);

    sessions
        .refresh_if_needed(&id, &mock_client(&server))
        .await
        .unwrap();

    let session = sessions.get(&id).unwrap();
    assert_eq!(session.access_token, "fresh-token");
    assert!(session.expires_at > Utc::now().timestamp() + 3000);
    // Refresh token is retained for the next cycle.
    assert_eq!(session.refresh_token.as_deref(), Some("refresh"));
}

#[tokio::test]
async fn test_failed_refresh_leaves_session_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant"
        })))
        .mount(&server)
        .await;

    let mut sessions = SessionManager::new();
    let id = sessions.create("stale-token".to_string(), Some("revoked".to_string()), 0);

    let err = sessions
        .refresh_if_needed(&id, &mock_client(&server))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::RefreshFailed));

    let session = sessions.get(&id).unwrap();
    assert_eq!(session.access_token, "stale-token");
    assert_eq!(session.expires_at, 0);
}
