use axum::{Json, extract::State, http::HeaderMap};

use crate::{server::AppState, types::StatusResponse};

use super::session_id_from_headers;

/// `GET /api/status` - lightweight logged-in probe.
///
/// Unlike the data endpoints this path must converge to a clean
/// "logged out" answer: a failed refresh evicts the session instead of
/// passing the stale token through. Always responds 200.
pub async fn status(State(app): State<AppState>, headers: HeaderMap) -> Json<StatusResponse> {
    let logged_out = StatusResponse {
        logged_in: false,
        user: None,
    };

    let Some(session_id) = session_id_from_headers(&headers) else {
        return Json(logged_out);
    };

    let access_token = {
        let mut sessions = app.sessions.lock().await;
        if !sessions.contains(&session_id) {
            return Json(logged_out);
        }

        if let Err(e) = sessions.refresh_if_needed(&session_id, &app.spotify).await {
            tracing::info!(error = %e, "refresh failed during status check; evicting session");
            sessions.evict(&session_id);
            return Json(logged_out);
        }

        match sessions.get(&session_id) {
            Some(session) => session.access_token,
            None => return Json(logged_out),
        }
    };

    // Profile enrichment is best-effort; a failure here does not demote
    // the session to logged-out.
    let user = app.spotify.fetch_profile(&access_token).await.ok();

    Json(StatusResponse {
        logged_in: true,
        user,
    })
}
