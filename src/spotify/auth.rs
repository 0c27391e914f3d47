use url::form_urlencoded;

use crate::{error::ApiError, types::TokenResponse};

use super::{SpotifyClient, TOKEN_TIMEOUT};

impl SpotifyClient {
    /// Builds the authorization URL the user is redirected to on `/login`.
    ///
    /// Embeds the client id, the requested scopes, the registered redirect
    /// URI, and the single-use `state` token issued for this attempt.
    pub fn authorize_url(&self, state: &str, scope: &str) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.client_id)
            .append_pair("scope", scope)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("state", state)
            .append_pair("show_dialog", "false")
            .finish();
        format!("{}?{}", self.auth_url, query)
    }

    /// Exchanges an authorization code for an access/refresh token pair.
    ///
    /// Authenticates with the client id and secret via HTTP basic auth
    /// (confidential-client authorization-code flow).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::TokenExchangeFailed`] on any non-2xx response or
    /// unparseable token payload, and [`ApiError::Http`] on transport
    /// failures. The authorization code is single-use; a failed exchange
    /// terminates the login attempt.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, ApiError> {
        let res = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", &self.redirect_uri),
            ])
            .timeout(TOKEN_TIMEOUT)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::warn!(status = %res.status(), "token exchange rejected");
            return Err(ApiError::TokenExchangeFailed);
        }

        res.json::<TokenResponse>()
            .await
            .map_err(|_| ApiError::TokenExchangeFailed)
    }

    /// Exchanges a refresh token for a fresh access token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::RefreshFailed`] on any non-2xx response. The
    /// caller's session is left untouched in that case.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, ApiError> {
        let res = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .timeout(TOKEN_TIMEOUT)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::warn!(status = %res.status(), "token refresh rejected");
            return Err(ApiError::RefreshFailed);
        }

        res.json::<TokenResponse>()
            .await
            .map_err(|_| ApiError::RefreshFailed)
    }
}
