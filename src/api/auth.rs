use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use time::{Duration, OffsetDateTime};

use crate::auth::Credential;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Failed to connect to SSO server: {0}")]
    ConnectionError(#[from] reqwest::Error),

    #[error(
        "Authentication failed: Invalid username, password, client secret, or SSO URL. Please verify your credentials."
    )]
    AuthenticationFailed,

    #[error("SSO server returned an error: {0}")]
    ServerError(String),

    #[error("Missing keycloak setting '{0}' in config file")]
    MissingSetting(&'static str),
}

/// The OAuth2 grant used to obtain a token
#[derive(Clone, Debug)]
pub enum Grant {
    /// Service account login, the username is the client id
    ClientCredentials { client_secret: String },
    /// User login through a public client
    Password { client_id: String, password: String },
}

/// Everything needed to request a token from the SSO server
#[derive(Clone, Debug)]
pub struct AuthCredentials {
    pub token_url: String,
    pub username: String,
    pub grant: Grant,
}

impl AuthCredentials {
    pub fn new(keycloak_url: &str, realm: &str, username: &str, grant: Grant) -> Self {
        Self {
            token_url: build_token_url(keycloak_url, realm),
            username: username.to_string(),
            grant,
        }
    }

    /// Get a credential using these settings
    pub async fn get_token(&self) -> Result<Credential, AuthError> {
        let form: Vec<(&str, &str)> = match &self.grant {
            Grant::ClientCredentials { client_secret } => vec![
                ("grant_type", "client_credentials"),
                ("client_id", self.username.as_str()),
                ("client_secret", client_secret.as_str()),
            ],
            Grant::Password {
                client_id,
                password,
            } => vec![
                ("grant_type", "password"),
                ("client_id", client_id.as_str()),
                ("username", self.username.as_str()),
                ("password", password.as_str()),
            ],
        };
        get_token(&self.token_url, &form).await
    }
}

/// Build the token URL from a keycloak base URL and realm
pub fn build_token_url(keycloak_url: &str, realm: &str) -> String {
    if keycloak_url.ends_with("/token") {
        keycloak_url.to_string()
    } else {
        format!(
            "{}/auth/realms/{}/protocol/openid-connect/token",
            keycloak_url.trim_end_matches('/'),
            realm
        )
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<u64>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
    error_description: Option<String>,
}

/// Retrieves an OAuth2 access token from `token_url` with the given form
async fn get_token(token_url: &str, form: &[(&str, &str)]) -> Result<Credential, AuthError> {
    let client = Client::new();

    let response = client.post(token_url).form(form).send().await?;

    if response.status().is_success() {
        let token_response: TokenResponse = response.json().await?;
        let expires_at = match token_response.expires_in {
            Some(secs) => Some(expiry_after(OffsetDateTime::now_utc(), secs).ok_or_else(|| {
                AuthError::ServerError(format!("Token lifetime out of range: {secs}s"))
            })?),
            None => None,
        };
        Ok(Credential {
            access_token: token_response.access_token,
            refresh_token: token_response.refresh_token,
            expires_at,
        })
    } else if response.status().as_u16() == 401 || response.status().as_u16() == 400 {
        // Try to get error details
        if let Ok(error_response) = response.json::<ErrorResponse>().await {
            if error_response.error == "invalid_client"
                || error_response.error == "unauthorized_client"
                || error_response.error == "invalid_grant"
            {
                return Err(AuthError::AuthenticationFailed);
            }
            let msg = error_response
                .error_description
                .unwrap_or(error_response.error);
            return Err(AuthError::ServerError(msg));
        }
        Err(AuthError::AuthenticationFailed)
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AuthError::ServerError(format!("HTTP {}: {}", status, body)))
    }
}

/// `now` plus `secs`, or `None` if the result is not a representable date
fn expiry_after(now: OffsetDateTime, secs: u64) -> Option<OffsetDateTime> {
    now.checked_add(Duration::seconds(i64::try_from(secs).ok()?))
}
