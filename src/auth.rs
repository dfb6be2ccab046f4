use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::debug;

use crate::api::auth::{AuthCredentials, AuthError, Grant};
use crate::cache::CredentialCache;
use crate::config::Config;

/// Client id used for password logins when none is configured
pub const DEFAULT_CLIENT_ID: &str = "pnc-bacon";

/// A cached credential is only reused if it stays valid at least this long
const EXPIRY_MARGIN: Duration = Duration::seconds(30);

/// Authentication material for calls to the PNC API
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub expires_at: Option<OffsetDateTime>,
}

impl Credential {
    /// Whether the access token is still usable at `now`
    pub fn is_valid_at(&self, now: OffsetDateTime) -> bool {
        self.expires_at
            .is_none_or(|expires_at| expires_at - EXPIRY_MARGIN > now)
    }
}

/// Provides access tokens, reusing cached credentials when possible
pub struct Authenticator {
    keycloak_url: String,
    realm: String,
    credentials: AuthCredentials,
    cache: CredentialCache,
}

impl Authenticator {
    /// Build an authenticator from the `keycloak` block of the configuration
    pub fn from_config(config: &Config, cache: CredentialCache) -> Result<Self, AuthError> {
        let keycloak = &config.keycloak;
        let keycloak_url = config
            .effective_keycloak_url()
            .ok_or(AuthError::MissingSetting("url"))?;
        let realm = keycloak
            .realm
            .as_deref()
            .ok_or(AuthError::MissingSetting("realm"))?;
        let username = keycloak
            .username
            .as_deref()
            .ok_or(AuthError::MissingSetting("username"))?;

        let grant = match (&keycloak.client_secret, &keycloak.password) {
            (Some(client_secret), _) => Grant::ClientCredentials {
                client_secret: client_secret.clone(),
            },
            (None, Some(password)) => Grant::Password {
                client_id: keycloak
                    .client_id
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string()),
                password: password.clone(),
            },
            (None, None) => return Err(AuthError::MissingSetting("password")),
        };

        Ok(Self {
            keycloak_url: keycloak_url.to_string(),
            realm: realm.to_string(),
            credentials: AuthCredentials::new(keycloak_url, realm, username, grant),
            cache,
        })
    }

    /// Return a usable access token, logging in only if the cache has none
    pub async fn token(&self) -> Result<String, AuthError> {
        let username = &self.credentials.username;

        if let Some(credential) = self.cache.lookup(&self.keycloak_url, &self.realm, username) {
            if credential.is_valid_at(OffsetDateTime::now_utc()) {
                debug!("Using cached credential for {username}");
                return Ok(credential.access_token);
            }
            debug!("Cached credential for {username} has expired");
        }

        let credential = self.credentials.get_token().await?;
        self.cache
            .store(&self.keycloak_url, &self.realm, username, &credential);
        Ok(credential.access_token)
    }
}
