//! Service principal authentication
//!
//! Acquires bearer tokens for the management plane with the OAuth2
//! client-credentials grant and caches them until shortly before expiry.

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;
use weir_core::domain::secret::SecureString;

use crate::error::{ClientError, Result};

/// Public-cloud identity provider
pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

/// Scope granting access to the resource-management plane
pub const MANAGEMENT_SCOPE: &str = "https://management.azure.com/.default";

/// Tokens are refreshed this long before they expire
const EXPIRY_MARGIN_SECS: i64 = 300;

/// A bearer token and the instant it stops being valid
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: SecureString,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Whether the token is still usable at `now`, keeping a refresh margin
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) < self.expires_at
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: Option<String>,
    error_description: Option<String>,
}

/// Client id, secret and tenant of a service principal
pub struct ServicePrincipalCredential {
    client_id: String,
    client_secret: SecureString,
    tenant_id: String,
    authority_host: String,
    scope: String,
    client: Client,
    cached: Mutex<Option<AccessToken>>,
}

impl ServicePrincipalCredential {
    /// Create a credential against the public-cloud identity provider
    pub fn new(
        client_id: impl Into<String>,
        client_secret: SecureString,
        tenant_id: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret,
            tenant_id: tenant_id.into(),
            authority_host: DEFAULT_AUTHORITY_HOST.to_string(),
            scope: MANAGEMENT_SCOPE.to_string(),
            client: Client::new(),
            cached: Mutex::new(None),
        }
    }

    /// Use a different identity provider (sovereign clouds, test servers)
    pub fn with_authority_host(mut self, authority_host: impl Into<String>) -> Self {
        self.authority_host = authority_host.into().trim_end_matches('/').to_string();
        self
    }

    /// Use a configured HTTP client for token requests
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    fn token_url(&self) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.authority_host, self.tenant_id
        )
    }

    /// Return a valid bearer token, requesting a new one when the cache is stale
    pub async fn token(&self) -> Result<AccessToken> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(Utc::now())) {
            return Ok(token.clone());
        }

        let token = self.request_token().await?;
        *cached = Some(token.clone());
        Ok(token)
    }

    async fn request_token(&self) -> Result<AccessToken> {
        debug!(
            tenant = %self.tenant_id,
            client_id = %self.client_id,
            "Requesting management token"
        );

        let response = self
            .client
            .post(self.token_url())
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.expose()),
                ("scope", self.scope.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<TokenErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error_description.or(e.error))
                .unwrap_or(body);
            return Err(ClientError::Authentication {
                status: status.as_u16(),
                message,
            });
        }

        parse_token(&body, Utc::now()).ok_or_else(|| ClientError::Authentication {
            status: status.as_u16(),
            message: "token response did not contain an access_token".to_string(),
        })
    }
}

impl std::fmt::Debug for ServicePrincipalCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServicePrincipalCredential")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret)
            .field("tenant_id", &self.tenant_id)
            .field("authority_host", &self.authority_host)
            .finish()
    }
}

/// Parse a token endpoint body; `expires_in` may arrive as a number or a string
fn parse_token(body: &str, now: DateTime<Utc>) -> Option<AccessToken> {
    let response: TokenResponse = serde_json::from_str(body).ok()?;
    let token = response.access_token.filter(|t| !t.is_empty())?;

    let expires_in = match response.expires_in {
        Some(serde_json::Value::Number(n)) => n.as_i64(),
        Some(serde_json::Value::String(s)) => s.parse().ok(),
        _ => None,
    }
    .unwrap_or(3600);

    Some(AccessToken {
        token: SecureString::new(token),
        expires_at: now + Duration::seconds(expires_in),
    })
}
