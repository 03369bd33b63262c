// OAuth2 access tokens for the Sheets API.
// Service accounts trade a self-signed RS256 JWT for a short-lived bearer token.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::{Error, Result};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Refresh this long before the token actually expires.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[async_trait]
pub trait TokenSource: Send + Sync + 'static {
    async fn access_token(&self) -> Result<String>;
}

/// A fixed bearer token.
#[derive(Clone, Debug)]
pub struct StaticToken(pub String);

#[async_trait]
impl TokenSource for StaticToken {
    async fn access_token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    ASSERTION_LIFETIME_SECS as u64
}

struct CachedToken {
    token: String,
    refresh_at: Instant,
}

/// Google service-account credentials exchanged for access tokens on demand.
pub struct ServiceAccountTokenSource {
    client: Client,
    email: String,
    key: EncodingKey,
    token_uri: String,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountTokenSource {
    pub fn new(
        client: Client,
        email: impl Into<String>,
        private_key_pem: &str,
        token_uri: impl Into<String>,
    ) -> Result<Self> {
        let key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
            .map_err(|e| Error::Config(format!("invalid service account private key: {e}")))?;

        Ok(Self {
            client,
            email: email.into(),
            key,
            token_uri: token_uri.into(),
            cached: Mutex::new(None),
        })
    }

    fn signed_assertion(&self) -> Result<String> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            iss: &self.email,
            scope: SPREADSHEETS_SCOPE,
            aud: &self.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.key)
            .map_err(|e| Error::Config(format!("failed to sign assertion: {e}")))
    }

    async fn exchange(&self) -> Result<TokenResponse> {
        let assertion = self.signed_assertion()?;

        let response = self
            .client
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("token request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!("token endpoint HTTP {status}: {body}")));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| Error::Upstream(format!("invalid token response: {e}")))
    }
}

#[async_trait]
impl TokenSource for ServiceAccountTokenSource {
    async fn access_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.token.clone());
            }
        }

        debug!("Requesting access token for {}", self.email);
        let fresh = self.exchange().await?;
        let lifetime = Duration::from_secs(fresh.expires_in).saturating_sub(EXPIRY_MARGIN);

        *cached = Some(CachedToken {
            token: fresh.access_token.clone(),
            refresh_at: Instant::now() + lifetime,
        });

        Ok(fresh.access_token)
    }
}

impl std::fmt::Debug for ServiceAccountTokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountTokenSource")
            .field("email", &self.email)
            .field("token_uri", &self.token_uri)
            .finish()
    }
}
