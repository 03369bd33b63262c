use std::time::Duration;
use tracing::warn;

/// Service-account credentials for the live spreadsheet backend.
#[derive(Clone)]
pub struct SheetCredentials {
    pub sheet_id: String,
    pub service_account_email: String,
    pub private_key: String,
    pub api_base: String,
    pub token_uri: String,
}

impl std::fmt::Debug for SheetCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetCredentials")
            .field("sheet_id", &self.sheet_id)
            .field("service_account_email", &self.service_account_email)
            .field("private_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub http_port: u16,
    pub allowed_origins: Vec<String>,
    pub cache_ttl: Duration,
    /// `None` means mock mode.
    pub credentials: Option<SheetCredentials>,
}

impl Config {
    const DEFAULT_HOST: &'static str = "0.0.0.0";
    const DEFAULT_HTTP_PORT: u16 = 5000;
    const DEFAULT_CACHE_TTL_SECS: u64 = 60;
    const DEFAULT_API_BASE: &'static str = "https://sheets.googleapis.com";
    const DEFAULT_TOKEN_URI: &'static str = "https://oauth2.googleapis.com/token";

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let http_port = non_empty("CHECKIN_HTTP_PORT")
            .and_then(|v| v.trim().parse::<u16>().ok())
            .unwrap_or(Self::DEFAULT_HTTP_PORT);
        let cache_ttl_secs = non_empty("CHECKIN_CACHE_TTL_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(Self::DEFAULT_CACHE_TTL_SECS);

        let credentials = match (
            non_empty("GOOGLE_SHEET_ID"),
            non_empty("GOOGLE_SERVICE_ACCOUNT_EMAIL"),
            non_empty("GOOGLE_PRIVATE_KEY"),
        ) {
            (Some(sheet_id), Some(email), Some(key)) => Some(SheetCredentials {
                sheet_id,
                service_account_email: email,
                private_key: normalize_private_key(&key),
                api_base: non_empty("GOOGLE_SHEETS_API_BASE")
                    .unwrap_or_else(|| Self::DEFAULT_API_BASE.to_string()),
                token_uri: non_empty("GOOGLE_TOKEN_URI")
                    .unwrap_or_else(|| Self::DEFAULT_TOKEN_URI.to_string()),
            }),
            (None, Some(_), Some(_)) => {
                warn!("GOOGLE_SHEET_ID not set, falling back to mock mode");
                None
            }
            _ => None,
        };

        Self {
            host: non_empty("CHECKIN_HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_string()),
            http_port,
            allowed_origins: non_empty("CHECKIN_ALLOWED_ORIGINS")
                .unwrap_or_else(|| "*".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            credentials,
        }
    }

    pub fn is_mock(&self) -> bool {
        self.credentials.is_none()
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }
}

/// Undo the usual damage done to PEM keys stored in `.env` files: one pair of
/// surrounding quotes and literal `\n` escapes.
pub fn normalize_private_key(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    unquoted.replace("\\n", "\n")
}
