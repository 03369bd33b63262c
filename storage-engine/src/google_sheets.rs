// Google Sheets v4 REST adapter for the spreadsheet port.

use crate::token::{ServiceAccountTokenSource, TokenSource};
use async_trait::async_trait;
use checkin::ports::SheetStore;
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::config::SheetCredentials;
use shared::{Error, Result};
use std::time::Duration;
use tracing::debug;

const VALUE_INPUT_OPTION: &str = "RAW";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueUpdate<'a> {
    range: &'a str,
    major_dimension: &'static str,
    values: [[&'a str; 1]; 1],
}

/// Spreadsheet store talking to `spreadsheets.values` of the Sheets API
pub struct GoogleSheetsStore<T: TokenSource> {
    client: Client,
    api_base: Url,
    sheet_id: String,
    tokens: T,
}

impl GoogleSheetsStore<ServiceAccountTokenSource> {
    /// Live store authenticated as the configured service account
    pub fn from_credentials(credentials: &SheetCredentials) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        let tokens = ServiceAccountTokenSource::new(
            client.clone(),
            credentials.service_account_email.clone(),
            &credentials.private_key,
            credentials.token_uri.clone(),
        )?;

        Self::new(client, &credentials.api_base, credentials.sheet_id.clone(), tokens)
    }
}

impl<T: TokenSource> GoogleSheetsStore<T> {
    pub fn new(client: Client, api_base: &str, sheet_id: impl Into<String>, tokens: T) -> Result<Self> {
        let api_base = Url::parse(api_base)
            .map_err(|e| Error::Config(format!("invalid Sheets API base '{api_base}': {e}")))?;
        if api_base.cannot_be_a_base() {
            return Err(Error::Config(format!("invalid Sheets API base '{api_base}'")));
        }

        Ok(Self {
            client,
            api_base,
            sheet_id: sheet_id.into(),
            tokens,
        })
    }

    /// `{base}/v4/spreadsheets/{id}/values/{range}`, each segment percent-encoded
    fn values_url(&self, range: &str) -> Result<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config("Sheets API base cannot hold a path".into()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.sheet_id.as_str(), "values", range]);
        Ok(url)
    }

    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(Error::Upstream(format!("HTTP {status}: {body}")))
    }
}

fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl<T: TokenSource> SheetStore for GoogleSheetsStore<T> {
    async fn read_tab(&self, tab_name: &str) -> Result<Vec<Vec<String>>> {
        let url = self.values_url(tab_name)?;
        let token = self.tokens.access_token().await?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("read of '{tab_name}' failed: {e}")))?;

        let range: ValueRange = Self::check_response(response)
            .await?
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("invalid values response: {e}")))?;

        Ok(range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    async fn write_cell(&self, range: &str, value: &str) -> Result<()> {
        let url = self.values_url(range)?;
        let token = self.tokens.access_token().await?;
        debug!("PUT {}", url);

        let body = ValueUpdate {
            range,
            major_dimension: "ROWS",
            values: [[value]],
        };

        let response = self
            .client
            .put(url)
            .query(&[("valueInputOption", VALUE_INPUT_OPTION)])
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("write to '{range}' failed: {e}")))?;

        Self::check_response(response).await?;
        Ok(())
    }
}

impl<T: TokenSource> std::fmt::Debug for GoogleSheetsStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSheetsStore")
            .field("api_base", &self.api_base.as_str())
            .field("sheet_id", &self.sheet_id)
            .finish()
    }
}
