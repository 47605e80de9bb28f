use crate::config::AppConfig;
use crate::data::quote::{parse_quote, Quote};
use reqwest::{Client, StatusCode};
use thiserror::Error;

pub const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("quotes endpoint returned {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },
    #[error("malformed quote response: {0}")]
    Parse(String),
}

impl FetchError {
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            FetchError::HttpStatus { status, .. }
                if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN
        )
    }
}

/// Issues quotes/latest requests for one fixed symbol/currency pair.
#[derive(Debug, Clone)]
pub struct PriceClient {
    http: Client,
    endpoint: String,
    api_key: Option<String>,
    symbol: String,
    convert: String,
}

impl PriceClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: Client::new(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            symbol: config.symbol.clone(),
            convert: config.convert.clone(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn convert(&self) -> &str {
        &self.convert
    }

    pub async fn fetch_quote(&self) -> Result<Quote, FetchError> {
        let mut request = self
            .http
            .get(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[("symbol", self.symbol.as_str()), ("convert", self.convert.as_str())]);

        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let res = request.send().await?;
        let status = res.status();
        let body = res.bytes().await?;

        if !status.is_success() {
            let snippet: String = String::from_utf8_lossy(&body).chars().take(200).collect();
            return Err(FetchError::HttpStatus {
                status,
                body: snippet,
            });
        }

        parse_quote(&body, &self.symbol, &self.convert)
    }
}
