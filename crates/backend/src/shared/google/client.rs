//! Authenticated JSON client for Google REST APIs.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::auth::TokenSource;
use super::GoogleError;

pub struct GoogleClient {
    http: Client,
    tokens: TokenSource,
}

impl GoogleClient {
    pub fn new(http: Client, tokens: TokenSource) -> Self {
        Self { http, tokens }
    }

    /// HTTP client with the timeouts every Google call uses
    pub fn http_client() -> Result<Client, GoogleError> {
        Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(GoogleError::Http)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, GoogleError> {
        let token = self.tokens.access_token().await?;
        let builder = self.http.get(url).query(query).bearer_auth(token);
        self.execute(builder).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, GoogleError> {
        let token = self.tokens.access_token().await?;
        let builder = self.http.post(url).bearer_auth(token).json(body);
        self.execute(builder).await
    }

    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, GoogleError> {
        let response = builder.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();
        tracing::debug!("Google API {} -> {}", url, status);

        if status == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("Rate limited by Google API on {}", url);
            return Err(GoogleError::RateLimited);
        }

        let body = response.text().await?;

        if !status.is_success() {
            let error = api_error(&body, status);
            tracing::error!("Google API request {} failed: {}", url, error);
            return Err(error);
        }

        // Empty successful bodies decode as {}
        let body = if body.trim().is_empty() { "{}" } else { body.as_str() };
        serde_json::from_str(body).map_err(|e| {
            let preview: String = body.chars().take(300).collect();
            GoogleError::Decode(format!("{} (body: {})", e, preview))
        })
    }
}

/// Google error bodies look like `{"error": {"code": 404, "message": "..."}}`
fn api_error(body: &str, status: StatusCode) -> GoogleError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let error_obj = parsed.as_ref().and_then(|v| v.get("error"));

    let message = error_obj
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {} error", status));
    let code = error_obj
        .and_then(|e| e.get("code"))
        .and_then(Value::as_u64)
        .map(|c| c as u16)
        .unwrap_or(status.as_u16());

    GoogleError::Api {
        status: code,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_reads_google_body() {
        let body = r#"{"error":{"code":404,"message":"Requested entity was not found.","status":"NOT_FOUND"}}"#;
        match api_error(body, StatusCode::NOT_FOUND) {
            GoogleError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Requested entity was not found.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_falls_back_to_status() {
        match api_error("<html>bad gateway</html>", StatusCode::BAD_GATEWAY) {
            GoogleError::Api { status, message } => {
                assert_eq!(status, 502);
                assert!(message.contains("502"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
