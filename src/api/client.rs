//! HTTP client for the storefront REST API.
//!
//! Thin wrapper over `reqwest` with a built-in request timeout so no call
//! can stall its caller indefinitely.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use crate::config::Config;
use crate::models::{NewUser, Product, TokenPair, UserProfile};

use super::{ApiError, AuthApi};

/// Maximum length of the body excerpt included in parse errors
const PARSE_SNIPPET_LEN: usize = 200;

/// Leading excerpt of a response body, cut on a char boundary.
fn snippet(text: &str) -> &str {
    let mut end = text.len().min(PARSE_SNIPPET_LEN);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// API client for the storefront backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client with default configuration.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_config(&Config::default())
    }

    /// Create a client with the given base URL and timeout.
    pub fn with_config(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|err| ApiError::InvalidResponse(format!("{}: {}", err, snippet(&text))))
    }

    /// Fetch a page of the product catalog.
    pub async fn products(&self, offset: u32, limit: u32) -> Result<Vec<Product>, ApiError> {
        let url = self.url("/products");

        let response = self
            .client
            .get(&url)
            .query(&[("offset", offset), ("limit", limit)])
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        debug!(offset, limit, "Products response received");
        Self::parse_json(response).await
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<TokenPair, ApiError> {
        let url = self.url("/auth/login");

        let response = self
            .client
            .post(&url)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        debug!("Login response received");
        Self::parse_json(response).await
    }

    async fn profile(&self, access_token: &str) -> Result<UserProfile, ApiError> {
        let url = self.url("/auth/profile");

        let response = self
            .client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        Self::parse_json(response).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError> {
        let url = self.url("/auth/refresh-token");

        // The refresh endpoint takes camelCase, unlike the tokens it returns.
        let response = self
            .client
            .post(&url)
            .json(&json!({ "refreshToken": refresh_token }))
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        debug!("Refresh response received");
        Self::parse_json(response).await
    }

    async fn register(&self, new_user: &NewUser) -> Result<UserProfile, ApiError> {
        let url = self.url("/users");

        let response = self.client.post(&url).json(new_user).send().await?;

        let response = Self::check_response(response).await?;
        debug!("Register response received");
        Self::parse_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let config = Config {
            api_base_url: "https://api.example.com/v1/".to_string(),
            ..Config::default()
        };
        let client = ApiClient::with_config(&config).expect("Failed to build client");
        assert_eq!(client.url("/auth/login"), "https://api.example.com/v1/auth/login");
    }

    #[test]
    fn test_snippet_respects_char_boundaries() {
        // 3-byte chars: the 200-byte cut falls inside one
        let text = "€".repeat(100);
        let cut = snippet(&text);
        assert!(cut.len() <= PARSE_SNIPPET_LEN);
        assert_eq!(cut.len() % 3, 0);
        assert!(cut.chars().all(|c| c == '€'));

        assert_eq!(snippet("short"), "short");
    }

    #[test]
    fn test_default_base_url() {
        let client = ApiClient::new().expect("Failed to build client");
        assert_eq!(
            client.url("/auth/profile"),
            "https://api.escuelajs.co/api/v1/auth/profile"
        );
    }
}
