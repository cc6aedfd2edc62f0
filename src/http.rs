// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

/// Full response to a GET request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: Bytes,
    /// URL the request finally landed on
    pub url: Url,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Response to a HEAD request, after redirects have been followed
#[derive(Debug, Clone)]
pub struct HeadResponse {
    /// HTTP status code
    pub status: u16,
    /// Content-Length header value, if present
    pub content_length: Option<u64>,
    /// URL the request finally landed on
    pub url: Url,
}

/// HTTP client abstraction for testability
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Fetch the entire response body
    async fn get(&self, url: &str) -> Result<HttpResponse, reqwest::Error>;

    /// Issue a HEAD request, following redirects
    async fn head(&self, url: &str) -> Result<HeadResponse, reqwest::Error>;
}

/// Default HTTP client implementation using reqwest
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Create a new ReqwestClient with default settings
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a ReqwestClient whose requests give up after `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client))
    }

    /// Create a new ReqwestClient with a custom reqwest::Client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, reqwest::Error> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let final_url = response.url().clone();
        let body = response.bytes().await?;

        Ok(HttpResponse {
            status,
            body,
            url: final_url,
        })
    }

    async fn head(&self, url: &str) -> Result<HeadResponse, reqwest::Error> {
        let response = self.client.head(url).send().await?;

        // reqwest reports a zero length for bodiless HEAD responses, so read
        // the header directly
        let content_length = response
            .headers()
            .get(reqwest::header::CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse().ok());

        Ok(HeadResponse {
            status: response.status().as_u16(),
            content_length,
            url: response.url().clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reqwest_client_can_be_created() {
        let _client = ReqwestClient::new();
        let _client_default = ReqwestClient::default();
    }

    #[test]
    fn reqwest_client_with_timeout_can_be_created() {
        let client = ReqwestClient::with_timeout(Duration::from_secs(10));
        assert!(client.is_ok());
    }

    #[test]
    fn reqwest_client_can_be_cloned() {
        let client = ReqwestClient::new();
        let _cloned = client.clone();
    }

    #[test]
    fn success_covers_2xx_only() {
        let url = Url::parse("https://example.com/").unwrap();
        let ok = HttpResponse {
            status: 204,
            body: Bytes::new(),
            url: url.clone(),
        };
        let missing = HttpResponse {
            status: 404,
            body: Bytes::new(),
            url,
        };

        assert!(ok.is_success());
        assert!(!missing.is_success());
    }
}
