use crate::config::Config;
use crate::core::error::{ExtractionError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Header name to single value, attached verbatim to a request.
pub type RequestHeaders = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: RequestHeaders,
    pub body: Option<String>,
}

impl Request {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: RequestHeaders::new(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: RequestHeaders::new(),
            body: Some(body.into()),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn headers(mut self, headers: &RequestHeaders) -> Self {
        self.headers
            .extend(headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }
}

#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub url: String,
    pub body: String,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ExtractionError::Status {
                status: self.status,
                url: self.url,
            })
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Network transport used by every extractor of a service.
#[async_trait]
pub trait Downloader: Send + Sync {
    async fn execute(&self, request: Request) -> Result<Response>;
}

pub struct HttpDownloader {
    client: reqwest::Client,
    pub retries: u32,
}

impl HttpDownloader {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout))
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self {
            client,
            retries: config.retries,
        })
    }

    fn build(&self, request: &Request) -> reqwest::RequestBuilder {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }
        builder
    }
}

fn is_transient(status: u16) -> bool {
    status == 403 || status == 429 || status >= 500
}

const MAX_BACKOFF_SECS: u64 = 60;

fn backoff(attempt: u32) -> Duration {
    Duration::from_secs(2_u64.saturating_pow(attempt).min(MAX_BACKOFF_SECS))
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn execute(&self, request: Request) -> Result<Response> {
        let max_attempts = self.retries.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!("{:?} {} (attempt {})", request.method, request.url, attempt);

            let response = match self.build(&request).send().await {
                Ok(response) => response,
                Err(e) => {
                    if attempt >= max_attempts {
                        return Err(e.into());
                    }
                    warn!("Request failed (attempt {}): {}", attempt, e);
                    tokio::time::sleep(backoff(attempt)).await;
                    continue;
                }
            };

            let status = response.status().as_u16();
            if is_transient(status) && attempt < max_attempts {
                let delay = backoff(attempt);
                warn!(
                    "HTTP {} from {} (attempt {}), retrying in {} seconds...",
                    status,
                    request.url,
                    attempt,
                    delay.as_secs()
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            let url = response.url().to_string();
            let body = response.text().await?;
            return Ok(Response { status, url, body });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_for_status() {
        let ok = Response {
            status: 200,
            url: "https://www.nicovideo.jp/".to_string(),
            body: "{}".to_string(),
        };
        assert!(ok.error_for_status().is_ok());

        let missing = Response {
            status: 404,
            url: "https://www.nicovideo.jp/watch/sm1".to_string(),
            body: String::new(),
        };
        match missing.error_for_status() {
            Err(ExtractionError::Status { status, url }) => {
                assert_eq!(status, 404);
                assert!(url.ends_with("sm1"));
            }
            other => panic!("unexpected {:?}", other.map(|r| r.status)),
        }
    }

    #[test]
    fn test_request_builder_merges_headers() {
        let mut extra = RequestHeaders::new();
        extra.insert("X-Frontend-Id".to_string(), "6".to_string());

        let request = Request::get("https://nvapi.nicovideo.jp/")
            .header("Accept-Language", "ja-JP")
            .headers(&extra);

        assert_eq!(request.method, Method::Get);
        assert_eq!(request.headers.len(), 2);
        assert_eq!(request.headers["X-Frontend-Id"], "6");
    }

    #[test]
    fn test_backoff_is_capped() {
        assert_eq!(backoff(1), Duration::from_secs(2));
        assert_eq!(backoff(3), Duration::from_secs(8));
        assert_eq!(backoff(6), Duration::from_secs(MAX_BACKOFF_SECS));
        assert_eq!(backoff(64), Duration::from_secs(MAX_BACKOFF_SECS));
        assert_eq!(backoff(u32::MAX), Duration::from_secs(MAX_BACKOFF_SECS));
    }

    #[test]
    fn test_transient_statuses() {
        assert!(is_transient(503));
        assert!(is_transient(429));
        assert!(!is_transient(404));
    }
}
