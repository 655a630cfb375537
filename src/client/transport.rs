//! Authenticated HTTP transport with retry on `503 Service Unavailable`.
//!
//! The wire is behind [`HttpBackend`] so the engine can be driven by a
//! scripted backend in tests. [`ReqwestBackend`] is the real one.

use super::token::TokenProvider;
use crate::error::{FactoryError, Result};
use reqwest::{Method, StatusCode};
use std::thread;
use std::time::Duration;

const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("oci-factory/", env!("CARGO_PKG_VERSION"));

/// A fully prepared request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    #[cfg(test)]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and raw body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Executes one HTTP exchange. Only connection-level problems are errors;
/// every HTTP status comes back as a response.
pub trait HttpBackend {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

impl<B: HttpBackend + ?Sized> HttpBackend for &B {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
        (**self).execute(request)
    }
}

/// Blocking reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: reqwest::blocking::Client,
}

impl ReqwestBackend {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FactoryError::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl HttpBackend for ReqwestBackend {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let mut builder = self.client.request(request.method.clone(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder
            .send()
            .map_err(|e| FactoryError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .map_err(|e| FactoryError::Transport(format!("failed to read response body: {}", e)))?;

        Ok(ApiResponse {
            status,
            body: body.to_vec(),
        })
    }
}

/// How often, and how far apart, requests answered with 503 are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub attempts: u32,
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 2,
            interval: Duration::from_secs(5),
        }
    }
}

/// Sends authenticated GitHub API requests through a backend.
#[derive(Debug)]
pub struct Transport<B> {
    backend: B,
    token: TokenProvider,
    retry: RetryPolicy,
}

impl<B: HttpBackend> Transport<B> {
    pub fn new(backend: B, token: TokenProvider, retry: RetryPolicy) -> Self {
        Self {
            backend,
            token,
            retry,
        }
    }

    /// Resolve the access token now rather than on the first request.
    pub fn authenticate(&self) -> Result<()> {
        self.token.get().map(|_| ())
    }

    /// `GET` a resource that must answer `200 OK`.
    pub fn get(&self, url: &str) -> Result<Vec<u8>> {
        self.send(Method::GET, url, None, StatusCode::OK)
    }

    /// Send a request and return the body of a response with `expected` status.
    ///
    /// # Returns
    ///
    /// * `Ok(body)` - The server answered with `expected`
    /// * `Err(FactoryError::Unauthorized)` - The server answered 401
    /// * `Err(FactoryError::HttpStatus)` - Any other status, including 503
    ///   once the retry budget is spent
    /// * `Err(FactoryError::Transport)` - The request could not be sent
    pub fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
        expected: StatusCode,
    ) -> Result<Vec<u8>> {
        let request = ApiRequest {
            method,
            url: url.to_string(),
            headers: self.headers()?,
            body,
        };
        let attempts = self.retry.attempts.max(1);
        let mut attempt = 1;

        loop {
            log::debug!("{} {} (attempt {}/{})", request.method, url, attempt, attempts);
            let response = self.backend.execute(&request)?;

            if response.status == expected {
                return Ok(response.body);
            }

            match response.status {
                StatusCode::SERVICE_UNAVAILABLE if attempt < attempts => {
                    log::warn!(
                        "{} answered {}, retrying in {:?}",
                        url,
                        response.status,
                        self.retry.interval
                    );
                    thread::sleep(self.retry.interval);
                    attempt += 1;
                }
                StatusCode::UNAUTHORIZED => {
                    return Err(FactoryError::Unauthorized {
                        status: response.status.to_string(),
                    });
                }
                status => {
                    return Err(FactoryError::HttpStatus {
                        status: status.to_string(),
                        body: String::from_utf8_lossy(&response.body).into_owned(),
                    });
                }
            }
        }
    }

    fn headers(&self) -> Result<Vec<(&'static str, String)>> {
        Ok(vec![
            ("Accept", ACCEPT.to_string()),
            ("Authorization", format!("Bearer {}", self.token.get()?)),
            ("X-GitHub-Api-Version", API_VERSION.to_string()),
        ])
    }
}
