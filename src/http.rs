use std::error::Error as StdError;
use std::future::Future;
use std::io::ErrorKind;
use std::pin::Pin;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, header::COOKIE};
use tracing::{debug, warn};

use crate::config::Config;
use crate::curl::{Method, RequestDescriptor};
use crate::error::NetworkError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

pub type IssueFuture<'a> = Pin<Box<dyn Future<Output = Result<HttpResponse, NetworkError>> + 'a>>;

/// Sends a parsed request. Non-success statuses are responses, not errors.
pub trait HttpIssuer {
    fn issue<'a>(&'a self, descriptor: &'a RequestDescriptor) -> IssueFuture<'a>;
}

impl<T: HttpIssuer + ?Sized> HttpIssuer for &T {
    fn issue<'a>(&'a self, descriptor: &'a RequestDescriptor) -> IssueFuture<'a> {
        (**self).issue(descriptor)
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
        Method::Patch => reqwest::Method::PATCH,
        Method::Head => reqwest::Method::HEAD,
        Method::Options => reqwest::Method::OPTIONS,
    }
}

fn error_chain_has_kind(err: &(dyn StdError + 'static), kind: ErrorKind, needle: &str) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(source) = current {
        if let Some(io_err) = source.downcast_ref::<std::io::Error>() {
            if io_err.kind() == kind {
                return true;
            }
        }

        if source.to_string().to_ascii_lowercase().contains(needle) {
            return true;
        }

        current = source.source();
    }

    false
}

pub(crate) fn network_error(err: reqwest::Error, url: &str, timeout_secs: u64) -> NetworkError {
    if err.is_timeout() || error_chain_has_kind(&err, ErrorKind::TimedOut, "timed out") {
        return NetworkError::Timeout {
            url: url.to_string(),
            timeout_secs,
        };
    }

    if err.is_connect() {
        if error_chain_has_kind(&err, ErrorKind::ConnectionRefused, "connection refused") {
            return NetworkError::ConnectionRefused {
                url: url.to_string(),
            };
        }
        return NetworkError::Connect {
            url: url.to_string(),
        };
    }

    NetworkError::Request {
        url: url.to_string(),
        message: err.to_string(),
    }
}

/// Issues requests with a shared reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestIssuer {
    client: Client,
    timeout_secs: u64,
}

impl ReqwestIssuer {
    pub fn new(cfg: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .user_agent(cfg.user_agent.as_str())
            .build()
            .context("Failed to initialize HTTP client")?;
        Ok(Self {
            client,
            timeout_secs: cfg.request_timeout_secs,
        })
    }

    async fn send(&self, descriptor: &RequestDescriptor) -> Result<HttpResponse, NetworkError> {
        let url = descriptor.url.as_str();
        let mut request = self
            .client
            .request(to_reqwest_method(descriptor.method), url);
        for header in &descriptor.headers {
            request = request.header(header.name.as_str(), header.value.as_str());
        }
        if let Some(cookies) = &descriptor.cookies {
            request = request.header(COOKIE, cookies.as_str());
        }
        if let Some(body) = &descriptor.body {
            request = request.body(body.clone());
        }

        debug!(
            method = %descriptor.method,
            url = %url,
            header_count = descriptor.headers.len(),
            has_body = descriptor.body.is_some(),
            "issuing request"
        );

        let response = request.send().await.map_err(|err| {
            warn!(url = %url, error = %err, "request failed");
            network_error(err, url, self.timeout_secs)
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| network_error(err, url, self.timeout_secs))?;
        debug!(url = %url, status, body_len = body.len(), "received response");

        Ok(HttpResponse { status, body })
    }
}

impl HttpIssuer for ReqwestIssuer {
    fn issue<'a>(&'a self, descriptor: &'a RequestDescriptor) -> IssueFuture<'a> {
        Box::pin(self.send(descriptor))
    }
}
