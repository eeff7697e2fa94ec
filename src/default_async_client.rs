// Copyright (c) 2020-2026 Dropbox, Inc.

//! The default async HTTP client.
//!
//! Use this client if you're not particularly picky about implementation details, as the specific
//! implementation is not exposed, and may be changed in the future.
//!
//! If you have a need for a specific HTTP client implementation, or your program is already using
//! some HTTP client crate, you probably want to have this crate use it as well. To do that, you
//! should implement the traits in `crate::async_client_trait` for it and use it instead.
//!
//! This code (and its dependencies) are only built if you use the `default_async_client` Cargo
//! feature.

use std::future::{Future, ready};
use std::time::Duration;
use bytes::Bytes;
use futures::{FutureExt, TryFutureExt, TryStreamExt};
use crate::async_client_trait::{HttpClient, HttpRequestResultRaw};
use crate::client_trait_common::{HttpRequest, ResponseHeaders};
use crate::common::PathRoot;
use crate::default_client_common::{impl_client_config, impl_http_client_accessors};

/// Default async HTTP client, authenticating with a bearer token.
///
/// Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct DefaultClient {
    inner: ReqwestClient,
    token: String,
    path_root: Option<PathRoot>,
}

impl DefaultClient {
    /// Create a new client using the given OAuth2 access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            inner: ReqwestClient::default(),
            token: token.into(),
            path_root: None,
        }
    }

    /// Give every call an overall deadline, covering connecting, sending, and reading the whole
    /// response. A call that runs past it fails with a transport error.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.inner.timeout = Some(timeout);
        self
    }

    impl_client_config!(self);
}

impl HttpClient for DefaultClient {
    type Request = ReqwestRequest;

    fn execute(
        &self,
        request: Self::Request,
    ) -> impl Future<Output = crate::Result<HttpRequestResultRaw>> + Send {
        self.inner.execute(request)
    }

    fn new_request(&self, url: &str) -> Self::Request {
        self.inner.new_request(url)
    }

    impl_http_client_accessors!();
}

#[derive(Debug, Clone)]
struct ReqwestClient {
    inner: reqwest::Client,
    timeout: Option<Duration>,
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self {
            inner: reqwest::Client::builder()
                .https_only(true)
                .http2_prior_knowledge()
                .build()
                .expect("failed to initialize the HTTP client's TLS backend"),
            timeout: None,
        }
    }
}

impl ReqwestClient {
    fn execute(
        &self,
        request: ReqwestRequest,
    ) -> impl Future<Output = crate::Result<HttpRequestResultRaw>> + Send {
        let ReqwestRequest { mut req, body } = request;
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }
        if let Some(body) = body {
            req = req.body(body);
        }
        let req = match req.build() {
            Ok(req) => req,
            Err(e) => {
                return ready(Err(crate::Error::HttpClient(Box::new(e)))).boxed();
            }
        };
        self.inner.execute(req)
            .map_ok_or_else(
                |e| Err(crate::Error::HttpClient(Box::new(e))),
                |resp| {
                    let status = resp.status();

                    let headers = resp
                        .headers()
                        .iter()
                        .filter_map(|(name, value)| match value.to_str() {
                            Ok(v) => Some((name.as_str(), v)),
                            Err(_) => {
                                trace!("skipping non-text value of header {name}");
                                None
                            }
                        })
                        .collect::<ResponseHeaders>();

                    let content_length = headers.content_length()?;

                    let body = resp.bytes_stream()
                        .map_err(std::io::Error::other)
                        .into_async_read();

                    Ok(HttpRequestResultRaw {
                        status: (
                            status.as_u16(),
                            status.canonical_reason().unwrap_or_default().to_owned(),
                        ),
                        headers,
                        content_length,
                        body: Box::new(body),
                    })
                }
            )
            .boxed()
    }

    fn new_request(&self, url: &str) -> ReqwestRequest {
        ReqwestRequest {
            req: self.inner.post(url),
            body: None,
        }
    }
}

/// This is an implementation detail of the HTTP client.
pub struct ReqwestRequest {
    req: reqwest::RequestBuilder,
    body: Option<Bytes>,
}

impl HttpRequest for ReqwestRequest {
    fn set_header(mut self, name: &str, value: &str) -> Self {
        self.req = self.req.header(name, value);
        self
    }

    fn set_body(mut self, body: Bytes) -> Self {
        self.body = Some(body);
        self
    }
}
