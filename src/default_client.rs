// Copyright (c) 2020-2026 Dropbox, Inc.

//! The default blocking HTTP client.
//!
//! Use this client if you're not particularly picky about implementation details, as the specific
//! implementation is not exposed, and may be changed in the future.
//!
//! If you have a need for a specific HTTP client implementation, or your program is already using
//! some HTTP client crate, you probably want to have this crate use it as well. To do that, you
//! should implement the traits in `crate::client_trait` for it and use it instead.
//!
//! Calls through this client block inside their first poll, so
//! [`with_cancellation`](crate::with_cancellation) cannot interrupt them; bound them with
//! [`DefaultClient::with_timeout`] instead.
//!
//! This code (and its dependencies) are only built if you use the `default_client` Cargo feature.

use std::time::Duration;
use bytes::Bytes;
use crate::Error;
use crate::client_trait::{HttpClient, HttpRequestResultRaw};
use crate::client_trait_common::{HttpRequest, ResponseHeaders};
use crate::common::PathRoot;
use crate::default_client_common::{impl_client_config, impl_http_client_accessors};

/// Default blocking HTTP client, authenticating with a bearer token.
#[derive(Debug)]
pub struct DefaultClient {
    inner: UreqClient,
    token: String,
    path_root: Option<PathRoot>,
}

impl DefaultClient {
    /// Create a new client using the given OAuth2 access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            inner: UreqClient::new(None),
            token: token.into(),
            path_root: None,
        }
    }

    /// Give every call an overall deadline, covering connecting, sending, and reading the whole
    /// response. A call that runs past it fails with a transport error.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.inner = UreqClient::new(Some(timeout));
        self
    }

    impl_client_config!(self);
}

impl HttpClient for DefaultClient {
    type Request = UreqRequest;

    fn execute(&self, request: Self::Request) -> Result<HttpRequestResultRaw, Error> {
        self.inner.execute(request)
    }

    fn new_request(&self, url: &str) -> Self::Request {
        self.inner.new_request(url)
    }

    impl_http_client_accessors!();
}

#[derive(Debug)]
struct UreqClient {
    agent: ureq::Agent,
}

impl UreqClient {
    fn new(timeout: Option<Duration>) -> Self {
        // Error statuses are ordinary responses here; classifying them is up to the caller.
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build();
        Self {
            agent: config.into(),
        }
    }

    fn execute(&self, request: UreqRequest) -> Result<HttpRequestResultRaw, Error> {
        let UreqRequest { req, body } = request;
        let resp = match body {
            Some(body) => req.send(&body[..]),
            None => req.send_empty(),
        };
        let resp = resp.map_err(|e| RequestError { inner: e })?;

        let status = resp.status();
        let headers = resp.headers()
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

        Ok(HttpRequestResultRaw {
            status: (status.as_u16(), status.canonical_reason().unwrap_or_default().to_owned()),
            headers,
            content_length,
            body: Box::new(resp.into_body().into_reader()),
        })
    }

    fn new_request(&self, url: &str) -> UreqRequest {
        UreqRequest {
            req: self.agent.post(url),
            body: None,
        }
    }
}

/// This is an implementation detail of the HTTP client.
pub struct UreqRequest {
    req: ureq::RequestBuilder<ureq::typestate::WithBody>,
    body: Option<Bytes>,
}

impl HttpRequest for UreqRequest {
    fn set_header(mut self, name: &str, value: &str) -> Self {
        self.req = self.req.header(name, value);
        self
    }

    fn set_body(mut self, body: Bytes) -> Self {
        self.body = Some(body);
        self
    }
}

/// Errors from the HTTP client encountered in the course of making a request.
#[derive(thiserror::Error, Debug)]
pub enum DefaultClientError {
    /// The request could not be sent, or the response could not be received.
    #[error(transparent)]
    Request(#[from] RequestError),
}

impl From<RequestError> for crate::Error {
    fn from(e: RequestError) -> Self {
        Self::HttpClient(Box::new(DefaultClientError::from(e)))
    }
}

/// Something went wrong making the request.
/// Use the `Display` or `Debug` impls to see more details.
/// Note that this type is intentionally vague about the details beyond these string
/// representations, to allow implementation changes in the future.
pub struct RequestError {
    inner: ureq::Error,
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <ureq::Error as std::fmt::Display>::fmt(&self.inner, f)
    }
}

impl std::fmt::Debug for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <ureq::Error as std::fmt::Debug>::fmt(&self.inner, f)
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.inner)
    }
}
