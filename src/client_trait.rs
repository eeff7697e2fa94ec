// Copyright (c) 2019-2026 Dropbox, Inc.

//! Everything needed to implement your blocking HTTP client.
//!
//! Every type implementing [`HttpClient`] here is also an
//! [`async_client_trait::HttpClient`](crate::async_client_trait::HttpClient) whose futures resolve
//! immediately, so it can be used with [`Dropbox`](crate::Dropbox) directly.

use std::io::Read;
use crate::client_trait_common::{HttpRequest, ResponseHeaders};
use crate::common::PathRoot;

/// The base HTTP synchronous client trait.
pub trait HttpClient {
    /// The concrete type of request supported by the client.
    type Request: HttpRequest;

    /// Make a HTTP request. Responses with any status code are returned as `Ok`; only failures
    /// to send the request or receive the response are errors.
    fn execute(&self, request: Self::Request) -> crate::Result<HttpRequestResultRaw>;

    /// Create a new request instance for the given URL. It should be a POST request.
    fn new_request(&self, url: &str) -> Self::Request;

    /// The client's bearer token, if any.
    fn token(&self) -> Option<&str> {
        None
    }

    /// The currently set path root, if any.
    fn path_root(&self) -> Option<&PathRoot> {
        None
    }
}

/// The raw response from the server, including a streaming response body.
pub struct HttpRequestResultRaw {
    /// HTTP response code and reason phrase.
    pub status: (u16, String),

    /// All response headers.
    pub headers: ResponseHeaders,

    /// The value of the `Content-Length` header, if present.
    pub content_length: Option<u64>,

    /// The response body stream.
    pub body: Box<dyn Read + Send>,
}
