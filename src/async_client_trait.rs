// Copyright (c) 2019-2026 Dropbox, Inc.

//! Everything needed to implement your async HTTP client.

use std::future::{Future, ready};
use std::io::{IoSliceMut, Read};
use std::pin::Pin;
use std::task::{Context, Poll};
use futures::AsyncRead;
use crate::client_trait as sync;
use crate::client_trait_common::{HttpRequest, ResponseHeaders};
use crate::common::PathRoot;

/// The base HTTP asynchronous client trait.
///
/// Implementations are expected to be cheap to share: one client may serve many concurrent
/// calls, each of which builds its own request.
pub trait HttpClient {
    /// The concrete type of request supported by the client.
    type Request: HttpRequest;

    /// Make a HTTP request. Responses with any status code are returned as `Ok`; only failures
    /// to send the request or receive the response are errors. Dropping the returned future must
    /// abort the request.
    fn execute(
        &self,
        request: Self::Request,
    ) -> impl Future<Output = crate::Result<HttpRequestResultRaw>> + Send;

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

/// The raw response from the server, including an async streaming response body.
pub struct HttpRequestResultRaw {
    /// HTTP response code and reason phrase.
    pub status: (u16, String),

    /// All response headers.
    pub headers: ResponseHeaders,

    /// The value of the `Content-Length` header, if present.
    pub content_length: Option<u64>,

    /// The response body stream.
    pub body: Box<dyn AsyncRead + Unpin + Send>,
}

/// Blanket implementation of the async interface for all sync clients.
/// This is necessary because all the machinery is actually implemented in terms of the async
/// client.
impl<T: sync::HttpClient> HttpClient for T {
    type Request = T::Request;

    fn execute(&self, request: Self::Request) -> impl Future<Output=crate::Result<HttpRequestResultRaw>> + Send {
        ready(sync::HttpClient::execute(self, request).map(|r| {
            HttpRequestResultRaw {
                status: r.status,
                headers: r.headers,
                content_length: r.content_length,
                body: Box::new(SyncReadAdapter { inner: r.body }),
            }
        }))
    }

    fn new_request(&self, url: &str) -> Self::Request {
        sync::HttpClient::new_request(self, url)
    }

    fn token(&self) -> Option<&str> {
        sync::HttpClient::token(self)
    }

    fn path_root(&self) -> Option<&PathRoot> {
        sync::HttpClient::path_root(self)
    }
}

/// Presents a blocking reader as an [`AsyncRead`] that is always ready.
pub struct SyncReadAdapter {
    pub inner: Box<dyn Read + Send>,
}

impl AsyncRead for SyncReadAdapter {
    fn poll_read(mut self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &mut [u8]) -> Poll<std::io::Result<usize>> {
        Poll::Ready(self.inner.read(buf))
    }

    fn poll_read_vectored(mut self: Pin<&mut Self>, _cx: &mut Context<'_>, bufs: &mut [IoSliceMut<'_>]) -> Poll<std::io::Result<usize>> {
        Poll::Ready(self.inner.read_vectored(bufs))
    }
}
