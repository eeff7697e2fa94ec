// Copyright (c) 2026 Dropbox, Inc.

use std::future::Future;
use bytes::Bytes;
use futures::{AsyncRead, AsyncReadExt, FutureExt};
use serde::de::DeserializeOwned;
use serde::ser::Serialize;
use crate::Error;
use crate::error::NotReady;
use crate::async_client_trait::HttpClient;
use crate::client_helpers::{self, Response};
use crate::client_trait_common::Endpoint;
use crate::files::Files;
use crate::paper::Paper;
use crate::sharing::Sharing;
use crate::users::Users;

/// Entry point to the API: owns one HTTP client and hands out a service object per namespace.
///
/// The services only borrow the client, so they cost nothing to create. A `Dropbox` can be shared
/// between threads or tasks (e.g. in an `Arc`) as long as its client is `Sync`; every call builds
/// its own request.
#[derive(Debug, Clone, Default)]
pub struct Dropbox<C> {
    client: C,
}

impl<C: HttpClient> Dropbox<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// The underlying HTTP client.
    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn into_inner(self) -> C {
        self.client
    }

    /// Routes in the `users` namespace.
    pub fn users(&self) -> Users<'_, C> {
        Users::new(&self.client)
    }

    /// Routes in the `files` namespace.
    pub fn files(&self) -> Files<'_, C> {
        Files::new(&self.client)
    }

    /// Routes in the `sharing` namespace.
    pub fn sharing(&self) -> Sharing<'_, C> {
        Sharing::new(&self.client)
    }

    /// Routes in the `paper` namespace.
    pub fn paper(&self) -> Paper<'_, C> {
        Paper::new(&self.client)
    }

    /// Call any RPC style route on the API host, e.g. `"check/user"`.
    pub async fn call<P: Serialize + ?Sized>(&self, function: &str, arg: &P) -> crate::Result<Response> {
        client_helpers::call(&self.client, Endpoint::Api, function, arg).await
    }

    /// Call any upload or download style route. Pass `Some(body)` to upload.
    pub async fn transfer<P: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        function: &str,
        arg: &P,
        body: Option<Bytes>,
    ) -> crate::Result<Response> {
        client_helpers::transfer(&self.client, endpoint, function, arg, body).await
    }
}

/// The result of a download style call: the route's JSON result plus the content stream.
pub struct Download<M> {
    /// The route result, from the `Dropbox-API-Result` header.
    pub metadata: M,

    /// The declared length of `body`, if the server sent one.
    pub content_length: Option<u64>,

    /// The content. Owned by the caller; dropping it releases the connection.
    pub body: Box<dyn AsyncRead + Unpin + Send>,
}

impl<M: DeserializeOwned> Download<M> {
    pub(crate) fn from_response(response: Response) -> crate::Result<Self> {
        let metadata = response.api_result()?
            .ok_or_else(|| Error::UnexpectedResponse(
                "expected a Dropbox-API-Result header".to_owned()))?;
        Ok(Self {
            metadata,
            content_length: response.content_length,
            body: response.body,
        })
    }
}

impl<M> Download<M> {
    /// Read the entire content, checking it against the declared length.
    pub async fn read_all(mut self) -> crate::Result<(M, Vec<u8>)> {
        let mut buf = Vec::new();
        self.body.read_to_end(&mut buf).await
            .map_err(|e| Error::HttpClient(Box::new(e)))?;
        if let Some(expected) = self.content_length {
            if expected != buf.len() as u64 {
                return Err(Error::UnexpectedResponse(format!(
                    "content length mismatch: expected {expected} bytes, read {}", buf.len())));
            }
        }
        Ok((self.metadata, buf))
    }
}

impl<M: std::fmt::Debug> std::fmt::Debug for Download<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Download")
            .field("metadata", &self.metadata)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// Finish a call made through a blocking client.
///
/// Calls made through a [`client_trait::HttpClient`](crate::client_trait::HttpClient) do all
/// their work when first polled, so their futures resolve immediately. A future that is still
/// pending after that first poll came from an async client; it is dropped, abandoning the call,
/// and the result is a transport error wrapping [`NotReady`]. Await such calls instead.
pub fn block_on_sync<T, F>(f: F) -> crate::Result<T>
where
    F: Future<Output = crate::Result<T>>,
{
    f.now_or_never().unwrap_or_else(|| {
        warn!("block_on_sync given a call that did not finish on its first poll");
        Err(NotReady.into())
    })
}
