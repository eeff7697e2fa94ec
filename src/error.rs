// Copyright (c) 2019-2026 Dropbox, Inc.

use crate::api_error::ApiError;

/// An error occurred in the process of making an API call.
///
/// Nothing here is ever retried internally: every failure goes back to the immediate caller,
/// which decides whether an [`ApiError`]'s category and value warrant a retry.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The server answered with HTTP 400 or above. Its detail depends on the endpoint called.
    #[error("Dropbox API returned an error: {0}")]
    Api(#[source] ApiError),

    /// The request could not be sent, or the response could not be read. This includes network
    /// and TLS failures as well as cancellation (see [`Cancelled`]).
    #[error("error from HTTP client: {0}")]
    HttpClient(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    /// Something went wrong in the process of transforming your arguments into a JSON string.
    /// No request was sent.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The request URL could not be built. No request was sent.
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    /// The route name resolved to a URL outside the endpoint's base URL (another host, or above
    /// its `/2/` prefix). No request was sent.
    #[error("route {0:?} does not resolve under the API base URL")]
    InvalidRoute(String),

    /// A successful response body could not be decoded into the expected type.
    #[error("failed to decode Dropbox API response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The Dropbox API response was unexpected or malformed in some way.
    #[error("Dropbox API returned something unexpected: {0}")]
    UnexpectedResponse(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The API error carried by this error, if the server answered with a failure status.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Whether this error came from a call aborted through
    /// [`with_cancellation`](crate::with_cancellation).
    pub fn is_cancelled(&self) -> bool {
        self.downcast_ref_inner::<Cancelled>().is_some()
    }

    /// Look for an inner error of the given type anywhere within this error, by walking the chain
    /// of [`std::error::Error::source`] recursively until something matches the desired type.
    pub fn downcast_ref_inner<E: std::error::Error + 'static>(&self) -> Option<&E> {
        let mut inner = Some(self as &dyn std::error::Error);
        while let Some(e) = inner {
            if let Some(e) = e.downcast_ref() {
                return Some(e);
            }
            inner = e.source();
        }
        None
    }
}

impl From<ApiError> for Error {
    fn from(e: ApiError) -> Self {
        Error::Api(e)
    }
}

/// The call was aborted by its cancellation signal before the response arrived.
///
/// Surfaced as [`Error::HttpClient`], like any other transport failure.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("request cancelled")]
pub struct Cancelled;

impl From<Cancelled> for Error {
    fn from(e: Cancelled) -> Self {
        Error::HttpClient(Box::new(e))
    }
}

/// A call handed to [`block_on_sync`](crate::block_on_sync) was still waiting after its first
/// poll, so it was not made through a blocking client.
///
/// Surfaced as [`Error::HttpClient`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("call did not complete on its first poll; await it on an async executor instead")]
pub struct NotReady;

impl From<NotReady> for Error {
    fn from(e: NotReady) -> Self {
        Error::HttpClient(Box::new(e))
    }
}
