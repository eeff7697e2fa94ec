// Copyright (c) 2019-2026 Dropbox, Inc.

//! Types common to the sync and async HTTP clients.

use std::borrow::Cow;
use bytes::Bytes;

/// Header carrying the JSON arguments of upload and download style calls.
pub const API_ARG_HEADER: &str = "Dropbox-API-Arg";

/// Header carrying the serialized [`PathRoot`](crate::PathRoot), when one is set.
pub const PATH_ROOT_HEADER: &str = "Dropbox-API-Path-Root";

/// Header in which download style calls return their JSON result.
pub const API_RESULT_HEADER: &str = "Dropbox-API-Result";

/// A builder for a HTTP request.
pub trait HttpRequest {
    /// Set a HTTP header.
    fn set_header(self, name: &str, value: &str) -> Self;

    /// Set the request body.
    fn set_body(self, body: Bytes) -> Self;
}

/// The API base endpoint for a request. Determines which hostname the request should go to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// The endpoint used for most API calls.
    Api,

    /// The endpoint primarily used for upload and download calls.
    Content,

    /// The endpoint primarily used for longpolling calls.
    Notify,

    /// Any other `<subdomain>.dropboxapi.com` host.
    Other(Cow<'static, str>),
}

impl Endpoint {
    /// The hostname prefix for this endpoint.
    pub fn subdomain(&self) -> &str {
        match self {
            Endpoint::Api => "api",
            Endpoint::Content => "content",
            Endpoint::Notify => "notify",
            Endpoint::Other(s) => s,
        }
    }

    /// The base URL for API calls using the given endpoint.
    pub fn url(&self) -> Cow<'static, str> {
        match self {
            Endpoint::Api => Cow::Borrowed("https://api.dropboxapi.com/2/"),
            Endpoint::Content => Cow::Borrowed("https://content.dropboxapi.com/2/"),
            Endpoint::Notify => Cow::Borrowed("https://notify.dropboxapi.com/2/"),
            Endpoint::Other(s) => Cow::Owned(format!("https://{s}.dropboxapi.com/2/")),
        }
    }
}

/// The style of a request, which determines how arguments are passed, and whether there is a
/// request and/or response body.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Style {
    /// Arguments are passed in the request body; response is in the body; no request or response
    /// body content stream.
    Rpc,

    /// Arguments are passed in a HTTP header; response is in the body; request body is the upload
    /// content.
    Upload,

    /// Arguments are passed in a HTTP header; response is in a HTTP header; no request content
    /// body; response body contains the content stream.
    Download,
}

/// Raw HTTP response headers, in the order the server sent them.
///
/// Lookups are case-insensitive. A header that appears more than once keeps every value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    entries: Vec<(String, String)>,
}

impl ResponseHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header value.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// The first value of the named header.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Every value of the named header.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries.iter()
            .filter(move |(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.get("Content-Type")
    }

    /// The parsed `Content-Length` header. `None` if absent; an error if present but not a
    /// number.
    pub fn content_length(&self) -> crate::Result<Option<u64>> {
        self.get("Content-Length")
            .map(|s| {
                s.trim().parse::<u64>()
                    .map_err(|e| crate::Error::UnexpectedResponse(
                        format!("invalid Content-Length {s:?}: {e}")))
            })
            .transpose()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for ResponseHeaders {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(n, v)| (n.into(), v.into())).collect(),
        }
    }
}
