// Copyright (c) 2019-2026 Dropbox, Inc.

//! The error returned by the Dropbox API when a call fails with HTTP 400 or above.
//!
//! Dropbox reports errors as a JSON object of the form
//!
//! ```json
//! {
//!     "error_summary": "path/not_found/..",
//!     "user_message": "optional",
//!     "error": {".tag": "path", "path": {".tag": "not_found"}}
//! }
//! ```
//!
//! The shape of `error` varies per endpoint, so it is kept as an untyped [`serde_json::Value`]
//! tree, and [`ApiError::tag`] pulls the `(category, value)` pair out of it.

use serde::Deserialize;
use serde_json::Value;
use crate::client_trait_common::ResponseHeaders;

/// Error tag value Dropbox uses when a request was rate limited.
pub const TOO_MANY_REQUESTS: &str = "too_many_requests";

/// An error response from the Dropbox API.
#[derive(Debug, Clone, Default)]
pub struct ApiError {
    /// Canonical reason phrase for the HTTP status, e.g. `Conflict`.
    pub status: String,

    /// HTTP status code, always 400 or above.
    pub status_code: u16,

    /// Raw response headers.
    pub headers: ResponseHeaders,

    /// Human-readable summary. For responses that were not JSON this is the raw body text.
    pub summary: String,

    /// Message suitable for showing to the end user, if the server supplied one.
    pub user_message: Option<String>,

    /// The nested tagged-union error detail. [`Value::Null`] if there was none.
    pub error: Value,
}

/// The parts of an [`ApiError`] that travel in the response body.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default, rename = "error_summary")]
    pub summary: String,

    #[serde(default, deserialize_with = "deserialize_user_message")]
    pub user_message: Option<String>,

    #[serde(default)]
    pub error: Value,
}

impl ApiError {
    pub(crate) fn new(status_code: u16, status: String, headers: ResponseHeaders) -> Self {
        Self {
            status,
            status_code,
            headers,
            ..Default::default()
        }
    }

    pub(crate) fn with_body(mut self, body: ErrorBody) -> Self {
        self.summary = body.summary;
        self.user_message = body.user_message;
        self.error = body.error;
        self
    }

    /// The `(category, value)` pair of the error detail, e.g. `("path", "not_found")`.
    ///
    /// Never fails: any missing or mistyped piece comes back as an empty string.
    pub fn tag(&self) -> (&str, &str) {
        tag_of(&self.error)
    }

    /// Whether the error detail carries exactly this category and value.
    pub fn is(&self, category: &str, value: &str) -> bool {
        self.tag() == (category, value)
    }

    /// Whether the server rejected the call because of rate limiting.
    pub fn is_too_many_requests(&self) -> bool {
        let (category, value) = self.tag();
        self.status_code == 429 || category == TOO_MANY_REQUESTS || value == TOO_MANY_REQUESTS
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.summary.is_empty() {
            write!(f, "{}: {}", self.status_code, self.status)
        } else {
            f.write_str(&self.summary)
        }
    }
}

impl std::error::Error for ApiError {}

/// Extract the `(category, value)` pair from a tagged-union error detail.
///
/// * A bare string is the value, with no category.
/// * An object's `.tag` names the category; the object's field of that name, if it is itself an
///   object, holds the value in its own `.tag`.
/// * Anything else, or any missing or mistyped step, yields empty strings.
pub fn tag_of(detail: &Value) -> (&str, &str) {
    let map = match detail {
        Value::String(s) => return ("", s.as_str()),
        Value::Object(map) => map,
        _ => return ("", ""),
    };

    let Some(category) = map.get(".tag").and_then(Value::as_str) else {
        return ("", "");
    };

    let value = map.get(category)
        .and_then(Value::as_object)
        .and_then(|inner| inner.get(".tag"))
        .and_then(Value::as_str)
        .unwrap_or("");

    (category, value)
}

/// `user_message` is documented as localized text (`{"text": .., "locale": ..}`) but some
/// endpoints send a bare string. Accept both; drop anything else.
fn deserialize_user_message<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Object(mut map) => match map.remove("text") {
            Some(Value::String(s)) => Some(s),
            _ => None,
        },
        _ => None,
    })
}
