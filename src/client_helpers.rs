// Copyright (c) 2019-2026 Dropbox, Inc.

use std::borrow::Cow;
use std::fmt::Write;
use bytes::Bytes;
use futures::{AsyncRead, AsyncReadExt};
use serde::de::DeserializeOwned;
use serde::ser::Serialize;
use url::Url;
use crate::Error;
use crate::api_error::{ApiError, ErrorBody};
use crate::async_client_trait::{HttpClient, HttpRequestResultRaw};
use crate::client_trait_common::{
    Endpoint, HttpRequest, ResponseHeaders, Style, API_ARG_HEADER, API_RESULT_HEADER,
    PATH_ROOT_HEADER,
};

/// A successful (status below 400) response whose body has not been read yet.
///
/// The body belongs to the caller: read it to the end, or drop it, to release the connection.
pub struct Response {
    /// HTTP response code and reason phrase.
    pub status: (u16, String),

    /// All response headers.
    pub headers: ResponseHeaders,

    /// The declared length of the body, if the server sent one.
    pub content_length: Option<u64>,

    /// The response body stream.
    pub body: Box<dyn AsyncRead + Unpin + Send>,
}

impl Response {
    /// Read the whole body and decode it as JSON.
    ///
    /// An empty body decodes like `null`, so endpoints with no result can be read as `()`.
    pub async fn json<T: DeserializeOwned>(mut self) -> crate::Result<T> {
        let bytes = read_body(&mut self.body).await?;
        drop(self.body);
        let text: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &bytes
        };
        serde_json::from_slice(text).map_err(Error::Decode)
    }

    /// Decode the JSON result that download style calls return in the `Dropbox-API-Result`
    /// header. `None` if the header is absent.
    pub fn api_result<T: DeserializeOwned>(&self) -> crate::Result<Option<T>> {
        self.headers.get(API_RESULT_HEADER)
            .map(|s| serde_json::from_str(s).map_err(Error::Decode))
            .transpose()
    }
}

impl std::fmt::Debug for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

pub(crate) fn request_url(endpoint: &Endpoint, function: &str) -> crate::Result<Url> {
    let base = Url::parse(&endpoint.url())?;
    let url = base.join(function.trim_start_matches('/'))?;
    // Credentials only ever go to the endpoint's own host, under its versioned prefix.
    if url.origin() != base.origin() || !url.path().starts_with(base.path()) {
        return Err(Error::InvalidRoute(function.to_owned()));
    }
    Ok(url)
}

pub(crate) fn prepare_request<T: HttpClient>(
    client: &T,
    endpoint: &Endpoint,
    style: Style,
    function: &str,
    params: String,
    body: Option<Bytes>,
) -> crate::Result<T::Request> {
    let url = request_url(endpoint, function)?;

    // Everything that can fail locally happens before the request exists.
    let path_root = client.path_root()
        .map(|root| root.to_header_value())
        .transpose()?;

    debug!("request for {url}");
    let mut req = client.new_request(url.as_str());
    req = req.set_header("User-Agent", concat!("dropbox-client-rust/", env!("CARGO_PKG_VERSION")));

    if let Some(token) = client.token() {
        req = req.set_header("Authorization", &format!("Bearer {token}"));
    }

    if let Some(path_root) = path_root {
        trace!("{PATH_ROOT_HEADER}: {path_root}");
        req = req.set_header(PATH_ROOT_HEADER, &path_root);
    }

    match style {
        Style::Rpc => {
            // Send params in the body. A null argument means the route takes no input, and
            // gets no body at all.
            if params != "null" {
                req = req.set_header("Content-Type", "application/json");
                req = req.set_body(Bytes::from(params));
            }
        }
        Style::Upload | Style::Download => {
            // Send params in a header, even when null; the body, if any, is the raw content.
            req = req.set_header(API_ARG_HEADER, &json_escape_header(&params));
            if let Some(body) = body {
                req = req.set_header("Content-Type", "application/octet-stream");
                req = req.set_body(body);
            }
        }
    }

    Ok(req)
}

/// Make an RPC style call: the JSON-encoded arguments are the request body, and the result is
/// the response body.
pub async fn call<C, P>(
    client: &C,
    endpoint: Endpoint,
    function: &str,
    params: &P,
) -> crate::Result<Response>
where
    C: HttpClient,
    P: Serialize + ?Sized,
{
    let params = serde_json::to_string(params)?;
    let req = prepare_request(client, &endpoint, Style::Rpc, function, params, None)?;
    dispatch(client, req).await
}

/// Make a content-transfer call: the JSON-encoded arguments travel in the `Dropbox-API-Arg`
/// header, and `body`, if given, is uploaded verbatim. With no body, this is a download.
pub async fn transfer<C, P>(
    client: &C,
    endpoint: Endpoint,
    function: &str,
    params: &P,
    body: Option<Bytes>,
) -> crate::Result<Response>
where
    C: HttpClient,
    P: Serialize + ?Sized,
{
    let style = if body.is_some() { Style::Upload } else { Style::Download };
    let params = serde_json::to_string(params)?;
    let req = prepare_request(client, &endpoint, style, function, params, body)?;
    dispatch(client, req).await
}

/// Make an RPC call and decode its JSON result.
pub(crate) async fn rpc<T, C, P>(client: &C, function: &str, params: &P) -> crate::Result<T>
where
    T: DeserializeOwned,
    C: HttpClient,
    P: Serialize + ?Sized,
{
    call(client, Endpoint::Api, function, params).await?.json().await
}

/// Send the request and sort the outcome into success or failure.
///
/// On success the body is handed back unread. On failure it is drained completely before the
/// error is returned.
async fn dispatch<C: HttpClient>(client: &C, req: C::Request) -> crate::Result<Response> {
    let HttpRequestResultRaw {
        status: (code, status),
        headers,
        content_length,
        body,
    } = client.execute(req).await?;

    if code < 400 {
        return Ok(Response {
            status: (code, status),
            headers,
            content_length,
            body,
        });
    }

    let error = read_api_error(ApiError::new(code, status, headers), body).await;
    debug!("HTTP {code}: {error}");
    Err(error)
}

/// Build the error for a failed call. Consumes the body, so the connection is released on every
/// path out of here.
///
/// If reading the body fails, that read error is returned instead of the API error: a broken
/// transport takes priority over the status it was trying to report.
async fn read_api_error(mut error: ApiError, mut body: Box<dyn AsyncRead + Unpin + Send>) -> Error {
    let raw = match read_body(&mut body).await {
        Ok(raw) => raw,
        Err(e) => return e,
    };
    drop(body);

    let is_json = error.headers.content_type()
        .is_some_and(|t| t.to_ascii_lowercase().contains("json"));

    if is_json {
        match serde_json::from_slice::<ErrorBody>(&raw) {
            Ok(decoded) => return Error::Api(error.with_body(decoded)),
            Err(e) => debug!("API error body is not the expected JSON: {e}"),
        }
    }

    error.summary = String::from_utf8_lossy(&raw).into_owned();
    Error::Api(error)
}

async fn read_body(body: &mut (dyn AsyncRead + Unpin + Send)) -> crate::Result<Vec<u8>> {
    let mut buf = Vec::new();
    body.read_to_end(&mut buf).await
        .map_err(|e| Error::HttpClient(Box::new(e)))?;
    Ok(buf)
}

/// Replaces any non-ASCII characters (and 0x7f) with JSON-style '\uXXXX' sequence. Otherwise,
/// returns it unmodified without any additional allocation or copying.
pub(crate) fn json_escape_header(s: &str) -> Cow<'_, str> {
    // The HTTP spec requires escaping ASCII DEL (0x7F) too, so the quicker str::is_ascii() check
    // can't be used to skip this for the common case.

    let mut out = Cow::Borrowed(s);
    for (i, c) in s.char_indices() {
        if !c.is_ascii() || c == '\x7f' {
            let mstr = match out {
                Cow::Borrowed(_) => {
                    // Still borrowed means everything up to here was plain ASCII.
                    out = Cow::Owned(s[0..i].to_owned());
                    out.to_mut()
                }
                Cow::Owned(ref mut m) => m,
            };
            // Characters outside the BMP become a surrogate pair, as JSON requires.
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                let _ = write!(mstr, "\\u{unit:04x}");
            }
        } else if let Cow::Owned(ref mut o) = out {
            o.push(c);
        }
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_json_escape() {
        assert_eq!(Cow::Borrowed("foobar"), json_escape_header("foobar"));
        assert_eq!(
            Cow::<'_, str>::Owned("tro\\u0161kovi".to_owned()),
            json_escape_header("troškovi"));
        assert_eq!(
            Cow::<'_, str>::Owned(
                r#"{"field": "some_\u00fc\u00f1\u00eec\u00f8d\u00e9_and_\u007f"}"#.to_owned()),
            json_escape_header("{\"field\": \"some_üñîcødé_and_\x7f\"}"));
        assert_eq!(
            Cow::<'_, str>::Owned("almost,\\u007f but not quite".to_owned()),
            json_escape_header("almost,\x7f but not quite"));
    }

    #[test]
    fn test_json_escape_astral() {
        assert_eq!("\\ud83d\\ude00.txt", json_escape_header("😀.txt"));
        let parsed: String = serde_json::from_str(&format!("\"{}\"", json_escape_header("😀"))).unwrap();
        assert_eq!("😀", parsed);
    }

    #[test]
    fn test_request_url() {
        assert_eq!(
            "https://api.dropboxapi.com/2/users/get_account",
            request_url(&Endpoint::Api, "/users/get_account").unwrap().as_str());
        assert_eq!(
            "https://content.dropboxapi.com/2/files/download",
            request_url(&Endpoint::Content, "files/download").unwrap().as_str());
        assert!(matches!(
            request_url(&Endpoint::Other("bad host".into()), "x"),
            Err(Error::Url(_))));
    }

    #[test]
    fn test_request_url_stays_under_base() {
        for route in [
            "https://evil.example/steal",
            "https://api.dropboxapi.com/oauth2/token",
            "http://api.dropboxapi.com/2/files/list_folder",
            "../oauth2/token",
            "files/../../x",
        ] {
            assert!(
                matches!(request_url(&Endpoint::Api, route), Err(Error::InvalidRoute(ref r)) if r == route),
                "{route} was accepted");
        }
        assert_eq!(
            "https://api.dropboxapi.com/2/files/list_folder/continue",
            request_url(&Endpoint::Api, "files/list_folder/continue").unwrap().as_str());
    }
}
