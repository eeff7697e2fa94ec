#![allow(dead_code)]

use std::io::{self, Cursor, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use bytes::Bytes;
use dropbox_client::client_trait::{HttpClient, HttpRequestResultRaw};
use dropbox_client::client_trait_common::{HttpRequest, ResponseHeaders};
use dropbox_client::PathRoot;

/// A request as the fake client saw it.
#[derive(Debug, Clone, Default)]
pub struct FakeRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Bytes>,
}

impl FakeRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn header_count(&self, name: &str) -> usize {
        self.headers.iter().filter(|(n, _)| n.eq_ignore_ascii_case(name)).count()
    }
}

impl HttpRequest for FakeRequest {
    fn set_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    fn set_body(mut self, body: Bytes) -> Self {
        self.body = Some(body);
        self
    }
}

/// What the fake server answers with.
pub struct Canned {
    pub status: u16,
    pub reason: &'static str,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    /// Fail with this error kind once the body has been read this far.
    pub fail_after: Option<usize>,
}

impl Canned {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            reason: reason(status),
            headers: vec![],
            body: body.into(),
            fail_after: None,
        }
    }

    pub fn json(status: u16, value: serde_json::Value) -> Self {
        Self::new(status, value.to_string()).header("Content-Type", "application/json")
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn failing_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        302 => "Found",
        399 => "",
        400 => "Bad Request",
        401 => "Unauthorized",
        409 => "Conflict",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        _ => "",
    }
}

/// Observes what happened to a response body.
#[derive(Debug, Clone, Default)]
pub struct BodyProbe {
    pub reached_eof: Arc<AtomicBool>,
    pub dropped: Arc<AtomicBool>,
}

impl BodyProbe {
    pub fn reached_eof(&self) -> bool {
        self.reached_eof.load(Ordering::SeqCst)
    }

    pub fn dropped(&self) -> bool {
        self.dropped.load(Ordering::SeqCst)
    }
}

struct ProbedBody {
    data: Cursor<Vec<u8>>,
    fail_after: Option<usize>,
    probe: BodyProbe,
}

impl Read for ProbedBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(limit) = self.fail_after {
            if self.data.position() as usize >= limit {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset by peer"));
            }
            let room = limit - self.data.position() as usize;
            let len = buf.len().min(room);
            return self.data.read(&mut buf[..len]);
        }
        let n = self.data.read(buf)?;
        if n == 0 && !buf.is_empty() {
            self.probe.reached_eof.store(true, Ordering::SeqCst);
        }
        Ok(n)
    }
}

impl Drop for ProbedBody {
    fn drop(&mut self) {
        self.probe.dropped.store(true, Ordering::SeqCst);
    }
}

type Responder = dyn Fn(&FakeRequest) -> dropbox_client::Result<Canned> + Send + Sync;

/// A blocking client that records every request and answers from a closure, without touching
/// the network.
pub struct FakeClient {
    pub token: Option<String>,
    pub path_root: Option<PathRoot>,
    responder: Box<Responder>,
    requests: Mutex<Vec<FakeRequest>>,
    probes: Mutex<Vec<BodyProbe>>,
}

impl FakeClient {
    pub fn new(
        responder: impl Fn(&FakeRequest) -> dropbox_client::Result<Canned> + Send + Sync + 'static,
    ) -> Self {
        Self {
            token: Some("test-token".to_owned()),
            path_root: None,
            responder: Box::new(responder),
            requests: Mutex::new(vec![]),
            probes: Mutex::new(vec![]),
        }
    }

    /// Always answer with the same response.
    pub fn answering(make: impl Fn() -> Canned + Send + Sync + 'static) -> Self {
        Self::new(move |_| Ok(make()))
    }

    pub fn with_path_root(mut self, path_root: PathRoot) -> Self {
        self.path_root = Some(path_root);
        self
    }

    pub fn requests(&self) -> Vec<FakeRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> FakeRequest {
        self.requests.lock().unwrap().last().cloned().expect("no request was made")
    }

    pub fn last_probe(&self) -> BodyProbe {
        self.probes.lock().unwrap().last().cloned().expect("no response was produced")
    }
}

impl HttpClient for FakeClient {
    type Request = FakeRequest;

    fn execute(&self, request: Self::Request) -> dropbox_client::Result<HttpRequestResultRaw> {
        let canned = (self.responder)(&request);
        self.requests.lock().unwrap().push(request);
        let canned = canned?;

        let probe = BodyProbe::default();
        self.probes.lock().unwrap().push(probe.clone());

        let headers = canned.headers.iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
            .collect::<ResponseHeaders>();
        let content_length = headers.content_length()?;

        Ok(HttpRequestResultRaw {
            status: (canned.status, canned.reason.to_owned()),
            headers,
            content_length,
            body: Box::new(ProbedBody {
                data: Cursor::new(canned.body),
                fail_after: canned.fail_after,
                probe,
            }),
        })
    }

    fn new_request(&self, url: &str) -> Self::Request {
        FakeRequest {
            url: url.to_owned(),
            ..Default::default()
        }
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn path_root(&self) -> Option<&PathRoot> {
        self.path_root.as_ref()
    }
}
