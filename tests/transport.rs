use bytes::Bytes;
use futures::AsyncReadExt;
use serde_json::json;
use dropbox_client::{block_on_sync, Dropbox, Error, PathRoot};
use dropbox_client::client_trait_common::Endpoint;

mod common;
use common::{Canned, FakeClient};

fn ok_json() -> Canned {
    Canned::json(200, json!({"result": "ok"}))
}

#[test]
fn test_rpc_request_shape() {
    let dbx = Dropbox::new(FakeClient::answering(ok_json));
    let resp = block_on_sync(dbx.call("check/user", &json!({"query": "foo"})))
        .expect("call must succeed");
    assert_eq!(200, resp.status.0);

    let req = dbx.client().last_request();
    assert_eq!("https://api.dropboxapi.com/2/check/user", req.url);
    assert_eq!(Some("Bearer test-token"), req.header("Authorization"));
    assert_eq!(Some("application/json"), req.header("Content-Type"));
    assert!(req.header("User-Agent").is_some_and(|ua| ua.starts_with("dropbox-client-rust/")));
    assert_eq!(None, req.header("Dropbox-API-Arg"));
    assert_eq!(None, req.header("Dropbox-API-Path-Root"));

    let sent: serde_json::Value = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
    assert_eq!(json!({"query": "foo"}), sent);
}

#[test]
fn test_leading_slash_is_tolerated() {
    let dbx = Dropbox::new(FakeClient::answering(ok_json));
    block_on_sync(dbx.call("/users/get_current_account", &())).unwrap();
    assert_eq!(
        "https://api.dropboxapi.com/2/users/get_current_account",
        dbx.client().last_request().url);
}

#[test]
fn test_null_input_sends_nothing() {
    let dbx = Dropbox::new(FakeClient::answering(ok_json));
    block_on_sync(dbx.call("users/get_current_account", &())).unwrap();

    let req = dbx.client().last_request();
    assert_eq!(None, req.body);
    assert_eq!(None, req.header("Content-Type"));
    assert_eq!(Some("Bearer test-token"), req.header("Authorization"));
}

#[test]
fn test_no_token_no_authorization() {
    let mut client = FakeClient::answering(ok_json);
    client.token = None;
    let dbx = Dropbox::new(client);
    block_on_sync(dbx.call("check/app", &json!({}))).unwrap();
    assert_eq!(None, dbx.client().last_request().header("Authorization"));
}

#[test]
fn test_transfer_without_body() {
    let dbx = Dropbox::new(FakeClient::answering(|| Canned::new(200, "file content")));
    let resp = block_on_sync(dbx.transfer(
        Endpoint::Content, "files/download", &json!({"path": "/a.txt"}), None))
        .unwrap();

    let req = dbx.client().last_request();
    assert_eq!("https://content.dropboxapi.com/2/files/download", req.url);
    assert_eq!(Some(r#"{"path":"/a.txt"}"#), req.header("Dropbox-API-Arg"));
    assert_eq!(None, req.header("Content-Type"));
    assert_eq!(None, req.body);

    let mut body = resp.body;
    let mut content = String::new();
    futures::executor::block_on(body.read_to_string(&mut content)).unwrap();
    assert_eq!("file content", content);
}

#[test]
fn test_transfer_with_body() {
    let dbx = Dropbox::new(FakeClient::answering(ok_json));
    let payload = Bytes::from_static(b"\x00\x01binary\xff");
    block_on_sync(dbx.transfer(
        Endpoint::Content, "files/upload", &json!({"path": "/b.bin"}), Some(payload.clone())))
        .unwrap();

    let req = dbx.client().last_request();
    assert_eq!(Some("application/octet-stream"), req.header("Content-Type"));
    assert_eq!(1, req.header_count("Content-Type"));
    assert_eq!(Some(payload), req.body);
    assert_eq!(Some(r#"{"path":"/b.bin"}"#), req.header("Dropbox-API-Arg"));
}

#[test]
fn test_transfer_empty_body_is_still_sent() {
    let dbx = Dropbox::new(FakeClient::answering(ok_json));
    block_on_sync(dbx.transfer(
        Endpoint::Content, "files/upload", &json!({"path": "/empty"}), Some(Bytes::new())))
        .unwrap();

    let req = dbx.client().last_request();
    assert_eq!(Some("application/octet-stream"), req.header("Content-Type"));
    assert_eq!(Some(Bytes::new()), req.body);
}

#[test]
fn test_transfer_null_arg_still_sends_header() {
    let dbx = Dropbox::new(FakeClient::answering(|| Canned::json(200, json!({"session_id": "s1"}))));
    block_on_sync(dbx.transfer(
        Endpoint::Content, "files/upload_session/start", &(), Some(Bytes::from_static(b"abc"))))
        .unwrap();

    let req = dbx.client().last_request();
    assert_eq!(Some("null"), req.header("Dropbox-API-Arg"));
    assert_eq!(Some("application/octet-stream"), req.header("Content-Type"));
    assert_eq!(Some(Bytes::from_static(b"abc")), req.body);

    block_on_sync(dbx.transfer(Endpoint::Content, "files/download", &(), None)).unwrap();
    assert_eq!(Some("null"), dbx.client().last_request().header("Dropbox-API-Arg"));
}

#[test]
fn test_route_cannot_leave_api_host() {
    let dbx = Dropbox::new(FakeClient::answering(ok_json));
    let err = block_on_sync(dbx.call("https://evil.example/steal", &json!({}))).unwrap_err();
    assert!(matches!(err, Error::InvalidRoute(_)), "got {err:?}");

    let err = block_on_sync(dbx.transfer(
        Endpoint::Content, "../../upload", &json!({}), Some(Bytes::from_static(b"x"))))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidRoute(_)), "got {err:?}");

    assert!(dbx.client().requests().is_empty(), "a request was sent");
}

#[test]
fn test_api_arg_header_is_ascii() {
    let dbx = Dropbox::new(FakeClient::answering(ok_json));
    block_on_sync(dbx.transfer(
        Endpoint::Content, "files/download", &json!({"path": "/dir/😀 ü\u{7f}.txt"}), None))
        .unwrap();

    let arg = dbx.client().last_request().header("Dropbox-API-Arg").unwrap().to_owned();
    assert!(arg.bytes().all(|b| b.is_ascii() && b != 0x7f), "not escaped: {arg}");
    assert_eq!(r#"{"path":"/dir/\ud83d\ude00 \u00fc\u007f.txt"}"#, arg);

    let decoded: serde_json::Value = serde_json::from_str(&arg).unwrap();
    assert_eq!(json!({"path": "/dir/😀 ü\u{7f}.txt"}), decoded);
}

#[test]
fn test_path_root_header() {
    let dbx = Dropbox::new(FakeClient::answering(ok_json).with_path_root(PathRoot::Home));
    block_on_sync(dbx.call("files/list_folder", &json!({"path": ""}))).unwrap();
    assert_eq!(
        Some(r#"{".tag":"home"}"#),
        dbx.client().last_request().header("Dropbox-API-Path-Root"));

    let dbx = Dropbox::new(
        FakeClient::answering(ok_json).with_path_root(PathRoot::Root("12345".to_owned())));
    block_on_sync(dbx.transfer(Endpoint::Content, "files/download", &json!({"path": "/x"}), None))
        .unwrap();
    let req = dbx.client().last_request();
    assert_eq!(Some(r#"{".tag":"root","root":"12345"}"#), req.header("Dropbox-API-Path-Root"));
    assert_eq!(1, req.header_count("Dropbox-API-Path-Root"));

    let dbx = Dropbox::new(
        FakeClient::answering(ok_json).with_path_root(PathRoot::NamespaceId("777".to_owned())));
    block_on_sync(dbx.call("files/list_folder", &json!({"path": ""}))).unwrap();
    assert_eq!(
        Some(r#"{".tag":"namespace_id","namespace_id":"777"}"#),
        dbx.client().last_request().header("Dropbox-API-Path-Root"));
}

#[test]
fn test_status_boundary() {
    let dbx = Dropbox::new(FakeClient::answering(|| Canned::new(399, "fine")));
    let resp = block_on_sync(dbx.call("check/user", &json!({}))).expect("399 is not a failure");
    assert_eq!(399, resp.status.0);
    assert!(!dbx.client().last_probe().dropped(), "success body must be left to the caller");

    let dbx = Dropbox::new(FakeClient::answering(|| Canned::new(400, "bad input")));
    let err = block_on_sync(dbx.call("check/user", &json!({}))).unwrap_err();
    let api = err.api_error().expect("400 is a failure");
    assert_eq!(400, api.status_code);
    assert_eq!("Bad Request", api.status);
    assert_eq!("bad input", api.summary);
}

#[test]
fn test_redirect_is_not_an_error() {
    let dbx = Dropbox::new(FakeClient::answering(
        || Canned::new(302, "").header("Location", "https://example.com/")));
    let resp = block_on_sync(dbx.call("check/user", &json!({}))).unwrap();
    assert_eq!(302, resp.status.0);
    assert_eq!(Some("https://example.com/"), resp.headers.get("location"));
}

#[test]
fn test_error_body_is_drained() {
    let dbx = Dropbox::new(FakeClient::answering(|| Canned::json(409, json!({
        "error_summary": "path/not_found/..",
        "error": {".tag": "path", "path": {".tag": "not_found"}},
    }))));
    let err = block_on_sync(dbx.call("files/get_metadata", &json!({"path": "/nope"}))).unwrap_err();
    assert!(err.api_error().is_some());

    let probe = dbx.client().last_probe();
    assert!(probe.reached_eof(), "error body must be read to the end");
    assert!(probe.dropped(), "error body must be released");
}

#[test]
fn test_error_body_read_failure_is_transport_error() {
    let dbx = Dropbox::new(FakeClient::answering(
        || Canned::new(500, "partial error bo").failing_after(4)));
    let err = block_on_sync(dbx.call("check/user", &json!({}))).unwrap_err();
    assert!(matches!(err, Error::HttpClient(_)), "got {err:?}");
    let io = err.downcast_ref_inner::<std::io::Error>().expect("io error in chain");
    assert_eq!(std::io::ErrorKind::ConnectionReset, io.kind());
    assert!(dbx.client().last_probe().dropped());
}

#[test]
fn test_transport_failure_passes_through() {
    let dbx = Dropbox::new(FakeClient::new(|_| Err(Error::HttpClient(Box::new(
        std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"))))));
    let err = block_on_sync(dbx.call("check/user", &json!({}))).unwrap_err();
    assert!(matches!(err, Error::HttpClient(_)));
    assert!(err.api_error().is_none());
    assert!(!err.is_cancelled());
    assert_eq!(1, dbx.client().requests().len());
}

#[test]
fn test_bad_content_length() {
    let dbx = Dropbox::new(FakeClient::answering(
        || Canned::new(200, "abc").header("Content-Length", "three")));
    let err = block_on_sync(dbx.call("check/user", &json!({}))).unwrap_err();
    assert!(matches!(err, Error::UnexpectedResponse(_)), "got {err:?}");
}

#[test]
fn test_unserializable_input_sends_nothing() {
    use std::collections::HashMap;

    // Map keys must be strings in JSON.
    let mut bad = HashMap::new();
    bad.insert(vec![1u8], "x");

    let dbx = Dropbox::new(FakeClient::answering(ok_json));
    let err = block_on_sync(dbx.call("check/user", &bad)).unwrap_err();
    assert!(matches!(err, Error::Json(_)), "got {err:?}");
    assert!(dbx.client().requests().is_empty());
}

#[test]
fn test_response_json() {
    let dbx = Dropbox::new(FakeClient::answering(ok_json));
    let resp = block_on_sync(dbx.call("check/user", &json!({}))).unwrap();
    let value: serde_json::Value = block_on_sync(resp.json()).unwrap();
    assert_eq!(json!({"result": "ok"}), value);

    let dbx = Dropbox::new(FakeClient::answering(|| Canned::new(200, "")));
    let resp = block_on_sync(dbx.call("paper/docs/permanently_delete", &json!({}))).unwrap();
    block_on_sync(resp.json::<()>()).expect("empty body reads as unit");

    let dbx = Dropbox::new(FakeClient::answering(|| Canned::new(200, "{not json")));
    let resp = block_on_sync(dbx.call("check/user", &json!({}))).unwrap();
    let err = block_on_sync(resp.json::<serde_json::Value>()).unwrap_err();
    assert!(matches!(err, Error::Decode(_)), "got {err:?}");
}
