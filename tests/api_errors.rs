use serde_json::json;
use dropbox_client::{block_on_sync, Dropbox, Error};
use dropbox_client::files::GetMetadataArg;

mod common;
use common::{Canned, FakeClient};

fn fail_with(canned: impl Fn() -> Canned + Send + Sync + 'static) -> Error {
    let dbx = Dropbox::new(FakeClient::answering(canned));
    block_on_sync(dbx.files().get_metadata(&GetMetadataArg::new("/missing".to_owned())))
        .expect_err("call should fail")
}

#[test]
fn test_structured_error() {
    let err = fail_with(|| Canned::json(409, json!({
        "error_summary": "path/not_found/...",
        "user_message": {"text": "That file is gone.", "locale": "en"},
        "error": {".tag": "path", "path": {".tag": "not_found"}},
    })));

    let api = err.api_error().expect("expected an API error");
    assert_eq!(409, api.status_code);
    assert_eq!("Conflict", api.status);
    assert_eq!("path/not_found/...", api.summary);
    assert_eq!(Some("That file is gone."), api.user_message.as_deref());
    assert_eq!(("path", "not_found"), api.tag());
    assert!(api.is("path", "not_found"));
    assert!(!api.is("path", "malformed_path"));
    assert!(!api.is_too_many_requests());
    assert_eq!(Some("application/json"), api.headers.content_type());
    assert_eq!("Dropbox API returned an error: path/not_found/...", err.to_string());
}

#[test]
fn test_plain_text_rate_limit() {
    let err = fail_with(|| Canned::new(429, "rate limited")
        .header("Content-Type", "text/plain")
        .header("Retry-After", "15"));

    let api = err.api_error().expect("expected an API error");
    assert_eq!(429, api.status_code);
    assert_eq!("rate limited", api.summary);
    assert_eq!(("", ""), api.tag());
    assert_eq!(None, api.user_message);
    assert!(api.is_too_many_requests());
    assert_eq!(Some("15"), api.headers.get("retry-after"));
}

#[test]
fn test_tagged_rate_limit() {
    let err = fail_with(|| Canned::json(429, json!({
        "error_summary": "too_many_requests/..",
        "error": {".tag": "too_many_requests", "retry_after": 300},
    })));
    let api = err.api_error().unwrap();
    assert_eq!(("too_many_requests", ""), api.tag());
    assert!(api.is_too_many_requests());
}

#[test]
fn test_json_content_type_is_case_insensitive() {
    let err = fail_with(|| Canned::new(
        409,
        json!({"error_summary": "s", "error": {".tag": "to", "to": {".tag": "conflict"}}}).to_string())
        .header("content-type", "Application/JSON; charset=utf-8"));
    assert_eq!(("to", "conflict"), err.api_error().unwrap().tag());
}

#[test]
fn test_json_body_without_json_content_type() {
    let body = r#"{"error_summary": "x", "error": "other"}"#;
    let err = fail_with(move || Canned::new(400, body).header("Content-Type", "text/plain"));
    let api = err.api_error().unwrap();
    assert_eq!(body, api.summary);
    assert_eq!(("", ""), api.tag());
}

#[test]
fn test_malformed_json_error_body() {
    let err = fail_with(|| Canned::new(500, "{oops").header("Content-Type", "application/json"));
    let api = err.api_error().expect("a bad error body still yields an API error");
    assert_eq!(500, api.status_code);
    assert_eq!("{oops", api.summary);
    assert_eq!(("", ""), api.tag());
}

#[test]
fn test_bare_string_error() {
    let err = fail_with(|| Canned::json(400, json!({
        "error_summary": "invalid_access_token/",
        "error": "invalid_access_token",
        "user_message": "Please sign in again.",
    })));
    let api = err.api_error().unwrap();
    assert_eq!(("", "invalid_access_token"), api.tag());
    assert_eq!(Some("Please sign in again."), api.user_message.as_deref());
}

#[test]
fn test_empty_error_body() {
    let err = fail_with(|| Canned::new(503, ""));
    let api = err.api_error().unwrap();
    assert_eq!("", api.summary);
    assert_eq!(("", ""), api.tag());
    assert_eq!("503: ", api.to_string());
}

#[test]
fn test_category_without_value() {
    let err = fail_with(|| Canned::json(409, json!({
        "error_summary": "path/..",
        "error": {".tag": "path", "path": "not_an_object"},
    })));
    assert_eq!(("path", ""), err.api_error().unwrap().tag());
}

#[test]
fn test_error_detail_is_kept_whole() {
    let detail = json!({
        ".tag": "path_lookup",
        "path_lookup": {".tag": "malformed_path", "malformed_path": "bad chars"},
    });
    let body = json!({"error_summary": "path_lookup/malformed_path/", "error": detail.clone()});
    let err = fail_with(move || Canned::json(409, body.clone()));
    let api = err.api_error().unwrap();
    assert_eq!(detail, api.error);
    assert_eq!(("path_lookup", "malformed_path"), api.tag());
}
