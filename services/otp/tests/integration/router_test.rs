use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::Duration;
use serde_json::{Value, json};

use loanform_otp::domain::types::{Identifier, OTP_TTL_SECS};
use loanform_otp::router::build_router;

use crate::helpers::{TEST_EMAIL, TEST_PHONE, test_state};

#[tokio::test]
async fn should_issue_and_verify_over_http() {
    let (state, _) = test_state();
    let server = TestServer::new(build_router(state)).unwrap();

    let resp = server
        .post("/otp")
        .json(&json!({ "identifier": TEST_PHONE, "code": "042917" }))
        .await;
    resp.assert_status(StatusCode::CREATED);
    let body: Value = resp.json();
    assert_eq!(body["identifier"], TEST_PHONE);
    assert_eq!(body["channel"], "sms");
    assert_eq!(body["expires_in_secs"], OTP_TTL_SECS);

    let resp = server
        .post("/otp/verify")
        .json(&json!({ "identifier": TEST_PHONE, "code": "042917" }))
        .await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "code verified");

    // Single use.
    let resp = server
        .post("/otp/verify")
        .json(&json!({ "identifier": TEST_PHONE, "code": "042917" }))
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(resp.json::<Value>()["kind"], "OTP_NOT_FOUND");
}

#[tokio::test]
async fn should_generate_code_when_none_supplied() {
    let (state, _) = test_state();
    let store = state.store.clone();
    let server = TestServer::new(build_router(state)).unwrap();

    let resp = server
        .post("/otp")
        .json(&json!({ "identifier": TEST_EMAIL }))
        .await;
    resp.assert_status(StatusCode::CREATED);
    assert_eq!(resp.json::<Value>()["channel"], "email");

    let code = store
        .peek(&Identifier::parse(TEST_EMAIL).unwrap())
        .expect("code should be pending")
        .code;
    let resp = server
        .post("/otp/verify")
        .json(&json!({ "identifier": TEST_EMAIL, "code": code }))
        .await;
    resp.assert_status_ok();
}

#[tokio::test]
async fn mismatch_is_retryable() {
    let (state, _) = test_state();
    let server = TestServer::new(build_router(state)).unwrap();

    server
        .post("/otp")
        .json(&json!({ "identifier": TEST_PHONE, "code": "042917" }))
        .await
        .assert_status(StatusCode::CREATED);

    let resp = server
        .post("/otp/verify")
        .json(&json!({ "identifier": TEST_PHONE, "code": "42917" }))
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = resp.json();
    assert_eq!(body["kind"], "INVALID_OTP");
    assert_eq!(body["message"], "invalid code; try again");

    server
        .post("/otp/verify")
        .json(&json!({ "identifier": TEST_PHONE, "code": "042917" }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn expired_code_returns_gone() {
    let (state, clock) = test_state();
    let server = TestServer::new(build_router(state)).unwrap();

    server
        .post("/otp")
        .json(&json!({ "identifier": TEST_PHONE, "code": "123456" }))
        .await
        .assert_status(StatusCode::CREATED);
    clock.advance(Duration::seconds(OTP_TTL_SECS + 1));

    let resp = server
        .post("/otp/verify")
        .json(&json!({ "identifier": TEST_PHONE, "code": "123456" }))
        .await;
    resp.assert_status(StatusCode::GONE);
    assert_eq!(resp.json::<Value>()["kind"], "OTP_EXPIRED");
}

#[tokio::test]
async fn invalid_input_returns_bad_request() {
    let (state, _) = test_state();
    let server = TestServer::new(build_router(state)).unwrap();

    let resp = server
        .post("/otp")
        .json(&json!({ "identifier": "" }))
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["kind"], "INVALID_IDENTIFIER");

    let resp = server
        .post("/otp")
        .json(&json!({ "identifier": TEST_PHONE, "code": "1234567" }))
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["kind"], "INVALID_CODE");
}

#[tokio::test]
async fn health_probes_and_request_id() {
    let (state, _) = test_state();
    let server = TestServer::new(build_router(state)).unwrap();

    let resp = server.get("/healthz").await;
    resp.assert_status_ok();
    assert!(resp.headers().contains_key("x-request-id"));

    server.get("/readyz").await.assert_status_ok();
}
