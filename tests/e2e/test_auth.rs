use crate::e2e::helpers;

use chrono::Utc;
use helpers::{generate_test_jwt, TestContext};
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;
use tts_jobs_backend::domain::tts_job::TtsJobStatus;
use uuid::Uuid;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_requests_without_authorization_header(ctx: &TestContext) {
    let response = ctx.client.get("/api/tts/jobs").await.unwrap();

    response
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_error_message("Missing authorization header");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_create_without_authorization_header(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/tts/jobs", &json!({ "inputText": "Hello world" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_non_bearer_authorization(ctx: &TestContext) {
    let response = ctx
        .client
        .get_with_headers("/api/tts/jobs", &[("authorization", "Basic dXNlcjpwYXNz")])
        .await
        .unwrap();

    response
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_error_message("Invalid authorization format");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_malformed_token(ctx: &TestContext) {
    let response = ctx
        .client
        .get_with_auth("/api/tts/jobs", "not-a-jwt")
        .await
        .unwrap();

    response
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_error_message("Invalid token");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_token_signed_with_another_secret(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("user@example.com").await.unwrap();
    let token = generate_test_jwt(&user.id, "some-other-secret");

    let response = ctx
        .client
        .get_with_auth("/api/tts/jobs", &token)
        .await
        .unwrap();

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_token_for_unknown_user(ctx: &TestContext) {
    let token = generate_test_jwt(&Uuid::new_v4(), &ctx.config.jwt_secret);

    let response = ctx
        .client
        .get_with_auth("/api/tts/jobs", &token)
        .await
        .unwrap();

    response
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_error_message("User not found");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_request_id_on_rejected_requests(ctx: &TestContext) {
    let response = ctx.client.get("/api/tts/jobs").await.unwrap();

    response
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_header_exists("x-request-id");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_accept_valid_token_for_existing_user(ctx: &TestContext) {
    let (_, token) = ctx.signed_in_user("user@example.com").await;

    let response = ctx
        .client
        .get_with_auth("/api/tts/jobs", &token)
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_get_without_authorization_header(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("user@example.com").await.unwrap();
    let job = ctx
        .fixtures
        .create_job_at(user.id, "Hello", Utc::now())
        .await
        .unwrap();

    let response = ctx
        .client
        .get(&format!("/api/tts/jobs/{}", job.id))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_error_message("Missing authorization header");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_update_without_authorization_header(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("user@example.com").await.unwrap();
    let job = ctx
        .fixtures
        .create_job_at(user.id, "Hello", Utc::now())
        .await
        .unwrap();

    let response = ctx
        .client
        .patch(
            &format!("/api/tts/jobs/{}", job.id),
            &json!({ "status": "failed", "errorMessage": "tampered" }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_error_message("Missing authorization header");

    let stored = ctx.fixtures.get_job(job.id).await.unwrap().unwrap();
    assert_eq!(stored.status, TtsJobStatus::Queued);
    assert_eq!(stored.error_message, None);
}
