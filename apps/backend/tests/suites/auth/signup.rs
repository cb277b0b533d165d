use actix_web::http::header::{AUTHORIZATION, CONTENT_TYPE};
use actix_web::test;
use backend::repos::users;
use backend_test_support::unique_helpers::unique_email;
use serde_json::{json, Value};

use crate::common::assert_error_shape;
use crate::support::{init_app, test_state};

fn signup_request(body: Value) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/auth/signup")
        .set_json(body)
        .to_request()
}

#[actix_web::test]
async fn signup_returns_user_and_usable_token() {
    let state = test_state().await;
    let db = state.db().unwrap().clone();
    let app = init_app(state).await;
    let email = unique_email("signup");

    let resp = test::call_service(
        &app,
        signup_request(json!({
            "email": email.to_uppercase(),
            "password": "correct horse",
            "confirmPassword": "correct horse",
        })),
    )
    .await;

    assert_eq!(resp.status().as_u16(), 201);
    let body: Value = test::read_body_json(resp).await;
    let user_id = body["user"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["user"]["email"], email.as_str());
    assert!(body["user"]["createdAt"].is_string());
    assert_eq!(body["expiresIn"], 1800);
    let token = body["jwtToken"].as_str().unwrap();

    let stored = users::find_user_by_id(&db, &user_id).await.unwrap().unwrap();
    assert_ne!(stored.hashed_password, "correct horse");
    assert!(stored.hashed_password.starts_with("$argon2"));

    let req = test::TestRequest::get()
        .uri(&format!("/api/{user_id}/tasks"))
        .insert_header((AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
}

#[actix_web::test]
async fn duplicate_email_is_conflict_regardless_of_case() {
    let app = init_app(test_state().await).await;
    let email = unique_email("dup");

    let first = test::call_service(
        &app,
        signup_request(json!({
            "email": email,
            "password": "password-one",
            "confirmPassword": "password-one",
        })),
    )
    .await;
    assert_eq!(first.status().as_u16(), 201);

    let second = test::call_service(
        &app,
        signup_request(json!({
            "email": format!("  {}  ", email.to_uppercase()),
            "password": "password-two",
            "confirmPassword": "password-two",
        })),
    )
    .await;
    assert_error_shape(second, 409, "EMAIL_TAKEN").await;
}

#[actix_web::test]
async fn password_confirmation_must_match() {
    let app = init_app(test_state().await).await;

    let resp = test::call_service(
        &app,
        signup_request(json!({
            "email": unique_email("mismatch"),
            "password": "password-one",
            "confirmPassword": "password-two",
        })),
    )
    .await;

    let detail = assert_error_shape(resp, 422, "VALIDATION_ERROR").await;
    assert_eq!(detail.details["field"], "confirmPassword");
}

#[actix_web::test]
async fn short_password_is_rejected() {
    let app = init_app(test_state().await).await;

    let resp = test::call_service(
        &app,
        signup_request(json!({
            "email": unique_email("short"),
            "password": "short",
            "confirmPassword": "short",
        })),
    )
    .await;

    let detail = assert_error_shape(resp, 422, "VALIDATION_ERROR").await;
    assert_eq!(detail.details["field"], "password");
}

#[actix_web::test]
async fn malformed_email_is_rejected() {
    let app = init_app(test_state().await).await;

    let resp = test::call_service(
        &app,
        signup_request(json!({
            "email": "not-an-email",
            "password": "long enough",
            "confirmPassword": "long enough",
        })),
    )
    .await;

    let detail = assert_error_shape(resp, 422, "VALIDATION_ERROR").await;
    assert_eq!(detail.details["field"], "email");
}

#[actix_web::test]
async fn missing_field_is_unprocessable() {
    let app = init_app(test_state().await).await;

    let resp = test::call_service(
        &app,
        signup_request(json!({ "email": unique_email("missing"), "password": "long enough" })),
    )
    .await;

    let detail = assert_error_shape(resp, 422, "VALIDATION_ERROR").await;
    assert!(detail.message.contains("confirmPassword"), "{}", detail.message);
}

#[actix_web::test]
async fn malformed_json_is_bad_request() {
    let app = init_app(test_state().await).await;

    let req = test::TestRequest::post()
        .uri("/auth/signup")
        .insert_header((CONTENT_TYPE, "application/json"))
        .set_payload("{\"email\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_shape(resp, 400, "BAD_REQUEST").await;
}

#[actix_web::test]
async fn signup_without_database_is_unavailable() {
    let app = init_app(crate::support::test_state_without_db()).await;

    let resp = test::call_service(
        &app,
        signup_request(json!({
            "email": unique_email("nodb"),
            "password": "long enough",
            "confirmPassword": "long enough",
        })),
    )
    .await;

    assert_error_shape(resp, 503, "DB_UNAVAILABLE").await;
}
