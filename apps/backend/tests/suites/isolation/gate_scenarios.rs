use actix_web::http::header::{
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_METHOD, AUTHORIZATION, ORIGIN,
};
use actix_web::http::Method;
use actix_web::test;
use serde_json::Value;

use crate::common::assert_error_shape;
use crate::support::app::TEST_ORIGIN;
use crate::support::auth::mint_token_issued_ago;
use crate::support::factory::seed_task;
use crate::support::{
    bearer_header, init_app, mint_expired_token, seed_user, test_security, test_state,
    test_state_without_db,
};
use backend::repos::tasks::count_tasks;
use backend::state::security_config::SecurityConfig;

#[actix_web::test]
async fn health_is_open_without_credentials() {
    let app = init_app(test_state_without_db()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn root_and_signout_are_not_identity_scoped() {
    let app = init_app(test_state_without_db()).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Todo Backend API is running!");

    let req = test::TestRequest::post().uri("/auth/signout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
}

#[actix_web::test]
async fn scoped_path_without_authorization_is_forbidden() {
    let app = init_app(test_state_without_db()).await;

    let req = test::TestRequest::get().uri("/api/u1/tasks").to_request();
    let resp = test::call_service(&app, req).await;

    let detail = assert_error_shape(resp, 403, "FORBIDDEN").await;
    assert!(detail.details.is_empty());
}

#[actix_web::test]
async fn non_bearer_scheme_counts_as_missing() {
    let app = init_app(test_state_without_db()).await;

    let req = test::TestRequest::get()
        .uri("/api/u1/tasks")
        .insert_header((AUTHORIZATION, "Basic dTE6cGFzcw=="))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_shape(resp, 403, "FORBIDDEN").await;
}

#[actix_web::test]
async fn empty_bearer_token_is_unauthorized() {
    let app = init_app(test_state_without_db()).await;

    let req = test::TestRequest::get()
        .uri("/api/u1/tasks")
        .insert_header((AUTHORIZATION, "Bearer "))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_shape(resp, 401, "UNAUTHORIZED_MISSING_BEARER").await;
}

#[actix_web::test]
async fn malformed_token_is_unauthorized() {
    let app = init_app(test_state_without_db()).await;

    let req = test::TestRequest::get()
        .uri("/api/u1/tasks")
        .insert_header((AUTHORIZATION, "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_shape(resp, 401, "UNAUTHORIZED_INVALID_JWT").await;
}

#[actix_web::test]
async fn token_from_another_secret_is_unauthorized() {
    let app = init_app(test_state_without_db()).await;
    let foreign = SecurityConfig::new("some_other_service_secret_value".as_bytes());

    let req = test::TestRequest::get()
        .uri("/api/u1/tasks")
        .insert_header((AUTHORIZATION, bearer_header("u1", "u1@example.com", &foreign)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_shape(resp, 401, "UNAUTHORIZED_INVALID_JWT").await;
}

#[actix_web::test]
async fn token_one_second_past_expiry_is_unauthorized() {
    let app = init_app(test_state_without_db()).await;
    let token = mint_expired_token("u1", "u1@example.com", &test_security());

    let req = test::TestRequest::get()
        .uri("/api/u1/tasks")
        .insert_header((AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_shape(resp, 401, "UNAUTHORIZED_EXPIRED_JWT").await;
}

#[actix_web::test]
async fn other_users_token_is_forbidden() {
    let app = init_app(test_state_without_db()).await;

    let req = test::TestRequest::get()
        .uri("/api/u1/tasks")
        .insert_header((AUTHORIZATION, bearer_header("u2", "u2@example.com", &test_security())))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_shape(resp, 403, "FORBIDDEN_USER_MISMATCH").await;
}

#[actix_web::test]
async fn subject_comparison_is_exact() {
    let app = init_app(test_state_without_db()).await;

    let req = test::TestRequest::get()
        .uri("/api/u1/tasks")
        .insert_header((AUTHORIZATION, bearer_header("U1", "u1@example.com", &test_security())))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_shape(resp, 403, "FORBIDDEN_USER_MISMATCH").await;
}

#[actix_web::test]
async fn matching_subject_reaches_the_handler() {
    let state = test_state().await;
    let user = seed_user(state.db().unwrap(), "owner").await;
    let app = init_app(state).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/{}/tasks", user.id))
        .insert_header((AUTHORIZATION, bearer_header(&user.id, &user.email, &test_security())))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"], serde_json::json!([]));
    assert_eq!(body["pagination"]["total"], 0);
}

#[actix_web::test]
async fn token_still_inside_lifetime_is_accepted() {
    let state = test_state().await;
    let user = seed_user(state.db().unwrap(), "recent").await;
    let app = init_app(state).await;
    let token = mint_token_issued_ago(
        &user.id,
        &user.email,
        std::time::Duration::from_secs(1700),
        &test_security(),
    );

    let req = test::TestRequest::get()
        .uri(&format!("/api/{}/tasks", user.id))
        .insert_header((AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
}

#[actix_web::test]
async fn bare_resource_root_is_still_scoped() {
    let app = init_app(test_state_without_db()).await;
    let token = bearer_header("u1", "u1@example.com", &test_security());

    for uri in ["/api", "/api/"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_error_shape(resp, 403, "FORBIDDEN").await;
    }

    // An empty identity segment never equals a subject.
    let req = test::TestRequest::get()
        .uri("/api//tasks")
        .insert_header((AUTHORIZATION, token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_shape(resp, 403, "FORBIDDEN_USER_MISMATCH").await;
}

#[actix_web::test]
async fn lookalike_prefix_is_not_scoped() {
    let app = init_app(test_state_without_db()).await;

    let req = test::TestRequest::get().uri("/apiary/u1/tasks").to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_shape(resp, 404, "NOT_FOUND").await;
}

/// Percent-encodes the first byte of `s`, e.g. `api` -> `%61pi`.
fn encode_first_byte(s: &str) -> String {
    let (head, tail) = s.split_at(1);
    format!("%{:02X}{tail}", head.as_bytes()[0])
}

#[actix_web::test]
async fn encoded_root_without_authorization_is_forbidden() {
    let app = init_app(test_state_without_db()).await;

    for uri in ["/%61pi/u1/tasks", "/%61%70%69/u1/tasks", "/ap%69/u1"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_error_shape(resp, 403, "FORBIDDEN").await;
    }
}

#[actix_web::test]
async fn encoded_root_with_foreign_token_cannot_touch_owner_tasks() {
    let state = test_state().await;
    let db = state.db().unwrap().clone();
    let alice = seed_user(&db, "alice").await;
    let bob = seed_user(&db, "bob").await;
    seed_task(&db, &alice.id, "alice only", 0).await;
    let app = init_app(state).await;
    let bob_token = bearer_header(&bob.id, &bob.email, &test_security());
    let uri = format!("/%61pi/{}/tasks", alice.id);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header((AUTHORIZATION, bob_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_shape(resp, 403, "FORBIDDEN_USER_MISMATCH").await;

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header((AUTHORIZATION, bob_token))
        .set_json(serde_json::json!({ "title": "planted" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_shape(resp, 403, "FORBIDDEN_USER_MISMATCH").await;

    assert_eq!(count_tasks(&db, &alice.id, None).await.unwrap(), 1);
}

#[actix_web::test]
async fn encoded_identity_segment_is_compared_decoded() {
    let state = test_state().await;
    let db = state.db().unwrap().clone();
    let alice = seed_user(&db, "alice").await;
    let bob = seed_user(&db, "bob").await;
    let app = init_app(state).await;
    let uri = format!("/api/{}/tasks", encode_first_byte(&alice.id));

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header((AUTHORIZATION, bearer_header(&bob.id, &bob.email, &test_security())))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_shape(resp, 403, "FORBIDDEN_USER_MISMATCH").await;

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header((AUTHORIZATION, bearer_header(&alice.id, &alice.email, &test_security())))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
}

#[actix_web::test]
async fn doubled_leading_slash_is_still_scoped() {
    let app = init_app(test_state_without_db()).await;

    let req = test::TestRequest::get().uri("//api/u1/tasks").to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_shape(resp, 403, "FORBIDDEN").await;

    let req = test::TestRequest::get()
        .uri("//api/u1/tasks")
        .insert_header((AUTHORIZATION, bearer_header("u2", "u2@example.com", &test_security())))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_shape(resp, 403, "FORBIDDEN_USER_MISMATCH").await;
}

#[actix_web::test]
async fn every_task_method_is_gated() {
    let app = init_app(test_state_without_db()).await;
    let token = bearer_header("u2", "u2@example.com", &test_security());

    let cases = [
        (Method::GET, "/api/u1/tasks"),
        (Method::POST, "/api/u1/tasks"),
        (Method::GET, "/api/u1/tasks/1"),
        (Method::PUT, "/api/u1/tasks/1"),
        (Method::DELETE, "/api/u1/tasks/1"),
        (Method::PATCH, "/api/u1/tasks/1/complete"),
        (Method::PUT, "/api/u1/tasks/reorder"),
    ];
    for (method, uri) in cases {
        let req = test::TestRequest::default()
            .method(method.clone())
            .uri(uri)
            .insert_header((AUTHORIZATION, token.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 403, "{method} {uri}");
    }
}

#[actix_web::test]
async fn cors_preflight_is_answered_before_the_gate() {
    let app = init_app(test_state_without_db()).await;

    let req = test::TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/api/u1/tasks")
        .insert_header((ORIGIN, TEST_ORIGIN))
        .insert_header((ACCESS_CONTROL_REQUEST_METHOD, "POST"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    assert_eq!(resp.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), TEST_ORIGIN);
}
