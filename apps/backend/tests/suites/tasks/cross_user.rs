//! One user can never read or change another user's tasks.

use actix_web::http::header::AUTHORIZATION;
use actix_web::http::Method;
use actix_web::test;
use backend::repos::tasks as task_repo;
use serde_json::{json, Value};

use super::Owner;
use crate::common::assert_error_shape;
use crate::support::factory::seed_task;
use crate::support::{init_app, test_state};

#[actix_web::test]
async fn foreign_path_is_refused_even_for_existing_tasks() {
    let state = test_state().await;
    let db = state.db().unwrap().clone();
    let alice = Owner::seed(&db, "alice").await;
    let bob = Owner::seed(&db, "bob").await;
    let task = seed_task(&db, &bob.user.id, "bob's", 1).await;
    let app = init_app(state).await;

    // Alice's token on Bob's path.
    let req = test::TestRequest::get()
        .uri(&bob.tasks_uri(&format!("/{}", task.id)))
        .insert_header((AUTHORIZATION, alice.auth.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_shape(resp, 403, "FORBIDDEN_USER_MISMATCH").await;

    let req = test::TestRequest::delete()
        .uri(&bob.tasks_uri(&format!("/{}", task.id)))
        .insert_header((AUTHORIZATION, alice.auth.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_shape(resp, 403, "FORBIDDEN_USER_MISMATCH").await;

    assert!(task_repo::find_task(&db, &bob.user.id, task.id).await.unwrap().is_some());
}

#[actix_web::test]
async fn foreign_task_ids_are_invisible_on_own_path() {
    let state = test_state().await;
    let db = state.db().unwrap().clone();
    let alice = Owner::seed(&db, "alice").await;
    let bob = Owner::seed(&db, "bob").await;
    let task = seed_task(&db, &bob.user.id, "bob's", 1).await;
    let app = init_app(state).await;

    let suffix = format!("/{}", task.id);

    let req = alice.request(Method::GET, &suffix).to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_shape(resp, 404, "TASK_NOT_FOUND").await;

    let req = alice
        .request(Method::PUT, &suffix)
        .set_json(json!({ "title": "hijacked" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_shape(resp, 404, "TASK_NOT_FOUND").await;

    let req = alice
        .request(Method::PATCH, &format!("{suffix}/complete"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_shape(resp, 404, "TASK_NOT_FOUND").await;

    let req = alice.request(Method::DELETE, &suffix).to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_shape(resp, 404, "TASK_NOT_FOUND").await;

    let untouched = task_repo::require_task(&db, &bob.user.id, task.id).await.unwrap();
    assert_eq!(untouched.title, "bob's");
    assert!(!untouched.completed);
}

#[actix_web::test]
async fn listings_only_show_own_tasks() {
    let state = test_state().await;
    let db = state.db().unwrap().clone();
    let alice = Owner::seed(&db, "alice").await;
    let bob = Owner::seed(&db, "bob").await;
    seed_task(&db, &alice.user.id, "alice 1", 1).await;
    seed_task(&db, &bob.user.id, "bob 1", 1).await;
    seed_task(&db, &bob.user.id, "bob 2", 2).await;
    let app = init_app(state).await;

    let body: Value =
        test::call_and_read_body_json(&app, alice.request(Method::GET, "").to_request()).await;
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["data"][0]["title"], "alice 1");
    assert_eq!(body["data"][0]["user_id"], alice.user.id.as_str());

    // New tasks count positions per user.
    let req = alice
        .request(Method::POST, "")
        .set_json(json!({ "title": "alice 2" }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created["position"], 2);
    assert_eq!(created["user_id"], alice.user.id.as_str());
}
