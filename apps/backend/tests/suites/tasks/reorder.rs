use actix_web::http::Method;
use actix_web::test;
use backend::repos::tasks as task_repo;
use serde_json::{json, Value};

use super::Owner;
use crate::common::assert_error_shape;
use crate::support::factory::seed_task;
use crate::support::{init_app, test_state};

#[actix_web::test]
async fn reorder_applies_every_position() {
    let state = test_state().await;
    let db = state.db().unwrap().clone();
    let owner = Owner::seed(&db, "reorder").await;
    let a = seed_task(&db, &owner.user.id, "a", 1).await;
    let b = seed_task(&db, &owner.user.id, "b", 2).await;
    let c = seed_task(&db, &owner.user.id, "c", 3).await;
    let app = init_app(state).await;

    let req = owner
        .request(Method::PUT, "/reorder")
        .set_json(json!({ "tasks": [
            { "id": c.id, "position": 1 },
            { "id": a.id, "position": 2 },
            { "id": b.id, "position": 3 },
        ] }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "success": true }));

    let req = owner.request(Method::GET, "").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let order: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(order, ["c", "a", "b"]);
}

#[actix_web::test]
async fn reorder_with_foreign_task_changes_nothing() {
    let state = test_state().await;
    let db = state.db().unwrap().clone();
    let owner = Owner::seed(&db, "mine").await;
    let other = Owner::seed(&db, "theirs").await;
    let mine = seed_task(&db, &owner.user.id, "mine", 1).await;
    let theirs = seed_task(&db, &other.user.id, "theirs", 1).await;
    let app = init_app(state).await;

    let req = owner
        .request(Method::PUT, "/reorder")
        .set_json(json!({ "tasks": [
            { "id": mine.id, "position": 7 },
            { "id": theirs.id, "position": 8 },
        ] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_shape(resp, 404, "TASK_NOT_FOUND").await;

    let mine_after = task_repo::require_task(&db, &owner.user.id, mine.id).await.unwrap();
    assert_eq!(mine_after.position, 1);
    let theirs_after = task_repo::require_task(&db, &other.user.id, theirs.id).await.unwrap();
    assert_eq!(theirs_after.position, 1);
}

#[actix_web::test]
async fn reorder_rejects_negative_positions() {
    let state = test_state().await;
    let db = state.db().unwrap().clone();
    let owner = Owner::seed(&db, "negative").await;
    let task = seed_task(&db, &owner.user.id, "only", 1).await;
    let app = init_app(state).await;

    let req = owner
        .request(Method::PUT, "/reorder")
        .set_json(json!({ "tasks": [{ "id": task.id, "position": -1 }] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let detail = assert_error_shape(resp, 422, "VALIDATION_ERROR").await;
    assert_eq!(detail.details["field"], "position");
}
