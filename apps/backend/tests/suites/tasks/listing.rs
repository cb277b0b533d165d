use actix_web::http::Method;
use actix_web::test;
use serde_json::{json, Value};

use super::Owner;
use crate::common::assert_error_shape;
use crate::support::factory::seed_task;
use crate::support::{init_app, test_state};

fn titles(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap().to_string())
        .collect()
}

#[actix_web::test]
async fn list_is_ordered_by_position_by_default() {
    let state = test_state().await;
    let db = state.db().unwrap().clone();
    let owner = Owner::seed(&db, "order").await;
    seed_task(&db, &owner.user.id, "third", 3).await;
    seed_task(&db, &owner.user.id, "first", 1).await;
    seed_task(&db, &owner.user.id, "second", 2).await;
    let app = init_app(state).await;

    let body: Value =
        test::call_and_read_body_json(&app, owner.request(Method::GET, "").to_request()).await;
    assert_eq!(titles(&body), ["first", "second", "third"]);
    assert_eq!(
        body["pagination"],
        json!({ "total": 3, "limit": 100, "offset": 0, "has_more": false })
    );

    let req = owner
        .request(Method::GET, "?order_by=position&order_direction=DESC")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(titles(&body), ["third", "second", "first"]);
}

#[actix_web::test]
async fn list_paginates() {
    let state = test_state().await;
    let db = state.db().unwrap().clone();
    let owner = Owner::seed(&db, "page").await;
    for position in 1..=5 {
        seed_task(&db, &owner.user.id, &format!("task {position}"), position).await;
    }
    let app = init_app(state).await;

    let req = owner.request(Method::GET, "?limit=2&offset=1").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(titles(&body), ["task 2", "task 3"]);
    assert_eq!(body["pagination"]["total"], 5);
    assert_eq!(body["pagination"]["has_more"], true);

    let req = owner.request(Method::GET, "?limit=2&offset=4").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(titles(&body), ["task 5"]);
    assert_eq!(body["pagination"]["has_more"], false);

    let req = owner.request(Method::GET, "?offset=10").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(titles(&body).is_empty());
    assert_eq!(body["pagination"]["total"], 5);
}

#[actix_web::test]
async fn list_filters_on_completion() {
    let state = test_state().await;
    let db = state.db().unwrap().clone();
    let owner = Owner::seed(&db, "filter").await;
    let done = seed_task(&db, &owner.user.id, "done", 1).await;
    seed_task(&db, &owner.user.id, "open", 2).await;
    let app = init_app(state).await;

    let req = owner
        .request(Method::PATCH, &format!("/{}/complete", done.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let req = owner.request(Method::GET, "?completed=true").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(titles(&body), ["done"]);
    assert_eq!(body["pagination"]["total"], 1);

    let req = owner.request(Method::GET, "?completed=false").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(titles(&body), ["open"]);
}

#[actix_web::test]
async fn bad_list_parameters_are_rejected() {
    let state = test_state().await;
    let owner = Owner::seed(state.db().unwrap(), "params").await;
    let app = init_app(state).await;

    for (query, field) in [
        ("?limit=0", "limit"),
        ("?limit=1001", "limit"),
        ("?order_by=title", "order_by"),
        ("?order_direction=sideways", "order_direction"),
    ] {
        let req = owner.request(Method::GET, query).to_request();
        let resp = test::call_service(&app, req).await;
        let detail = assert_error_shape(resp, 422, "VALIDATION_ERROR").await;
        assert_eq!(detail.details["field"], field, "{query}");
    }

    let req = owner.request(Method::GET, "?limit=lots").to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_shape(resp, 422, "VALIDATION_ERROR").await;
}
