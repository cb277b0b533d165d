use actix_web::http::Method;
use actix_web::test;
use serde_json::{json, Value};

use super::Owner;
use crate::common::assert_error_shape;
use crate::support::{init_app, test_state};

#[actix_web::test]
async fn create_assigns_increasing_positions() {
    let state = test_state().await;
    let owner = Owner::seed(state.db().unwrap(), "crud").await;
    let app = init_app(state).await;

    let req = owner
        .request(Method::POST, "")
        .set_json(json!({ "title": "  Buy milk  ", "description": "2 litres" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let first: Value = test::read_body_json(resp).await;
    assert_eq!(first["title"], "Buy milk");
    assert_eq!(first["description"], "2 litres");
    assert_eq!(first["completed"], false);
    assert_eq!(first["position"], 1);
    assert_eq!(first["user_id"], owner.user.id.as_str());
    assert!(first["created_at"].is_string());
    assert!(first["updated_at"].is_string());

    let req = owner
        .request(Method::POST, "")
        .set_json(json!({ "title": "Walk dog" }))
        .to_request();
    let second: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(second["position"], 2);
    assert_eq!(second["description"], Value::Null);

    let req = owner
        .request(Method::POST, "")
        .set_json(json!({ "title": "Pinned", "position": 0 }))
        .to_request();
    let pinned: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(pinned["position"], 0);
}

#[actix_web::test]
async fn get_update_toggle_delete_round_trip() {
    let state = test_state().await;
    let owner = Owner::seed(state.db().unwrap(), "cycle").await;
    let app = init_app(state).await;

    let req = owner
        .request(Method::POST, "")
        .set_json(json!({ "title": "Draft", "description": "first" }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_i64().unwrap();

    let req = owner.request(Method::GET, &format!("/{id}")).to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["title"], "Draft");
    assert_eq!(fetched["description"], "first");

    // Only the sent fields change.
    let req = owner
        .request(Method::PUT, &format!("/{id}"))
        .set_json(json!({ "title": "Final" }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["title"], "Final");
    assert_eq!(updated["description"], "first");
    assert_eq!(updated["position"], created["position"]);

    let req = owner.request(Method::PATCH, &format!("/{id}/complete")).to_request();
    let toggled: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(toggled["completed"], true);

    let req = owner.request(Method::PATCH, &format!("/{id}/complete")).to_request();
    let toggled: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(toggled["completed"], false);

    let req = owner.request(Method::DELETE, &format!("/{id}")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 204);

    let req = owner.request(Method::GET, &format!("/{id}")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_shape(resp, 404, "TASK_NOT_FOUND").await;

    let req = owner.request(Method::DELETE, &format!("/{id}")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_shape(resp, 404, "TASK_NOT_FOUND").await;
}

#[actix_web::test]
async fn invalid_task_ids_are_bad_requests() {
    let state = test_state().await;
    let owner = Owner::seed(state.db().unwrap(), "badid").await;
    let app = init_app(state).await;

    for suffix in ["/abc", "/0", "/-3", "/99999999999"] {
        let req = owner.request(Method::GET, suffix).to_request();
        let resp = test::call_service(&app, req).await;
        assert_error_shape(resp, 400, "INVALID_TASK_ID").await;
    }
}

#[actix_web::test]
async fn field_validation_is_unprocessable() {
    let state = test_state().await;
    let owner = Owner::seed(state.db().unwrap(), "invalid").await;
    let app = init_app(state).await;

    let cases = [
        (json!({ "title": "   " }), "title"),
        (json!({ "title": "t".repeat(256) }), "title"),
        (json!({ "title": "ok", "description": "d".repeat(1001) }), "description"),
        (json!({ "title": "ok", "position": -1 }), "position"),
    ];
    for (body, field) in cases {
        let req = owner.request(Method::POST, "").set_json(body).to_request();
        let resp = test::call_service(&app, req).await;
        let detail = assert_error_shape(resp, 422, "VALIDATION_ERROR").await;
        assert_eq!(detail.details["field"], field);
    }

    let req = owner
        .request(Method::POST, "")
        .set_json(json!({ "description": "no title" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_shape(resp, 422, "VALIDATION_ERROR").await;

    let req = owner
        .request(Method::POST, "")
        .set_json(json!({ "title": 42 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_shape(resp, 422, "VALIDATION_ERROR").await;
}

#[actix_web::test]
async fn update_of_missing_task_is_not_found() {
    let state = test_state().await;
    let owner = Owner::seed(state.db().unwrap(), "ghost").await;
    let app = init_app(state).await;

    let req = owner
        .request(Method::PUT, "/4242")
        .set_json(json!({ "title": "nothing here" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_shape(resp, 404, "TASK_NOT_FOUND").await;

    let req = owner.request(Method::PATCH, "/4242/complete").to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_shape(resp, 404, "TASK_NOT_FOUND").await;
}
