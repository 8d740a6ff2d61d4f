mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use book_a_meal::test_utils::bearer;
use serde_json::json;

#[actix_rt::test]
async fn menu_is_missing_before_setup() {
    let (app, fixtures, _pool) = common::setup_api_app().await;

    let req = test::TestRequest::get()
        .uri("/api/v1/menu")
        .insert_header(bearer(fixtures.customer_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = common::json_body(resp).await;
    assert_eq!(body["message"], "Menu for today have not been set");
}

#[actix_rt::test]
async fn caterer_sets_menu_then_replaces_it() {
    let (app, fixtures, _pool) = common::setup_api_app().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/menu")
        .insert_header(bearer(fixtures.caterer_id))
        .set_json(json!({
            "name": "Monday lunch",
            "meals": [fixtures.meal_ids[0], {"id": fixtures.meal_ids[1]}, fixtures.meal_ids[0]]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = common::json_body(resp).await;
    assert_eq!(body["message"], "Menu for today has been set");
    assert_eq!(body["menu"]["meals"].as_array().unwrap().len(), 2);
    let first_id = body["menu"]["id"].clone();

    let req = test::TestRequest::post()
        .uri("/api/v1/menu")
        .insert_header(bearer(fixtures.other_caterer_id))
        .set_json(json!({"name": "Monday special", "meals": [fixtures.other_meal_id]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = common::json_body(resp).await;
    assert_eq!(body["message"], "Menu for today has been updated");
    assert_eq!(body["menu"]["id"], first_id);

    let req = test::TestRequest::get()
        .uri("/api/v1/menu")
        .insert_header(bearer(fixtures.customer_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = common::json_body(resp).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["menu"]["name"], "Monday special");
    let meals = body["menu"]["meals"].as_array().unwrap();
    assert_eq!(meals.len(), 1);
    assert_eq!(meals[0]["id"], fixtures.other_meal_id);
}

#[actix_rt::test]
async fn customer_is_forbidden_whatever_the_payload() {
    let (app, fixtures, _pool) = common::setup_api_app().await;

    for payload in [
        json!({"name": "Lunch", "meals": [fixtures.meal_ids[0]]}),
        json!({}),
        json!({"meals": "nonsense"}),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/v1/menu")
            .insert_header(bearer(fixtures.customer_id))
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body = common::json_body(resp).await;
        assert_eq!(body["message"], "Forbidden");
    }
}

#[actix_rt::test]
async fn setup_validates_payload_and_meal_ids() {
    let (app, fixtures, _pool) = common::setup_api_app().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/menu")
        .insert_header(bearer(fixtures.caterer_id))
        .set_json(json!({"meals": []}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = common::json_body(resp).await;
    assert_eq!(body["error"]["name"], "Menu name is required");
    assert_eq!(body["error"]["meals"], "No meal have been added to menu");

    let req = test::TestRequest::post()
        .uri("/api/v1/menu")
        .insert_header(bearer(fixtures.caterer_id))
        .set_json(json!({"name": "Lunch", "meals": [fixtures.meal_ids[0], 9999]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = common::json_body(resp).await;
    assert!(body["error"]["meals"].as_str().unwrap().contains("9999"));
}
