mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn bulk_create_inserts_every_item() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/api/v1/amenities/bulk",
            json!([
                { "name": "Pool", "icon": "pool" },
                { "name": "Spa" },
                { "name": "Free Wi-Fi", "description": "Throughout the property" }
            ]),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let created = response.data().as_array().unwrap();
    assert_eq!(created.len(), 3);
    assert!(created.iter().all(|f| f["kind"] == "amenity"));

    let listed = app.get("/api/v1/amenities?sort_by=name").await;
    assert_eq!(listed.data()["total"], 3);
    assert_eq!(listed.data()["items"][0]["name"], "Free Wi-Fi");
}

#[tokio::test]
async fn bulk_create_is_all_or_nothing() {
    let app = TestApp::new().await;
    app.seed_feature("labels", "Eco certified").await;

    let duplicated_in_payload = app
        .post(
            "/api/v1/labels/bulk",
            json!([{ "name": "Family friendly" }, { "name": "Family friendly" }]),
        )
        .await;
    assert_eq!(duplicated_in_payload.status, StatusCode::CONFLICT);

    let clashes_with_existing = app
        .post(
            "/api/v1/labels/bulk",
            json!([{ "name": "Adults only" }, { "name": "Eco certified" }]),
        )
        .await;
    assert_eq!(clashes_with_existing.status, StatusCode::CONFLICT);

    let listed = app.get("/api/v1/labels").await;
    assert_eq!(listed.data()["total"], 1);
}

#[tokio::test]
async fn empty_bulk_payload_is_rejected() {
    let app = TestApp::new().await;
    let response = app.post("/api/v1/highlights/bulk", json!([])).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn names_are_unique_per_kind_only() {
    let app = TestApp::new().await;
    app.seed_feature("amenities", "Rooftop bar").await;

    let same_kind = app
        .post("/api/v1/amenities", json!({ "name": "Rooftop bar" }))
        .await;
    assert_eq!(same_kind.status, StatusCode::CONFLICT);

    let other_kind = app
        .post("/api/v1/highlights", json!({ "name": "Rooftop bar" }))
        .await;
    assert_eq!(other_kind.status, StatusCode::CREATED);
    assert_eq!(other_kind.data()["kind"], "highlight");
}

#[tokio::test]
async fn feature_is_not_visible_under_another_kind() {
    let app = TestApp::new().await;
    let amenity = app.seed_feature("amenities", "Gym").await;

    let as_label = app.get(&format!("/api/v1/labels/{amenity}")).await;
    assert_eq!(as_label.status, StatusCode::NOT_FOUND);

    let as_amenity = app.get(&format!("/api/v1/amenities/{amenity}")).await;
    assert_eq!(as_amenity.status, StatusCode::OK);
}

#[tokio::test]
async fn update_can_clear_optional_fields() {
    let app = TestApp::new().await;
    let id = app
        .create(
            "/api/v1/accessibility-options",
            json!({ "name": "Step-free access", "description": "Ramp at entrance", "icon": "ramp" }),
        )
        .await;

    let response = app
        .put(
            &format!("/api/v1/accessibility-options/{id}"),
            json!({ "description": null }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.data()["description"].is_null());
    assert_eq!(response.data()["icon"], "ramp");
}

#[tokio::test]
async fn update_enforces_description_length() {
    let app = TestApp::new().await;
    let id = app.seed_feature("amenities", "Rooftop bar").await;
    let uri = format!("/api/v1/amenities/{id}");

    let too_long = app
        .put(&uri, json!({ "description": "x".repeat(1001) }))
        .await;
    assert_eq!(too_long.status, StatusCode::BAD_REQUEST);

    let unchanged = app.get(&uri).await;
    assert!(unchanged.data()["description"].is_null());

    let at_limit = app
        .put(&uri, json!({ "description": "x".repeat(1000) }))
        .await;
    assert_eq!(at_limit.status, StatusCode::OK);
}

#[tokio::test]
async fn linked_feature_delete_requires_force() {
    let app = TestApp::new().await;
    let (_country, city) = app.seed_paris().await;
    let pool = app.seed_feature("amenities", "Pool").await;
    let hotel = app
        .create(
            "/api/v1/hotels",
            json!({
                "name": "Molitor",
                "star_rating": 5,
                "price_per_night": 420.0,
                "city_id": city,
                "amenity_ids": [pool]
            }),
        )
        .await;

    let blocked = app.delete(&format!("/api/v1/amenities/{pool}")).await;
    assert_eq!(blocked.status, StatusCode::CONFLICT);

    let forced = app
        .delete(&format!("/api/v1/amenities/{pool}?force=true"))
        .await;
    assert_eq!(forced.status, StatusCode::OK);
    assert_eq!(forced.data()["unlinked_hotels"], 1);

    let card = app.get(&format!("/api/v1/hotels/{hotel}")).await;
    assert_eq!(card.data()["amenities"].as_array().unwrap().len(), 0);
}
