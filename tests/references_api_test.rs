mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn destination_is_scoped_to_a_city() {
    let app = TestApp::new().await;
    let (_country, city) = app.seed_paris().await;

    let response = app
        .post(
            "/api/v1/destinations",
            json!({
                "city_id": city,
                "name": "Eiffel Tower",
                "kind": "landmark"
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.data()["kind"], "landmark");

    let filtered = app
        .get(&format!("/api/v1/destinations?city_id={city}&kind=landmark"))
        .await;
    assert_eq!(filtered.status, StatusCode::OK);
    assert_eq!(filtered.data()["total"], 1);

    let none = app.get("/api/v1/destinations?kind=beach").await;
    assert_eq!(none.data()["total"], 0);

    let duplicate = app
        .post(
            "/api/v1/destinations",
            json!({ "city_id": city, "name": "Eiffel Tower", "kind": "landmark" }),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn unknown_destination_kind_is_rejected() {
    let app = TestApp::new().await;
    let (_country, city) = app.seed_paris().await;

    let response = app
        .post(
            "/api/v1/destinations",
            json!({ "city_id": city, "name": "Somewhere", "kind": "volcano" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn hotel_group_delete_requires_force_when_hotels_are_attached() {
    let app = TestApp::new().await;
    let (_country, city) = app.seed_paris().await;
    let group = app
        .create(
            "/api/v1/hotel-groups",
            json!({ "name": "Accor", "website": "https://group.accor.com" }),
        )
        .await;
    let hotel = app
        .create(
            "/api/v1/hotels",
            json!({
                "name": "Novotel Paris Centre",
                "star_rating": 4,
                "price_per_night": 180.0,
                "city_id": city,
                "hotel_group_id": group
            }),
        )
        .await;

    let blocked = app.delete(&format!("/api/v1/hotel-groups/{group}")).await;
    assert_eq!(blocked.status, StatusCode::CONFLICT);
    assert!(blocked.body["message"]
        .as_str()
        .unwrap()
        .contains("force=true"));

    let forced = app
        .delete(&format!("/api/v1/hotel-groups/{group}?force=true"))
        .await;
    assert_eq!(forced.status, StatusCode::OK);
    assert_eq!(forced.data()["detached_hotels"], 1);

    let card = app.get(&format!("/api/v1/hotels/{hotel}")).await;
    assert_eq!(card.status, StatusCode::OK);
    assert!(card.data()["hotel_group_id"].is_null());
    assert!(card.data()["hotel_group"].is_null());

    let gone = app.get(&format!("/api/v1/hotel-groups/{group}")).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unused_reference_deletes_without_force() {
    let app = TestApp::new().await;
    let kind = app
        .create(
            "/api/v1/accommodation-types",
            json!({ "name": "Boutique hotel" }),
        )
        .await;

    let response = app
        .delete(&format!("/api/v1/accommodation-types/{kind}"))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["deleted"], kind);
    assert!(response.data().get("detached_hotels").is_none());
}

#[tokio::test]
async fn hotel_group_website_must_be_a_url() {
    let app = TestApp::new().await;
    let response = app
        .post(
            "/api/v1/hotel-groups",
            json!({ "name": "Accor", "website": "not a url" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn parking_option_update_can_clear_the_price() {
    let app = TestApp::new().await;
    let parking = app
        .create(
            "/api/v1/parking-options",
            json!({
                "name": "Underground garage",
                "location": "on_site",
                "price_per_day": 25.0,
                "reservation_required": true
            }),
        )
        .await;

    let updated = app
        .put(
            &format!("/api/v1/parking-options/{parking}"),
            json!({ "price_per_day": null, "location": "off_site" }),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert!(updated.data()["price_per_day"].is_null());
    assert_eq!(updated.data()["location"], "off_site");
    assert_eq!(updated.data()["reservation_required"], true);

    let negative = app
        .put(
            &format!("/api/v1/parking-options/{parking}"),
            json!({ "price_per_day": -1.0 }),
        )
        .await;
    assert_eq!(negative.status, StatusCode::BAD_REQUEST);
}
