mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

async fn hotel(app: &TestApp) -> String {
    let (_country, city) = app.seed_paris().await;
    app.seed_hotel(&city, "Hotel Providence", 4, 280.0).await
}

#[tokio::test]
async fn rating_summary_averages_and_rounds() {
    let app = TestApp::new().await;
    let hotel = hotel(&app).await;

    let empty = app.get(&format!("/api/v1/hotels/{hotel}/rating")).await;
    assert_eq!(empty.status, StatusCode::OK);
    assert_eq!(empty.data()["review_count"], 0);
    assert!(empty.data()["average_rating"].is_null());

    for (author, rating) in [("Ana", 8), ("Ben", 9), ("Chloé", 9)] {
        app.create(
            &format!("/api/v1/hotels/{hotel}/reviews"),
            json!({ "author_name": author, "rating": rating, "title": "Stay" }),
        )
        .await;
    }

    let summary = app.get(&format!("/api/v1/hotels/{hotel}/rating")).await;
    assert_eq!(summary.data()["review_count"], 3);
    assert_eq!(summary.data()["average_rating"], 8.7);

    let card = app.get(&format!("/api/v1/hotels/{hotel}")).await;
    assert_eq!(card.data()["average_rating"], 8.7);
    assert_eq!(card.data()["review_count"], 3);

    let listed = app.get("/api/v1/hotels").await;
    assert_eq!(listed.data()["items"][0]["average_rating"], 8.7);
}

#[tokio::test]
async fn reviews_list_newest_first_and_sort_by_rating() {
    let app = TestApp::new().await;
    let hotel = hotel(&app).await;
    let uri = format!("/api/v1/hotels/{hotel}/reviews");

    app.create(&uri, json!({ "author_name": "First", "rating": 4 }))
        .await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    app.create(&uri, json!({ "author_name": "Second", "rating": 10 }))
        .await;

    let newest = app.get(&uri).await;
    assert_eq!(newest.status, StatusCode::OK);
    assert_eq!(newest.data()["total"], 2);
    assert_eq!(newest.data()["items"][0]["author_name"], "Second");

    let lowest = app
        .get(&format!("{uri}?sort_by=rating&sort_order=asc"))
        .await;
    assert_eq!(lowest.data()["items"][0]["rating"], 4);
}

#[tokio::test]
async fn review_validation() {
    let app = TestApp::new().await;
    let hotel = hotel(&app).await;
    let uri = format!("/api/v1/hotels/{hotel}/reviews");

    let out_of_range = app
        .post(&uri, json!({ "author_name": "Dan", "rating": 11 }))
        .await;
    assert_eq!(out_of_range.status, StatusCode::BAD_REQUEST);

    let future_stay = app
        .post(
            &uri,
            json!({ "author_name": "Dan", "rating": 7, "stay_date": "2999-01-01" }),
        )
        .await;
    assert_eq!(future_stay.status, StatusCode::BAD_REQUEST);

    let unknown_hotel = app
        .post(
            &format!("/api/v1/hotels/{}/reviews", uuid::Uuid::new_v4()),
            json!({ "author_name": "Dan", "rating": 7 }),
        )
        .await;
    assert_eq!(unknown_hotel.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn review_can_be_deleted_once() {
    let app = TestApp::new().await;
    let hotel = hotel(&app).await;
    let review = app
        .create(
            &format!("/api/v1/hotels/{hotel}/reviews"),
            json!({ "author_name": "Eve", "rating": 6 }),
        )
        .await;

    let first = app.delete(&format!("/api/v1/reviews/{review}")).await;
    assert_eq!(first.status, StatusCode::OK);
    let second = app.delete(&format!("/api/v1/reviews/{review}")).await;
    assert_eq!(second.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn policy_kinds_are_unique_except_other() {
    let app = TestApp::new().await;
    let hotel = hotel(&app).await;
    let uri = format!("/api/v1/hotels/{hotel}/policies");

    let pets = app
        .create(
            &uri,
            json!({ "kind": "pets", "description": "Small dogs welcome" }),
        )
        .await;
    let again = app
        .post(&uri, json!({ "kind": "pets", "description": "No cats" }))
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);

    app.create(&uri, json!({ "kind": "other", "description": "Quiet hours after 22:00" }))
        .await;
    app.create(&uri, json!({ "kind": "other", "description": "No smoking" }))
        .await;
    let checkin = app
        .create(&uri, json!({ "kind": "check_in", "description": "From 15:00" }))
        .await;

    let moved_onto_pets = app
        .put(&format!("/api/v1/policies/{checkin}"), json!({ "kind": "pets" }))
        .await;
    assert_eq!(moved_onto_pets.status, StatusCode::CONFLICT);

    let reworded = app
        .put(
            &format!("/api/v1/policies/{pets}"),
            json!({ "description": "Pets up to 10 kg" }),
        )
        .await;
    assert_eq!(reworded.status, StatusCode::OK);
    assert_eq!(reworded.data()["kind"], "pets");

    let listed = app.get(&uri).await;
    assert_eq!(listed.data().as_array().unwrap().len(), 4);

    let deleted = app.delete(&format!("/api/v1/policies/{pets}")).await;
    assert_eq!(deleted.status, StatusCode::OK);
    let listed = app.get(&uri).await;
    assert_eq!(listed.data().as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn rooms_are_unique_by_name_and_sorted_by_price() {
    let app = TestApp::new().await;
    let hotel = hotel(&app).await;
    let uri = format!("/api/v1/hotels/{hotel}/rooms");

    let suite = app
        .post(
            &uri,
            json!({ "name": "Suite", "capacity": 3, "bed_type": "king", "price_per_night": 540.0 }),
        )
        .await;
    assert_eq!(suite.status, StatusCode::CREATED);
    assert_eq!(suite.data()["quantity"], 1);

    app.create(
        &uri,
        json!({ "name": "Classic", "capacity": 2, "price_per_night": 280.0, "quantity": 12 }),
    )
    .await;

    let duplicate = app
        .post(
            &uri,
            json!({ "name": "Suite", "capacity": 2, "price_per_night": 500.0 }),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let too_many_guests = app
        .post(
            &uri,
            json!({ "name": "Dorm", "capacity": 21, "price_per_night": 40.0 }),
        )
        .await;
    assert_eq!(too_many_guests.status, StatusCode::BAD_REQUEST);

    let listed = app.get(&uri).await;
    let names: Vec<&str> = listed
        .data()
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Classic", "Suite"]);

    let updated = app
        .put(
            &format!("/api/v1/rooms/{}", suite.id()),
            json!({ "bed_type": null, "price_per_night": 560.0 }),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert!(updated.data()["bed_type"].is_null());
    assert_eq!(updated.data()["capacity"], 3);
}

#[tokio::test]
async fn details_are_created_then_replaced() {
    let app = TestApp::new().await;
    let hotel = hotel(&app).await;
    let uri = format!("/api/v1/hotels/{hotel}/details");

    let missing = app.get(&uri).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let created = app
        .put(
            &uri,
            json!({
                "check_in_from": "15:00",
                "check_out_until": "11:30",
                "year_built": 1854,
                "email": "frontdesk@providence.example"
            }),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.data()["hotel_card_id"], hotel);

    let replaced = app
        .put(&uri, json!({ "check_in_from": "14:00", "total_rooms": 18 }))
        .await;
    assert_eq!(replaced.status, StatusCode::OK);
    assert_eq!(replaced.data()["check_in_from"], "14:00");
    assert_eq!(replaced.data()["total_rooms"], 18);
    assert!(replaced.data()["year_built"].is_null());
    assert!(replaced.data()["email"].is_null());

    let fetched = app.get(&uri).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.data()["total_rooms"], 18);
}

#[tokio::test]
async fn details_reject_malformed_times_and_years() {
    let app = TestApp::new().await;
    let hotel = hotel(&app).await;
    let uri = format!("/api/v1/hotels/{hotel}/details");

    let bad_time = app.put(&uri, json!({ "check_in_from": "25:00" })).await;
    assert_eq!(bad_time.status, StatusCode::BAD_REQUEST);

    let too_old = app.put(&uri, json!({ "year_built": 1700 })).await;
    assert_eq!(too_old.status, StatusCode::BAD_REQUEST);

    let still_missing = app.get(&uri).await;
    assert_eq!(still_missing.status, StatusCode::NOT_FOUND);
}
