mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn create_derives_slug_and_defaults() {
    let app = TestApp::new().await;
    let (_country, city) = app.seed_paris().await;

    let response = app
        .post(
            "/api/v1/hotels",
            json!({
                "name": "Le Grand Hôtel Paris",
                "star_rating": 5,
                "price_per_night": 650.0,
                "city_id": city
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let hotel = response.data();
    assert_eq!(hotel["slug"], "le-grand-h-tel-paris");
    assert_eq!(hotel["currency"], "USD");
    assert_eq!(hotel["is_active"], true);
    assert_eq!(hotel["city"]["name"], "Paris");
    assert_eq!(hotel["country"]["code"], "FR");
    assert_eq!(hotel["review_count"], 0);
    assert!(hotel["average_rating"].is_null());

    let by_slug = app.get("/api/v1/hotels/by-slug/le-grand-h-tel-paris").await;
    assert_eq!(by_slug.status, StatusCode::OK);
    assert_eq!(by_slug.id(), response.id());
}

#[tokio::test]
async fn slug_collision_conflicts() {
    let app = TestApp::new().await;
    let (_country, city) = app.seed_paris().await;
    app.seed_hotel(&city, "Hotel Lutetia", 5, 700.0).await;

    let derived = app
        .post(
            "/api/v1/hotels",
            json!({
                "name": "Hotel  Lutetia!",
                "star_rating": 4,
                "price_per_night": 300.0,
                "city_id": city
            }),
        )
        .await;
    assert_eq!(derived.status, StatusCode::CONFLICT);

    let explicit = app
        .post(
            "/api/v1/hotels",
            json!({
                "name": "Hotel Lutetia",
                "slug": "hotel-lutetia-rive-gauche",
                "star_rating": 4,
                "price_per_night": 300.0,
                "city_id": city
            }),
        )
        .await;
    assert_eq!(explicit.status, StatusCode::CREATED);
}

#[tokio::test]
async fn malformed_slug_is_rejected() {
    let app = TestApp::new().await;
    let (_country, city) = app.seed_paris().await;
    let response = app
        .post(
            "/api/v1/hotels",
            json!({
                "name": "Hotel",
                "slug": "Not A Slug",
                "star_rating": 3,
                "price_per_night": 90.0,
                "city_id": city
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn star_rating_out_of_range_is_rejected() {
    let app = TestApp::new().await;
    let (_country, city) = app.seed_paris().await;
    let response = app
        .post(
            "/api/v1/hotels",
            json!({
                "name": "Six Star Palace",
                "star_rating": 6,
                "price_per_night": 900.0,
                "city_id": city
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn destination_from_another_city_is_rejected() {
    let app = TestApp::new().await;
    let (country, paris) = app.seed_paris().await;
    let lyon = app.seed_city(&country, "Lyon").await;
    let fourviere = app
        .create(
            "/api/v1/destinations",
            json!({ "city_id": lyon, "name": "Fourvière", "kind": "landmark" }),
        )
        .await;

    let response = app
        .post(
            "/api/v1/hotels",
            json!({
                "name": "Hotel Wrong City",
                "star_rating": 3,
                "price_per_night": 120.0,
                "city_id": paris,
                "destination_id": fourviere
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn detail_view_assembles_references_and_address() {
    let app = TestApp::new().await;
    let (_country, city) = app.seed_paris().await;
    let marais = app.seed_neighborhood(&city, "Le Marais").await;
    let address = app
        .create(
            "/api/v1/addresses",
            json!({
                "street": "12 Rue des Rosiers",
                "postal_code": "75004",
                "city_id": city,
                "neighborhood_id": marais
            }),
        )
        .await;
    let boutique = app
        .create("/api/v1/accommodation-types", json!({ "name": "Boutique" }))
        .await;
    let wifi = app.seed_feature("amenities", "Wi-Fi").await;
    let bar = app.seed_feature("amenities", "Bar").await;
    let view = app.seed_feature("highlights", "Courtyard view").await;

    let hotel = app
        .create(
            "/api/v1/hotels",
            json!({
                "name": "Hôtel du Petit Moulin",
                "star_rating": 4,
                "price_per_night": 250.0,
                "currency": "eur",
                "city_id": city,
                "address_id": address,
                "accommodation_type_id": boutique,
                "amenity_ids": [wifi, bar, wifi],
                "highlight_ids": [view]
            }),
        )
        .await;

    let response = app.get(&format!("/api/v1/hotels/{hotel}")).await;
    assert_eq!(response.status, StatusCode::OK);
    let detail = response.data();
    assert_eq!(detail["currency"], "EUR");
    assert_eq!(
        detail["formatted_address"],
        "12 Rue des Rosiers, Le Marais, Paris, 75004, France"
    );
    assert_eq!(detail["accommodation_type"]["name"], "Boutique");
    let amenities: Vec<&str> = detail["amenities"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(amenities, vec!["Bar", "Wi-Fi"]);
    assert_eq!(detail["highlights"][0]["name"], "Courtyard view");
    assert_eq!(detail["labels"].as_array().unwrap().len(), 0);
    assert!(detail["details"].is_null());
}

#[tokio::test]
async fn feature_of_the_wrong_kind_is_rejected() {
    let app = TestApp::new().await;
    let (_country, city) = app.seed_paris().await;
    let label = app.seed_feature("labels", "Eco").await;

    let response = app
        .post(
            "/api/v1/hotels",
            json!({
                "name": "Green Stay",
                "star_rating": 3,
                "price_per_night": 95.0,
                "city_id": city,
                "amenity_ids": [label]
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let listed = app.get("/api/v1/hotels").await;
    assert_eq!(listed.data()["total"], 0);
}

#[tokio::test]
async fn list_filters_and_sorts() {
    let app = TestApp::new().await;
    let (france, paris) = app.seed_paris().await;
    let lyon = app.seed_city(&france, "Lyon").await;
    let italy = app.seed_country("Italy", "IT").await;
    let rome = app.seed_city(&italy, "Rome").await;
    let spa = app.seed_feature("amenities", "Spa").await;

    app.seed_hotel(&paris, "Budget Inn", 2, 80.0).await;
    app.create(
        "/api/v1/hotels",
        json!({
            "name": "Palace Vendôme",
            "star_rating": 5,
            "price_per_night": 900.0,
            "city_id": paris,
            "amenity_ids": [spa]
        }),
    )
    .await;
    app.seed_hotel(&lyon, "Lyon Central", 3, 140.0).await;
    app.seed_hotel(&rome, "Roma Antica", 4, 260.0).await;

    let in_france = app.get(&format!("/api/v1/hotels?country_id={france}")).await;
    assert_eq!(in_france.status, StatusCode::OK);
    assert_eq!(in_france.data()["total"], 3);

    let mid_range = app
        .get("/api/v1/hotels?min_stars=3&max_stars=4&sort_by=price&sort_order=desc")
        .await;
    assert_eq!(mid_range.data()["total"], 2);
    assert_eq!(mid_range.data()["items"][0]["name"], "Roma Antica");
    assert_eq!(mid_range.data()["items"][1]["name"], "Lyon Central");

    let cheap = app.get("/api/v1/hotels?max_price=150").await;
    assert_eq!(cheap.data()["total"], 2);

    let with_spa = app.get(&format!("/api/v1/hotels?amenity_id={spa}")).await;
    assert_eq!(with_spa.data()["total"], 1);
    assert_eq!(with_spa.data()["items"][0]["name"], "Palace Vendôme");
    assert_eq!(with_spa.data()["items"][0]["review_count"], 0);

    let searched = app.get("/api/v1/hotels?search=PALACE").await;
    assert_eq!(searched.data()["total"], 1);
}

#[tokio::test]
async fn inverted_ranges_are_rejected() {
    let app = TestApp::new().await;

    let stars = app.get("/api/v1/hotels?min_stars=4&max_stars=2").await;
    assert_eq!(stars.status, StatusCode::BAD_REQUEST);

    let price = app.get("/api/v1/hotels?min_price=300&max_price=100").await;
    assert_eq!(price.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_keeps_slug_unless_given_and_clears_nullable_fields() {
    let app = TestApp::new().await;
    let (_country, city) = app.seed_paris().await;
    let hotel = app
        .create(
            "/api/v1/hotels",
            json!({
                "name": "Hotel Amour",
                "description": "Pigalle classic",
                "star_rating": 3,
                "price_per_night": 210.0,
                "city_id": city
            }),
        )
        .await;

    let renamed = app
        .put(
            &format!("/api/v1/hotels/{hotel}"),
            json!({ "name": "Hotel Amour Pigalle", "description": null }),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.data()["name"], "Hotel Amour Pigalle");
    assert_eq!(renamed.data()["slug"], "hotel-amour");
    assert!(renamed.data()["description"].is_null());
    assert_eq!(renamed.data()["star_rating"], 3);

    let reslugged = app
        .put(
            &format!("/api/v1/hotels/{hotel}"),
            json!({ "slug": "hotel-amour-pigalle" }),
        )
        .await;
    assert_eq!(reslugged.status, StatusCode::OK);
    assert_eq!(reslugged.data()["slug"], "hotel-amour-pigalle");
}

#[tokio::test]
async fn moving_city_revalidates_kept_references() {
    let app = TestApp::new().await;
    let (country, paris) = app.seed_paris().await;
    let lyon = app.seed_city(&country, "Lyon").await;
    let louvre = app
        .create(
            "/api/v1/destinations",
            json!({ "city_id": paris, "name": "Louvre", "kind": "landmark" }),
        )
        .await;
    let hotel = app
        .create(
            "/api/v1/hotels",
            json!({
                "name": "Hotel Henriette",
                "star_rating": 3,
                "price_per_night": 150.0,
                "city_id": paris,
                "destination_id": louvre
            }),
        )
        .await;

    let blocked = app
        .put(&format!("/api/v1/hotels/{hotel}"), json!({ "city_id": lyon }))
        .await;
    assert_eq!(blocked.status, StatusCode::BAD_REQUEST);

    let moved = app
        .put(
            &format!("/api/v1/hotels/{hotel}"),
            json!({ "city_id": lyon, "destination_id": null }),
        )
        .await;
    assert_eq!(moved.status, StatusCode::OK);
    assert_eq!(moved.data()["city"]["name"], "Lyon");
    assert!(moved.data()["destination"].is_null());
}

#[tokio::test]
async fn replace_features_swaps_one_kind() {
    let app = TestApp::new().await;
    let (_country, city) = app.seed_paris().await;
    let pool = app.seed_feature("amenities", "Pool").await;
    let gym = app.seed_feature("amenities", "Gym").await;
    let family = app.seed_feature("labels", "Family friendly").await;
    let hotel = app
        .create(
            "/api/v1/hotels",
            json!({
                "name": "Pullman Tour Eiffel",
                "star_rating": 4,
                "price_per_night": 320.0,
                "city_id": city,
                "amenity_ids": [pool],
                "label_ids": [family]
            }),
        )
        .await;

    let response = app
        .put(
            &format!("/api/v1/hotels/{hotel}/features/amenities"),
            json!({ "feature_ids": [gym] }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let set = response.data().as_array().unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(set[0]["name"], "Gym");

    let detail = app.get(&format!("/api/v1/hotels/{hotel}")).await;
    assert_eq!(detail.data()["amenities"][0]["name"], "Gym");
    assert_eq!(detail.data()["labels"][0]["name"], "Family friendly");

    let unknown_kind = app
        .put(
            &format!("/api/v1/hotels/{hotel}/features/perks"),
            json!({ "feature_ids": [] }),
        )
        .await;
    assert_eq!(unknown_kind.status, StatusCode::BAD_REQUEST);

    let cleared = app
        .put(
            &format!("/api/v1/hotels/{hotel}/features/labels"),
            json!({ "feature_ids": [] }),
        )
        .await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert_eq!(cleared.data().as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn delete_removes_hotel_content() {
    let app = TestApp::new().await;
    let (_country, city) = app.seed_paris().await;
    let wifi = app.seed_feature("amenities", "Wi-Fi").await;
    let hotel = app
        .create(
            "/api/v1/hotels",
            json!({
                "name": "Hotel Particulier",
                "star_rating": 4,
                "price_per_night": 390.0,
                "city_id": city,
                "amenity_ids": [wifi]
            }),
        )
        .await;
    let review = app
        .create(
            &format!("/api/v1/hotels/{hotel}/reviews"),
            json!({ "author_name": "Ana", "rating": 9 }),
        )
        .await;
    app.create(
        &format!("/api/v1/hotels/{hotel}/rooms"),
        json!({ "name": "Suite", "capacity": 2, "price_per_night": 520.0 }),
    )
    .await;

    let response = app.delete(&format!("/api/v1/hotels/{hotel}")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["deleted"], hotel);

    let gone = app.get(&format!("/api/v1/hotels/{hotel}")).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    let review_gone = app.delete(&format!("/api/v1/reviews/{review}")).await;
    assert_eq!(review_gone.status, StatusCode::NOT_FOUND);

    // The amenity itself survives and is no longer linked.
    let unlinked = app.delete(&format!("/api/v1/amenities/{wifi}")).await;
    assert_eq!(unlinked.status, StatusCode::OK);
}
