mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn country_lifecycle() {
    let app = TestApp::new().await;

    let response = app
        .post("/api/v1/countries", json!({ "name": "France", "code": " fr " }))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.data()["code"], "FR");
    let id = response.id();

    let fetched = app.get(&format!("/api/v1/countries/{id}")).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.data()["name"], "France");

    let updated = app
        .put(
            &format!("/api/v1/countries/{id}"),
            json!({ "name": "République française" }),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.data()["name"], "République française");
    assert_eq!(updated.data()["code"], "FR");

    let deleted = app.delete(&format!("/api/v1/countries/{id}")).await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app.get(&format!("/api/v1/countries/{id}")).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.body["error"], "Not Found");
}

#[tokio::test]
async fn duplicate_country_code_conflicts() {
    let app = TestApp::new().await;
    app.seed_country("France", "FR").await;

    let response = app
        .post("/api/v1/countries", json!({ "name": "Francia", "code": "fr" }))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert!(response.body["message"]
        .as_str()
        .unwrap()
        .contains("code 'FR'"));
}

#[tokio::test]
async fn invalid_country_code_is_rejected() {
    let app = TestApp::new().await;
    let response = app
        .post("/api/v1/countries", json!({ "name": "Nowhere", "code": "N0" }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn country_with_cities_cannot_be_deleted() {
    let app = TestApp::new().await;
    let (country, _city) = app.seed_paris().await;

    let response = app.delete(&format!("/api/v1/countries/{country}")).await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let still_there = app.get(&format!("/api/v1/countries/{country}")).await;
    assert_eq!(still_there.status, StatusCode::OK);
}

#[tokio::test]
async fn city_with_unknown_country_is_rejected() {
    let app = TestApp::new().await;
    let response = app
        .post(
            "/api/v1/cities",
            json!({
                "country_id": uuid::Uuid::new_v4(),
                "name": "Atlantis",
                "latitude": 0.0,
                "longitude": 0.0
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn city_coordinates_are_range_checked() {
    let app = TestApp::new().await;
    let country = app.seed_country("France", "FR").await;
    let response = app
        .post(
            "/api/v1/cities",
            json!({
                "country_id": country,
                "name": "Paris",
                "latitude": 91.0,
                "longitude": 2.35
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cities_are_listed_per_country_and_filtered() {
    let app = TestApp::new().await;
    let (france, _paris) = app.seed_paris().await;
    app.seed_city(&france, "Lyon").await;
    let italy = app.seed_country("Italy", "IT").await;
    app.seed_city(&italy, "Rome").await;

    let nested = app.get(&format!("/api/v1/countries/{france}/cities")).await;
    assert_eq!(nested.status, StatusCode::OK);
    assert_eq!(nested.data()["total"], 2);

    let filtered = app
        .get(&format!("/api/v1/cities?country_id={italy}"))
        .await;
    assert_eq!(filtered.data()["total"], 1);
    assert_eq!(filtered.data()["items"][0]["name"], "Rome");

    let searched = app.get("/api/v1/cities?search=ly").await;
    assert_eq!(searched.data()["total"], 1);
    assert_eq!(searched.data()["items"][0]["name"], "Lyon");

    let paged = app.get("/api/v1/cities?limit=2&page=2&sort_by=name").await;
    assert_eq!(paged.data()["total"], 3);
    assert_eq!(paged.data()["total_pages"], 2);
    assert_eq!(paged.data()["items"][0]["name"], "Rome");
}

#[tokio::test]
async fn unknown_sort_field_is_rejected() {
    let app = TestApp::new().await;
    let response = app.get("/api/v1/countries?sort_by=population").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn city_with_neighborhoods_cannot_be_deleted() {
    let app = TestApp::new().await;
    let (_country, city) = app.seed_paris().await;
    app.seed_neighborhood(&city, "Le Marais").await;

    let listed = app
        .get(&format!("/api/v1/cities/{city}/neighborhoods"))
        .await;
    assert_eq!(listed.data()["total"], 1);

    let response = app.delete(&format!("/api/v1/cities/{city}")).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn address_neighborhood_must_be_in_the_same_city() {
    let app = TestApp::new().await;
    let (country, paris) = app.seed_paris().await;
    let lyon = app.seed_city(&country, "Lyon").await;
    let presquile = app.seed_neighborhood(&lyon, "Presqu'île").await;

    let response = app
        .post(
            "/api/v1/addresses",
            json!({
                "street": "1 Rue de Rivoli",
                "city_id": paris,
                "neighborhood_id": presquile
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let marais = app.seed_neighborhood(&paris, "Le Marais").await;
    let created = app
        .post(
            "/api/v1/addresses",
            json!({
                "street": "1 Rue de Rivoli",
                "postal_code": "75004",
                "city_id": paris,
                "neighborhood_id": marais
            }),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let address = created.id();

    // Clearing the neighborhood with an explicit null.
    let cleared = app
        .put(
            &format!("/api/v1/addresses/{address}"),
            json!({ "neighborhood_id": null }),
        )
        .await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert!(cleared.data()["neighborhood_id"].is_null());
    assert_eq!(cleared.data()["postal_code"], "75004");
}

#[tokio::test]
async fn duplicate_neighborhood_name_in_city_conflicts() {
    let app = TestApp::new().await;
    let (_country, city) = app.seed_paris().await;
    app.seed_neighborhood(&city, "Le Marais").await;

    let response = app
        .post(
            "/api/v1/neighborhoods",
            json!({ "city_id": city, "name": "Le Marais" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn page_size_is_clamped_to_configured_bounds() {
    let app = TestApp::new().await;
    let (france, _paris) = app.seed_paris().await;
    app.seed_city(&france, "Lyon").await;
    app.seed_city(&france, "Nice").await;

    let smallest = app.get("/api/v1/cities?page=0&limit=0").await;
    assert_eq!(smallest.status, StatusCode::OK);
    assert_eq!(smallest.data()["page"], 1);
    assert_eq!(smallest.data()["limit"], 1);
    assert_eq!(smallest.data()["total"], 3);
    assert_eq!(smallest.data()["total_pages"], 3);
    assert_eq!(smallest.data()["items"].as_array().unwrap().len(), 1);

    let largest = app.get("/api/v1/cities?limit=5000").await;
    assert_eq!(largest.data()["limit"], 100);
    assert_eq!(largest.data()["total_pages"], 1);
    assert_eq!(largest.data()["items"].as_array().unwrap().len(), 3);

    let defaulted = app.get("/api/v1/cities").await;
    assert_eq!(defaulted.data()["page"], 1);
    assert_eq!(defaulted.data()["limit"], 20);

    let beyond = app.get("/api/v1/cities?page=9&limit=2").await;
    assert_eq!(beyond.status, StatusCode::OK);
    assert_eq!(beyond.data()["total"], 3);
    assert!(beyond.data()["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn out_of_range_page_is_a_bad_request() {
    let app = TestApp::new().await;
    app.seed_country("France", "FR").await;

    let response = app
        .get("/api/v1/countries?page=18446744073709551615")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Bad Request");

    let overflowing_offset = app
        .get("/api/v1/countries?page=922337203685477581&limit=100")
        .await;
    assert_eq!(overflowing_offset.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_query_and_path_values_are_json_bad_requests() {
    let app = TestApp::new().await;

    let bad_filter = app.get("/api/v1/cities?country_id=paris").await;
    assert_eq!(bad_filter.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_filter.body["error"], "Bad Request");
    assert!(bad_filter.body["message"].is_string());
    assert!(bad_filter.body["request_id"].is_string());

    let bad_page = app.get("/api/v1/countries?page=first").await;
    assert_eq!(bad_page.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_page.body["error"], "Bad Request");

    let bad_id = app.get("/api/v1/countries/not-a-uuid").await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_id.body["error"], "Bad Request");
    assert!(bad_id.body["request_id"].is_string());

    let bad_delete = app.delete("/api/v1/cities/42").await;
    assert_eq!(bad_delete.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_delete.body["error"], "Bad Request");
}

#[tokio::test]
async fn search_wildcards_match_literally() {
    let app = TestApp::new().await;
    let (france, _paris) = app.seed_paris().await;
    app.seed_city(&france, "Port_Vendres").await;

    let percent = app.get("/api/v1/cities?search=%25").await;
    assert_eq!(percent.status, StatusCode::OK);
    assert_eq!(percent.data()["total"], 0);

    let underscore = app.get("/api/v1/cities?search=_").await;
    assert_eq!(underscore.data()["total"], 1);
    assert_eq!(underscore.data()["items"][0]["name"], "Port_Vendres");

    let countries = app.get("/api/v1/countries?search=%25").await;
    assert_eq!(countries.data()["total"], 0);
}
