use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{
    addresses, cities, countries, features, hotel_content, hotels, neighborhoods, references,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hotel Catalog API",
        version = "1.0.0",
        description = r#"
# Hotel Catalog API

Back-office API for a hotel booking catalog: geography, hotel references,
feature catalogs, hotel cards and their reviews, policies, rooms and details.

## Authentication

Read endpoints are public. Every write endpoint requires a JWT carrying the
`admin` role:

```
Authorization: Bearer <your-jwt-token>
```

## Pagination

List endpoints accept:
- `page`: Page number (default: 1)
- `limit`: Items per page (default and maximum are configured per deployment)
- `search`: Case-insensitive name filter
- `sort_by`: Field to sort by (allowed values are listed per endpoint)
- `sort_order`: asc or desc
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "geography", description = "Countries, cities, neighborhoods and addresses"),
        (name = "references", description = "Destinations, accommodation types, hotel groups and parking options"),
        (name = "features", description = "Amenities, labels, highlights and accessibility options"),
        (name = "hotels", description = "Hotel cards"),
        (name = "hotel content", description = "Reviews, policies, rooms and details of a hotel")
    ),
    paths(
        // Geography
        countries::list_countries,
        countries::get_country,
        countries::list_country_cities,
        countries::create_country,
        countries::update_country,
        countries::delete_country,
        cities::list_cities,
        cities::get_city,
        cities::list_city_neighborhoods,
        cities::create_city,
        cities::update_city,
        cities::delete_city,
        neighborhoods::list_neighborhoods,
        neighborhoods::get_neighborhood,
        neighborhoods::create_neighborhood,
        neighborhoods::update_neighborhood,
        neighborhoods::delete_neighborhood,
        addresses::list_addresses,
        addresses::get_address,
        addresses::create_address,
        addresses::update_address,
        addresses::delete_address,

        // References
        references::list_destinations,
        references::get_destination,
        references::create_destination,
        references::update_destination,
        references::delete_destination,
        references::list_accommodation_types,
        references::get_accommodation_type,
        references::create_accommodation_type,
        references::update_accommodation_type,
        references::delete_accommodation_type,
        references::list_hotel_groups,
        references::get_hotel_group,
        references::create_hotel_group,
        references::update_hotel_group,
        references::delete_hotel_group,
        references::list_parking_options,
        references::get_parking_option,
        references::create_parking_option,
        references::update_parking_option,
        references::delete_parking_option,

        // Features
        features::list_amenities,
        features::get_amenity,
        features::create_amenity,
        features::bulk_create_amenities,
        features::update_amenity,
        features::delete_amenity,
        features::list_labels,
        features::get_label,
        features::create_label,
        features::bulk_create_labels,
        features::update_label,
        features::delete_label,
        features::list_highlights,
        features::get_highlight,
        features::create_highlight,
        features::bulk_create_highlights,
        features::update_highlight,
        features::delete_highlight,
        features::list_accessibility_options,
        features::get_accessibility_option,
        features::create_accessibility_option,
        features::bulk_create_accessibility_options,
        features::update_accessibility_option,
        features::delete_accessibility_option,

        // Hotels
        hotels::list_hotels,
        hotels::get_hotel,
        hotels::get_hotel_by_slug,
        hotels::create_hotel,
        hotels::update_hotel,
        hotels::delete_hotel,
        hotels::replace_hotel_features,

        // Hotel content
        hotel_content::list_reviews,
        hotel_content::get_rating_summary,
        hotel_content::create_review,
        hotel_content::delete_review,
        hotel_content::list_policies,
        hotel_content::create_policy,
        hotel_content::update_policy,
        hotel_content::delete_policy,
        hotel_content::list_rooms,
        hotel_content::create_room,
        hotel_content::update_room,
        hotel_content::delete_room,
        hotel_content::get_details,
        hotel_content::upsert_details,
    ),
    components(
        schemas(
            crate::entities::destination::DestinationKind,
            crate::entities::parking_option::ParkingLocation,
            crate::entities::hotel_feature::FeatureKind,
            crate::entities::hotel_policy::PolicyKind,
            crate::errors::ErrorResponse
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDocV1;

/// Registers the `Bearer` scheme referenced by admin operations.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "Bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
