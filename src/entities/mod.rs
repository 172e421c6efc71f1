//! sea-orm entities for the catalog schema created by `crate::migrator`.

// Geography
pub mod address;
pub mod city;
pub mod country;
pub mod neighborhood;

// Hotel references
pub mod accommodation_type;
pub mod destination;
pub mod hotel_group;
pub mod parking_option;

// Amenities, labels, highlights and accessibility options
pub mod hotel_feature;

// Hotel cards and their content
pub mod hotel_card;
pub mod hotel_card_feature;
pub mod hotel_details;
pub mod hotel_policy;
pub mod hotel_review;
pub mod hotel_room;
