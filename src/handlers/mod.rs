pub mod addresses;
pub mod cities;
pub mod common;
pub mod countries;
pub mod features;
pub mod hotel_content;
pub mod hotels;
pub mod neighborhoods;
pub mod references;

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::services::{
    content::HotelContentService, features::FeatureService, geography::GeographyService,
    hotels::HotelService, references::ReferenceService,
};

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub geography: Arc<GeographyService>,
    pub references: Arc<ReferenceService>,
    pub features: Arc<FeatureService>,
    pub hotels: Arc<HotelService>,
    pub content: Arc<HotelContentService>,
}

impl AppServices {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            geography: Arc::new(GeographyService::new(db.clone())),
            references: Arc::new(ReferenceService::new(db.clone())),
            features: Arc::new(FeatureService::new(db.clone())),
            hotels: Arc::new(HotelService::new(db.clone())),
            content: Arc::new(HotelContentService::new(db)),
        }
    }
}
