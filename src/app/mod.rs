pub mod catalog_import;
pub mod restaurant_service;

pub use catalog_import::import_catalog;
pub use restaurant_service::{CreateRestaurantInput, RestaurantService};
