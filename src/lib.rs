pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::adapters::{FixedClock, InMemoryRepository, SystemClock};
pub use crate::app::{import_catalog, CreateRestaurantInput, RestaurantService};
pub use crate::config::CatalogConfig;
pub use crate::core::{is_open_at, validate_opening_hours};
pub use crate::domain::model::{OpeningHour, PaymentMethod, Restaurant, Status};
pub use crate::utils::error::{GastroError, HoursError, Result};
