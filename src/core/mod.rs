pub mod availability;
pub mod hours;
pub mod overlap;

pub use crate::domain::model::{OpeningHour, Status};
pub use crate::domain::ports::{Clock, RestaurantRepository};
pub use crate::utils::error::{HoursError, Result};
pub use availability::{is_open_at, matching_intervals};
pub use overlap::{hours_overlap, validate_opening_hours};
