use crate::domain::model::{OpeningHour, PaymentMethod, Restaurant, Status};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

/// Persistence collaborator for the restaurant aggregate.
///
/// The `replace_*` methods swap the whole collection in one step: a reader
/// sees either the previous set or the new one, never a mix.
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    async fn create(&self, restaurant: &Restaurant) -> Result<()>;
    async fn get_by_id(&self, id: Uuid) -> Result<Restaurant>;
    async fn get_by_slug(&self, slug: &str) -> Result<Restaurant>;
    async fn slug_exists(&self, slug: &str) -> Result<bool>;
    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<Restaurant>>;
    async fn update_status(&self, id: Uuid, status: Status) -> Result<()>;
    async fn replace_opening_hours(&self, id: Uuid, hours: Vec<OpeningHour>) -> Result<()>;
    async fn opening_hours(&self, id: Uuid) -> Result<Vec<OpeningHour>>;
    async fn replace_payment_methods(&self, id: Uuid, methods: Vec<PaymentMethod>) -> Result<()>;
    async fn payment_methods(&self, id: Uuid) -> Result<Vec<PaymentMethod>>;
}

/// Source of the local wall-clock "now" used for `is_open`.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}
