use crate::domain::model::{OpeningHour, PaymentMethod, Restaurant, Status};
use crate::domain::ports::RestaurantRepository;
use crate::utils::error::{GastroError, Result};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local repository. Keeps insertion order, which `list` pages over.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    restaurants: RwLock<Vec<Restaurant>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn update<F>(&self, id: Uuid, apply: F) -> Result<()>
    where
        F: FnOnce(&mut Restaurant) + Send,
    {
        let mut restaurants = self.restaurants.write().await;
        let restaurant = restaurants
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| GastroError::not_found("restaurant", id.to_string()))?;
        apply(restaurant);
        restaurant.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl RestaurantRepository for InMemoryRepository {
    async fn create(&self, restaurant: &Restaurant) -> Result<()> {
        let mut restaurants = self.restaurants.write().await;
        if restaurants.iter().any(|r| r.slug == restaurant.slug) {
            return Err(GastroError::Conflict {
                message: format!("slug already exists: {}", restaurant.slug),
            });
        }
        let mut stored = restaurant.clone();
        stored.is_open = false;
        restaurants.push(stored);
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Restaurant> {
        self.restaurants
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| GastroError::not_found("restaurant", id.to_string()))
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Restaurant> {
        self.restaurants
            .read()
            .await
            .iter()
            .find(|r| r.slug == slug)
            .cloned()
            .ok_or_else(|| GastroError::not_found("restaurant", slug))
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool> {
        Ok(self.restaurants.read().await.iter().any(|r| r.slug == slug))
    }

    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<Restaurant>> {
        Ok(self
            .restaurants
            .read()
            .await
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn update_status(&self, id: Uuid, status: Status) -> Result<()> {
        self.update(id, |r| r.status = status).await
    }

    async fn replace_opening_hours(&self, id: Uuid, hours: Vec<OpeningHour>) -> Result<()> {
        self.update(id, move |r| r.opening_hours = hours).await
    }

    async fn opening_hours(&self, id: Uuid) -> Result<Vec<OpeningHour>> {
        Ok(self.get_by_id(id).await?.opening_hours)
    }

    async fn replace_payment_methods(&self, id: Uuid, methods: Vec<PaymentMethod>) -> Result<()> {
        self.update(id, move |r| r.payment_methods = methods).await
    }

    async fn payment_methods(&self, id: Uuid) -> Result<Vec<PaymentMethod>> {
        Ok(self.get_by_id(id).await?.payment_methods)
    }
}
