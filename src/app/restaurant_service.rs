use crate::core::overlap::validate_opening_hours;
use crate::domain::model::{Address, OpeningHour, PaymentMethod, Restaurant, Status};
use crate::domain::ports::{Clock, RestaurantRepository};
use crate::utils::error::{GastroError, Result};
use crate::utils::slug::generate_slug;
use crate::utils::validation::{validate_non_empty_string, validate_non_negative, validate_optional_url};
use chrono::Utc;
use uuid::Uuid;

pub const DEFAULT_LIST_LIMIT: i64 = 20;

#[derive(Debug, Clone, Default)]
pub struct CreateRestaurantInput {
    pub name: String,
    /// Generated from `name` when absent or blank.
    pub slug: Option<String>,
    pub description: String,
    pub category: String,
    pub delivery_fee: i64,
    pub min_order_value: i64,
    pub preparation_time_min: u32,
    pub supports_pickup: bool,
    pub supports_delivery: bool,
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
    pub address: Option<Address>,
}

/// Use cases over the restaurant aggregate. `is_open` is filled from `clock`
/// on every read.
pub struct RestaurantService<R: RestaurantRepository, C: Clock> {
    repo: R,
    clock: C,
}

impl<R: RestaurantRepository, C: Clock> RestaurantService<R, C> {
    pub fn new(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub async fn create_restaurant(&self, input: CreateRestaurantInput) -> Result<Restaurant> {
        validate_non_empty_string("name", &input.name).map_err(|_| GastroError::ValidationError {
            message: "name is required".to_string(),
        })?;
        validate_non_negative("delivery_fee", input.delivery_fee)?;
        validate_non_negative("min_order_value", input.min_order_value)?;
        validate_optional_url("logo_url", input.logo_url.as_deref())?;
        validate_optional_url("banner_url", input.banner_url.as_deref())?;

        let slug = match input.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => slug.to_string(),
            _ => generate_slug(&input.name),
        };
        if slug.is_empty() {
            return Err(GastroError::ValidationError {
                message: format!("cannot derive a slug from name '{}'", input.name),
            });
        }

        if self.repo.slug_exists(&slug).await? {
            return Err(GastroError::Conflict {
                message: format!("slug already exists: {}", slug),
            });
        }

        let now = Utc::now();
        let restaurant = Restaurant {
            id: Uuid::new_v4(),
            name: input.name,
            slug,
            description: input.description,
            status: Status::Draft,
            category: input.category,
            rating: 0,
            total_reviews: 0,
            is_open: false,
            delivery_fee: input.delivery_fee,
            min_order_value: input.min_order_value,
            preparation_time_min: input.preparation_time_min,
            supports_pickup: input.supports_pickup,
            supports_delivery: input.supports_delivery,
            logo_url: input.logo_url.filter(|u| !u.trim().is_empty()),
            banner_url: input.banner_url.filter(|u| !u.trim().is_empty()),
            created_at: now,
            updated_at: now,
            address: input.address,
            opening_hours: Vec::new(),
            payment_methods: Vec::new(),
        };

        self.repo.create(&restaurant).await?;
        tracing::info!("Created restaurant '{}' ({})", restaurant.slug, restaurant.id);

        Ok(restaurant)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Restaurant> {
        let restaurant = self.repo.get_by_slug(slug).await?;
        Ok(restaurant.with_is_open(self.clock.now()))
    }

    /// `limit <= 0` falls back to 20, `offset < 0` to 0.
    pub async fn list_restaurants(&self, limit: i64, offset: i64) -> Result<Vec<Restaurant>> {
        let limit = if limit <= 0 { DEFAULT_LIST_LIMIT } else { limit };
        let offset = offset.max(0);

        let restaurants = self.repo.list(limit as usize, offset as usize).await?;
        let now = self.clock.now();
        tracing::debug!("Listing {} restaurants as of {}", restaurants.len(), now);

        Ok(restaurants
            .into_iter()
            .map(|r| r.with_is_open(now))
            .collect())
    }

    /// Validates the candidate set, then replaces the stored set wholesale.
    /// A rejected set leaves the stored one untouched.
    pub async fn update_opening_hours(&self, id: Uuid, hours: Vec<OpeningHour>) -> Result<()> {
        self.repo.get_by_id(id).await?;

        if let Err(e) = validate_opening_hours(&hours) {
            tracing::warn!("Rejected opening hours for {}: {}", id, e);
            return Err(e.into());
        }

        let count = hours.len();
        self.repo.replace_opening_hours(id, hours).await?;
        tracing::info!("Replaced opening hours for {} ({} intervals)", id, count);
        Ok(())
    }

    pub async fn update_payment_methods<S: AsRef<str>>(&self, id: Uuid, methods: &[S]) -> Result<()> {
        self.repo.get_by_id(id).await?;

        let parsed = methods
            .iter()
            .map(|m| {
                m.as_ref()
                    .parse::<PaymentMethod>()
                    .map_err(|message| GastroError::ValidationError { message })
            })
            .collect::<Result<Vec<_>>>()?;

        self.repo.replace_payment_methods(id, parsed).await
    }

    /// Requires an address, at least one opening hour and one payment method.
    pub async fn open_restaurant(&self, id: Uuid) -> Result<()> {
        let restaurant = self.repo.get_by_id(id).await?;

        if restaurant.address.is_none() {
            return Err(GastroError::business_rule(
                "restaurant must have an address to be opened",
            ));
        }
        if self.repo.opening_hours(id).await?.is_empty() {
            return Err(GastroError::business_rule(
                "restaurant must have opening hours to be opened",
            ));
        }
        if self.repo.payment_methods(id).await?.is_empty() {
            return Err(GastroError::business_rule(
                "restaurant must have at least one payment method to be opened",
            ));
        }

        self.repo.update_status(id, Status::Open).await?;
        tracing::info!("Restaurant '{}' is now OPEN", restaurant.slug);
        Ok(())
    }

    pub async fn close_restaurant(&self, id: Uuid) -> Result<()> {
        self.repo.get_by_id(id).await?;
        self.repo.update_status(id, Status::Closed).await
    }

    pub async fn suspend_restaurant(&self, id: Uuid) -> Result<()> {
        self.repo.get_by_id(id).await?;
        self.repo.update_status(id, Status::Suspended).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FixedClock, InMemoryRepository};
    use chrono::NaiveDate;

    fn service() -> RestaurantService<InMemoryRepository, FixedClock> {
        let monday_noon = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        RestaurantService::new(InMemoryRepository::new(), FixedClock(monday_noon))
    }

    fn input(name: &str) -> CreateRestaurantInput {
        CreateRestaurantInput {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_generates_slug_and_starts_as_draft() {
        tokio_test::block_on(async {
            let svc = service();
            let r = svc.create_restaurant(input("Pizza do João")).await.unwrap();
            assert_eq!(r.slug, "pizza-do-joao");
            assert_eq!(r.status, Status::Draft);
            assert_eq!(r.rating, 0);
        });
    }

    #[test]
    fn test_create_validates_input() {
        tokio_test::block_on(async {
            let svc = service();
            assert!(matches!(
                svc.create_restaurant(input("   ")).await,
                Err(GastroError::ValidationError { .. })
            ));

            let mut negative = input("Cantina");
            negative.delivery_fee = -100;
            assert!(svc.create_restaurant(negative).await.is_err());

            let mut bad_logo = input("Cantina");
            bad_logo.logo_url = Some("ftp://cdn/logo.png".to_string());
            assert!(svc.create_restaurant(bad_logo).await.is_err());
        });
    }

    #[test]
    fn test_rejected_hours_keep_previous_set() {
        tokio_test::block_on(async {
            let svc = service();
            let r = svc.create_restaurant(input("Bistro")).await.unwrap();
            let week = vec![OpeningHour::new(1, 480, 1200)];
            svc.update_opening_hours(r.id, week.clone()).await.unwrap();

            let err = svc
                .update_opening_hours(
                    r.id,
                    vec![OpeningHour::new(1, 480, 1200), OpeningHour::new(1, 1199, 1260)],
                )
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                GastroError::Hours(crate::utils::error::HoursError::Overlap { weekday: 1 })
            ));
            assert_eq!(svc.repository().opening_hours(r.id).await.unwrap(), week);
        });
    }

    #[test]
    fn test_list_normalizes_paging() {
        tokio_test::block_on(async {
            let svc = service();
            for name in ["A", "B", "C"] {
                svc.create_restaurant(input(name)).await.unwrap();
            }
            assert_eq!(svc.list_restaurants(0, -4).await.unwrap().len(), 3);
            assert_eq!(svc.list_restaurants(1, 2).await.unwrap()[0].slug, "c");
        });
    }
}
