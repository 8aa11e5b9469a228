use crate::app::restaurant_service::RestaurantService;
use crate::config::toml_config::CatalogConfig;
use crate::domain::model::{Restaurant, Status};
use crate::domain::ports::{Clock, RestaurantRepository};
use crate::utils::error::Result;

/// Seeds the service from a catalog file, running every entry through the
/// same use cases an interactive caller would. Stops at the first failure.
pub async fn import_catalog<R, C>(
    service: &RestaurantService<R, C>,
    catalog: &CatalogConfig,
) -> Result<Vec<Restaurant>>
where
    R: RestaurantRepository,
    C: Clock,
{
    let mut imported = Vec::with_capacity(catalog.restaurants.len());

    for (idx, entry) in catalog.restaurants.iter().enumerate() {
        tracing::debug!("Importing restaurants[{}]: {}", idx, entry.name);

        let created = service.create_restaurant(entry.to_create_input()).await?;
        let id = created.id;

        if let Some(methods) = &entry.payment_methods {
            service.update_payment_methods(id, methods.as_slice()).await?;
        }

        let hours = entry.opening_hours(idx)?;
        if !hours.is_empty() {
            service.update_opening_hours(id, hours).await?;
        }

        // 依設定檔狀態切換
        match entry.status(idx)? {
            Status::Draft => {}
            Status::Open => service.open_restaurant(id).await?,
            Status::Closed => service.close_restaurant(id).await?,
            Status::Suspended => service.suspend_restaurant(id).await?,
        }

        imported.push(service.repository().get_by_id(id).await?);
    }

    tracing::info!(
        "Imported {} restaurants from catalog '{}'",
        imported.len(),
        catalog.catalog.name
    );
    Ok(imported)
}
