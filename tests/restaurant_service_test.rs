use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use gastro_hours::domain::model::Address;
use gastro_hours::domain::ports::RestaurantRepository;
use gastro_hours::{
    import_catalog, CatalogConfig, CreateRestaurantInput, FixedClock, GastroError, HoursError,
    InMemoryRepository, OpeningHour, RestaurantService, Status,
};
use std::sync::Arc;
use tempfile::TempDir;

fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn address() -> Address {
    Address {
        street: "Rua Augusta".to_string(),
        number: "1500".to_string(),
        complement: String::new(),
        city: "São Paulo".to_string(),
        state: "SP".to_string(),
        zip_code: "01304-001".to_string(),
        lat: -23.556,
        lng: -46.662,
    }
}

fn service_at(now: NaiveDateTime) -> RestaurantService<InMemoryRepository, FixedClock> {
    RestaurantService::new(InMemoryRepository::new(), FixedClock(now))
}

#[tokio::test]
async fn test_open_restaurant_lifecycle() -> Result<()> {
    // 2026-10-19 星期一 10:00
    let svc = service_at(at(19, 10, 0));

    let restaurant = svc
        .create_restaurant(CreateRestaurantInput {
            name: "Pizza do João".to_string(),
            address: Some(address()),
            delivery_fee: 599,
            ..Default::default()
        })
        .await?;

    // 尚未設定營業時間與付款方式, 不能開店
    let err = svc.open_restaurant(restaurant.id).await.unwrap_err();
    assert!(matches!(err, GastroError::BusinessRule { .. }));

    svc.update_opening_hours(restaurant.id, vec![OpeningHour::new(1, 480, 1200)])
        .await?;
    let err = svc.open_restaurant(restaurant.id).await.unwrap_err();
    assert!(err.to_string().contains("payment method"));

    svc.update_payment_methods(restaurant.id, &["PIX", "CREDIT_CARD"])
        .await?;
    svc.open_restaurant(restaurant.id).await?;

    let fetched = svc.get_by_slug("pizza-do-joao").await?;
    assert_eq!(fetched.status, Status::Open);
    assert!(fetched.is_open);

    svc.close_restaurant(restaurant.id).await?;
    assert!(!svc.get_by_slug("pizza-do-joao").await?.is_open);

    Ok(())
}

#[tokio::test]
async fn test_open_requires_address() -> Result<()> {
    let svc = service_at(at(19, 10, 0));
    let restaurant = svc
        .create_restaurant(CreateRestaurantInput {
            name: "Sem Endereço".to_string(),
            ..Default::default()
        })
        .await?;

    let err = svc.open_restaurant(restaurant.id).await.unwrap_err();
    assert!(err.to_string().contains("address"));
    Ok(())
}

#[tokio::test]
async fn test_duplicate_slug_is_a_conflict() -> Result<()> {
    let svc = service_at(at(19, 10, 0));
    let input = CreateRestaurantInput {
        name: "Café Central".to_string(),
        ..Default::default()
    };
    svc.create_restaurant(input.clone()).await?;

    let err = svc.create_restaurant(input).await.unwrap_err();
    assert!(matches!(err, GastroError::Conflict { .. }));

    let explicit = svc
        .create_restaurant(CreateRestaurantInput {
            name: "Café Central".to_string(),
            slug: Some("cafe-central-2".to_string()),
            ..Default::default()
        })
        .await?;
    assert_eq!(explicit.slug, "cafe-central-2");
    Ok(())
}

#[tokio::test]
async fn test_invalid_payment_method_leaves_set_untouched() -> Result<()> {
    let svc = service_at(at(19, 10, 0));
    let restaurant = svc
        .create_restaurant(CreateRestaurantInput {
            name: "Boteco".to_string(),
            ..Default::default()
        })
        .await?;
    svc.update_payment_methods(restaurant.id, &["PIX"]).await?;

    assert!(svc
        .update_payment_methods(restaurant.id, &["DEBIT_CARD", "CASH"])
        .await
        .is_err());
    assert_eq!(
        svc.repository().payment_methods(restaurant.id).await?.len(),
        1
    );
    Ok(())
}

#[tokio::test]
async fn test_out_of_range_hours_are_rejected() -> Result<()> {
    let svc = service_at(at(19, 10, 0));
    let restaurant = svc
        .create_restaurant(CreateRestaurantInput {
            name: "Padaria".to_string(),
            ..Default::default()
        })
        .await?;

    let err = svc
        .update_opening_hours(restaurant.id, vec![OpeningHour::new(1, 480, 1440)])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        GastroError::Hours(HoursError::OutOfRange { field: "closes_at", .. })
    ));
    Ok(())
}

#[tokio::test]
async fn test_unknown_restaurant_is_not_found() -> Result<()> {
    let svc = service_at(at(19, 10, 0));
    let err = svc.get_by_slug("nowhere").await.unwrap_err();
    assert!(matches!(err, GastroError::NotFound { .. }));

    let err = svc
        .update_opening_hours(uuid::Uuid::new_v4(), vec![])
        .await
        .unwrap_err();
    assert!(matches!(err, GastroError::NotFound { .. }));
    Ok(())
}

#[tokio::test]
async fn test_concurrent_replacements_never_mix_sets() -> Result<()> {
    let svc = Arc::new(service_at(at(19, 10, 0)));
    let restaurant = svc
        .create_restaurant(CreateRestaurantInput {
            name: "Concorrente".to_string(),
            ..Default::default()
        })
        .await?;

    let lunch = vec![OpeningHour::new(1, 660, 900), OpeningHour::new(2, 660, 900)];
    let dinner = vec![OpeningHour::new(1, 1080, 1380), OpeningHour::new(2, 1080, 1380)];

    let id = restaurant.id;
    let mut handles = Vec::new();
    for i in 0..16 {
        let svc = Arc::clone(&svc);
        let set = if i % 2 == 0 { lunch.clone() } else { dinner.clone() };
        handles.push(tokio::spawn(async move {
            svc.update_opening_hours(id, set).await
        }));
    }
    for handle in handles {
        handle.await??;
    }

    let stored = svc.repository().opening_hours(id).await?;
    assert!(stored == lunch || stored == dinner);
    Ok(())
}

#[tokio::test]
async fn test_import_catalog_and_evaluate() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let catalog_path = temp_dir.path().join("catalog.toml");

    let content = r#"
[catalog]
name = "centro"

[defaults]
list_limit = 10

[[restaurants]]
name = "Bar da Noite"
status = "OPEN"
payment_methods = ["PIX", "DEBIT_CARD"]

[restaurants.address]
street = "Rua B"
number = "22"
city = "Curitiba"
state = "PR"
zip_code = "80000-000"

[[restaurants.opening_hours]]
weekday = 5
opens = "22:00"
closes = "02:00"

[[restaurants]]
name = "Rascunho"
"#;
    tokio::fs::write(&catalog_path, content).await?;
    let catalog = CatalogConfig::from_file(&catalog_path)?;
    assert_eq!(catalog.list_limit(), 10);

    // 2026-10-23 星期五 23:30
    let svc = service_at(at(23, 23, 30));
    let imported = import_catalog(&svc, &catalog).await?;
    assert_eq!(imported.len(), 2);
    assert_eq!(imported[0].status, Status::Open);
    assert_eq!(imported[1].status, Status::Draft);

    let listed = svc.list_restaurants(catalog.list_limit(), 0).await?;
    assert!(listed[0].is_open);
    assert!(!listed[1].is_open);

    // 星期六 01:00: the Friday interval is not rolled forward.
    let saturday = service_at(at(24, 1, 0));
    import_catalog(&saturday, &catalog).await?;
    assert!(!saturday.get_by_slug("bar-da-noite").await?.is_open);

    Ok(())
}

#[tokio::test]
async fn test_import_stops_on_overlapping_hours() -> Result<()> {
    let content = r#"
[catalog]
name = "centro"

[[restaurants]]
name = "Duplo"

[[restaurants.opening_hours]]
weekday = 1
opens_at = 480
closes_at = 1200

[[restaurants.opening_hours]]
weekday = 1
opens_at = 1199
closes_at = 1260
"#;
    let catalog = CatalogConfig::from_toml_str(content)?;
    let svc = service_at(at(19, 10, 0));

    let err = import_catalog(&svc, &catalog).await.unwrap_err();
    assert!(matches!(err, GastroError::Hours(HoursError::Overlap { weekday: 1 })));
    Ok(())
}
