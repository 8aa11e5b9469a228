use clap::Parser;
use gastro_hours::core::hours::{format_clock, weekday_name, DAYS_PER_WEEK};
use gastro_hours::core::overlap::find_overlap;
use gastro_hours::domain::ports::Clock;
use gastro_hours::utils::error::ErrorSeverity;
use gastro_hours::utils::{logger, validation::Validate};
use gastro_hours::{
    import_catalog, validate_opening_hours, CatalogConfig, CliConfig, Command, FixedClock,
    GastroError, InMemoryRepository, Restaurant, RestaurantService, SystemClock,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Loading catalog from: {}", config.config);

    if let Err(e) = run(&config).await {
        tracing::error!(
            "Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(config: &CliConfig) -> gastro_hours::Result<()> {
    let catalog = CatalogConfig::from_file(&config.config)?;
    catalog.validate()?;

    match &config.command {
        Command::Validate => validate_catalog(&catalog),
        command => query_catalog(&catalog, command).await,
    }
}

async fn query_catalog(catalog: &CatalogConfig, command: &Command) -> gastro_hours::Result<()> {
    let now = command.at().unwrap_or_else(|| SystemClock.now());
    tracing::debug!("Evaluating opening hours as of {}", now);

    let service = RestaurantService::new(InMemoryRepository::new(), FixedClock(now));
    import_catalog(&service, catalog).await?;

    match command {
        Command::Validate => return validate_catalog(catalog),
        Command::List { limit, offset, .. } => {
            let limit = limit.unwrap_or_else(|| catalog.list_limit());
            let restaurants = service.list_restaurants(limit, *offset).await?;
            println!("Restaurants as of {}:", now.format("%A %Y-%m-%d %H:%M"));
            for r in &restaurants {
                println!(
                    "  {:<28} {:<10} {}",
                    r.slug,
                    r.status,
                    if r.is_open { "open" } else { "closed" }
                );
            }
        }
        Command::IsOpen { slug, .. } => {
            let restaurant = service.get_by_slug(slug).await?;
            println!(
                "{} is {} at {}",
                restaurant.name,
                if restaurant.is_open { "OPEN" } else { "CLOSED" },
                now.format("%A %H:%M")
            );
        }
        Command::Schedule { slug } => {
            let restaurant = service.get_by_slug(slug).await?;
            print_schedule(&restaurant);
        }
    }

    Ok(())
}

/// Runs the admission check per restaurant and reports every failure, not just the first.
fn validate_catalog(catalog: &CatalogConfig) -> gastro_hours::Result<()> {
    let mut failures = 0;

    for (idx, entry) in catalog.restaurants.iter().enumerate() {
        let hours = entry.opening_hours(idx)?;
        match validate_opening_hours(&hours) {
            Ok(()) => println!("✅ {} ({} intervals)", entry.name, hours.len()),
            Err(e) => {
                failures += 1;
                println!("❌ {}: {}", entry.name, e);
                if let Some(conflict) = find_overlap(&hours) {
                    let (a, b) = (&hours[conflict.first], &hours[conflict.second]);
                    println!(
                        "   {}-{} conflicts with {}-{} on {}",
                        format_clock(a.opens_at),
                        format_clock(a.closes_at),
                        format_clock(b.opens_at),
                        format_clock(b.closes_at),
                        weekday_name(conflict.weekday)
                    );
                }
            }
        }
    }

    if failures > 0 {
        return Err(GastroError::ValidationError {
            message: format!("{} restaurant(s) have invalid opening hours", failures),
        });
    }
    Ok(())
}

fn print_schedule(restaurant: &Restaurant) {
    println!("{} [{}]", restaurant.name, restaurant.status);
    for weekday in 0..DAYS_PER_WEEK as i32 {
        let mut day: Vec<_> = restaurant
            .opening_hours
            .iter()
            .filter(|h| h.weekday == weekday)
            .collect();
        day.sort_by_key(|h| h.opens_at);

        let slots: Vec<String> = day
            .iter()
            .map(|h| {
                let suffix = if h.crosses_midnight() { " (+1)" } else { "" };
                format!("{}-{}{}", format_clock(h.opens_at), format_clock(h.closes_at), suffix)
            })
            .collect();

        println!(
            "  {:<10} {}",
            weekday_name(weekday),
            if slots.is_empty() { "closed".to_string() } else { slots.join(", ") }
        );
    }
}
