use crate::app::restaurant_service::{CreateRestaurantInput, DEFAULT_LIST_LIMIT};
use crate::core::hours::parse_clock;
use crate::domain::model::{Address, OpeningHour, Status};
use crate::utils::error::{GastroError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_non_negative, validate_optional_url, validate_range,
    validate_required_field, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub catalog: CatalogInfo,
    pub defaults: Option<DefaultsConfig>,
    #[serde(default)]
    pub restaurants: Vec<RestaurantEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub list_limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantEntry {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub delivery_fee: Option<i64>,
    pub min_order_value: Option<i64>,
    pub preparation_time_min: Option<u32>,
    pub supports_pickup: Option<bool>,
    pub supports_delivery: Option<bool>,
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
    pub status: Option<String>,
    pub payment_methods: Option<Vec<String>>,
    pub address: Option<Address>,
    #[serde(default)]
    pub opening_hours: Vec<OpeningHourEntry>,
}

/// Times as minutes (`opens_at = 480`) or clock strings (`opens = "08:00"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningHourEntry {
    pub weekday: i32,
    pub opens_at: Option<i32>,
    pub closes_at: Option<i32>,
    pub opens: Option<String>,
    pub closes: Option<String>,
}

impl OpeningHourEntry {
    fn minutes(field: &str, minutes: Option<i32>, clock: Option<&str>) -> Result<i32> {
        if let Some(minutes) = minutes {
            return Ok(minutes);
        }
        let clock = validate_required_field(field, &clock)?;
        parse_clock(clock).ok_or_else(|| GastroError::InvalidConfigValueError {
            field: field.to_string(),
            value: clock.to_string(),
            reason: "Expected HH:MM between 00:00 and 23:59".to_string(),
        })
    }

    /// Range and overlap checks are left to the validator.
    pub fn to_opening_hour(&self, field_prefix: &str) -> Result<OpeningHour> {
        let opens_at = Self::minutes(
            &format!("{}.opens_at", field_prefix),
            self.opens_at,
            self.opens.as_deref(),
        )?;
        let closes_at = Self::minutes(
            &format!("{}.closes_at", field_prefix),
            self.closes_at,
            self.closes.as_deref(),
        )?;
        Ok(OpeningHour::new(self.weekday, opens_at, closes_at))
    }
}

impl RestaurantEntry {
    pub fn to_create_input(&self) -> CreateRestaurantInput {
        CreateRestaurantInput {
            name: self.name.clone(),
            slug: self.slug.clone(),
            description: self.description.clone().unwrap_or_default(),
            category: self.category.clone().unwrap_or_default(),
            delivery_fee: self.delivery_fee.unwrap_or(0),
            min_order_value: self.min_order_value.unwrap_or(0),
            preparation_time_min: self.preparation_time_min.unwrap_or(0),
            supports_pickup: self.supports_pickup.unwrap_or(false),
            supports_delivery: self.supports_delivery.unwrap_or(false),
            logo_url: self.logo_url.clone(),
            banner_url: self.banner_url.clone(),
            address: self.address.clone(),
        }
    }

    /// `idx` is this entry's position, used in error field paths.
    pub fn opening_hours(&self, idx: usize) -> Result<Vec<OpeningHour>> {
        self.opening_hours
            .iter()
            .enumerate()
            .map(|(j, entry)| {
                entry.to_opening_hour(&format!("restaurants[{}].opening_hours[{}]", idx, j))
            })
            .collect()
    }

    pub fn status(&self, idx: usize) -> Result<Status> {
        match &self.status {
            None => Ok(Status::Draft),
            Some(raw) => raw
                .parse()
                .map_err(|reason| GastroError::InvalidConfigValueError {
                    field: format!("restaurants[{}].status", idx),
                    value: raw.clone(),
                    reason,
                }),
        }
    }
}

impl CatalogConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GastroError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| GastroError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LOGO_CDN}); 未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn list_limit(&self) -> i64 {
        self.defaults
            .as_ref()
            .and_then(|d| d.list_limit)
            .unwrap_or(DEFAULT_LIST_LIMIT)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("catalog.name", &self.catalog.name)?;

        if let Some(limit) = self.defaults.as_ref().and_then(|d| d.list_limit) {
            validate_range("defaults.list_limit", limit, 1, 1000)?;
        }

        for (idx, entry) in self.restaurants.iter().enumerate() {
            let field = |name: &str| format!("restaurants[{}].{}", idx, name);

            validate_non_empty_string(&field("name"), &entry.name)?;
            validate_non_negative(&field("delivery_fee"), entry.delivery_fee.unwrap_or(0))?;
            validate_non_negative(&field("min_order_value"), entry.min_order_value.unwrap_or(0))?;
            validate_optional_url(&field("logo_url"), entry.logo_url.as_deref())?;
            validate_optional_url(&field("banner_url"), entry.banner_url.as_deref())?;
            entry.status(idx)?;
            entry.opening_hours(idx)?;
        }

        Ok(())
    }
}

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
