use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Lifecycle of a restaurant. Only [`Status::Open`] lets opening hours take effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Draft,
    Open,
    Closed,
    Suspended,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Draft => "DRAFT",
            Status::Open => "OPEN",
            Status::Closed => "CLOSED",
            Status::Suspended => "SUSPENDED",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Status::Open)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DRAFT" => Ok(Status::Draft),
            "OPEN" => Ok(Status::Open),
            "CLOSED" => Ok(Status::Closed),
            "SUSPENDED" => Ok(Status::Suspended),
            other => Err(format!("unknown status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Pix,
    CreditCard,
    DebitCard,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "PIX",
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::DebitCard => "DEBIT_CARD",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    // Exact match only; "pix" is rejected like any other unknown method.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PIX" => Ok(PaymentMethod::Pix),
            "CREDIT_CARD" => Ok(PaymentMethod::CreditCard),
            "DEBIT_CARD" => Ok(PaymentMethod::DebitCard),
            other => Err(format!("invalid payment method: {}", other)),
        }
    }
}

/// One weekly recurring interval.
///
/// `weekday` is 0 = Sunday .. 6 = Saturday; `opens_at` and `closes_at` are
/// minutes since local midnight. A `closes_at` below `opens_at` means the
/// interval runs past midnight into the next calendar day, while staying keyed
/// to `weekday`. Fields are plain integers so out-of-range input can be
/// represented and rejected by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpeningHour {
    pub weekday: i32,
    pub opens_at: i32,
    pub closes_at: i32,
}

impl OpeningHour {
    pub fn new(weekday: i32, opens_at: i32, closes_at: i32) -> Self {
        Self {
            weekday,
            opens_at,
            closes_at,
        }
    }

    /// Shared by the overlap check and the evaluator; both must classify alike.
    pub fn crosses_midnight(&self) -> bool {
        self.closes_at < self.opens_at
    }

    /// Strictly same-day. A degenerate `opens_at == closes_at` interval is neither.
    pub fn is_same_day(&self) -> bool {
        self.opens_at < self.closes_at
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub number: String,
    #[serde(default)]
    pub complement: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
}

/// Aggregate root. Opening hours and payment methods load with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub status: Status,
    pub category: String,
    pub rating: u8,
    pub total_reviews: u32,
    /// Computed on read, never stored.
    #[serde(default)]
    pub is_open: bool,
    /// Cents.
    pub delivery_fee: i64,
    /// Cents.
    pub min_order_value: i64,
    pub preparation_time_min: u32,
    pub supports_pickup: bool,
    pub supports_delivery: bool,
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub address: Option<Address>,
    pub opening_hours: Vec<OpeningHour>,
    pub payment_methods: Vec<PaymentMethod>,
}

impl Restaurant {
    pub fn calculate_is_open(&self, now: NaiveDateTime) -> bool {
        crate::core::availability::is_open_at(self.status, &self.opening_hours, now)
    }

    /// Fills the computed `is_open` field.
    pub fn with_is_open(mut self, now: NaiveDateTime) -> Self {
        self.is_open = self.calculate_is_open(now);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_string(&Status::Suspended).unwrap(), "\"SUSPENDED\"");
        let parsed: Status = serde_json::from_str("\"OPEN\"").unwrap();
        assert_eq!(parsed, Status::Open);
        assert_eq!("closed".parse::<Status>().unwrap(), Status::Closed);
        assert!("archived".parse::<Status>().is_err());
        assert!(Status::Open.is_active());
        assert!(!Status::Draft.is_active());
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("PIX".parse::<PaymentMethod>().unwrap(), PaymentMethod::Pix);
        assert_eq!(
            "CREDIT_CARD".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::CreditCard
        );
        assert!("pix".parse::<PaymentMethod>().is_err());
        assert!("CASH".parse::<PaymentMethod>().is_err());
        assert_eq!(PaymentMethod::DebitCard.to_string(), "DEBIT_CARD");
    }

    #[test]
    fn test_opening_hour_classification() {
        assert!(OpeningHour::new(5, 1320, 120).crosses_midnight());
        assert!(OpeningHour::new(1, 480, 1200).is_same_day());

        let degenerate = OpeningHour::new(2, 0, 0);
        assert!(!degenerate.crosses_midnight());
        assert!(!degenerate.is_same_day());
    }
}
