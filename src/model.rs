// Core structs: Offer, OfferSnapshot, error types
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// A single flag value as sent by the storefront API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Text(String),
}

impl FlagValue {
    /// `Bool(true)`, or text that is non-empty and not a negative word.
    pub fn is_truthy(&self) -> bool {
        match self {
            FlagValue::Bool(b) => *b,
            FlagValue::Text(text) => crate::utils::is_truthy_text(text),
        }
    }
}

/// A vendor's priced booking option for a hotel room.
///
/// Deserialization never fails on a single field: anything missing or of
/// the wrong type falls back to its zero value.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Offer {
    #[serde(deserialize_with = "lenient_string")]
    pub vendor: String,
    #[serde(alias = "partnerName", deserialize_with = "lenient_string")]
    pub partner_name: String,
    #[serde(alias = "roomName", deserialize_with = "lenient_string")]
    pub room_name: String,
    #[serde(deserialize_with = "lenient_price")]
    pub price: f64,
    #[serde(alias = "offerFlags", deserialize_with = "lenient_flags")]
    pub offer_flags: HashMap<String, FlagValue>,
    #[serde(alias = "bookingUrl", deserialize_with = "lenient_string")]
    pub booking_url: String,
}

impl Offer {
    pub fn flag(&self, key: &str) -> Option<&FlagValue> {
        self.offer_flags.get(key)
    }
}

/// Offers of one hotel as returned by a single fetch.
#[derive(Debug, Clone)]
pub struct OfferSnapshot {
    pub hotel_id: String,
    pub offers: Vec<Offer>,
    pub fetched_at: DateTime<Utc>,
}

impl OfferSnapshot {
    pub fn new(hotel_id: impl Into<String>, offers: Vec<Offer>) -> Self {
        Self {
            hotel_id: hotel_id.into(),
            offers,
            fetched_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let price = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(price.filter(|p| p.is_finite()).unwrap_or(0.0))
}

fn lenient_flags<'de, D>(deserializer: D) -> Result<HashMap<String, FlagValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(map) = Value::deserialize(deserializer)? else {
        return Ok(HashMap::new());
    };

    Ok(map
        .into_iter()
        .filter_map(|(key, value)| {
            let flag = match value {
                Value::Bool(b) => FlagValue::Bool(b),
                Value::String(s) => FlagValue::Text(s),
                Value::Number(n) => FlagValue::Text(n.to_string()),
                _ => return None,
            };
            Some((key, flag))
        })
        .collect())
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    HttpError(String),
    #[error("request timed out after {0}s")]
    Timeout(u64),
    #[error("unexpected status {status} from {url}")]
    InvalidResponse { status: u16, url: String },
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected payload shape: {0}")]
    UnexpectedShape(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
