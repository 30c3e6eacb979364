// Offer payload parsing for the storefront hotels API
use crate::model::{Offer, ParserError};
use serde_json::Value;
use tracing::warn;

pub trait Parser {
    fn parse(&self, body: &str) -> Result<Vec<Offer>, ParserError>;
}

/// Accepts either a bare array of offers or an object wrapping it in `offers`.
pub struct OffersJsonParser;

impl OffersJsonParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for OffersJsonParser {
    fn parse(&self, body: &str) -> Result<Vec<Offer>, ParserError> {
        let payload: Value = serde_json::from_str(body)?;

        let items = match payload {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("offers") {
                Some(Value::Array(items)) => items,
                Some(Value::Null) | None => {
                    return Err(ParserError::UnexpectedShape("object without an offers array".into()));
                }
                Some(other) => {
                    return Err(ParserError::UnexpectedShape(format!(
                        "offers is {}, expected an array",
                        kind(&other)
                    )));
                }
            },
            other => {
                return Err(ParserError::UnexpectedShape(format!(
                    "top-level {}, expected an array",
                    kind(&other)
                )));
            }
        };

        let mut offers = Vec::with_capacity(items.len());
        for (i, item) in items.into_iter().enumerate() {
            if !item.is_object() {
                warn!("Skipping offer #{}: {} is not an object", i, kind(&item));
                continue;
            }
            // Field-level problems never fail here, see Offer's lenient deserializers.
            match serde_json::from_value::<Offer>(item) {
                Ok(offer) => offers.push(offer),
                Err(e) => warn!("Skipping offer #{}: {}", i, e),
            }
        }

        Ok(offers)
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
