use crate::analyzer::filter::OfferFilter;
use crate::model::ConfigError;
use reqwest::Url;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use tracing::warn;

#[derive(Debug, Clone, Deserialize)]
pub struct HotelConfig {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub filters: OfferFilter,
    /// Storefront search URL whose query params override `filters`.
    #[serde(default)]
    pub search_url: Option<String>,
}

impl HotelConfig {
    /// Filters in effect for this hotel.
    pub fn effective_filter(&self) -> OfferFilter {
        let Some(raw) = self.search_url.as_deref() else {
            return self.filters;
        };
        match Url::parse(raw) {
            Ok(url) => OfferFilter::from_url(&url),
            Err(e) => {
                warn!("Ignoring invalid search_url for hotel {}: {}", self.id, e);
                self.filters
            }
        }
    }

    /// Storefront link that reopens this hotel with its filters applied.
    /// Built from `search_url` when set, otherwise `{storefront}/hotels/{id}`.
    pub fn share_url(&self, storefront: Option<&Url>) -> Option<Url> {
        let mut url = match self.search_url.as_deref().and_then(|raw| Url::parse(raw).ok()) {
            Some(url) => url,
            None => {
                let mut url = storefront?.clone();
                url.path_segments_mut()
                    .ok()?
                    .pop_if_empty()
                    .extend(["hotels", self.id.as_str()]);
                url
            }
        };
        self.effective_filter().write_to_url(&mut url);
        Some(url)
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { &self.id } else { &self.name }
    }
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default)]
    pub refresh_interval_seconds: Option<u64>,
    /// Public storefront base used for shareable hotel links.
    #[serde(default)]
    pub storefront_url: Option<String>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub vendor_aliases: HashMap<String, String>,
    pub hotels: Vec<HotelConfig>,
}

fn default_timeout() -> u64 {
    10
}

fn default_currency() -> String {
    "USD".to_string()
}

impl AppConfig {
    pub fn storefront(&self) -> Option<Url> {
        self.storefront_url.as_deref().and_then(|raw| Url::parse(raw).ok())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api_base_url is empty".into()));
        }
        if self.request_timeout_seconds == 0 {
            return Err(ConfigError::Invalid("request_timeout_seconds must be > 0".into()));
        }
        if let Some(raw) = self.storefront_url.as_deref() {
            let url = Url::parse(raw)
                .map_err(|e| ConfigError::Invalid(format!("storefront_url {}: {}", raw, e)))?;
            if url.cannot_be_a_base() {
                return Err(ConfigError::Invalid(format!("storefront_url {} cannot have a path", raw)));
            }
        }
        if let Some(hotel) = self.hotels.iter().find(|h| h.id.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "hotel '{}' has an empty id",
                hotel.name
            )));
        }
        Ok(())
    }
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config_with_defaults() {
        let cfg = parse_config(
            r#"{ "api_base_url": "http://localhost:3000", "hotels": [{ "id": "h1" }] }"#,
        )
        .unwrap();
        assert_eq!(cfg.request_timeout_seconds, 10);
        assert_eq!(cfg.currency, "USD");
        assert!(cfg.refresh_interval_seconds.is_none());
        assert!(cfg.vendor_aliases.is_empty());
        assert!(cfg.storefront().is_none());
        assert_eq!(cfg.hotels[0].display_name(), "h1");
        assert!(!cfg.hotels[0].effective_filter().is_active());
    }

    #[test]
    fn parses_filters_and_aliases() {
        let cfg = parse_config(
            r#"{
                "api_base_url": "http://localhost:3000",
                "vendor_aliases": { "booking": "Booking.com" },
                "hotels": [{ "id": "h1", "name": "Reethi Beach", "filters": { "breakfastIncluded": true } }]
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.vendor_aliases["booking"], "Booking.com");
        let filter = cfg.hotels[0].effective_filter();
        assert!(filter.breakfast_included);
        assert!(!filter.free_cancellation);
    }

    #[test]
    fn search_url_overrides_filters() {
        let hotel = HotelConfig {
            id: "h1".into(),
            name: String::new(),
            filters: OfferFilter { breakfast_included: true, ..Default::default() },
            search_url: Some("https://shop.example/hotels/h1?freeCancellation=true".into()),
        };
        let filter = hotel.effective_filter();
        assert!(filter.free_cancellation);
        assert!(!filter.breakfast_included);
    }

    #[test]
    fn snake_case_filter_keys_are_honoured() {
        let cfg = parse_config(
            r#"{ "api_base_url": "http://x", "hotels": [{ "id": "h1", "filters": { "breakfast_included": true } }] }"#,
        )
        .unwrap();
        assert!(cfg.hotels[0].effective_filter().breakfast_included);
    }

    #[test]
    fn share_url_from_storefront() {
        let hotel = HotelConfig {
            id: "reethi beach".into(),
            name: String::new(),
            filters: OfferFilter { half_board: true, ..Default::default() },
            search_url: None,
        };
        let storefront = Url::parse("https://shop.example/").unwrap();
        let url = hotel.share_url(Some(&storefront)).unwrap();
        assert_eq!(url.as_str(), "https://shop.example/hotels/reethi%20beach?halfBoard=true");
        assert!(hotel.share_url(None).is_none());
    }

    #[test]
    fn share_url_from_search_url_is_canonical() {
        let hotel = HotelConfig {
            id: "h1".into(),
            name: String::new(),
            filters: OfferFilter::default(),
            search_url: Some("https://shop.example/hotels/h1?freeCancellation=1&sort=price".into()),
        };
        let url = hotel.share_url(None).unwrap();
        assert_eq!(url.query(), Some("sort=price&freeCancellation=true"));
    }

    #[test]
    fn rejects_invalid_values() {
        let err = parse_config(r#"{ "api_base_url": " ", "hotels": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = parse_config(
            r#"{ "api_base_url": "http://x", "request_timeout_seconds": 0, "hotels": [] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = parse_config(r#"{ "api_base_url": "http://x", "storefront_url": "shop", "hotels": [] }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = parse_config(r#"{ "api_base_url": "http://x", "hotels": [{ "id": "" }] }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn reports_unreadable_file() {
        let err = load_config("/nonexistent/atoll-offers.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
