use crate::model::FetchError;
use crate::source::traits::OfferSource;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{info, warn};

/// Fetches offers from `GET {base}/api/hotels/{id}/offers`.
///
/// One request per call with a fixed timeout. Failures are returned to the
/// caller as they are; nothing here retries.
pub struct HttpOfferSource {
    client: Client,
    base_url: Url,
    timeout_secs: u64,
}

impl HttpOfferSource {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| FetchError::HttpError(format!("invalid base url {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::HttpError(format!("base url {} cannot have a path", base_url)));
        }

        let client = Client::builder()
            .user_agent(concat!("atoll-offers/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| FetchError::HttpError(e.to_string()))?;

        Ok(Self { client, base_url, timeout_secs })
    }

    fn build_url(&self, hotel_id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["api", "hotels", hotel_id, "offers"]);
        }
        url
    }
}

#[async_trait::async_trait]
impl OfferSource for HttpOfferSource {
    async fn fetch_offers(&self, hotel_id: &str) -> Result<String, FetchError> {
        let url = self.build_url(hotel_id);
        info!("GET {}", url);

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout_secs)
            } else {
                FetchError::HttpError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Offers endpoint responded [{}] for hotel {}", status, hotel_id);
            return Err(FetchError::InvalidResponse {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout_secs)
            } else {
                FetchError::HttpError(e.to_string())
            }
        })
    }
}
