use crate::model::FetchError;

#[async_trait::async_trait]
pub trait OfferSource: Send + Sync {
    /// Raw offers payload for one hotel.
    async fn fetch_offers(&self, hotel_id: &str) -> Result<String, FetchError>;
}
