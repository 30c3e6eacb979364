// Offer sources: where a hotel's price offers come from

pub mod fetcher;
pub mod traits;

pub use fetcher::HttpOfferSource;
pub use traits::OfferSource;
