// Analyzer module: the offer aggregation pipeline behind the price-comparison widget.

pub mod filter;
pub mod grouping;
pub mod price_analysis;
pub mod ranking;
pub mod savings;

// Re-export the main Analyzer implementation for ease of use.
pub use price_analysis::{Analyzer, OfferAnalyzer, PriceComparison};
