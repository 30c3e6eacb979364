use crate::analyzer::filter::OfferFilter;
use crate::analyzer::grouping::{group_by_vendor, VendorGroups};
use crate::analyzer::ranking::{hero_offer, rank_vendors, RankedVendor};
use crate::analyzer::savings::{max_price, savings_for};
use crate::model::{Offer, OfferSnapshot};
use chrono::{DateTime, Utc};

/// Trait defining the interface for an offer analyzer.
pub trait Analyzer {
    fn calculate_stats(&self, offers: &[Offer]) -> PriceStats;
    fn compare(&self, snapshot: &OfferSnapshot, filter: &OfferFilter) -> PriceComparison;
}

/// Implementation of the offer analyzer.
pub struct OfferAnalyzer;

impl OfferAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

/// Summary numbers for the price-comparison header.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceStats {
    pub offer_count: usize,
    pub vendor_count: usize,
    pub min_price: f64,
    pub max_price: f64,
    /// Mean over offers with a positive price.
    pub avg_price: f64,
}

/// One row of the comparison widget.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorRow {
    pub ranked: RankedVendor,
    pub best_offer: Offer,
    pub savings_percent: u8,
}

#[derive(Debug, Clone)]
pub struct HeroOffer {
    pub offer: Offer,
    pub savings_percent: u8,
}

/// Everything the offers view renders for one hotel.
#[derive(Debug, Clone)]
pub struct PriceComparison {
    pub hotel_id: String,
    pub fetched_at: DateTime<Utc>,
    pub filter: OfferFilter,
    pub groups: VendorGroups,
    pub rows: Vec<VendorRow>,
    pub hero: Option<HeroOffer>,
    pub stats: PriceStats,
    /// Offers received before filtering.
    pub total_offers: usize,
    /// Highest unfiltered price; every savings figure is relative to it.
    pub reference_max: f64,
}

impl PriceComparison {
    pub fn ranking(&self) -> impl Iterator<Item = &RankedVendor> {
        self.rows.iter().map(|r| &r.ranked)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Analyzer for OfferAnalyzer {
    fn calculate_stats(&self, offers: &[Offer]) -> PriceStats {
        let positive: Vec<f64> = offers
            .iter()
            .map(|o| o.price)
            .filter(|&p| p > 0.0)
            .collect();
        let avg = if positive.is_empty() {
            0.0
        } else {
            positive.iter().sum::<f64>() / positive.len() as f64
        };
        let min = offers
            .iter()
            .map(|o| o.price)
            .reduce(f64::min)
            .unwrap_or(0.0);

        PriceStats {
            offer_count: offers.len(),
            vendor_count: group_by_vendor(offers).len(),
            min_price: min,
            max_price: max_price(offers),
            avg_price: avg,
        }
    }

    /// Filters, groups and ranks the snapshot. Savings are measured against
    /// the most expensive offer of the whole snapshot, not the filtered set.
    fn compare(&self, snapshot: &OfferSnapshot, filter: &OfferFilter) -> PriceComparison {
        let filtered = filter.apply(&snapshot.offers);
        let groups = group_by_vendor(&filtered);

        let rows = rank_vendors(&groups)
            .into_iter()
            .filter_map(|ranked| {
                let best = groups.get(&ranked.vendor)?.best()?.clone();
                Some(VendorRow {
                    savings_percent: savings_for(&best, &snapshot.offers),
                    best_offer: best,
                    ranked,
                })
            })
            .collect();

        let hero = hero_offer(&filtered).map(|o| HeroOffer {
            offer: o.clone(),
            savings_percent: savings_for(o, &snapshot.offers),
        });

        PriceComparison {
            hotel_id: snapshot.hotel_id.clone(),
            fetched_at: snapshot.fetched_at,
            filter: *filter,
            stats: self.calculate_stats(&filtered),
            groups,
            rows,
            hero,
            total_offers: snapshot.offers.len(),
            reference_max: max_price(&snapshot.offers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{offer, offer_with_flags};

    fn snapshot(offers: Vec<Offer>) -> OfferSnapshot {
        OfferSnapshot::new("reethi-beach", offers)
    }

    #[test]
    fn compares_example_snapshot() {
        let snap = snapshot(vec![offer("A", 100.0), offer("B", 80.0), offer("A", 90.0)]);
        let cmp = OfferAnalyzer::new().compare(&snap, &OfferFilter::default());

        let ranking: Vec<_> = cmp.ranking().map(|r| r.vendor.as_str()).collect();
        assert_eq!(ranking, vec!["B", "A"]);
        assert_eq!(cmp.rows[0].savings_percent, 20);
        assert_eq!(cmp.rows[1].savings_percent, 10);
        assert_eq!(cmp.rows[1].best_offer.price, 90.0);

        let hero = cmp.hero.as_ref().unwrap();
        assert_eq!(hero.offer.vendor, "B");
        assert_eq!(hero.savings_percent, 20);

        assert_eq!(cmp.stats.offer_count, 3);
        assert_eq!(cmp.stats.vendor_count, 2);
        assert_eq!(cmp.stats.min_price, 80.0);
        assert_eq!(cmp.stats.max_price, 100.0);
        assert_eq!(cmp.stats.avg_price, 90.0);
        assert_eq!(cmp.total_offers, 3);
    }

    #[test]
    fn savings_use_unfiltered_maximum() {
        let snap = snapshot(vec![
            offer("Expensive", 200.0),
            offer_with_flags("A", 150.0, &[("breakfastIncluded", true)]),
            offer_with_flags("B", 100.0, &[("breakfastIncluded", true)]),
        ]);
        let filter = OfferFilter { breakfast_included: true, ..Default::default() };
        let cmp = OfferAnalyzer::new().compare(&snap, &filter);

        assert_eq!(cmp.rows.len(), 2);
        assert_eq!(cmp.rows[0].ranked.vendor, "B");
        assert_eq!(cmp.rows[0].savings_percent, 50);
        assert_eq!(cmp.rows[1].savings_percent, 25);
        assert_eq!(cmp.stats.max_price, 150.0);
        assert_eq!(cmp.reference_max, 200.0);
        assert!(cmp.groups.get("Expensive").is_none());
    }

    #[test]
    fn filter_that_removes_everything_yields_empty_comparison() {
        let snap = snapshot(vec![offer("A", 100.0)]);
        let filter = OfferFilter { full_board: true, ..Default::default() };
        let cmp = OfferAnalyzer::new().compare(&snap, &filter);

        assert!(cmp.is_empty());
        assert!(cmp.hero.is_none());
        assert_eq!(cmp.stats.offer_count, 0);
        assert_eq!(cmp.total_offers, 1);
    }

    #[test]
    fn stats_ignore_zero_prices_in_average() {
        let stats = OfferAnalyzer::new().calculate_stats(&[offer("A", 0.0), offer("B", 50.0), offer("C", 150.0)]);
        assert_eq!(stats.avg_price, 100.0);
        assert_eq!(stats.min_price, 0.0);
        assert_eq!(stats.max_price, 150.0);
    }

    #[test]
    fn stats_of_empty_set() {
        let stats = OfferAnalyzer::new().calculate_stats(&[]);
        assert_eq!(stats.offer_count, 0);
        assert_eq!(stats.min_price, 0.0);
        assert_eq!(stats.avg_price, 0.0);
    }
}
