use crate::analyzer::grouping::VendorGroups;
use crate::model::Offer;
use std::fmt;

/// A vendor with its position in the price comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedVendor {
    /// 1 = cheapest.
    pub rank: usize,
    pub vendor: String,
    pub best_price: f64,
    pub offer_count: usize,
}

impl RankedVendor {
    pub fn is_best(&self) -> bool {
        self.rank == 1
    }
}

impl fmt::Display for RankedVendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} @ {:.2}", self.rank, self.vendor, self.best_price)
    }
}

/// Orders vendors by their cheapest offer, ascending. Vendors with the same
/// best price keep their group order.
pub fn rank_vendors(groups: &VendorGroups) -> Vec<RankedVendor> {
    let mut scored: Vec<(f64, &str, usize)> = groups
        .iter()
        .filter(|g| !g.offers.is_empty())
        .map(|g| (g.best_price(), g.vendor.as_str(), g.offers.len()))
        .collect();

    scored.sort_by(|a, b| a.0.total_cmp(&b.0));

    scored
        .into_iter()
        .enumerate()
        .map(|(i, (best_price, vendor, offer_count))| RankedVendor {
            rank: i + 1,
            vendor: vendor.to_string(),
            best_price,
            offer_count,
        })
        .collect()
}

/// The single lowest-priced offer; the earliest one wins a tie.
pub fn hero_offer(offers: &[Offer]) -> Option<&Offer> {
    offers.iter().reduce(|best, o| {
        if o.price.total_cmp(&best.price).is_lt() { o } else { best }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::grouping::group_by_vendor;
    use crate::model::fixtures::offer;
    use proptest::prelude::*;

    fn vendors(ranking: &[RankedVendor]) -> Vec<&str> {
        ranking.iter().map(|r| r.vendor.as_str()).collect()
    }

    #[test]
    fn ranks_example_cheapest_first() {
        let offers = vec![offer("A", 100.0), offer("B", 80.0), offer("A", 90.0)];
        let ranking = rank_vendors(&group_by_vendor(&offers));

        assert_eq!(vendors(&ranking), vec!["B", "A"]);
        assert!(ranking[0].is_best());
        assert_eq!(ranking[1].best_price, 90.0);
        assert_eq!(ranking[1].offer_count, 2);
        assert_eq!(ranking[1].rank, 2);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let offers = vec![offer("X", 60.0), offer("Y", 50.0), offer("Z", 60.0), offer("W", 50.0)];
        let ranking = rank_vendors(&group_by_vendor(&offers));
        assert_eq!(vendors(&ranking), vec!["Y", "W", "X", "Z"]);
    }

    #[test]
    fn empty_groups_rank_nothing() {
        assert!(rank_vendors(&group_by_vendor(&[])).is_empty());
    }

    #[test]
    fn hero_is_lowest_and_first_on_tie() {
        let mut second = offer("C", 70.0);
        second.room_name = "later".into();
        let offers = vec![offer("A", 90.0), offer("C", 70.0), second];
        let hero = hero_offer(&offers).unwrap();
        assert_eq!(hero.vendor, "C");
        assert_eq!(hero.room_name, "Beach Villa");
        assert!(hero_offer(&[]).is_none());
    }

    #[test]
    fn display_format() {
        let r = RankedVendor { rank: 1, vendor: "Agoda".into(), best_price: 80.0, offer_count: 1 };
        assert_eq!(r.to_string(), "#1 Agoda @ 80.00");
    }

    proptest! {
        #[test]
        fn ranking_follows_min_price(
            raw in prop::collection::vec(("[A-F]", 0.0f64..5000.0), 1..40)
        ) {
            let offers: Vec<Offer> = raw.iter().map(|(v, p)| offer(v, *p)).collect();
            let ranking = rank_vendors(&group_by_vendor(&offers));

            prop_assert!(ranking.windows(2).all(|w| w[0].best_price <= w[1].best_price));
            for r in &ranking {
                let min = offers
                    .iter()
                    .filter(|o| o.vendor == r.vendor)
                    .map(|o| o.price)
                    .fold(f64::INFINITY, f64::min);
                prop_assert_eq!(r.best_price, min);
            }
            let hero = hero_offer(&offers).unwrap();
            prop_assert_eq!(hero.price, ranking[0].best_price);
        }
    }
}
