use crate::model::Offer;
use crate::utils::is_truthy_text;
use reqwest::Url;
use serde::Deserialize;

/// Amenity predicates shown in the search sidebar.
///
/// Active predicates are combined with AND; unset ones are ignored. The
/// same state round-trips through the storefront URL query string so that
/// filtered views can be shared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OfferFilter {
    #[serde(alias = "breakfast_included")]
    pub breakfast_included: bool,
    #[serde(alias = "free_cancellation")]
    pub free_cancellation: bool,
    #[serde(alias = "half_board")]
    pub half_board: bool,
    #[serde(alias = "all_inclusive")]
    pub all_inclusive: bool,
    #[serde(alias = "full_board")]
    pub full_board: bool,
}

impl OfferFilter {
    /// (query/flag key, snake_case fallback key, is active)
    fn predicates(&self) -> [(&'static str, &'static str, bool); 5] {
        [
            ("breakfastIncluded", "breakfast_included", self.breakfast_included),
            ("freeCancellation", "free_cancellation", self.free_cancellation),
            ("halfBoard", "half_board", self.half_board),
            ("allInclusive", "all_inclusive", self.all_inclusive),
            ("fullBoard", "full_board", self.full_board),
        ]
    }

    fn set(&mut self, key: &str, on: bool) {
        match key {
            "breakfastIncluded" => self.breakfast_included = on,
            "freeCancellation" => self.free_cancellation = on,
            "halfBoard" => self.half_board = on,
            "allInclusive" => self.all_inclusive = on,
            "fullBoard" => self.full_board = on,
            _ => {}
        }
    }

    pub fn is_active(&self) -> bool {
        self.predicates().iter().any(|(_, _, on)| *on)
    }

    /// Names of the active predicates, in display order.
    pub fn active_keys(&self) -> Vec<&'static str> {
        self.predicates()
            .into_iter()
            .filter(|(_, _, on)| *on)
            .map(|(key, _, _)| key)
            .collect()
    }

    pub fn matches(&self, offer: &Offer) -> bool {
        self.predicates()
            .iter()
            .filter(|(_, _, on)| *on)
            .all(|(key, fallback, _)| {
                offer
                    .flag(key)
                    .or_else(|| offer.flag(fallback))
                    .is_some_and(|v| v.is_truthy())
            })
    }

    pub fn apply(&self, offers: &[Offer]) -> Vec<Offer> {
        if !self.is_active() {
            return offers.to_vec();
        }
        offers.iter().filter(|o| self.matches(o)).cloned().collect()
    }

    /// Reads predicate params from a URL. A bare key (`?halfBoard`) or any
    /// truthy value turns the predicate on; unknown params are ignored.
    pub fn from_url(url: &Url) -> Self {
        let mut filter = Self::default();
        for (key, value) in url.query_pairs() {
            let on = value.is_empty() || is_truthy_text(&value);
            filter.set(&key, on);
        }
        filter
    }

    /// Rewrites the predicate params of `url` to match this filter, keeping
    /// every other param in place.
    pub fn write_to_url(&self, url: &mut Url) {
        let known = self.predicates().map(|(key, _, _)| key);
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(k, _)| !known.iter().any(|key| k == key))
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let active = self.active_keys();

        if kept.is_empty() && active.is_empty() {
            url.set_query(None);
            return;
        }

        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (k, v) in &kept {
            pairs.append_pair(k, v);
        }
        for key in active {
            pairs.append_pair(key, "true");
        }
    }
}
