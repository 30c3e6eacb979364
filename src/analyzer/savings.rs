use crate::model::Offer;

/// Highest price in the set, or 0 for an empty set.
pub fn max_price(offers: &[Offer]) -> f64 {
    offers
        .iter()
        .map(|o| o.price)
        .filter(|p| p.is_finite())
        .fold(0.0, f64::max)
}

/// Percentage saved against `max`, rounded to the nearest integer.
/// Always within 0..=100; 0 whenever `max` is not a positive finite number.
pub fn savings_percent(price: f64, max: f64) -> u8 {
    if !max.is_finite() || max <= 0.0 || !price.is_finite() {
        return 0;
    }
    let pct = ((max - price) / max * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

/// Savings of `offer` relative to the most expensive offer in `all`.
pub fn savings_for(offer: &Offer, all: &[Offer]) -> u8 {
    savings_percent(offer.price, max_price(all))
}
