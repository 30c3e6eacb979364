use crate::model::Offer;
use std::collections::HashMap;

pub const UNKNOWN_VENDOR: &str = "unknown";

pub fn normalize_all(offers: &mut [Offer], vendor_aliases: &HashMap<String, String>) {
    for offer in offers.iter_mut() {
        normalize_offer(offer, vendor_aliases);
    }
}

fn normalize_offer(offer: &mut Offer, vendor_aliases: &HashMap<String, String>) {
    if !offer.price.is_finite() || offer.price < 0.0 {
        offer.price = 0.0;
    }

    let vendor = offer.vendor.trim();
    if vendor.is_empty() {
        offer.vendor = UNKNOWN_VENDOR.to_string();
        return;
    }

    let lowered = vendor.to_lowercase();
    // Longest keyword first so "booking.com" beats "booking".
    let canonical = vendor_aliases
        .iter()
        .filter(|(keyword, _)| !keyword.is_empty() && lowered.contains(&keyword.to_lowercase()))
        .max_by_key(|(keyword, _)| keyword.len())
        .map(|(_, canonical)| canonical.clone());

    offer.vendor = canonical.unwrap_or_else(|| vendor.to_string());
}
