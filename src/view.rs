// Offer view states and their text rendering
use crate::analyzer::PriceComparison;
use crate::utils::format_price;
use reqwest::Url;
use std::fmt::Write;

/// What the offers panel of a hotel page shows after a refresh.
#[derive(Debug, Clone)]
pub enum HotelView {
    Ready(PriceComparison),
    /// The hotel has no offers, or none left after filtering. Not an error.
    NoOffers { hotel_id: String, filtered: bool },
    /// The fetch failed; the user may trigger a retry.
    FetchFailed { hotel_id: String, reason: String },
}

impl HotelView {
    pub fn hotel_id(&self) -> &str {
        match self {
            HotelView::Ready(cmp) => &cmp.hotel_id,
            HotelView::NoOffers { hotel_id, .. } | HotelView::FetchFailed { hotel_id, .. } => hotel_id,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, HotelView::FetchFailed { .. })
    }
}

pub const RETRY_HINT: &str = "Press Enter to retry.";

/// Renders the offers panel. `share` is the storefront link for the current
/// filter state, printed under a ready comparison.
pub fn render(view: &HotelView, title: &str, currency: &str, share: Option<&Url>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", title);

    match view {
        HotelView::Ready(cmp) => {
            render_comparison(&mut out, cmp, currency);
            if let Some(url) = share {
                let _ = writeln!(out, "Share: {}", url);
            }
        }
        HotelView::NoOffers { filtered: true, .. } => {
            let _ = writeln!(out, "No offers match the selected filters.");
        }
        HotelView::NoOffers { filtered: false, .. } => {
            let _ = writeln!(out, "No offers available for this hotel right now.");
        }
        HotelView::FetchFailed { reason, .. } => {
            let _ = writeln!(out, "Could not load offers: {}", reason);
            let _ = writeln!(out, "{}", RETRY_HINT);
        }
    }

    out
}

fn render_comparison(out: &mut String, cmp: &PriceComparison, currency: &str) {
    if let Some(hero) = &cmp.hero {
        let _ = writeln!(
            out,
            "Best deal: {} via {} ({}) - save {}%",
            format_price(hero.offer.price, currency),
            hero.offer.vendor,
            hero.offer.room_name,
            hero.savings_percent
        );
        if !hero.offer.booking_url.is_empty() {
            let _ = writeln!(out, "Book at {}", hero.offer.booking_url);
        }
    }

    let active = cmp.filter.active_keys();
    if !active.is_empty() {
        let _ = writeln!(out, "Filters: {}", active.join(", "));
    }

    let _ = writeln!(
        out,
        "{} offers from {} vendors ({} received), {} - {}, savings vs {}",
        cmp.stats.offer_count,
        cmp.stats.vendor_count,
        cmp.total_offers,
        format_price(cmp.stats.min_price, currency),
        format_price(cmp.stats.max_price, currency),
        format_price(cmp.reference_max, currency)
    );

    let _ = writeln!(out, "{:>3}  {:<20} {:>14} {:>6} {:>7}", "#", "Vendor", "From", "Save", "Offers");
    for row in &cmp.rows {
        let _ = writeln!(
            out,
            "{}{:>2}  {:<20} {:>14} {:>5}% {:>7}",
            if row.ranked.is_best() { "*" } else { " " },
            row.ranked.rank,
            row.ranked.vendor,
            format_price(row.ranked.best_price, currency),
            row.savings_percent,
            row.ranked.offer_count
        );
    }
    let _ = writeln!(out, "Prices as of {} UTC", cmp.fetched_at.format("%Y-%m-%d %H:%M"));
}
