// Utility functions

/// Interprets a text flag or query value as a boolean.
/// Empty strings and the usual negative words are false, anything else is true.
pub fn is_truthy_text(text: &str) -> bool {
    let t = text.trim();
    !t.is_empty()
        && !["false", "no", "0", "off"]
            .iter()
            .any(|neg| t.eq_ignore_ascii_case(neg))
}

/// Formats a price with two decimals and the currency suffix.
pub fn format_price(price: f64, currency: &str) -> String {
    format!("{:.2} {}", price, currency)
}
