use crate::model::Offer;
use std::collections::HashMap;

/// All offers of one vendor, cheapest first.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorGroup {
    pub vendor: String,
    pub offers: Vec<Offer>,
}

impl VendorGroup {
    /// The vendor's best price offer.
    pub fn best(&self) -> Option<&Offer> {
        self.offers.first()
    }

    pub fn best_price(&self) -> f64 {
        self.best().map(|o| o.price).unwrap_or(0.0)
    }
}

/// Vendor groups in order of each vendor's first appearance in the input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VendorGroups {
    groups: Vec<VendorGroup>,
}

impl VendorGroups {
    pub fn get(&self, vendor: &str) -> Option<&VendorGroup> {
        self.groups.iter().find(|g| g.vendor == vendor)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VendorGroup> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Groups offers by vendor. Each group is sorted ascending by price;
/// equal prices keep their input order.
pub fn group_by_vendor(offers: &[Offer]) -> VendorGroups {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<VendorGroup> = Vec::new();

    for offer in offers {
        let slot = *index.entry(offer.vendor.as_str()).or_insert_with(|| {
            groups.push(VendorGroup {
                vendor: offer.vendor.clone(),
                offers: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].offers.push(offer.clone());
    }

    for group in &mut groups {
        // sort_by is stable
        group.offers.sort_by(|a, b| a.price.total_cmp(&b.price));
    }

    VendorGroups { groups }
}
