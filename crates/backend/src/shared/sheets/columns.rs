use std::collections::HashMap;

use contracts::enums::SheetField;

use super::header_resolver::{normalize_header, HeaderIndex};
use super::predicates::cell_at;

/// Column index per logical field, resolved once per header row
#[derive(Debug, Clone, Default)]
pub struct ResolvedColumns {
    indexes: HashMap<SheetField, usize>,
}

impl ResolvedColumns {
    pub fn resolve<H: AsRef<str>>(headers: &[H]) -> Self {
        Self::from_index(&HeaderIndex::new(headers))
    }

    pub fn from_index(index: &HeaderIndex) -> Self {
        let indexes = SheetField::all()
            .into_iter()
            .filter_map(|field| index.resolve(field.aliases()).map(|i| (field, i)))
            .collect();
        Self { indexes }
    }

    pub fn get(&self, field: SheetField) -> Option<usize> {
        self.indexes.get(&field).copied()
    }

    /// `None` when the sheet has no such column; a short row reads as ""
    pub fn value<'a>(&self, row: &'a [String], field: SheetField) -> Option<&'a str> {
        self.get(field).map(|i| cell_at(row, Some(i)).trim())
    }

    /// Trimmed cell text, "" when the column is missing
    pub fn text(&self, row: &[String], field: SheetField) -> String {
        self.value(row, field).unwrap_or("").to_string()
    }

    pub fn missing(&self, required: &[SheetField]) -> Vec<SheetField> {
        required
            .iter()
            .copied()
            .filter(|f| self.get(*f).is_none())
            .collect()
    }
}

/// Map a user-facing column name ("Payment Status", "paid") to a known field
pub fn field_for_label(label: &str) -> Option<SheetField> {
    let wanted = normalize_header(label);
    if wanted.is_empty() {
        return None;
    }
    SheetField::all().into_iter().find(|field| {
        normalize_header(field.display_name()) == wanted
            || field.aliases().iter().any(|a| normalize_header(a) == wanted)
    })
}

/// Column to write for an update key.
///
/// Known fields go through their alias list; any other label must match a
/// header directly, so staff can still edit columns nobody mapped.
pub fn resolve_update_column(index: &HeaderIndex, label: &str) -> Option<usize> {
    match field_for_label(label) {
        Some(field) => index.resolve(field.aliases()),
        None => index.resolve(&[label]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADERS: [&str; 6] = [
        "Bidder Number",
        "Buyer First Name",
        "Payment Status",
        "Shipping Required",
        "Shipped status",
        "Buyer Email",
    ];

    #[test]
    fn test_resolve_standard_template() {
        let cols = ResolvedColumns::resolve(&HEADERS);
        assert_eq!(cols.get(SheetField::BidderNumber), Some(0));
        assert_eq!(cols.get(SheetField::FirstName), Some(1));
        assert_eq!(cols.get(SheetField::PaymentStatus), Some(2));
        assert_eq!(cols.get(SheetField::ShippingRequired), Some(3));
        assert_eq!(cols.get(SheetField::ShippedStatus), Some(4));
        assert_eq!(cols.get(SheetField::Refund), None);
        assert!(cols.missing(&SheetField::shipment_required()).is_empty());
    }

    #[test]
    fn test_resolve_variant_spellings() {
        let cols = ResolvedColumns::resolve(&["BidCard #", "Paid", "Ship Required", "Shipping status"]);
        assert_eq!(cols.get(SheetField::BidderNumber), Some(0));
        assert_eq!(cols.get(SheetField::PaymentStatus), Some(1));
        assert_eq!(cols.get(SheetField::ShippingRequired), Some(2));
        assert_eq!(cols.get(SheetField::ShippedStatus), Some(3));
    }

    #[test]
    fn test_value_distinguishes_missing_column_from_empty_cell() {
        let cols = ResolvedColumns::resolve(&HEADERS);
        let row = vec!["1001".to_string(), " Ada ".to_string()];
        assert_eq!(cols.value(&row, SheetField::FirstName), Some("Ada"));
        assert_eq!(cols.value(&row, SheetField::ShippedStatus), Some(""));
        assert_eq!(cols.value(&row, SheetField::Notes), None);
        assert_eq!(cols.text(&row, SheetField::Notes), "");
    }

    #[test]
    fn test_field_for_label() {
        assert_eq!(field_for_label("Payment Status"), Some(SheetField::PaymentStatus));
        assert_eq!(field_for_label(" paid "), Some(SheetField::PaymentStatus));
        assert_eq!(field_for_label("Shipped status"), Some(SheetField::ShippedStatus));
        assert_eq!(field_for_label("Buyer Email"), None);
        assert_eq!(field_for_label(""), None);
    }

    #[test]
    fn test_resolve_update_column() {
        let index = HeaderIndex::new(&HEADERS);
        assert_eq!(resolve_update_column(&index, "Paid"), Some(2));
        assert_eq!(resolve_update_column(&index, "buyer email"), Some(5));
        assert_eq!(resolve_update_column(&index, "Refund"), None);
    }
}
