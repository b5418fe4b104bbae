use serde::{Deserialize, Serialize};

/// Logical columns of an auction sheet.
///
/// Real headers are typed by hand and drift between auctions ("Shipped status",
/// "Shipping status", "Shipped"), so every field carries an ordered alias list.
/// Aliases are tried exact-first, then by substring, in the order given here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SheetField {
    BidderNumber,
    FirstName,
    LastName,
    Phone,
    LotsBought,
    Balance,
    PaymentStatus,
    ShippingRequired,
    PickupStatus,
    ShippedStatus,
    Refund,
    Notes,
}

impl SheetField {
    /// Header text staff see in the canonical sheet template
    pub fn display_name(&self) -> &'static str {
        match self {
            SheetField::BidderNumber => "Bidder Number",
            SheetField::FirstName => "Buyer First Name",
            SheetField::LastName => "Buyer Last Name",
            SheetField::Phone => "Buyer Phone",
            SheetField::LotsBought => "Lots Bought",
            SheetField::Balance => "Balance",
            SheetField::PaymentStatus => "Payment Status",
            SheetField::ShippingRequired => "Shipping Required",
            SheetField::PickupStatus => "Pickup status",
            SheetField::ShippedStatus => "Shipped status",
            SheetField::Refund => "Refund",
            SheetField::Notes => "Notes",
        }
    }

    /// Accepted header spellings, highest priority first
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            SheetField::BidderNumber => &[
                "bidder number",
                "bidcard",
                "bid card",
                "bidcard #",
                "bid card #",
                "bidcard number",
                "bidder",
            ],
            SheetField::FirstName => &["buyer first name", "first name", "firstname"],
            SheetField::LastName => &["buyer last name", "last name", "lastname"],
            SheetField::Phone => &["buyer phone", "phone", "phone number"],
            SheetField::LotsBought => &[
                "lots bought",
                "lots won",
                "lot count",
                "lots won count",
                "lots",
            ],
            SheetField::Balance => &["balance", "balance due", "amount due"],
            SheetField::PaymentStatus => &["payment status", "paid", "payment"],
            SheetField::ShippingRequired => &[
                "shipping required",
                "ship required",
                "shipping",
            ],
            SheetField::PickupStatus => &["pickup status", "picked up", "pickup"],
            SheetField::ShippedStatus => &[
                "shipped status",
                "shipping status",
                "shipment status",
                "ship status",
                "shipped",
            ],
            SheetField::Refund => &["refund", "refunded"],
            SheetField::Notes => &["notes", "note", "comments"],
        }
    }

    pub fn all() -> Vec<SheetField> {
        vec![
            SheetField::BidderNumber,
            SheetField::FirstName,
            SheetField::LastName,
            SheetField::Phone,
            SheetField::LotsBought,
            SheetField::Balance,
            SheetField::PaymentStatus,
            SheetField::ShippingRequired,
            SheetField::PickupStatus,
            SheetField::ShippedStatus,
            SheetField::Refund,
            SheetField::Notes,
        ]
    }

    /// Columns the outstanding-shipment rule cannot run without
    pub fn shipment_required() -> [SheetField; 4] {
        [
            SheetField::BidderNumber,
            SheetField::PaymentStatus,
            SheetField::ShippingRequired,
            SheetField::ShippedStatus,
        ]
    }
}

impl std::fmt::Display for SheetField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
