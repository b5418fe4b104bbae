use serde::{Deserialize, Serialize};

/// A bidder row that is paid, wants shipping, and has not shipped yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentCandidate {
    pub auction_number: Option<u32>,
    pub auction_name: String,
    pub sheet_id: String,
    pub tab_name: String,
    pub row_number: u32,

    pub bidder_number: String,
    pub first_name: String,
    pub last_name: String,
    pub lots_bought: String,
    pub balance: String,

    pub payment_status: String,
    pub shipping_required: String,
    pub shipped_status: String,

    pub paid: bool,
    pub shipping_requested: bool,
    pub shipped: bool,
}

impl ShipmentCandidate {
    /// Leading integer of "Lots Bought"; "12 lots" counts as 12, junk as 0
    pub fn lots_count(&self) -> u32 {
        let digits: String = self
            .lots_bought
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().unwrap_or(0)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}
