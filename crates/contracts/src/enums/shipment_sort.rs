use serde::{Deserialize, Serialize};

/// Sort order for the outstanding shipments list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipmentSort {
    AuctionAsc,
    AuctionDesc,
    LotsAsc,
    LotsDesc,
}

impl ShipmentSort {
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code.trim().to_ascii_uppercase().replace('-', "_");
        match normalized.as_str() {
            "AUCTION_ASC" | "AUCTION" => Some(ShipmentSort::AuctionAsc),
            "AUCTION_DESC" => Some(ShipmentSort::AuctionDesc),
            "LOTS_ASC" | "LOTS" => Some(ShipmentSort::LotsAsc),
            "LOTS_DESC" => Some(ShipmentSort::LotsDesc),
            _ => None,
        }
    }
}
