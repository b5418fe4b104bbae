use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::aggregate::BidderRecord;

/// A spreadsheet discovered in the auctions folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionSheet {
    pub sheet_id: String,
    pub name: String,
    pub auction_number: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuctionListResponse {
    pub count: usize,
    pub auctions: Vec<AuctionSheet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidderLookupResponse {
    pub record: BidderRecord,
}

/// POST /api/auctions/update
///
/// `updates` keys are column names ("Refund", "Payment Status", ...);
/// they go through the same alias matching as sheet headers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidderUpdateRequest {
    pub auction: String,
    #[serde(alias = "bidderNumber", alias = "bidcard")]
    pub bidder: String,
    #[serde(default)]
    pub updates: BTreeMap<String, String>,
}

/// A single cell that was written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellWrite {
    pub field: String,
    pub range: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidderUpdateResponse {
    pub updated: Vec<CellWrite>,
}
