use serde::{Deserialize, Serialize};

/// One header/value pair exactly as it appears in the sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordCell {
    pub header: String,
    pub value: String,
}

/// Y/blank columns evaluated once on the server
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusFlags {
    pub paid: bool,
    pub shipping_required: bool,
    pub shipped: bool,
    pub picked_up: bool,
}

/// A bidder's row from one auction sheet.
///
/// Well-known columns are `None` when the sheet has no matching header.
/// `cells` keeps every non-empty header so staff can still see columns
/// nobody mapped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidderRecord {
    pub sheet_id: String,
    pub tab_name: String,
    pub row_number: u32,
    pub auction_name: String,
    pub auction_number: Option<u32>,

    pub bidder_number: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub lots_bought: Option<String>,
    pub balance: Option<String>,
    pub payment_status: Option<String>,
    pub shipping_required: Option<String>,
    pub pickup_status: Option<String>,
    pub shipped_status: Option<String>,
    pub refund: Option<String>,
    pub notes: Option<String>,

    pub flags: StatusFlags,
    pub cells: Vec<RecordCell>,
}

impl BidderRecord {
    /// "First Last", skipping missing parts
    pub fn display_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
