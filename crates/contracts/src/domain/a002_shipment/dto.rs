use serde::{Deserialize, Serialize};

use super::aggregate::ShipmentCandidate;
use crate::domain::a001_bidder::AuctionSheet;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentListResponse {
    pub count: usize,
    pub shipments: Vec<ShipmentCandidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheets_found: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_info: Option<Vec<SheetScanInfo>>,
}

/// What the scanner saw in one spreadsheet (debug=1)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetScanInfo {
    pub file_name: String,
    pub spreadsheet_id: String,
    pub tabs_scanned: Vec<String>,
    pub matched_tab: Option<String>,
    pub matched_header_row: Option<usize>,
    pub headers: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentItem {
    #[serde(flatten)]
    pub shipment: ShipmentCandidate,
    pub invoice_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentItemResponse {
    pub item: ShipmentItem,
}

/// A status toggle from the client: `true`/`false` or `"Y"`/`""`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagInput {
    Bool(bool),
    Text(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentItemUpdateRequest {
    pub sheet_id: String,
    #[serde(alias = "row")]
    pub row_number: u32,
    #[serde(default)]
    pub tab_name: Option<String>,
    #[serde(default)]
    pub payment_status: Option<FlagInput>,
    #[serde(default)]
    pub shipping_required: Option<FlagInput>,
    #[serde(default)]
    pub shipped_status: Option<FlagInput>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagIndexes {
    pub bidder: Option<usize>,
    pub payment: Option<usize>,
    pub shipping_required: Option<usize>,
    pub shipped: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagCounts {
    pub has_bidder: usize,
    pub paid_yes: usize,
    pub ship_req_yes: usize,
    pub shipped_blank: usize,
    pub final_match: usize,
}

/// GET /api/shipments/diag
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentDiagnostics {
    pub folder_id: String,
    pub sheets_found: usize,
    pub first_sheet: Option<AuctionSheet>,
    pub tab_name: Option<String>,
    pub row_count: usize,
    pub header_row: Option<usize>,
    pub header_row_detected: bool,
    pub detected_headers: Vec<String>,
    pub indexes: DiagIndexes,
    pub sample_rows: Vec<Vec<String>>,
    pub counts: DiagCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
