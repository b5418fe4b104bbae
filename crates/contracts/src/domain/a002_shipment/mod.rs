pub mod aggregate;
pub mod dto;

pub use aggregate::ShipmentCandidate;
pub use dto::{
    DiagCounts, DiagIndexes, FlagInput, SheetScanInfo, ShipmentDiagnostics, ShipmentItem,
    ShipmentItemResponse, ShipmentItemUpdateRequest, ShipmentListResponse,
};
