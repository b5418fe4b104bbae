pub mod aggregate;
pub mod dto;

pub use aggregate::{BidderRecord, RecordCell, StatusFlags};
pub use dto::{
    AuctionListResponse, AuctionSheet, BidderLookupResponse, BidderUpdateRequest,
    BidderUpdateResponse, CellWrite,
};
