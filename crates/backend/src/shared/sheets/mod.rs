//! Spreadsheet conventions shared by every route: header matching,
//! Y/blank predicates, A1 notation and auction naming.

pub mod a1;
pub mod auction_name;
pub mod columns;
pub mod header_resolver;
pub mod predicates;

pub use auction_name::{auction_matches, extract_auction_number, normalize_auction_name};
pub use columns::{field_for_label, resolve_update_column, ResolvedColumns};
pub use header_resolver::{
    find_header_row, find_header_row_or_first, normalize_header, resolve_column, HeaderIndex,
    DEFAULT_HEADER_SCAN_ROWS,
};
pub use predicates::{cell_at, flag_cell, is_blank, is_yes};
