//! The Y/blank conventions used by every status column.

use super::header_resolver::normalize_header;

/// Truthy status cell: "y", "yes", "true", "1", or an annotated "y - hibid" / "y-paypal".
///
/// "paid" and balance-based rules are deliberately not accepted.
pub fn is_yes(value: &str) -> bool {
    let v = normalize_header(value);
    matches!(v.as_str(), "y" | "yes" | "true" | "1") || v.starts_with("y ") || v.starts_with("y-")
}

/// Empty or whitespace-only cell
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Cell at `index`; missing columns and short rows read as ""
pub fn cell_at(row: &[String], index: Option<usize>) -> &str {
    index
        .and_then(|i| row.get(i))
        .map(String::as_str)
        .unwrap_or("")
}

/// "Y" for true, "" for false, as written back to the sheet
pub fn flag_cell(value: bool) -> &'static str {
    if value {
        "Y"
    } else {
        ""
    }
}
