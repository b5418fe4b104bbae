//! Column lookup over hand-typed spreadsheet headers.
//!
//! Headers are compared after normalization (trim, lowercase, whitespace runs
//! collapsed). Candidates are tried exact-first in priority order, then by
//! substring containment in the same order. Leftmost column wins on ties.

/// Rows scanned when looking for the header row
pub const DEFAULT_HEADER_SCAN_ROWS: usize = 15;

/// A row is the header row when one of its cells starts with one of these
const HEADER_SIGNATURES: [&str; 3] = ["bidder number", "bidcard", "bid card"];

/// Trim, lowercase and collapse internal whitespace to single spaces
pub fn normalize_header(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Find the column for the first candidate that matches.
///
/// Returns `None` when no candidate matches; empty candidates never match.
pub fn resolve_column<H, C>(headers: &[H], candidates: &[C]) -> Option<usize>
where
    H: AsRef<str>,
    C: AsRef<str>,
{
    HeaderIndex::new(headers).resolve(candidates)
}

/// Headers normalized once, queried many times
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    normalized: Vec<String>,
}

impl HeaderIndex {
    pub fn new<H: AsRef<str>>(headers: &[H]) -> Self {
        Self {
            normalized: headers
                .iter()
                .map(|h| normalize_header(h.as_ref()))
                .collect(),
        }
    }

    pub fn resolve<C: AsRef<str>>(&self, candidates: &[C]) -> Option<usize> {
        let wanted: Vec<String> = candidates
            .iter()
            .map(|c| normalize_header(c.as_ref()))
            .filter(|c| !c.is_empty())
            .collect();

        wanted
            .iter()
            .find_map(|c| self.normalized.iter().position(|h| h == c))
            .or_else(|| {
                wanted
                    .iter()
                    .find_map(|c| self.normalized.iter().position(|h| h.contains(c.as_str())))
            })
    }
}

/// First row within `window` rows that looks like a header row.
///
/// Sheets often start with a title or notes; those rows are skipped.
pub fn find_header_row(rows: &[Vec<String>], window: usize) -> Option<usize> {
    rows.iter().take(window).position(|row| {
        row.iter().any(|cell| {
            let cell = normalize_header(cell);
            HEADER_SIGNATURES
                .iter()
                .any(|signature| cell.starts_with(signature))
        })
    })
}

/// Same as [`find_header_row`], falling back to row 0.
///
/// The fallback header set may be meaningless; only diagnostics use this.
pub fn find_header_row_or_first(rows: &[Vec<String>], window: usize) -> usize {
    find_header_row(rows, window).unwrap_or(0)
}
