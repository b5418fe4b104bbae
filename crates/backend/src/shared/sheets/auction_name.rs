use once_cell::sync::Lazy;
use regex::Regex;

use super::header_resolver::normalize_header;

static AUCTION_WITH_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^auction\s+([0-9]+)$").unwrap());

static FIRST_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());

/// "22" and "auction   22" become "Auction 22"; anything else is returned trimmed
pub fn normalize_auction_name(input: &str) -> String {
    let trimmed = input.trim();
    if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
        return format!("Auction {}", trimmed);
    }
    if let Some(caps) = AUCTION_WITH_NUMBER.captures(trimmed) {
        return format!("Auction {}", &caps[1]);
    }
    trimmed.to_string()
}

/// First run of digits in a file or tab name: "mad bids auction-23" -> 23
pub fn extract_auction_number(name: &str) -> Option<u32> {
    FIRST_NUMBER
        .find(name)
        .and_then(|m| m.as_str().parse().ok())
}

/// Whether a sheet/tab `name` refers to the requested auction.
///
/// Exact (normalized) name wins; otherwise the auction numbers must agree.
pub fn auction_matches(name: &str, requested: &str) -> bool {
    if normalize_header(name) == normalize_header(requested) {
        return true;
    }
    match (extract_auction_number(name), extract_auction_number(requested)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
