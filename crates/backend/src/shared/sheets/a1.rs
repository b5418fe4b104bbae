//! A1 notation helpers (0-based column index <-> "A".."Z","AA"..).

/// 0 -> "A", 25 -> "Z", 26 -> "AA", 701 -> "ZZ"
pub fn index_to_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// Inverse of [`index_to_letter`]; case-insensitive, `None` for anything but letters
pub fn letter_to_index(letters: &str) -> Option<usize> {
    let letters = letters.trim();
    if letters.is_empty() {
        return None;
    }
    let mut n: usize = 0;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let value = (ch.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        n = n.checked_mul(26)?.checked_add(value)?;
    }
    Some(n - 1)
}

/// "C7" for column index 2, row 7 (row is 1-based)
pub fn cell_ref(column: usize, row_number: u32) -> String {
    format!("{}{}", index_to_letter(column), row_number)
}

/// Quote a tab title for A1 ranges: `'Auction 22'`, with `'` doubled
pub fn quote_tab(tab: &str) -> String {
    if !tab.is_empty() && tab.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        tab.to_string()
    } else {
        format!("'{}'", tab.replace('\'', "''"))
    }
}

/// `'Auction 22'!A:ZZ`
pub fn tab_range(tab: &str, range: &str) -> String {
    format!("{}!{}", quote_tab(tab), range)
}

/// Tab title from an A1 range, undoing [`quote_tab`]
pub fn tab_of_range(range: &str) -> String {
    let tab = match range.rfind('!') {
        Some(pos) => &range[..pos],
        None => range,
    };
    match tab.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')) {
        Some(inner) => inner.replace("''", "'"),
        None => tab.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_to_letter() {
        assert_eq!(index_to_letter(0), "A");
        assert_eq!(index_to_letter(25), "Z");
        assert_eq!(index_to_letter(26), "AA");
        assert_eq!(index_to_letter(27), "AB");
        assert_eq!(index_to_letter(51), "AZ");
        assert_eq!(index_to_letter(52), "BA");
        assert_eq!(index_to_letter(701), "ZZ");
        assert_eq!(index_to_letter(702), "AAA");
    }

    #[test]
    fn test_letter_round_trip_a_to_zz() {
        for i in 0..=701 {
            assert_eq!(letter_to_index(&index_to_letter(i)), Some(i));
        }
    }

    #[test]
    fn test_letter_to_index_rejects_garbage() {
        assert_eq!(letter_to_index(""), None);
        assert_eq!(letter_to_index("A1"), None);
        assert_eq!(letter_to_index("aa"), Some(26));
    }

    #[test]
    fn test_cell_ref_and_ranges() {
        assert_eq!(cell_ref(2, 7), "C7");
        assert_eq!(tab_range("Sheet1", "A:ZZ"), "Sheet1!A:ZZ");
        assert_eq!(tab_range("Auction 22", "B5"), "'Auction 22'!B5");
        assert_eq!(tab_range("Bob's", "A1"), "'Bob''s'!A1");
        assert_eq!(tab_of_range("'Auction 22'!A:ZZ"), "Auction 22");
        assert_eq!(tab_of_range("'Bob''s'!A1"), "Bob's");
        assert_eq!(tab_of_range("Sheet1!A1:Z1"), "Sheet1");
    }
}
