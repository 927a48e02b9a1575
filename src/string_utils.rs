//! UTF-8 safe index helpers.
//!
//! egui reports cursor positions as character indices, while string slicing
//! works on bytes. Portuguese text is full of multi-byte characters (`ç`,
//! `ã`, `é`), so every index that crosses that boundary goes through here.

// ─────────────────────────────────────────────────────────────────────────────
// Character Boundary Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Returns the largest index that is less than or equal to `index`
/// and is on a UTF-8 character boundary.
///
/// If `index` is greater than the string length, returns the string length.
#[inline]
pub fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }

    let bytes = s.as_bytes();
    let mut i = index;
    while i > 0 && !is_utf8_char_start(bytes[i]) {
        i -= 1;
    }
    i
}

/// Returns the smallest index that is greater than or equal to `index`
/// and is on a UTF-8 character boundary.
#[inline]
pub fn ceil_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }

    let bytes = s.as_bytes();
    let mut i = index;
    while i < bytes.len() && !is_utf8_char_start(bytes[i]) {
        i += 1;
    }
    i
}

/// A byte is a char start unless it is a continuation byte (10xxxxxx).
#[inline]
fn is_utf8_char_start(byte: u8) -> bool {
    (byte & 0b1100_0000) != 0b1000_0000
}

// ─────────────────────────────────────────────────────────────────────────────
// Index Conversion Utilities
// ─────────────────────────────────────────────────────────────────────────────

/// Convert a character index to a byte index.
///
/// Returns the string length if `char_index` is beyond the string.
pub fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Convert a byte index to a character index.
///
/// A byte index in the middle of a character counts up to (but not
/// including) that character.
pub fn byte_index_to_char_index(s: &str, byte_index: usize) -> usize {
    let byte_index = floor_char_boundary(s, byte_index);
    s[..byte_index].chars().count()
}

/// Convert an egui character selection into an ordered byte range.
pub fn char_range_to_byte_range(s: &str, range: (usize, usize)) -> (usize, usize) {
    let (a, b) = if range.0 <= range.1 {
        range
    } else {
        (range.1, range.0)
    };
    (char_index_to_byte_index(s, a), char_index_to_byte_index(s, b))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_ascii() {
        let s = "Metas";
        assert_eq!(floor_char_boundary(s, 0), 0);
        assert_eq!(floor_char_boundary(s, 2), 2);
        assert_eq!(floor_char_boundary(s, 10), 5);
    }

    #[test]
    fn test_floor_portuguese() {
        let s = "Ação"; // 'ç' and 'ã' are 2 bytes each
        assert_eq!(floor_char_boundary(s, 1), 1); // start of 'ç'
        assert_eq!(floor_char_boundary(s, 2), 1); // middle of 'ç'
        assert_eq!(floor_char_boundary(s, 3), 3); // start of 'ã'
        assert_eq!(floor_char_boundary(s, 4), 3);
    }

    #[test]
    fn test_ceil_portuguese() {
        let s = "Ação";
        assert_eq!(ceil_char_boundary(s, 0), 0);
        assert_eq!(ceil_char_boundary(s, 2), 3);
        assert_eq!(ceil_char_boundary(s, 4), 5);
        assert_eq!(ceil_char_boundary(s, 99), s.len());
    }

    #[test]
    fn test_ceil_emoji() {
        let s = "Oi🎉!"; // 🎉 is 4 bytes
        assert_eq!(ceil_char_boundary(s, 3), 6);
        assert_eq!(ceil_char_boundary(s, 6), 6);
    }

    #[test]
    fn test_index_conversion() {
        let s = "Revisão mensal";
        assert_eq!(char_index_to_byte_index(s, 6), 7); // 'o' after 'ã'
        assert_eq!(byte_index_to_char_index(s, 7), 6);
        assert_eq!(byte_index_to_char_index(s, 6), 5); // mid 'ã'
        assert_eq!(char_index_to_byte_index(s, 100), s.len());
    }

    #[test]
    fn test_char_range_orders_and_converts() {
        let s = "ção ok";
        assert_eq!(char_range_to_byte_range(s, (4, 1)), (2, 6));
        assert_eq!(char_range_to_byte_range(s, (0, 0)), (0, 0));
    }
}
