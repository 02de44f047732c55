//! GBK byte-range heuristic

const ASCII_MAX: u8 = 0x7F;
const LEAD_MIN: u8 = 0x81;
const LEAD_MAX: u8 = 0xFE;
const TRAIL_MIN: u8 = 0x40;
const TRAIL_MAX: u8 = 0xFE;
const TRAIL_EXCLUDED: u8 = 0xF7;

/// Check whether `bytes` is consistent with GBK double-byte structure.
///
/// A `true` result means "not inconsistent with GBK", not "confirmed GBK":
/// pure ASCII (and empty input) passes. A lead byte in `0x81..=0xFE` must be
/// followed by a trail byte in `0x40..=0xFE` other than `0xF7`.
pub fn is_likely_gbk(bytes: &[u8]) -> bool {
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b <= ASCII_MAX {
            i += 1;
            continue;
        }

        if !(LEAD_MIN..=LEAD_MAX).contains(&b) {
            return false;
        }
        match bytes.get(i + 1) {
            Some(&trail) if is_trail(trail) => i += 2,
            _ => return false,
        }
    }
    true
}

fn is_trail(b: u8) -> bool {
    (TRAIL_MIN..=TRAIL_MAX).contains(&b) && b != TRAIL_EXCLUDED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_gbk_character() {
        // "你"
        assert!(is_likely_gbk(&[0xC4, 0xE3]));
    }

    #[test]
    fn test_gbk_sentence_with_ascii() {
        let (bytes, _, had_errors) = encoding_rs::GBK.encode("GBK 编码: 你好，世界!");
        assert!(!had_errors);
        assert!(is_likely_gbk(&bytes));
    }

    #[test]
    fn test_ascii_and_empty() {
        assert!(is_likely_gbk(b"hello, world"));
        assert!(is_likely_gbk(b""));
    }

    #[test]
    fn test_lead_byte_at_end_fails() {
        assert!(!is_likely_gbk(&[b'a', 0xC4]));
    }

    #[test]
    fn test_excluded_trail_byte_fails() {
        assert!(!is_likely_gbk(&[0xC4, 0xF7]));
    }

    #[test]
    fn test_trail_out_of_range_fails() {
        assert!(!is_likely_gbk(&[0xC4, 0x3F]));
        assert!(!is_likely_gbk(&[0xC4, 0xFF]));
    }

    #[test]
    fn test_non_lead_high_bytes_fail() {
        assert!(!is_likely_gbk(&[0x80, 0x41]));
        assert!(!is_likely_gbk(&[0xFF, 0x41]));
    }

    #[test]
    fn test_latin1_word_fails() {
        // "café" in ISO-8859-1: the final 0xE9 has no trail byte
        assert!(!is_likely_gbk(&[b'c', b'a', b'f', 0xE9]));
    }
}
