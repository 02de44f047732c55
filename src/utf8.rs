//! UTF-8 byte-pattern validation

/// Outcome of a left-to-right scan over a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    /// Every byte was consumed as part of a well-formed sequence
    Complete,
    /// Input ended inside a multi-byte sequence whose bytes so far were valid
    Truncated,
    /// A byte broke the lead/continuation pattern
    Invalid,
}

const CONTINUATION_MASK: u8 = 0xC0;
const CONTINUATION_BITS: u8 = 0x80;

/// Check whether `bytes` is well-formed UTF-8 by lead/continuation pattern.
///
/// This is a byte-pattern check: overlong forms and surrogate code points
/// are not rejected. Empty input is valid.
pub fn is_valid_utf8(bytes: &[u8]) -> bool {
    scan(bytes) == Scan::Complete
}

/// Like [`is_valid_utf8`], but also accepts a buffer cut off in the middle
/// of an otherwise well-formed multi-byte sequence.
///
/// Used on size-capped samples where the cut position is arbitrary.
pub fn is_valid_utf8_prefix(bytes: &[u8]) -> bool {
    scan(bytes) != Scan::Invalid
}

/// Number of continuation bytes a lead byte announces, or `None` if the byte
/// cannot start a multi-byte sequence
fn continuation_count(lead: u8) -> Option<usize> {
    match lead.leading_ones() {
        n @ 2..=4 => Some(n as usize - 1),
        _ => None,
    }
}

fn scan(bytes: &[u8]) -> Scan {
    let mut i = 0;
    while i < bytes.len() {
        let lead = bytes[i];
        if lead & 0x80 == 0 {
            i += 1;
            continue;
        }

        let Some(expected) = continuation_count(lead) else {
            return Scan::Invalid;
        };
        i += 1;

        for _ in 0..expected {
            match bytes.get(i) {
                Some(&b) if b & CONTINUATION_MASK == CONTINUATION_BITS => i += 1,
                Some(_) => return Scan::Invalid,
                None => return Scan::Truncated,
            }
        }
    }
    Scan::Complete
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_strings_are_valid() {
        let samples = [
            "hello",
            "héllo wörld",
            "你好，世界",
            "日本語のテキスト",
            "emoji 🦀 and 𠀀",
            "Ελληνικά, русский, עברית",
        ];
        for s in samples {
            assert!(is_valid_utf8(s.as_bytes()), "{s:?} should validate");
        }
    }

    #[test]
    fn test_empty_is_valid() {
        assert!(is_valid_utf8(b""));
        assert!(is_valid_utf8_prefix(b""));
    }

    #[test]
    fn test_truncated_sequence_is_invalid() {
        // 0xE4 announces two continuation bytes, only one follows
        let truncated = [0xE4, 0xB8];
        assert!(!is_valid_utf8(&truncated));
        assert!(is_valid_utf8_prefix(&truncated));
    }

    #[test]
    fn test_truncated_four_byte_sequence() {
        let crab = "🦀".as_bytes();
        for cut in 1..crab.len() {
            assert!(!is_valid_utf8(&crab[..cut]));
            assert!(is_valid_utf8_prefix(&crab[..cut]));
        }
    }

    #[test]
    fn test_lone_continuation_byte_is_invalid() {
        assert!(!is_valid_utf8(&[b'a', 0x80, b'b']));
        assert!(!is_valid_utf8_prefix(&[b'a', 0x80]));
    }

    #[test]
    fn test_bad_lead_bytes_are_invalid() {
        // five and more leading ones
        assert!(!is_valid_utf8(&[0xF8, 0x80, 0x80, 0x80, 0x80]));
        assert!(!is_valid_utf8(&[0xFE]));
        assert!(!is_valid_utf8(&[0xFF]));
    }

    #[test]
    fn test_continuation_mismatch_is_invalid() {
        // lead expects a continuation, gets ASCII
        assert!(!is_valid_utf8(&[0xC3, b'a']));
        assert!(!is_valid_utf8_prefix(&[0xC3, b'a']));
    }

    #[test]
    fn test_gbk_bytes_are_not_utf8() {
        // "你好" in GBK
        assert!(!is_valid_utf8(&[0xC4, 0xE3, 0xBA, 0xC3]));
    }

    #[test]
    fn test_pattern_check_accepts_overlong_form() {
        // 0xC0 0x80 is an overlong NUL; the byte pattern alone is well formed
        let overlong = vec![0xC0, 0x80];
        assert!(is_valid_utf8(&overlong));
        assert!(std::str::from_utf8(&overlong).is_err());
    }
}
