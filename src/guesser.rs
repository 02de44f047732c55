//! Statistical charset guessing

use crate::charset::{Charset, CharsetLabel};
use crate::utf8::{is_valid_utf8, is_valid_utf8_prefix};
use chardetng::EncodingDetector;
use thiserror::Error;
use tracing::trace;

/// Reasons a guesser declines to offer a label
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuessError {
    #[error("no input to guess from")]
    EmptyInput,

    #[error("guesser unavailable: {0}")]
    Unavailable(String),
}

/// A best-effort charset classifier.
///
/// `last` is `false` when `sample` is a prefix of a larger buffer, so a
/// multi-byte sequence may be cut at its end.
pub trait StatisticalGuesser {
    fn guess(&self, sample: &[u8], last: bool) -> Result<CharsetLabel, GuessError>;
}

impl<G: StatisticalGuesser + ?Sized> StatisticalGuesser for &G {
    fn guess(&self, sample: &[u8], last: bool) -> Result<CharsetLabel, GuessError> {
        (**self).guess(sample, last)
    }
}

impl<G: StatisticalGuesser + ?Sized> StatisticalGuesser for Box<G> {
    fn guess(&self, sample: &[u8], last: bool) -> Result<CharsetLabel, GuessError> {
        (**self).guess(sample, last)
    }
}

/// Guesser backed by `chardetng`.
///
/// Input that passes the UTF-8 validator is reported as `UTF-8` without
/// consulting chardetng, which would otherwise report pure ASCII as
/// `WINDOWS-1252`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChardetGuesser;

impl ChardetGuesser {
    pub fn new() -> Self {
        Self
    }
}

impl StatisticalGuesser for ChardetGuesser {
    fn guess(&self, sample: &[u8], last: bool) -> Result<CharsetLabel, GuessError> {
        if sample.is_empty() {
            return Err(GuessError::EmptyInput);
        }

        let utf8 = if last {
            is_valid_utf8(sample)
        } else {
            is_valid_utf8_prefix(sample)
        };
        if utf8 {
            return Ok(Charset::Utf8.into());
        }

        let mut detector = EncodingDetector::new();
        detector.feed(sample, last);
        let encoding = detector.guess(None, false);
        trace!(encoding = encoding.name(), len = sample.len(), "chardetng guess");
        Ok(CharsetLabel::from(encoding))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sample() {
        assert_eq!(ChardetGuesser.guess(b"", true), Err(GuessError::EmptyInput));
    }

    #[test]
    fn test_ascii_is_utf8() {
        assert_eq!(ChardetGuesser.guess(b"hello", true).unwrap(), "UTF-8");
    }

    #[test]
    fn test_multibyte_utf8() {
        let text = "Grüße aus Köln, 你好";
        assert_eq!(ChardetGuesser.guess(text.as_bytes(), true).unwrap(), "UTF-8");
    }

    #[test]
    fn test_truncated_sample_still_utf8() {
        let bytes = "aaa中".as_bytes();
        let sample = &bytes[..4];
        assert_eq!(ChardetGuesser.guess(sample, false).unwrap(), "UTF-8");
        assert_ne!(ChardetGuesser.guess(sample, true).unwrap(), "UTF-8");
    }

    #[test]
    fn test_gbk_paragraph() {
        let text = "中华人民共和国是一个位于东亚的国家，首都是北京。\
                    我们今天学习中文编码的检测和转换，这是一个简单的例子。";
        let (bytes, _, _) = encoding_rs::GBK.encode(text);
        assert_eq!(ChardetGuesser.guess(&bytes, true).unwrap(), "GBK");
    }

    #[test]
    fn test_guesser_through_reference() {
        let guesser: Box<dyn StatisticalGuesser> = Box::new(ChardetGuesser::new());
        assert_eq!((&guesser).guess(b"abc", true).unwrap(), "UTF-8");
    }
}
