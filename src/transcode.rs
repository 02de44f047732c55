//! Transcoding detected input to UTF-8
//!
//! Every failure is soft: the caller always gets text back, plus a flag.
//! On failure the text is the original bytes viewed as UTF-8 (invalid
//! sequences replaced in the view only), so callers can fall back to
//! treating the input as binary, show it anyway, or retry with
//! [`Transcoder::decode_as`].

use crate::charset::CharsetLabel;
use crate::detector::{Detection, Detector};
use crate::guesser::{ChardetGuesser, StatisticalGuesser};
use crate::registry::DecoderRegistry;
use std::borrow::Cow;
use thiserror::Error;
use tracing::debug;

/// Why a transcode did not succeed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscodeError {
    #[error("charset could not be detected")]
    Undetectable,

    #[error("no decoder registered for {label}")]
    LookupFailure { label: CharsetLabel },

    #[error("input is not valid {label}")]
    DecodeFailure { label: CharsetLabel },
}

/// Configuration for transcoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscoderConfig {
    /// Un-escape HTML character references left in decoded text
    pub unescape_entities: bool,
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            unescape_entities: true,
        }
    }
}

/// Outcome of a transcode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcoded<'a> {
    /// Decoded text on success, the original input otherwise
    pub text: Cow<'a, str>,
    /// Charset the input was decoded from, empty if none was detected
    pub charset: CharsetLabel,
    pub error: Option<TranscodeError>,
}

impl<'a> Transcoded<'a> {
    fn success(text: Cow<'a, str>, charset: CharsetLabel) -> Self {
        Self {
            text,
            charset,
            error: None,
        }
    }

    fn failure(bytes: &'a [u8], charset: CharsetLabel, error: TranscodeError) -> Self {
        debug!(%error, "transcode failed, returning original input");
        Self {
            text: String::from_utf8_lossy(bytes),
            charset,
            error: Some(error),
        }
    }

    pub fn ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_string(self) -> String {
        self.text.into_owned()
    }

    /// The text and success flag as a pair
    pub fn into_parts(self) -> (String, bool) {
        let ok = self.ok();
        (self.text.into_owned(), ok)
    }
}

/// Detects the charset of a buffer and decodes it to UTF-8
#[derive(Debug, Clone)]
pub struct Transcoder<'r, G = ChardetGuesser> {
    detector: Detector<G>,
    registry: &'r DecoderRegistry,
    config: TranscoderConfig,
}

impl<'r> Transcoder<'r, ChardetGuesser> {
    pub fn new(registry: &'r DecoderRegistry) -> Self {
        Self::with_detector(Detector::new(), registry)
    }
}

impl<'r, G: StatisticalGuesser> Transcoder<'r, G> {
    pub fn with_detector(detector: Detector<G>, registry: &'r DecoderRegistry) -> Self {
        Self {
            detector,
            registry,
            config: TranscoderConfig::default(),
        }
    }

    pub fn with_config(mut self, config: TranscoderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn detect(&self, bytes: &[u8]) -> Detection {
        self.detector.detect(bytes)
    }

    /// Detect the charset of `bytes` and decode them to UTF-8
    pub fn to_utf8<'a>(&self, bytes: &'a [u8]) -> Transcoded<'a> {
        let detection = self.detector.detect(bytes);
        if !detection.reliable {
            return Transcoded::failure(bytes, detection.label, TranscodeError::Undetectable);
        }

        if detection.label.is_utf8() {
            // the byte-pattern validator lets overlong forms through
            return match std::str::from_utf8(bytes) {
                Ok(text) => Transcoded::success(Cow::Borrowed(text), detection.label),
                Err(_) => {
                    let label = detection.label.clone();
                    Transcoded::failure(bytes, detection.label, TranscodeError::DecodeFailure { label })
                }
            };
        }

        self.decode_as(bytes, &detection.label)
    }

    /// Decode `bytes` as `label`, skipping detection
    pub fn decode_as<'a>(&self, bytes: &'a [u8], label: &CharsetLabel) -> Transcoded<'a> {
        let Some(decoder) = self.registry.lookup(label) else {
            return Transcoded::failure(
                bytes,
                label.clone(),
                TranscodeError::LookupFailure { label: label.clone() },
            );
        };

        let text = match decoder.decode(bytes) {
            Ok(text) => text,
            Err(_) => {
                return Transcoded::failure(
                    bytes,
                    label.clone(),
                    TranscodeError::DecodeFailure { label: label.clone() },
                );
            }
        };

        debug!(%label, len = bytes.len(), "decoded input");
        let text = if self.config.unescape_entities {
            unescape_entities(text)
        } else {
            text
        };
        Transcoded::success(text, label.clone())
    }
}

/// Replace HTML named and numeric character references left in decoded text
fn unescape_entities(text: Cow<'_, str>) -> Cow<'_, str> {
    let unescaped = match html_escape::decode_html_entities(&text) {
        Cow::Borrowed(_) => None,
        Cow::Owned(unescaped) => Some(unescaped),
    };
    match unescaped {
        Some(unescaped) => Cow::Owned(unescaped),
        None => text,
    }
}

/// Detect and decode `bytes` with the default registry and detector
pub fn to_utf8(bytes: &[u8]) -> Transcoded<'_> {
    let registry = DecoderRegistry::default();
    Transcoder::new(&registry).to_utf8(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::tests::{FixedGuesser, SilentGuesser};

    fn gbk(text: &str) -> Vec<u8> {
        let (bytes, _, had_errors) = encoding_rs::GBK.encode(text);
        assert!(!had_errors);
        bytes.into_owned()
    }

    #[test]
    fn test_gbk_round_trip() {
        let registry = DecoderRegistry::default();
        let transcoder =
            Transcoder::with_detector(Detector::with_guesser(FixedGuesser("WINDOWS-1252")), &registry);

        let original = "编码转换：你好，世界！";
        let input = gbk(original);
        let result = transcoder.to_utf8(&input);
        assert!(result.ok());
        assert_eq!(result.charset, "GBK");
        assert_eq!(result.into_parts(), (original.to_string(), true));
    }

    #[test]
    fn test_gbk_round_trip_with_default_guesser() {
        let original = "中华人民共和国是一个位于东亚的国家，首都是北京。\
                        我们今天学习中文编码的检测和转换，这是一个简单的例子。";
        let bytes = gbk(original);
        let result = to_utf8(&bytes);
        assert!(result.ok());
        assert_eq!(result.text, original);
    }

    #[test]
    fn test_gbk_after_long_ascii_prefix() {
        let prefix = "a".repeat(70 * 1024);
        let original = format!("{prefix}中华人民共和国，你好世界。");
        let input = gbk(&original);

        let result = to_utf8(&input);
        assert!(result.ok(), "{:?}", result.error);
        assert_eq!(result.charset, "GBK");
        assert_eq!(result.text, original.as_str());
    }

    #[test]
    fn test_utf8_is_returned_unchanged() {
        let input = "naïve café, 日本語".as_bytes();
        let result = to_utf8(input);
        assert!(result.ok());
        assert_eq!(result.charset, "UTF-8");
        assert!(matches!(result.text, Cow::Borrowed(_)));
        assert_eq!(result.text.as_bytes(), input);
    }

    #[test]
    fn test_utf8_entities_are_left_alone() {
        let result = to_utf8(b"a &amp; b");
        assert_eq!(result.text, "a &amp; b");
    }

    #[test]
    fn test_entities_are_unescaped_after_decode() {
        let registry = DecoderRegistry::default();
        let transcoder = Transcoder::with_detector(Detector::with_guesser(SilentGuesser), &registry);

        let input = gbk("你好 &amp; &#19990;界");
        let result = transcoder.to_utf8(&input);
        assert!(result.ok());
        assert_eq!(result.text, "你好 & 世界");
    }

    #[test]
    fn test_entity_cleanup_can_be_disabled() {
        let registry = DecoderRegistry::default();
        let transcoder = Transcoder::with_detector(Detector::with_guesser(SilentGuesser), &registry)
            .with_config(TranscoderConfig {
                unescape_entities: false,
            });

        let input = gbk("你好 &amp; 世界");
        let result = transcoder.to_utf8(&input);
        assert_eq!(result.text, "你好 &amp; 世界");
    }

    #[test]
    fn test_unregistered_label_fails_with_original() {
        let registry = DecoderRegistry::default();
        let transcoder = Transcoder::with_detector(Detector::with_guesser(FixedGuesser("x-unknown")), &registry);

        let result = transcoder.to_utf8(b"some bytes");
        assert!(!result.ok());
        assert_eq!(result.text, "some bytes");
        assert_eq!(
            result.error,
            Some(TranscodeError::LookupFailure { label: CharsetLabel::new("X-UNKNOWN") })
        );
    }

    #[test]
    fn test_decode_failure_returns_original() {
        let registry = DecoderRegistry::default();
        let transcoder = Transcoder::with_detector(Detector::with_guesser(FixedGuesser("GBK")), &registry);

        let result = transcoder.to_utf8(&[b'a', 0xFF]);
        assert!(!result.ok());
        assert_eq!(result.text, "a\u{FFFD}");
        assert!(matches!(result.error, Some(TranscodeError::DecodeFailure { .. })));
    }

    #[test]
    fn test_overlong_utf8_fails_soft() {
        let registry = DecoderRegistry::default();
        let transcoder = Transcoder::with_detector(Detector::with_guesser(FixedGuesser("UTF-8")), &registry);

        let result = transcoder.to_utf8(&[b'x', 0xC0, 0x80]);
        assert!(!result.ok());
        assert_eq!(
            result.error,
            Some(TranscodeError::DecodeFailure { label: CharsetLabel::new("UTF-8") })
        );
    }

    #[test]
    fn test_undetectable_input() {
        let registry = DecoderRegistry::default();
        let transcoder = Transcoder::with_detector(Detector::with_guesser(SilentGuesser), &registry);

        let result = transcoder.to_utf8(&[b'c', b'a', b'f', 0xE9]);
        assert_eq!(result.error, Some(TranscodeError::Undetectable));
        assert!(result.charset.is_empty());
        assert_eq!(result.text, "caf\u{FFFD}");
    }

    #[test]
    fn test_empty_input() {
        let result = to_utf8(b"");
        assert_eq!(result.error, Some(TranscodeError::Undetectable));
        assert_eq!(result.into_parts(), (String::new(), false));
    }

    #[test]
    fn test_decode_as_forced_label() {
        let registry = DecoderRegistry::default();
        let transcoder = Transcoder::new(&registry);

        let result = transcoder.decode_as(&[b'c', b'a', b'f', 0xE9], &CharsetLabel::new("latin1"));
        assert!(result.ok());
        assert_eq!(result.text, "café");
        assert_eq!(result.charset, "LATIN1");
    }

    #[test]
    fn test_decode_as_unknown_label() {
        let registry = DecoderRegistry::new();
        let result = Transcoder::new(&registry).decode_as(b"abc", &CharsetLabel::new("latin1"));
        assert!(matches!(result.error, Some(TranscodeError::LookupFailure { .. })));
    }
}
