//! # emx-charset
//!
//! Charset detection and transcoding to UTF-8 for byte buffers of unknown
//! origin: file contents, archive entries, HTTP bodies.
//!
//! ## Detection
//!
//! [`Detector::detect`] combines a statistical guesser with two cheap
//! heuristics tuned for Chinese text:
//!
//! 1. Guesser label, unless it is the low-confidence placeholder
//!    (`WINDOWS-1252`) → that label **[PRIMARY]**
//! 2. Bytes fit GBK lead/trail ranges → `GBK`
//! 3. Bytes read as text contain Han ideographs → `GBK`
//! 4. Otherwise → undetectable
//!
//! A single-byte Western guess is what the guesser falls back to when it
//! cannot tell GBK from Latin text, so the heuristics are allowed to
//! override it. A confident guess is never overridden.
//!
//! ## Transcoding
//!
//! [`Transcoder::to_utf8`] resolves the detected label through a
//! [`DecoderRegistry`] and decodes the whole buffer. Failures are soft: the
//! result always carries text plus a flag, and on failure the text is the
//! untouched input.
//!
//! ```rust
//! use emx_charset::{to_utf8, detect_charset};
//!
//! // "你" in GBK
//! let detection = detect_charset(&[0xC4, 0xE3]);
//! assert_eq!(detection.label, "GBK");
//! assert!(detection.reliable);
//!
//! let result = to_utf8("already utf-8".as_bytes());
//! assert!(result.ok());
//! assert_eq!(result.text, "already utf-8");
//! ```
//!
//! ## Registry
//!
//! The [`Charset`] enum is the closed set of natively decoded encodings. Any
//! other label (`GB2312`, `LATIN1`, ...) resolves only if it was registered
//! on the [`DecoderRegistry`] before use.

pub mod charset;
pub mod detector;
pub mod gbk;
pub mod guesser;
pub mod han;
pub mod registry;
pub mod transcode;
pub mod utf8;

pub use charset::{Charset, CharsetLabel};
pub use detector::{
    detect_charset, Detection, DetectionSource, Detector, DetectorConfig, DEFAULT_MAX_GUESS_BYTES,
};
pub use gbk::is_likely_gbk;
pub use guesser::{ChardetGuesser, GuessError, StatisticalGuesser};
pub use han::{contains_han_script, is_han};
pub use registry::{DecodeError, Decoder, DecoderRegistry, RegistryError};
pub use transcode::{to_utf8, TranscodeError, Transcoded, Transcoder, TranscoderConfig};
pub use utf8::{is_valid_utf8, is_valid_utf8_prefix};
