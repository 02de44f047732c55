//! Charset detection with heuristic fallbacks
//!
//! Decision order, first match wins:
//! 1. The statistical guesser returns a label other than the low-confidence
//!    placeholder → that label.
//! 2. The bytes are consistent with GBK double-byte structure → `GBK`.
//! 3. The bytes, read as text, contain Han ideographs → `GBK`.
//! 4. Otherwise the input is undetectable.
//!
//! The heuristics override an untrustworthy guess but never a confident one.

use crate::charset::{Charset, CharsetLabel};
use crate::gbk::is_likely_gbk;
use crate::guesser::{ChardetGuesser, StatisticalGuesser};
use crate::han::contains_han_script;
use crate::utf8::is_valid_utf8;
use std::fmt;
use tracing::debug;

/// Default number of leading bytes handed to the guesser
pub const DEFAULT_MAX_GUESS_BYTES: usize = 64 * 1024;

/// Configuration for charset detection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorConfig {
    /// Upper bound on the bytes passed to the statistical guesser
    pub max_guess_bytes: usize,
    /// Label the guesser emits when it cannot tell CJK double-byte text from
    /// single-byte Western text
    pub placeholder: CharsetLabel,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_guess_bytes: DEFAULT_MAX_GUESS_BYTES,
            placeholder: Charset::Windows1252.into(),
        }
    }
}

impl DetectorConfig {
    pub fn with_max_guess_bytes(mut self, max: usize) -> Self {
        self.max_guess_bytes = max.max(1);
        self
    }

    pub fn with_placeholder(mut self, label: impl Into<CharsetLabel>) -> Self {
        self.placeholder = label.into();
        self
    }
}

/// Which stage produced a detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionSource {
    Guesser,
    GbkHeuristic,
    HanScript,
    Undetectable,
}

impl fmt::Display for DetectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DetectionSource::Guesser => "guesser",
            DetectionSource::GbkHeuristic => "gbk-heuristic",
            DetectionSource::HanScript => "han-script",
            DetectionSource::Undetectable => "undetectable",
        };
        f.write_str(name)
    }
}

/// Result of charset detection.
///
/// An unreliable detection carries an empty label and must not be used for
/// transcoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub label: CharsetLabel,
    pub reliable: bool,
    pub source: DetectionSource,
}

impl Detection {
    fn reliable(label: impl Into<CharsetLabel>, source: DetectionSource) -> Self {
        Self {
            label: label.into(),
            reliable: true,
            source,
        }
    }

    pub fn undetectable() -> Self {
        Self {
            label: CharsetLabel::none(),
            reliable: false,
            source: DetectionSource::Undetectable,
        }
    }

    /// The label and reliability flag as a pair
    pub fn into_parts(self) -> (CharsetLabel, bool) {
        (self.label, self.reliable)
    }
}

/// Combines a statistical guesser with the GBK and Han-script heuristics
#[derive(Debug, Clone, Default)]
pub struct Detector<G = ChardetGuesser> {
    guesser: G,
    config: DetectorConfig,
}

impl Detector<ChardetGuesser> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<G: StatisticalGuesser> Detector<G> {
    pub fn with_guesser(guesser: G) -> Self {
        Self {
            guesser,
            config: DetectorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DetectorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Detect the charset of a complete buffer
    pub fn detect(&self, bytes: &[u8]) -> Detection {
        if bytes.is_empty() {
            debug!("empty input, nothing to detect");
            return Detection::undetectable();
        }

        let cap = self.config.max_guess_bytes.max(1);
        let sample = &bytes[..bytes.len().min(cap)];
        let last = sample.len() == bytes.len();

        match self.guesser.guess(sample, last) {
            Ok(label) if label.is_utf8() && !last && !is_valid_utf8(bytes) => {
                debug!(
                    sample_len = sample.len(),
                    "UTF-8 guess contradicted past the sample, checking heuristics"
                );
            }
            Ok(label) if !label.is_empty() && label != self.config.placeholder => {
                debug!(%label, sample_len = sample.len(), "accepted guesser label");
                return Detection::reliable(label, DetectionSource::Guesser);
            }
            Ok(label) => {
                debug!(%label, "low-confidence guess, checking heuristics");
            }
            Err(err) => {
                debug!(error = %err, "guesser gave no opinion, checking heuristics");
            }
        }

        if is_likely_gbk(bytes) {
            debug!("byte ranges consistent with GBK");
            return Detection::reliable(Charset::Gbk, DetectionSource::GbkHeuristic);
        }

        if contains_han_script(&String::from_utf8_lossy(bytes)) {
            debug!("Han script present, assuming GBK");
            return Detection::reliable(Charset::Gbk, DetectionSource::HanScript);
        }

        debug!(len = bytes.len(), "charset undetectable");
        Detection::undetectable()
    }
}

/// Detect the charset of `bytes` with the default detector
pub fn detect_charset(bytes: &[u8]) -> Detection {
    Detector::new().detect(bytes)
}
