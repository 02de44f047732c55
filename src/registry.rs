//! Charset label to decoder resolution

use crate::charset::{Charset, CharsetLabel};
use encoding_rs::Encoding;
use std::borrow::Cow;
use std::collections::HashMap;
use thiserror::Error;

/// Aliases installed by [`DecoderRegistry::default`]
const DEFAULT_ALIASES: &[(&str, Charset)] = &[
    ("GB2312", Charset::Gbk),
    ("CP936", Charset::Gbk),
    ("X-GBK", Charset::Gbk),
    ("ISO-8859-1", Charset::Windows1252),
    ("LATIN1", Charset::Windows1252),
    ("US-ASCII", Charset::Windows1252),
    ("ASCII", Charset::Windows1252),
    ("CP1252", Charset::Windows1252),
    ("SJIS", Charset::ShiftJis),
    ("CP932", Charset::ShiftJis),
    ("BIG5-HKSCS", Charset::Big5),
    ("UTF8", Charset::Utf8),
    ("UTF-16", Charset::Utf16Le),
];

/// Error registering a label
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown charset label: {0}")]
    UnknownLabel(String),
}

/// Error decoding a buffer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("byte stream is malformed for {label}")]
    Malformed { label: CharsetLabel },
}

/// A stateless byte-to-Unicode decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoder {
    encoding: &'static Encoding,
}

impl Decoder {
    pub fn new(encoding: &'static Encoding) -> Self {
        Self { encoding }
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    pub fn label(&self) -> CharsetLabel {
        CharsetLabel::from(self.encoding)
    }

    /// Decode the complete buffer; any malformed sequence fails the whole decode.
    ///
    /// BOMs are not sniffed: the bytes are decoded as exactly this encoding.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>, DecodeError> {
        self.encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .ok_or_else(|| DecodeError::Malformed { label: self.label() })
    }
}

impl From<Charset> for Decoder {
    fn from(charset: Charset) -> Self {
        Self::new(charset.encoding())
    }
}

/// Read-only mapping from charset labels to decoders.
///
/// Labels of the closed [`Charset`] set always resolve. Anything else must be
/// registered explicitly before the registry is shared.
#[derive(Debug, Clone)]
pub struct DecoderRegistry {
    aliases: HashMap<CharsetLabel, &'static Encoding>,
}

impl DecoderRegistry {
    /// Registry that resolves only the closed charset set
    pub fn new() -> Self {
        Self {
            aliases: HashMap::new(),
        }
    }

    /// Alias `label` to a member of the closed set
    pub fn register(&mut self, label: impl Into<CharsetLabel>, charset: Charset) -> &mut Self {
        self.aliases.insert(label.into(), charset.encoding());
        self
    }

    /// Resolve a WHATWG encoding label now and register it under its own name.
    ///
    /// Returns the label of the encoding it resolved to.
    pub fn register_label(&mut self, label: &str) -> Result<CharsetLabel, RegistryError> {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .filter(|&e| e != encoding_rs::REPLACEMENT)
            .ok_or_else(|| RegistryError::UnknownLabel(label.to_string()))?;
        self.aliases.insert(CharsetLabel::new(label), encoding);
        Ok(CharsetLabel::from(encoding))
    }

    pub fn lookup(&self, label: &CharsetLabel) -> Option<Decoder> {
        if let Some(charset) = Charset::from_label(label) {
            return Some(Decoder::from(charset));
        }
        self.aliases.get(label).copied().map(Decoder::new)
    }

    pub fn contains(&self, label: &CharsetLabel) -> bool {
        self.lookup(label).is_some()
    }

    /// Registered aliases, sorted by label
    pub fn aliases(&self) -> Vec<(&CharsetLabel, CharsetLabel)> {
        let mut aliases: Vec<_> = self
            .aliases
            .iter()
            .map(|(label, &encoding)| (label, CharsetLabel::from(encoding)))
            .collect();
        aliases.sort();
        aliases
    }
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        for &(label, charset) in DEFAULT_ALIASES {
            registry.register(label, charset);
        }
        registry
    }
}
