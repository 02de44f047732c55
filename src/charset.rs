//! Charset labels and the closed set of natively supported encodings

use encoding_rs::Encoding;
use std::fmt;

/// A normalized charset identifier, e.g. `UTF-8` or `GBK`.
///
/// Labels are trimmed and ASCII-uppercased on construction, so two labels
/// compare equal whenever they name the same charset spelling. The empty
/// label stands for "no label".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CharsetLabel(String);

impl CharsetLabel {
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(label.as_ref().trim().to_ascii_uppercase())
    }

    /// The empty label
    pub fn none() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_utf8(&self) -> bool {
        self.0 == Charset::Utf8.label()
    }
}

impl fmt::Display for CharsetLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CharsetLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<Charset> for CharsetLabel {
    fn from(charset: Charset) -> Self {
        Self(charset.label().to_string())
    }
}

impl From<&'static Encoding> for CharsetLabel {
    fn from(encoding: &'static Encoding) -> Self {
        Self::new(encoding.name())
    }
}

impl PartialEq<str> for CharsetLabel {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CharsetLabel {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl AsRef<str> for CharsetLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Encodings the crate decodes without any registry alias.
///
/// Covers every encoding the default statistical guesser can report, plus
/// GB18030 and the two UTF-16 byte orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Charset {
    Utf8,
    Gbk,
    Gb18030,
    Big5,
    ShiftJis,
    EucJp,
    EucKr,
    Iso2022Jp,
    Utf16Le,
    Utf16Be,
    Windows874,
    Windows1250,
    Windows1251,
    Windows1252,
    Windows1253,
    Windows1254,
    Windows1255,
    Windows1256,
    Windows1257,
    Windows1258,
    Iso8859_2,
    Iso8859_4,
    Iso8859_5,
    Iso8859_6,
    Iso8859_7,
    Iso8859_8,
    Koi8R,
    Koi8U,
    Ibm866,
}

impl Charset {
    pub const ALL: [Charset; 29] = [
        Charset::Utf8,
        Charset::Gbk,
        Charset::Gb18030,
        Charset::Big5,
        Charset::ShiftJis,
        Charset::EucJp,
        Charset::EucKr,
        Charset::Iso2022Jp,
        Charset::Utf16Le,
        Charset::Utf16Be,
        Charset::Windows874,
        Charset::Windows1250,
        Charset::Windows1251,
        Charset::Windows1252,
        Charset::Windows1253,
        Charset::Windows1254,
        Charset::Windows1255,
        Charset::Windows1256,
        Charset::Windows1257,
        Charset::Windows1258,
        Charset::Iso8859_2,
        Charset::Iso8859_4,
        Charset::Iso8859_5,
        Charset::Iso8859_6,
        Charset::Iso8859_7,
        Charset::Iso8859_8,
        Charset::Koi8R,
        Charset::Koi8U,
        Charset::Ibm866,
    ];

    /// Canonical uppercase label
    pub fn label(self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Gbk => "GBK",
            Charset::Gb18030 => "GB18030",
            Charset::Big5 => "BIG5",
            Charset::ShiftJis => "SHIFT_JIS",
            Charset::EucJp => "EUC-JP",
            Charset::EucKr => "EUC-KR",
            Charset::Iso2022Jp => "ISO-2022-JP",
            Charset::Utf16Le => "UTF-16LE",
            Charset::Utf16Be => "UTF-16BE",
            Charset::Windows874 => "WINDOWS-874",
            Charset::Windows1250 => "WINDOWS-1250",
            Charset::Windows1251 => "WINDOWS-1251",
            Charset::Windows1252 => "WINDOWS-1252",
            Charset::Windows1253 => "WINDOWS-1253",
            Charset::Windows1254 => "WINDOWS-1254",
            Charset::Windows1255 => "WINDOWS-1255",
            Charset::Windows1256 => "WINDOWS-1256",
            Charset::Windows1257 => "WINDOWS-1257",
            Charset::Windows1258 => "WINDOWS-1258",
            Charset::Iso8859_2 => "ISO-8859-2",
            Charset::Iso8859_4 => "ISO-8859-4",
            Charset::Iso8859_5 => "ISO-8859-5",
            Charset::Iso8859_6 => "ISO-8859-6",
            Charset::Iso8859_7 => "ISO-8859-7",
            Charset::Iso8859_8 => "ISO-8859-8",
            Charset::Koi8R => "KOI8-R",
            Charset::Koi8U => "KOI8-U",
            Charset::Ibm866 => "IBM866",
        }
    }

    pub fn encoding(self) -> &'static Encoding {
        match self {
            Charset::Utf8 => encoding_rs::UTF_8,
            Charset::Gbk => encoding_rs::GBK,
            Charset::Gb18030 => encoding_rs::GB18030,
            Charset::Big5 => encoding_rs::BIG5,
            Charset::ShiftJis => encoding_rs::SHIFT_JIS,
            Charset::EucJp => encoding_rs::EUC_JP,
            Charset::EucKr => encoding_rs::EUC_KR,
            Charset::Iso2022Jp => encoding_rs::ISO_2022_JP,
            Charset::Utf16Le => encoding_rs::UTF_16LE,
            Charset::Utf16Be => encoding_rs::UTF_16BE,
            Charset::Windows874 => encoding_rs::WINDOWS_874,
            Charset::Windows1250 => encoding_rs::WINDOWS_1250,
            Charset::Windows1251 => encoding_rs::WINDOWS_1251,
            Charset::Windows1252 => encoding_rs::WINDOWS_1252,
            Charset::Windows1253 => encoding_rs::WINDOWS_1253,
            Charset::Windows1254 => encoding_rs::WINDOWS_1254,
            Charset::Windows1255 => encoding_rs::WINDOWS_1255,
            Charset::Windows1256 => encoding_rs::WINDOWS_1256,
            Charset::Windows1257 => encoding_rs::WINDOWS_1257,
            Charset::Windows1258 => encoding_rs::WINDOWS_1258,
            Charset::Iso8859_2 => encoding_rs::ISO_8859_2,
            Charset::Iso8859_4 => encoding_rs::ISO_8859_4,
            Charset::Iso8859_5 => encoding_rs::ISO_8859_5,
            Charset::Iso8859_6 => encoding_rs::ISO_8859_6,
            Charset::Iso8859_7 => encoding_rs::ISO_8859_7,
            Charset::Iso8859_8 => encoding_rs::ISO_8859_8,
            Charset::Koi8R => encoding_rs::KOI8_R,
            Charset::Koi8U => encoding_rs::KOI8_U,
            Charset::Ibm866 => encoding_rs::IBM866,
        }
    }

    /// Resolve a canonical label (any case) to a member of the closed set
    pub fn from_label(label: &CharsetLabel) -> Option<Charset> {
        Self::ALL.into_iter().find(|c| label == c.label())
    }

    /// Map an `encoding_rs` encoding back into the closed set
    pub fn from_encoding(encoding: &'static Encoding) -> Option<Charset> {
        Self::ALL.into_iter().find(|c| c.encoding() == encoding)
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
