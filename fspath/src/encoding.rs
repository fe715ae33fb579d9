//! Text encodings used by the file read and write helpers.
//!
//! The default encoding is resolved through an ambient [`LayeredState`]
//! whose condition argument is the canonical path of the file being read or
//! written, so a caller can, for example, force a BOM only under one
//! directory.

use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::ambient::{LayerGuard, LayeredState};
use crate::error::{Error, Result};

pub(crate) const BOM: &[u8] = b"\xEF\xBB\xBF";

static STATE: LazyLock<LayeredState<TextEncoding, str>> =
    LazyLock::new(|| LayeredState::new(TextEncoding::default()));

/// A UTF-8 flavor for reading and writing text.
///
/// All flavors skip a leading byte order mark when decoding.
///
/// # Examples
///
/// ```
/// use fspath::TextEncoding;
///
/// let bytes = TextEncoding::Utf8Bom.encode("hi");
/// assert_eq!(bytes, b"\xEF\xBB\xBFhi");
/// assert_eq!(TextEncoding::Utf8.decode("/f", &bytes).unwrap(), "hi");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TextEncoding {
    /// UTF-8 without a BOM; invalid input is an error.
    #[default]
    #[serde(rename = "utf-8")]
    Utf8,
    /// UTF-8 written with a BOM; invalid input is an error.
    #[serde(rename = "utf-8-bom")]
    Utf8Bom,
    /// UTF-8 without a BOM; invalid sequences decode to U+FFFD.
    #[serde(rename = "utf-8-lossy")]
    Utf8Lossy,
}

impl TextEncoding {
    /// Parses an encoding name as used in settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not recognized.
    pub fn parse(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "utf-8-bom" | "utf8-bom" => Ok(Self::Utf8Bom),
            "utf-8-lossy" | "utf8-lossy" => Ok(Self::Utf8Lossy),
            _ => Err(format!("invalid encoding: {s}")),
        }
    }

    /// The ambient encoding state.
    #[must_use]
    pub fn state() -> &'static LayeredState<TextEncoding, str> {
        &STATE
    }

    /// Resolve the encoding that applies to `path` right now.
    #[must_use]
    pub fn ambient_for(path: &str) -> Self {
        STATE.resolve_for(path)
    }

    /// Make `self` the ambient encoding until the guard drops.
    #[must_use = "the override ends as soon as the guard drops"]
    pub fn begin_default(self) -> LayerGuard {
        STATE.begin_with(self)
    }

    /// Decode file content read from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] for invalid UTF-8 unless the encoding is
    /// lossy.
    pub fn decode(self, path: &str, bytes: &[u8]) -> Result<String> {
        self.decode_bytes(path, bytes.strip_prefix(BOM).unwrap_or(bytes))
    }

    /// Decode bytes that carry no byte order mark.
    pub(crate) fn decode_bytes(self, path: &str, bytes: &[u8]) -> Result<String> {
        match self {
            Self::Utf8Lossy => Ok(String::from_utf8_lossy(bytes).into_owned()),
            Self::Utf8 | Self::Utf8Bom => {
                std::str::from_utf8(bytes)
                    .map(str::to_owned)
                    .map_err(|e| Error::Encoding {
                        path: path.to_string(),
                        reason: e.to_string(),
                    })
            }
        }
    }

    /// Bytes written at the start of a fresh file.
    pub(crate) fn preamble(self) -> &'static [u8] {
        match self {
            Self::Utf8Bom => BOM,
            Self::Utf8 | Self::Utf8Lossy => &[],
        }
    }

    /// Encode text for a fresh file, with a BOM where the flavor has one.
    #[must_use]
    pub fn encode(self, text: &str) -> Vec<u8> {
        let preamble = self.preamble();
        let mut bytes = Vec::with_capacity(preamble.len() + text.len());
        bytes.extend_from_slice(preamble);
        bytes.extend_from_slice(text.as_bytes());
        bytes
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utf8 => write!(f, "utf-8"),
            Self::Utf8Bom => write!(f, "utf-8-bom"),
            Self::Utf8Lossy => write!(f, "utf-8-lossy"),
        }
    }
}
