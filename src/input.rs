//! Input normalization.
//!
//! Any input (raw bytes, a hex string, or text) is folded into a byte buffer
//! whose length depends only on the generation config. Short inputs are
//! repeated across the buffer; long inputs are collapsed with XOR.
//!
//! This is NOT a hash function. Callers that need collision resistance or
//! avalanche behaviour should hash their data first and pass the digest in.

use std::ops::Deref;

use crate::error::{MosaicError, Result};
use crate::types::GenerationConfig;

/// A raw input value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Unsigned bytes, used as-is.
    Bytes(Vec<u8>),
    /// Hex digits with an optional `0x` prefix.
    Hex(String),
    /// Arbitrary text, encoded as UTF-8.
    Text(String),
}

impl Input {
    /// Classify a string: hex if it consists only of hex digits (with an
    /// optional `0x` prefix), text otherwise.
    pub fn detect(s: &str) -> Self {
        let digits = strip_hex_prefix(s);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            Input::Hex(s.to_string())
        } else {
            Input::Text(s.to_string())
        }
    }

    /// Decode the input into its raw bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let bytes = match self {
            Input::Bytes(bytes) => bytes.clone(),
            Input::Hex(hex) => parse_hex(hex)?,
            Input::Text(text) => text.as_bytes().to_vec(),
        };

        if bytes.is_empty() {
            return Err(MosaicError::Input {
                message: "input is empty".to_string(),
                help: Some("Provide at least one byte of input".to_string()),
            });
        }

        Ok(bytes)
    }
}

impl From<&str> for Input {
    fn from(s: &str) -> Self {
        Input::detect(s)
    }
}

impl From<Vec<u8>> for Input {
    fn from(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }
}

impl From<&[u8]> for Input {
    fn from(bytes: &[u8]) -> Self {
        Input::Bytes(bytes.to_vec())
    }
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Parse a hex string into bytes. A trailing odd digit is dropped.
pub fn parse_hex(s: &str) -> Result<Vec<u8>> {
    let digits = strip_hex_prefix(s);

    if digits.len() < 2 {
        return Err(MosaicError::Input {
            message: format!("hex input too short: {:?}", s),
            help: Some("Hex input needs at least two digits".to_string()),
        });
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(MosaicError::Input {
            message: format!("invalid hex input: {:?}", s),
            help: Some("Use only 0-9 and a-f, optionally prefixed with 0x".to_string()),
        });
    }

    let whole = digits.len() / 2 * 2;
    (0..whole)
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| MosaicError::Input {
                message: format!("invalid hex byte: {}", &digits[i..i + 2]),
                help: None,
            })
        })
        .collect()
}

/// The fixed-length byte buffer every later pipeline stage reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedBytes(Vec<u8>);

impl NormalizedBytes {
    /// Normalize an input for the given config.
    pub fn new(input: &Input, config: &GenerationConfig) -> Result<Self> {
        let source = input.to_bytes()?;
        Ok(Self::fold(&source, config.byte_len()))
    }

    /// Fold `source` into a buffer of `len` bytes.
    ///
    /// For every `i` below `max(source.len(), len)`, byte `i % len` of the
    /// output is XORed with byte `i % source.len()` of the input.
    pub fn fold(source: &[u8], len: usize) -> Self {
        let mut out = vec![0u8; len];
        if source.is_empty() || len == 0 {
            return Self(out);
        }

        for i in 0..source.len().max(len) {
            out[i % len] ^= source[i % source.len()];
        }

        Self(out)
    }

    /// The two bytes describing shape `index`.
    pub fn shape_bytes(&self, index: usize) -> [u8; 2] {
        [self.0[index * 2], self.0[index * 2 + 1]]
    }

    /// The bytes left over for palette generation, after `shape_count` shapes.
    pub fn palette_bytes(&self, shape_count: usize) -> &[u8] {
        &self.0[(shape_count * 2).min(self.0.len())..]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for NormalizedBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}
