//! Validated bitstrings and the canonical byte packing.
//!
//! Every metric compresses the *packed* form of a bitstring, so the packing
//! must be identical everywhere or ratios stop being comparable:
//! 8 bits per byte, most significant bit first (left to right), and the
//! final byte zero-padded on the right.

use std::ops::Range;

/// Bits per packed byte.
pub const BITS_PER_BYTE: usize = 8;

/// First symbol that is not `'0'` or `'1'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSymbol {
    pub position: usize,
    pub symbol: char,
}

/// A sequence over {0, 1}, stored one bit per element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Bitstring {
    bits: Vec<u8>,
}

impl Bitstring {
    /// Parse a `'0'`/`'1'` string. Any other character is rejected, whitespace included.
    pub fn parse(s: &str) -> Result<Self, InvalidSymbol> {
        let mut bits = Vec::with_capacity(s.len());
        for (position, symbol) in s.chars().enumerate() {
            match symbol {
                '0' => bits.push(0),
                '1' => bits.push(1),
                _ => return Err(InvalidSymbol { position, symbol }),
            }
        }
        Ok(Self { bits })
    }

    /// Build from raw 0/1 values. Any non-zero value is taken as a 1.
    pub fn from_bits(bits: impl IntoIterator<Item = u8>) -> Self {
        Self {
            bits: bits.into_iter().map(|b| u8::from(b != 0)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bits
    }

    pub fn slice(&self, range: Range<usize>) -> &[u8] {
        &self.bits[range]
    }

    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b == 1).count()
    }

    /// Fraction of ones; 0.0 for an empty bitstring.
    pub fn density(&self) -> f64 {
        if self.bits.is_empty() {
            return 0.0;
        }
        self.count_ones() as f64 / self.bits.len() as f64
    }

    /// Canonical packing: MSB first, zero-padded tail.
    pub fn pack(&self) -> Vec<u8> {
        self.bits
            .chunks(BITS_PER_BYTE)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |byte, (i, &bit)| byte | (bit << (7 - i)))
            })
            .collect()
    }

    /// Number of bytes [`Self::pack`] produces.
    pub fn packed_len(&self) -> usize {
        self.bits.len().div_ceil(BITS_PER_BYTE)
    }
}

impl std::fmt::Display for Bitstring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &b in &self.bits {
            f.write_str(if b == 1 { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Bitstring {
    type Err = InvalidSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Vec<u8>> for Bitstring {
    fn from(bits: Vec<u8>) -> Self {
        Self::from_bits(bits)
    }
}
