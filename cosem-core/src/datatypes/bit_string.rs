//! Bit string type for DLMS/COSEM status and flag attributes

use crate::error::{CosemError, CosemResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Arbitrary string of bits. A bit string can have any length including zero.
///
/// Bits are stored MSB-first; the last byte is right-padded with zero bits
/// when the bit count is not a multiple of eight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitString {
    bytes: Vec<u8>,
    num_bits: usize,
}

impl BitString {
    /// Construct a bit string from raw bytes and an explicit bit count
    ///
    /// # Errors
    ///
    /// Returns an error if `num_bits` exceeds the capacity of `bytes`.
    pub fn new(bytes: Vec<u8>, num_bits: usize) -> CosemResult<Self> {
        if num_bits > bytes.len() * 8 {
            return Err(CosemError::InvalidData(format!(
                "bit string is too short to hold all bits. Need {} bytes for {} bits",
                num_bits.div_ceil(8),
                num_bits
            )));
        }
        Ok(Self { bytes, num_bits })
    }

    /// Parse a bit string from a textual bit pattern like `"10110010"`
    ///
    /// The pattern is right-padded with zero bits to a byte boundary.
    pub fn from_binary_str(pattern: &str) -> CosemResult<Self> {
        let mut bytes = vec![0u8; pattern.len().div_ceil(8)];
        for (i, c) in pattern.chars().enumerate() {
            match c {
                '1' => bytes[i / 8] |= 1 << (7 - (i % 8)),
                '0' => {}
                other => {
                    return Err(CosemError::InvalidFormat(format!(
                        "bit pattern may only contain '0' and '1', got {:?} in {:?}",
                        other, pattern
                    )));
                }
            }
        }
        Ok(Self {
            bytes,
            num_bits: pattern.len(),
        })
    }

    /// Build a bit string from a sequence of booleans
    pub fn from_bools(bits: &[bool]) -> Self {
        let mut bytes = vec![0u8; bits.len().div_ceil(8)];
        for (i, set) in bits.iter().enumerate() {
            if *set {
                bytes[i / 8] |= 1 << (7 - (i % 8));
            }
        }
        Self {
            bytes,
            num_bits: bits.len(),
        }
    }

    /// Get the bit string as a byte array
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The number of significant bits
    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    /// Get the bit at a position (0-based, MSB first)
    pub fn get_bit(&self, index: usize) -> CosemResult<bool> {
        if index >= self.num_bits {
            return Err(CosemError::InvalidData(format!(
                "bit index {} out of bounds (num_bits: {})",
                index, self.num_bits
            )));
        }
        Ok((self.bytes[index / 8] >> (7 - (index % 8))) & 1 == 1)
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.num_bits {
            let set = self.get_bit(i).unwrap_or(false);
            write!(f, "{}", if set { '1' } else { '0' })?;
        }
        Ok(())
    }
}
