//! Fixed-width big-endian hex encoding of scalar payloads
//!
//! All output is uppercase and exactly `width * 2` characters. Values
//! that do not fit the requested width are rejected, never truncated.

use cosem_core::{CosemError, CosemResult};

/// Encode an unsigned integer as big-endian hex of exactly `width` bytes
///
/// # Errors
///
/// Returns a range error if `value` does not fit in `width` bytes.
pub fn unsigned_hex(value: u64, width: usize) -> CosemResult<String> {
    let max = unsigned_max(width)?;
    if value > max {
        return Err(CosemError::OutOfRange(format!(
            "value {value} does not fit in {width} byte(s), maximum is {max}"
        )));
    }
    Ok(format!("{value:0pad$X}", pad = width * 2))
}

/// Encode a signed integer as two's-complement big-endian hex of exactly
/// `width` bytes
///
/// # Errors
///
/// Returns a range error if `value` is outside the signed range of
/// `width` bytes.
pub fn signed_hex(value: i64, width: usize) -> CosemResult<String> {
    let bits = checked_bits(width)?;
    let min = if bits == 64 { i64::MIN } else { -(1i64 << (bits - 1)) };
    let max = if bits == 64 { i64::MAX } else { (1i64 << (bits - 1)) - 1 };
    if value < min || value > max {
        return Err(CosemError::OutOfRange(format!(
            "value {value} is out of range [{min}, {max}] for {width} byte(s)"
        )));
    }
    let mask = unsigned_max(width)?;
    Ok(format!("{:0pad$X}", (value as u64) & mask, pad = width * 2))
}

/// Encode an `f32` as its 4-byte IEEE 754 big-endian hex form
pub fn float32_hex(value: f32) -> String {
    hex::encode_upper(value.to_be_bytes())
}

/// Encode an `f64` as its 8-byte IEEE 754 big-endian hex form
pub fn float64_hex(value: f64) -> String {
    hex::encode_upper(value.to_be_bytes())
}

/// Largest unsigned value representable in `width` bytes
fn unsigned_max(width: usize) -> CosemResult<u64> {
    let bits = checked_bits(width)?;
    Ok(if bits == 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    })
}

fn checked_bits(width: usize) -> CosemResult<u32> {
    if width == 0 || width > 8 {
        return Err(CosemError::InvalidData(format!(
            "unsupported scalar width: {width} byte(s)"
        )));
    }
    Ok(width as u32 * 8)
}
