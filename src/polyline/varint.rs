// Polyline variable-length integer encoding.
//
// Base-32, little-endian: least-significant 5-bit group first.
// Each group is offset by 63 into the printable range [63, 126];
// bit 5 (0x20) is set on every group except the last.
// Signed values are zig-zag mapped first so the sign lands in bit 0.

use thiserror::Error;

/// Offset added to every 6-bit group to make it printable (`'?'`).
pub const CHAR_OFFSET: u8 = 63;

/// Highest character a group can produce (`'~'`).
pub const CHAR_MAX: u8 = CHAR_OFFSET + 63;

/// Set on all but the final group of a value.
pub const CONTINUATION_BIT: u64 = 0x20;

/// Payload bits carried by one group.
pub const PAYLOAD_MASK: u64 = 0x1F;

/// Maximum encoded length for a 64-bit value (ceil(64/5) = 13).
pub const MAX_VARINT_LEN: usize = 13;

// ---------------------------------------------------------------------------
// Zig-zag
// ---------------------------------------------------------------------------

/// Map a signed delta onto an unsigned value with the sign in bit 0.
///
/// `0 -> 0, -1 -> 1, 1 -> 2, -2 -> 3, ...`
#[inline]
pub fn zigzag(value: i64) -> u64 {
    let shifted = (value << 1) as u64;
    if value < 0 { !shifted } else { shifted }
}

/// Inverse of [`zigzag`].
#[inline]
pub fn unzigzag(value: u64) -> i64 {
    let half = (value >> 1) as i64;
    if value & 1 == 1 { !half } else { half }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Append the encoded form of an unsigned value to `out`.
/// Returns the number of characters written (1..=13).
#[inline]
pub fn encode_unsigned(mut value: u64, out: &mut String) -> usize {
    let mut written = 1;
    while value >= CONTINUATION_BIT {
        out.push(group_char(CONTINUATION_BIT | (value & PAYLOAD_MASK)));
        value >>= 5;
        written += 1;
    }
    out.push(group_char(value));
    written
}

/// Zig-zag `delta` and append its encoded form to `out`.
#[inline]
pub fn encode_signed(delta: i64, out: &mut String) -> usize {
    encode_unsigned(zigzag(delta), out)
}

#[inline]
fn group_char(group: u64) -> char {
    // group <= 0x3F, so the sum stays within CHAR_MAX
    char::from(group as u8 + CHAR_OFFSET)
}

/// Return the encoded length of an unsigned value.
#[inline]
pub fn encoded_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros();
    bits.max(1).div_ceil(5) as usize
}

/// Return the encoded length of a signed delta.
#[inline]
pub fn encoded_len_signed(delta: i64) -> usize {
    encoded_len(zigzag(delta))
}

// ---------------------------------------------------------------------------
// Strict decoding from byte slices
// ---------------------------------------------------------------------------

/// Decode one unsigned value from the front of `data`.
/// Returns `(value, bytes_consumed)` or an error.
///
/// Unlike the lenient coordinate decoder this rejects characters outside
/// `[63, 126]`, values wider than 64 bits and a trailing continuation group.
pub fn read_unsigned(data: &[u8]) -> Result<(u64, usize), VarIntError> {
    let mut val: u64 = 0;
    for (i, &byte) in data.iter().enumerate() {
        if !(CHAR_OFFSET..=CHAR_MAX).contains(&byte) {
            return Err(VarIntError::InvalidCharacter(byte));
        }
        let group = u64::from(byte - CHAR_OFFSET);
        let payload = group & PAYLOAD_MASK;
        let shift = 5 * i as u32;
        if shift >= 64 || (payload << shift) >> shift != payload {
            return Err(VarIntError::Overflow);
        }
        val |= payload << shift;
        if group & CONTINUATION_BIT == 0 {
            return Ok((val, i + 1));
        }
    }
    Err(VarIntError::Underflow)
}

/// Decode one zig-zagged signed value from the front of `data`.
pub fn read_signed(data: &[u8]) -> Result<(i64, usize), VarIntError> {
    let (val, len) = read_unsigned(data)?;
    Ok((unzigzag(val), len))
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VarIntError {
    /// Input ended while a continuation group was pending.
    #[error("varint underflow (truncated input)")]
    Underflow,
    /// Value does not fit in 64 bits.
    #[error("varint overflow")]
    Overflow,
    /// Byte outside the printable polyline alphabet.
    #[error("invalid polyline character {0:#04x}")]
    InvalidCharacter(u8),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
