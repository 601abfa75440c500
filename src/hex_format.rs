//! Upper-case hexadecimal rendering shared by both record formats.

use crate::error::SerializeError;

const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Renders a byte as two upper-case hex digits.
pub const fn byte_to_hex(value: u8) -> [u8; 2] {
    [DIGITS[(value >> 4) as usize], DIGITS[(value & 0x0F) as usize]]
}

/// Renders a 16-bit word as four upper-case hex digits, high byte first.
pub const fn word_to_hex(value: u16) -> [u8; 4] {
    let high = byte_to_hex((value >> 8) as u8);
    let low = byte_to_hex(value as u8);

    [high[0], high[1], low[0], low[1]]
}

/// Renders a 32-bit value as eight upper-case hex digits, high word first.
pub const fn dword_to_hex(value: u32) -> [u8; 8] {
    let high = word_to_hex((value >> 16) as u16);
    let low = word_to_hex(value as u16);

    [
        high[0], high[1], high[2], high[3], low[0], low[1], low[2], low[3],
    ]
}

/// Encodes `bytes` into `buffer` as upper-case hex. `buffer` must be exactly
/// twice as long as `bytes`.
pub(crate) fn encode_upper(bytes: &[u8], buffer: &mut [u8]) -> Result<(), SerializeError> {
    hex::encode_to_slice(bytes, buffer).map_err(|_| SerializeError::BufferTooSmall {
        needed: 2 * bytes.len(),
        available: buffer.len(),
    })?;
    buffer.make_ascii_uppercase();

    Ok(())
}

/// Writes `bytes` to a formatter as upper-case hex, one byte at a time.
pub(crate) fn write_upper(f: &mut impl core::fmt::Write, bytes: &[u8]) -> core::fmt::Result {
    for &byte in bytes {
        let digits = byte_to_hex(byte);
        f.write_char(digits[0] as char)?;
        f.write_char(digits[1] as char)?;
    }

    Ok(())
}
