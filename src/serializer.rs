use crate::error::SerializeError;
use crate::hex_format::{encode_upper, write_upper};
use crate::{IHex, SRecord};
use core::fmt;

impl IHex<'_> {
    /// Renders the record into `buffer` as `:LLAAAATT<data>CC`, returning the
    /// number of bytes written. No line terminator is added.
    pub fn serialize<T>(&self, buffer: &mut T) -> Result<usize, SerializeError>
    where
        T: AsMut<[u8]> + ?Sized,
    {
        let (bytes, length) = self.frame();

        format(b":", &bytes[..length], buffer.as_mut())
    }
}

impl SRecord<'_> {
    /// Renders the record into `buffer` as `St<count><address><data>CC`,
    /// returning the number of bytes written. No line terminator is added.
    pub fn serialize<T>(&self, buffer: &mut T) -> Result<usize, SerializeError>
    where
        T: AsMut<[u8]> + ?Sized,
    {
        let (bytes, length) = self.frame();

        format(&[b'S', b'0' + self.record_type()], &bytes[..length], buffer.as_mut())
    }
}

fn format(prefix: &[u8], frame: &[u8], buffer: &mut [u8]) -> Result<usize, SerializeError> {
    let buffer_length = prefix.len() + 2 * frame.len();
    if buffer.len() < buffer_length {
        return Err(SerializeError::BufferTooSmall {
            needed: buffer_length,
            available: buffer.len(),
        });
    }

    buffer[..prefix.len()].copy_from_slice(prefix);
    encode_upper(frame, &mut buffer[prefix.len()..buffer_length])?;

    Ok(buffer_length)
}

impl fmt::Display for IHex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (bytes, length) = self.frame();

        f.write_str(":")?;
        write_upper(f, &bytes[..length])
    }
}

impl fmt::Display for SRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (bytes, length) = self.frame();

        write!(f, "S{}", self.record_type())?;
        write_upper(f, &bytes[..length])
    }
}
