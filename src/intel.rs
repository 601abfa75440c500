//! Binary image to Intel HEX conversion.
//!
//! Data records carry only the low 16 bits of an address, so the encoder
//! never lets a record run across a 64 KiB page and, when extended linear
//! addressing is enabled, announces each new upper half with a type `04`
//! record before the data that needs it.

use crate::ihex::{self, IHex};
use core::iter::FusedIterator;

#[cfg(feature = "alloc")]
use alloc::{string::String, string::ToString, vec::Vec};

pub const DEFAULT_BYTES_PER_LINE: usize = 32;

const PAGE_SIZE: usize = 0x10000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntelEncoder {
    bytes_per_line: usize,
    extended_addressing: bool,
}

impl Default for IntelEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_BYTES_PER_LINE)
    }
}

impl IntelEncoder {
    /// Creates an encoder with extended linear addressing enabled.
    /// `bytes_per_line` is clamped to `1..=255`.
    pub fn new(bytes_per_line: usize) -> Self {
        IntelEncoder {
            bytes_per_line: clamp(bytes_per_line),
            extended_addressing: true,
        }
    }

    pub fn with_extended_addressing(mut self, enabled: bool) -> Self {
        self.extended_addressing = enabled;
        self
    }

    pub fn set_bytes_per_line(&mut self, bytes_per_line: usize) {
        self.bytes_per_line = clamp(bytes_per_line);
    }

    pub fn bytes_per_line(&self) -> usize {
        self.bytes_per_line
    }

    pub fn extended_addressing(&self) -> bool {
        self.extended_addressing
    }

    /// Lazily yields the records for `data` loaded at `start_address`, ending
    /// with a single end-of-file record.
    pub fn records<'a>(&self, data: &'a [u8], start_address: u32) -> IntelRecords<'a> {
        IntelRecords {
            data,
            offset: 0,
            address: start_address,
            bytes_per_line: self.bytes_per_line,
            extended_addressing: self.extended_addressing,
            upper: None,
            done: false,
        }
    }

    /// Renders every record for `data` as a line of text.
    #[cfg(feature = "alloc")]
    pub fn encode(&self, data: &[u8], start_address: u32) -> Vec<String> {
        self.records(data, start_address)
            .map(|record| record.to_string())
            .collect()
    }

    /// Writes newline-terminated records for `data` to `out` and returns the
    /// number of records written.
    #[cfg(feature = "std")]
    pub fn write_to<W>(
        &self,
        data: &[u8],
        start_address: u32,
        mut out: W,
    ) -> Result<usize, crate::EncodeError>
    where
        W: std::io::Write,
    {
        let mut buffer = [0; ihex::MAX_RECORD_LEN + 1];
        let mut count = 0;

        for record in self.records(data, start_address) {
            let length = record.serialize(&mut buffer)?;
            buffer[length] = b'\n';
            out.write_all(&buffer[..=length])?;
            count += 1;
        }
        out.flush()?;

        #[cfg(feature = "log")]
        log::debug!(
            "wrote {} Intel HEX records for {} bytes at {:#010X}",
            count,
            data.len(),
            start_address
        );

        Ok(count)
    }
}

fn clamp(bytes_per_line: usize) -> usize {
    bytes_per_line.clamp(1, ihex::MAX_DATA_LENGTH)
}

/// Iterator over the Intel HEX records of one image.
#[derive(Debug, Clone)]
pub struct IntelRecords<'a> {
    data: &'a [u8],
    offset: usize,
    address: u32,
    bytes_per_line: usize,
    extended_addressing: bool,
    upper: Option<u16>,
    done: bool,
}

impl<'a> IntelRecords<'a> {
    /// Address the next data byte will be placed at.
    pub fn address(&self) -> u32 {
        self.address
    }
}

impl<'a> Iterator for IntelRecords<'a> {
    type Item = IHex<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if self.offset >= self.data.len() {
            self.done = true;
            return Some(IHex::EndOfFile);
        }

        let upper = (self.address >> 16) as u16;
        if self.extended_addressing && self.upper != Some(upper) {
            #[cfg(feature = "log")]
            log::trace!("extended linear address {:#06X}", upper);

            self.upper = Some(upper);
            return Some(IHex::ExtendedLinearAddress(upper));
        }

        let remaining = self.data.len() - self.offset;
        let to_boundary = PAGE_SIZE - (self.address & 0xFFFF) as usize;
        let length = self.bytes_per_line.min(remaining).min(to_boundary);

        let record = IHex::Data {
            offset: self.address as u16,
            bytes: &self.data[self.offset..self.offset + length],
        };

        self.offset += length;
        self.address = self.address.wrapping_add(length as u32);

        Some(record)
    }
}

impl<'a> FusedIterator for IntelRecords<'a> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_per_line_is_clamped() {
        assert_eq!(IntelEncoder::new(0).bytes_per_line(), 1);
        assert_eq!(IntelEncoder::new(16).bytes_per_line(), 16);
        assert_eq!(IntelEncoder::new(1000).bytes_per_line(), 255);

        let mut encoder = IntelEncoder::default();
        assert_eq!(encoder.bytes_per_line(), 32);
        assert!(encoder.extended_addressing());

        encoder.set_bytes_per_line(256);
        assert_eq!(encoder.bytes_per_line(), 255);
    }

    #[test]
    fn empty_buffer_is_only_eof() {
        let mut records = IntelEncoder::default().records(&[], 0x0800_0000);

        assert_eq!(records.next(), Some(IHex::EndOfFile));
        assert_eq!(records.next(), None);
        assert_eq!(records.next(), None);
    }

    #[test]
    fn small_buffer() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut records = IntelEncoder::new(4)
            .with_extended_addressing(false)
            .records(&data, 0x0000);

        assert_eq!(
            records.next(),
            Some(IHex::Data {
                offset: 0x0000,
                bytes: &data
            })
        );
        assert_eq!(records.next(), Some(IHex::EndOfFile));
        assert_eq!(records.next(), None);
    }

    #[test]
    fn first_record_announces_upper_address() {
        let data = [0xAA; 20];
        let mut records = IntelEncoder::new(16).records(&data, 0x0801_0000);

        assert_eq!(records.next(), Some(IHex::ExtendedLinearAddress(0x0801)));
        assert_eq!(
            records.next(),
            Some(IHex::Data {
                offset: 0x0000,
                bytes: &data[..16]
            })
        );
        assert_eq!(
            records.next(),
            Some(IHex::Data {
                offset: 0x0010,
                bytes: &data[16..]
            })
        );
        assert_eq!(records.next(), Some(IHex::EndOfFile));
        assert_eq!(records.address(), 0x0801_0014);
    }

    #[test]
    fn page_crossing_with_extended_addressing() {
        let data: [u8; 32] = core::array::from_fn(|i| i as u8);
        let mut records = IntelEncoder::new(32).records(&data, 0x0000_FFF0);

        assert_eq!(records.next(), Some(IHex::ExtendedLinearAddress(0x0000)));
        assert_eq!(
            records.next(),
            Some(IHex::Data {
                offset: 0xFFF0,
                bytes: &data[..16]
            })
        );
        assert_eq!(records.next(), Some(IHex::ExtendedLinearAddress(0x0001)));
        assert_eq!(
            records.next(),
            Some(IHex::Data {
                offset: 0x0000,
                bytes: &data[16..]
            })
        );
        assert_eq!(records.next(), Some(IHex::EndOfFile));
        assert_eq!(records.next(), None);
    }

    #[test]
    fn page_crossing_without_extended_addressing() {
        let data = [0x55; 32];
        let records = IntelEncoder::new(32)
            .with_extended_addressing(false)
            .records(&data, 0x0000_FFF0);

        let mut lengths = [0usize; 3];
        let mut count = 0;
        for record in records {
            assert!(!matches!(record, IHex::ExtendedLinearAddress(_)));
            if let IHex::Data { bytes, .. } = record {
                lengths[count] = bytes.len();
                count += 1;
            }
        }

        assert_eq!(count, 2);
        assert_eq!(&lengths[..2], &[16, 16]);
    }

    #[test]
    fn address_space_wraps() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut records = IntelEncoder::new(16).records(&data, 0xFFFF_FFFE);

        assert_eq!(records.next(), Some(IHex::ExtendedLinearAddress(0xFFFF)));
        assert_eq!(
            records.next(),
            Some(IHex::Data {
                offset: 0xFFFE,
                bytes: &data[..2]
            })
        );
        assert_eq!(records.next(), Some(IHex::ExtendedLinearAddress(0x0000)));
        assert_eq!(
            records.next(),
            Some(IHex::Data {
                offset: 0x0000,
                bytes: &data[2..]
            })
        );
        assert_eq!(records.next(), Some(IHex::EndOfFile));
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn encode_lines() {
        let lines = IntelEncoder::new(4)
            .with_extended_addressing(false)
            .encode(&[0x01, 0x02, 0x03, 0x04], 0x0000);

        assert_eq!(lines, [":0400000001020304F2", ":00000001FF"]);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn encode_lines_with_extended_address() {
        let lines = IntelEncoder::new(4).encode(&[0x01, 0x02, 0x03, 0x04], 0x0000);

        assert_eq!(
            lines,
            [":020000040000FA", ":0400000001020304F2", ":00000001FF"]
        );
    }

    #[cfg(feature = "std")]
    #[test]
    fn write_to_terminates_lines() {
        let mut out = Vec::new();
        let count = IntelEncoder::new(4)
            .with_extended_addressing(false)
            .write_to(&[0x01, 0x02, 0x03, 0x04], 0x0000, &mut out)
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(out, b":0400000001020304F2\n:00000001FF\n");
    }

    #[cfg(feature = "std")]
    #[test]
    fn write_to_reports_destination_failure() {
        struct Full;

        impl std::io::Write for Full {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk full"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let result = IntelEncoder::default().write_to(&[0x00], 0, Full);

        assert!(matches!(result, Err(crate::EncodeError::Destination(_))));
    }
}
