//! Binary image to Motorola S-Record conversion.

use crate::error::EncodeError;
use crate::srec::{AddressWidth, SRecord};
use core::iter::FusedIterator;

#[cfg(feature = "alloc")]
use alloc::{string::String, string::ToString, vec::Vec};

pub const DEFAULT_BYTES_PER_LINE: usize = 32;

/// Widest data record the length byte allows (16-bit addresses).
pub const MAX_BYTES_PER_LINE: usize = 252;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SRecordEncoder {
    bytes_per_line: usize,
    address_bits: u32,
}

impl Default for SRecordEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_BYTES_PER_LINE)
    }
}

impl SRecordEncoder {
    /// Creates an encoder producing 32-bit address records.
    /// `bytes_per_line` is clamped to `1..=252`.
    pub fn new(bytes_per_line: usize) -> Self {
        SRecordEncoder {
            bytes_per_line: clamp(bytes_per_line),
            address_bits: 32,
        }
    }

    /// Selects the address width in bits. Anything other than 16, 24 or 32 is
    /// rejected when records are requested.
    pub fn with_address_width(mut self, bits: u32) -> Self {
        self.address_bits = bits;
        self
    }

    pub fn set_bytes_per_line(&mut self, bytes_per_line: usize) {
        self.bytes_per_line = clamp(bytes_per_line);
    }

    pub fn bytes_per_line(&self) -> usize {
        self.bytes_per_line
    }

    pub fn address_bits(&self) -> u32 {
        self.address_bits
    }

    /// Lazily yields the records for `data` loaded at `start_address`: an
    /// optional S0 header, the data records, an S5 count when the count fits
    /// in 16 bits, and the end record pointing back at `start_address`.
    ///
    /// Fails before producing anything if the address width is invalid.
    pub fn records<'a>(
        &self,
        data: &'a [u8],
        start_address: u32,
        header: Option<&'a str>,
    ) -> Result<SRecords<'a>, EncodeError> {
        let width = AddressWidth::try_from(self.address_bits)?;
        let header = header.map(str::as_bytes).filter(|text| !text.is_empty());

        Ok(SRecords {
            data,
            offset: 0,
            address: start_address,
            start_address,
            width,
            bytes_per_line: self.bytes_per_line.min(width.max_data_length()),
            header,
            count: 0,
            state: State::Header,
        })
    }

    /// Renders every record for `data` as a line of text.
    #[cfg(feature = "alloc")]
    pub fn encode(
        &self,
        data: &[u8],
        start_address: u32,
        header: Option<&str>,
    ) -> Result<Vec<String>, EncodeError> {
        let records = self.records(data, start_address, header)?;

        Ok(records.map(|record| record.to_string()).collect())
    }

    /// Writes newline-terminated records for `data` to `out` and returns the
    /// number of records written. Nothing is written when the configuration
    /// is invalid.
    #[cfg(feature = "std")]
    pub fn write_to<W>(
        &self,
        data: &[u8],
        start_address: u32,
        header: Option<&str>,
        mut out: W,
    ) -> Result<usize, EncodeError>
    where
        W: std::io::Write,
    {
        let records = self.records(data, start_address, header)?;
        #[cfg(feature = "log")]
        let width = records.width();

        let mut buffer = [0; crate::srec::MAX_RECORD_LEN + 1];
        let mut count = 0;

        for record in records {
            let length = record.serialize(&mut buffer)?;
            buffer[length] = b'\n';
            out.write_all(&buffer[..=length])?;
            count += 1;
        }
        out.flush()?;

        #[cfg(feature = "log")]
        log::debug!(
            "wrote {} S-Records ({}-bit) for {} bytes at {:#010X}",
            count,
            width.bits(),
            data.len(),
            start_address
        );

        Ok(count)
    }
}

fn clamp(bytes_per_line: usize) -> usize {
    bytes_per_line.clamp(1, MAX_BYTES_PER_LINE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Header,
    Data,
    Count,
    End,
    Done,
}

/// Iterator over the S-Records of one image.
#[derive(Debug, Clone)]
pub struct SRecords<'a> {
    data: &'a [u8],
    offset: usize,
    address: u32,
    start_address: u32,
    width: AddressWidth,
    bytes_per_line: usize,
    header: Option<&'a [u8]>,
    count: u32,
    state: State,
}

impl<'a> SRecords<'a> {
    pub fn width(&self) -> AddressWidth {
        self.width
    }

    /// Data records produced so far.
    pub fn data_records(&self) -> u32 {
        self.count
    }
}

impl<'a> Iterator for SRecords<'a> {
    type Item = SRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                State::Header => {
                    self.state = State::Data;
                    if let Some(text) = self.header {
                        return Some(SRecord::Header(text));
                    }
                }
                State::Data => {
                    if self.offset >= self.data.len() {
                        self.state = State::Count;
                        continue;
                    }

                    let remaining = self.data.len() - self.offset;
                    let length = self.bytes_per_line.min(remaining);

                    let record = SRecord::Data {
                        width: self.width,
                        address: self.address,
                        bytes: &self.data[self.offset..self.offset + length],
                    };

                    self.offset += length;
                    self.address = self.address.wrapping_add(length as u32);
                    self.count += 1;

                    return Some(record);
                }
                State::Count => {
                    self.state = State::End;
                    if self.count <= u32::from(u16::MAX) {
                        return Some(SRecord::Count(self.count as u16));
                    }
                }
                State::End => {
                    self.state = State::Done;
                    return Some(SRecord::End {
                        width: self.width,
                        address: self.start_address,
                    });
                }
                State::Done => return None,
            }
        }
    }
}

impl<'a> FusedIterator for SRecords<'a> {}
