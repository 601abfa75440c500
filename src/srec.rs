use crate::error::EncodeError;
use crate::types;

/// The single length byte covers address, payload and checksum.
const MAX_COUNT: usize = 0xFF;

/// Longest rendered record: `S`, type digit, then length byte plus up to 255
/// counted bytes.
pub const MAX_RECORD_LEN: usize = 2 + 2 * (1 + MAX_COUNT);

pub(crate) const MAX_FRAME_LEN: usize = 1 + MAX_COUNT;

/// Address field width of S-Record data and end records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressWidth {
    Bits16,
    Bits24,
    Bits32,
}

impl AddressWidth {
    pub const fn bits(self) -> u32 {
        match self {
            Self::Bits16 => 16,
            Self::Bits24 => 24,
            Self::Bits32 => 32,
        }
    }

    pub const fn address_bytes(self) -> usize {
        match self {
            Self::Bits16 => 2,
            Self::Bits24 => 3,
            Self::Bits32 => 4,
        }
    }

    /// S1, S2 or S3.
    pub const fn data_record_type(self) -> u8 {
        match self {
            Self::Bits16 => types::S1_DATA_16,
            Self::Bits24 => types::S2_DATA_24,
            Self::Bits32 => types::S3_DATA_32,
        }
    }

    /// S9, S8 or S7, matching the data record type.
    pub const fn end_record_type(self) -> u8 {
        match self {
            Self::Bits16 => types::S9_END_16,
            Self::Bits24 => types::S8_END_24,
            Self::Bits32 => types::S7_END_32,
        }
    }

    /// Largest data payload that fits the length byte at this width.
    pub const fn max_data_length(self) -> usize {
        MAX_COUNT - self.address_bytes() - 1
    }
}

impl TryFrom<u32> for AddressWidth {
    type Error = EncodeError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            16 => Ok(Self::Bits16),
            24 => Ok(Self::Bits24),
            32 => Ok(Self::Bits32),
            _ => Err(EncodeError::InvalidAddressWidth(bits)),
        }
    }
}

/// One Motorola S-Record.
///
/// Payload bytes past what the length byte can count are not rendered; in
/// practice only an over-long header reaches that limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SRecord<'a> {
    Header(&'a [u8]),
    Data {
        width: AddressWidth,
        address: u32,
        bytes: &'a [u8],
    },
    /// Number of data records; its address field repeats the count.
    Count(u16),
    End {
        width: AddressWidth,
        address: u32,
    },
}

impl<'a> SRecord<'a> {
    pub fn record_type(&self) -> u8 {
        match self {
            Self::Header(_) => types::S0_HEADER,
            Self::Data { width, .. } => width.data_record_type(),
            Self::Count(_) => types::S5_COUNT_16,
            Self::End { width, .. } => width.end_record_type(),
        }
    }

    pub fn address_bytes(&self) -> usize {
        match self {
            Self::Header(_) | Self::Count(_) => 2,
            Self::Data { width, .. } | Self::End { width, .. } => width.address_bytes(),
        }
    }

    /// Length of this record once rendered, without a line terminator.
    pub fn rendered_len(&self) -> usize {
        2 + 2 * (1 + self.byte_count())
    }

    /// Value of the length field: address bytes, payload and checksum.
    pub fn byte_count(&self) -> usize {
        let payload_len = match self {
            Self::Count(_) => 2,
            _ => self.payload().len(),
        };

        self.address_bytes() + payload_len + 1
    }

    fn address(&self) -> u32 {
        match self {
            Self::Header(_) => 0,
            Self::Data { address, .. } | Self::End { address, .. } => *address,
            Self::Count(count) => u32::from(*count),
        }
    }

    fn payload(&self) -> &'a [u8] {
        let bytes = match self {
            Self::Header(bytes) | Self::Data { bytes, .. } => *bytes,
            Self::Count(_) | Self::End { .. } => &[][..],
        };
        let limit = MAX_COUNT - self.address_bytes() - 1;

        &bytes[..bytes.len().min(limit)]
    }

    /// Binary image of the record after the type digit: length, big-endian
    /// address, payload, checksum.
    pub(crate) fn frame(&self) -> ([u8; MAX_FRAME_LEN], usize) {
        let address_bytes = self.address_bytes();
        let address = self.address().to_be_bytes();

        let count;
        let payload: &[u8] = match self {
            Self::Count(value) => {
                count = value.to_be_bytes();
                &count[..]
            }
            _ => self.payload(),
        };

        let byte_count = self.byte_count();
        let payload_start = 1 + address_bytes;

        let mut bytes = [0; MAX_FRAME_LEN];
        bytes[0] = byte_count as u8;
        bytes[1..payload_start].copy_from_slice(&address[4 - address_bytes..]);
        bytes[payload_start..byte_count].copy_from_slice(payload);
        bytes[byte_count] = crate::checksum::srec_checksum(&bytes[..byte_count]);

        (bytes, byte_count + 1)
    }
}
