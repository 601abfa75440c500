use crate::types;

/// Largest payload a single Intel HEX record can describe.
pub const MAX_DATA_LENGTH: usize = 0xFF;

/// Longest rendered record: `:`, length, address, type, payload and checksum.
pub const MAX_RECORD_LEN: usize = 1 + 2 * (1 + 2 + 1 + MAX_DATA_LENGTH + 1);

pub(crate) const MAX_FRAME_LEN: usize = 1 + 2 + 1 + MAX_DATA_LENGTH + 1;

/// One Intel HEX record.
///
/// Data records borrow their payload from the buffer being encoded. Bytes
/// past [`MAX_DATA_LENGTH`] cannot be expressed by the length field and are
/// not rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IHex<'a> {
    Data { offset: u16, bytes: &'a [u8] },
    EndOfFile,
    ExtendedLinearAddress(u16),
}

impl<'a> IHex<'a> {
    pub fn record_type(&self) -> u8 {
        match self {
            Self::Data { .. } => types::DATA,
            Self::EndOfFile => types::END_OF_FILE,
            Self::ExtendedLinearAddress(_) => types::EXTENDED_LINEAR_ADDRESS,
        }
    }

    /// Length of this record once rendered, without a line terminator.
    pub fn rendered_len(&self) -> usize {
        1 + 2 * (1 + 2 + 1 + self.payload_len() + 1)
    }

    fn payload_len(&self) -> usize {
        match self {
            Self::Data { bytes, .. } => bytes.len().min(MAX_DATA_LENGTH),
            Self::EndOfFile => 0,
            Self::ExtendedLinearAddress(_) => 2,
        }
    }

    /// Binary image of the record: length, address, type, payload, checksum.
    pub(crate) fn frame(&self) -> ([u8; MAX_FRAME_LEN], usize) {
        let upper;
        let (offset, data): (u16, &[u8]) = match self {
            Self::Data { offset, bytes } => (*offset, &bytes[..self.payload_len()]),
            Self::EndOfFile => (0, &[][..]),
            Self::ExtendedLinearAddress(address) => {
                upper = address.to_be_bytes();
                (0, &upper[..])
            }
        };

        let data_length = 1 + 2 + 1 + data.len() + 1;

        let mut bytes = [0; MAX_FRAME_LEN];
        bytes[0] = data.len() as u8;
        bytes[1..3].copy_from_slice(&offset.to_be_bytes());
        bytes[3] = self.record_type();
        bytes[4..data_length - 1].copy_from_slice(data);
        bytes[data_length - 1] = crate::checksum::checksum(&bytes[..data_length - 1]);

        (bytes, data_length)
    }
}
