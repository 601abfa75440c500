//! Intel HEX and Motorola S-Record serialization for firmware images.
//!
//! [`IntelEncoder`] and [`SRecordEncoder`] split a byte buffer loaded at a
//! start address into checksummed records. Without the `alloc` feature the
//! records are borrowed values that serialize into caller buffers; with it
//! they can be collected as lines, and with `std` streamed to any writer.
//!
//! ```
//! use micro_hexrec::IntelEncoder;
//!
//! let lines = IntelEncoder::new(4)
//!     .with_extended_addressing(false)
//!     .encode(&[0x01, 0x02, 0x03, 0x04], 0x0000);
//!
//! assert_eq!(lines, [":0400000001020304F2", ":00000001FF"]);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod checksum;
mod error;
pub mod hex_format;
pub mod ihex;
pub mod intel;
pub mod motorola;
mod serializer;
pub mod srec;
mod types;

pub use error::{EncodeError, SerializeError};
pub use ihex::IHex;
pub use intel::{IntelEncoder, IntelRecords};
pub use motorola::{SRecordEncoder, SRecords};
pub use srec::{AddressWidth, SRecord};
