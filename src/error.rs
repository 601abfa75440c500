use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum SerializeError {
	#[error("record needs {needed} bytes but the buffer holds {available}")]
	BufferTooSmall { needed: usize, available: usize },
}

#[derive(Debug, Error)]
pub enum EncodeError {
	#[error("invalid address size {0}, must be 16, 24, or 32 bits")]
	InvalidAddressWidth(u32),
	#[error(transparent)]
	Serialize(#[from] SerializeError),
	#[cfg(feature = "std")]
	#[error("failed to write records: {0}")]
	Destination(#[from] std::io::Error),
}
