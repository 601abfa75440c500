fn sum(bytes: &[u8]) -> u8 {
	bytes.iter().fold(0u8, |acc, &byte| acc.wrapping_add(byte))
}

/// Intel HEX checksum: two's complement of the byte sum.
pub(crate) fn checksum(bytes: &[u8]) -> u8 {
	0u8.wrapping_sub(sum(bytes))
}

/// Motorola S-Record checksum: one's complement of the byte sum.
pub(crate) fn srec_checksum(bytes: &[u8]) -> u8 {
	!sum(bytes)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn intel_checksum() {
		assert_eq!(checksum(&[0x04, 0x00, 0x00, 0x00, 0x01, 0x02, 0x03, 0x04]), 0xF2);
		assert_eq!(checksum(&[0x00, 0x00, 0x00, 0x01]), 0xFF);
		assert_eq!(checksum(&[0x02, 0x00, 0x00, 0x04, 0xAB, 0xCD]), 0x82);
	}

	#[test]
	fn intel_checksum_of_zero_sum_is_zero() {
		assert_eq!(checksum(&[]), 0x00);
		assert_eq!(checksum(&[0x80, 0x80]), 0x00);
	}

	#[test]
	fn srec_checksum_is_ones_complement() {
		assert_eq!(srec_checksum(&[0x03, 0x00, 0x00]), 0xFC);
		assert_eq!(srec_checksum(&[0x07, 0x00, 0x00, 0x01, 0x02, 0x03, 0x04]), 0xEE);
		assert_eq!(srec_checksum(&[0xFF, 0x01]), 0xFF);
	}
}
