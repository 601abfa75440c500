// Intel HEX record types
pub const DATA: u8 = 0x00;
pub const END_OF_FILE: u8 = 0x01;
pub const EXTENDED_LINEAR_ADDRESS: u8 = 0x04;

// Motorola S-Record type digits
pub const S0_HEADER: u8 = 0;
pub const S1_DATA_16: u8 = 1;
pub const S2_DATA_24: u8 = 2;
pub const S3_DATA_32: u8 = 3;
pub const S5_COUNT_16: u8 = 5;
pub const S7_END_32: u8 = 7;
pub const S8_END_24: u8 = 8;
pub const S9_END_16: u8 = 9;
