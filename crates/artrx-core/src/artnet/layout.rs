pub const SIGNATURE_RANGE: std::ops::Range<usize> = 0..7;
pub const ZERO_OFFSET: usize = 7;
pub const OP_CODE_RANGE: std::ops::Range<usize> = 8..10;
pub const PROTOCOL_VERSION_RANGE: std::ops::Range<usize> = 10..12;
pub const SEQUENCE_OFFSET: usize = 12;
pub const PHYSICAL_OFFSET: usize = 13;
pub const UNIVERSE_RANGE: std::ops::Range<usize> = 14..16;
pub const LENGTH_RANGE: std::ops::Range<usize> = 16..18;

pub const HEADER_LEN: usize = 18;
pub const CHANNEL_DATA_OFFSET: usize = HEADER_LEN;

pub const ARTNET_SIGNATURE: &[u8; 7] = b"Art-Net";
pub const ARTDMX_OPCODE: u16 = 0x5000;
pub const PROTOCOL_VERSION: u16 = 14;

pub const DMX_MIN_CHANNELS: u16 = 2;
pub const DMX_MAX_CHANNELS: u16 = 512;

pub const ARTNET_PORT: u16 = 6454;
