use serde::{Deserialize, Serialize};

use super::error::DecodeError;
use super::layout;
use super::reader::DatagramReader;

/// Fixed 18-byte ArtDMX header, parsed unconditionally.
///
/// Signature, zero byte, opcode and protocol version are passed through
/// as received so callers can decide whether to filter; see
/// [`Header::is_dmx`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub signature: [u8; 7],
    pub zero: u8,
    pub opcode: u16,
    pub protocol_version: u16,
    pub sequence: u8,
    pub physical: u8,
    pub universe: u16,
    pub length: u16,
}

impl Header {
    /// True when the signature bytes spell `Art-Net` with the reserved
    /// zero terminator.
    pub fn has_artnet_signature(&self) -> bool {
        &self.signature == layout::ARTNET_SIGNATURE && self.zero == 0
    }

    /// True for a well-formed ArtDMX header: valid signature, opcode
    /// 0x5000 and protocol version 14.
    pub fn is_dmx(&self) -> bool {
        self.has_artnet_signature()
            && self.opcode == layout::ARTDMX_OPCODE
            && self.protocol_version == layout::PROTOCOL_VERSION
    }
}

/// One decoded ArtDMX datagram: header fields plus exactly
/// `header.length` channel levels, index 0 being DMX channel 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DmxPacket {
    pub header: Header,
    pub channels: Vec<u8>,
}

impl DmxPacket {
    /// Level of a 1-based DMX channel, if carried by this packet.
    pub fn channel(&self, channel: u16) -> Option<u8> {
        if channel == 0 {
            return None;
        }
        self.channels.get(usize::from(channel) - 1).copied()
    }
}

/// Parse the fixed header from the start of a datagram.
///
/// Fails only when the buffer cannot hold 18 bytes; field values are
/// never rejected here.
pub fn parse_header(datagram: &[u8]) -> Result<Header, DecodeError> {
    let reader = DatagramReader::new(datagram);
    reader.require_header()?;

    Ok(Header {
        signature: reader.read_signature()?,
        zero: reader.read_u8(layout::ZERO_OFFSET)?,
        opcode: reader.read_u16_be(layout::OP_CODE_RANGE.clone())?,
        protocol_version: reader.read_u16_be(layout::PROTOCOL_VERSION_RANGE.clone())?,
        sequence: reader.read_u8(layout::SEQUENCE_OFFSET)?,
        physical: reader.read_u8(layout::PHYSICAL_OFFSET)?,
        universe: reader.read_u16_be(layout::UNIVERSE_RANGE.clone())?,
        length: reader.read_u16_be(layout::LENGTH_RANGE.clone())?,
    })
}

/// Decode one datagram into a [`DmxPacket`].
///
/// Decoding is pure and atomic: on any failure no partial packet exists.
/// Bytes beyond `18 + length` are ignored.
///
/// # Examples
/// ```
/// let mut datagram = Vec::new();
/// datagram.extend_from_slice(b"Art-Net\0");
/// datagram.extend_from_slice(&0x5000u16.to_be_bytes());
/// datagram.extend_from_slice(&14u16.to_be_bytes());
/// datagram.extend_from_slice(&[1, 0]); // sequence, physical
/// datagram.extend_from_slice(&0u16.to_be_bytes()); // universe
/// datagram.extend_from_slice(&3u16.to_be_bytes()); // length
/// datagram.extend_from_slice(&[10, 20, 30]);
///
/// let packet = artrx_core::decode(&datagram)?;
/// assert_eq!(packet.header.universe, 0);
/// assert_eq!(packet.channels, vec![10, 20, 30]);
/// # Ok::<(), artrx_core::DecodeError>(())
/// ```
pub fn decode(datagram: &[u8]) -> Result<DmxPacket, DecodeError> {
    let header = parse_header(datagram)?;

    let length = header.length;
    if !(layout::DMX_MIN_CHANNELS..=layout::DMX_MAX_CHANNELS).contains(&length) {
        return Err(DecodeError::InvalidLength { length });
    }

    let reader = DatagramReader::new(datagram);
    let channels = reader.read_channel_data(usize::from(length))?;

    Ok(DmxPacket {
        header,
        channels: channels.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::{decode, parse_header};
    use crate::artnet::error::DecodeError;
    use crate::artnet::layout;

    fn dmx_datagram(length_field: u16, channels: &[u8]) -> Vec<u8> {
        let mut datagram = Vec::with_capacity(layout::HEADER_LEN + channels.len());
        datagram.extend_from_slice(layout::ARTNET_SIGNATURE);
        datagram.push(0);
        datagram.extend_from_slice(&layout::ARTDMX_OPCODE.to_be_bytes());
        datagram.extend_from_slice(&layout::PROTOCOL_VERSION.to_be_bytes());
        datagram.push(1); // sequence
        datagram.push(0); // physical
        datagram.extend_from_slice(&0u16.to_be_bytes());
        datagram.extend_from_slice(&length_field.to_be_bytes());
        datagram.extend_from_slice(channels);
        datagram
    }

    #[test]
    fn decode_valid_dmx() {
        let datagram = dmx_datagram(3, &[10, 20, 30]);
        let packet = decode(&datagram).unwrap();
        assert_eq!(packet.header.sequence, 1);
        assert_eq!(packet.header.physical, 0);
        assert_eq!(packet.header.universe, 0);
        assert_eq!(packet.header.length, 3);
        assert_eq!(packet.channels, vec![10, 20, 30]);
        assert!(packet.header.is_dmx());
    }

    #[test]
    fn decode_ignores_trailing_bytes() {
        let datagram = dmx_datagram(2, &[7, 8, 99, 99, 99]);
        let packet = decode(&datagram).unwrap();
        assert_eq!(packet.channels, vec![7, 8]);
    }

    #[test]
    fn decode_short_header() {
        let err = decode(&[0u8; 10]).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedHeader { .. }));
    }

    #[test]
    fn decode_length_out_of_range() {
        for length in [0u16, 1, 513, 600] {
            let datagram = dmx_datagram(length, &[0u8; 600]);
            let err = decode(&datagram).unwrap_err();
            assert!(
                matches!(err, DecodeError::InvalidLength { length: l } if l == length),
                "length {length} must be rejected"
            );
        }
    }

    #[test]
    fn decode_truncated_payload() {
        let datagram = dmx_datagram(512, &[0u8; 500]);
        let err = decode(&datagram).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TruncatedPayload {
                needed: 530,
                actual: 518
            }
        ));
    }

    #[test]
    fn header_fields_pass_through_unvalidated() {
        let mut datagram = dmx_datagram(2, &[1, 2]);
        datagram[..7].copy_from_slice(b"Not-Art");
        datagram[layout::OP_CODE_RANGE].copy_from_slice(&0x2000u16.to_be_bytes());
        datagram[layout::PROTOCOL_VERSION_RANGE].copy_from_slice(&13u16.to_be_bytes());

        let packet = decode(&datagram).unwrap();
        assert_eq!(&packet.header.signature, b"Not-Art");
        assert_eq!(packet.header.opcode, 0x2000);
        assert_eq!(packet.header.protocol_version, 13);
        assert!(!packet.header.has_artnet_signature());
        assert!(!packet.header.is_dmx());
        assert_eq!(packet.channels, vec![1, 2]);
    }

    #[test]
    fn parse_header_reads_all_fields() {
        let mut datagram = dmx_datagram(2, &[0, 0]);
        datagram[layout::SEQUENCE_OFFSET] = 0x2a;
        datagram[layout::PHYSICAL_OFFSET] = 3;
        datagram[layout::UNIVERSE_RANGE].copy_from_slice(&7u16.to_be_bytes());

        let header = parse_header(&datagram).unwrap();
        assert_eq!(header.sequence, 0x2a);
        assert_eq!(header.physical, 3);
        assert_eq!(header.universe, 7);
        assert_eq!(header.length, 2);
    }

    #[test]
    fn channel_lookup_is_one_based() {
        let datagram = dmx_datagram(3, &[10, 20, 30]);
        let packet = decode(&datagram).unwrap();
        assert_eq!(packet.channel(0), None);
        assert_eq!(packet.channel(1), Some(10));
        assert_eq!(packet.channel(3), Some(30));
        assert_eq!(packet.channel(4), None);
    }
}
