use super::error::DecodeError;
use super::layout;

/// Bounds-checked access to one received datagram.
///
/// Header reads report `MalformedHeader`; channel-data reads report
/// `TruncatedPayload`. All multi-byte fields are network order.
pub struct DatagramReader<'a> {
    datagram: &'a [u8],
}

impl<'a> DatagramReader<'a> {
    pub fn new(datagram: &'a [u8]) -> Self {
        Self { datagram }
    }

    pub fn require_header(&self) -> Result<(), DecodeError> {
        if self.datagram.len() < layout::HEADER_LEN {
            return Err(DecodeError::MalformedHeader {
                needed: layout::HEADER_LEN,
                actual: self.datagram.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, DecodeError> {
        self.datagram
            .get(offset)
            .copied()
            .ok_or(DecodeError::MalformedHeader {
                needed: offset + 1,
                actual: self.datagram.len(),
            })
    }

    pub fn read_u16_be(&self, range: std::ops::Range<usize>) -> Result<u16, DecodeError> {
        let bytes = self.read_header_slice(range)?;
        if bytes.len() != 2 {
            return Err(DecodeError::MalformedHeader {
                needed: 2,
                actual: bytes.len(),
            });
        }
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_signature(&self) -> Result<[u8; 7], DecodeError> {
        let bytes = self.read_header_slice(layout::SIGNATURE_RANGE)?;
        let mut signature = [0u8; 7];
        signature.copy_from_slice(bytes);
        Ok(signature)
    }

    pub fn read_channel_data(&self, count: usize) -> Result<&'a [u8], DecodeError> {
        let needed = layout::CHANNEL_DATA_OFFSET + count;
        self.datagram
            .get(layout::CHANNEL_DATA_OFFSET..needed)
            .ok_or(DecodeError::TruncatedPayload {
                needed,
                actual: self.datagram.len(),
            })
    }

    fn read_header_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], DecodeError> {
        self.datagram
            .get(range.clone())
            .ok_or(DecodeError::MalformedHeader {
                needed: range.end,
                actual: self.datagram.len(),
            })
    }
}
