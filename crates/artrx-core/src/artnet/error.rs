use thiserror::Error;

/// Errors returned by ArtDMX decoding.
///
/// Each error is local to a single datagram; the caller drops the datagram
/// and keeps receiving.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed header: need {needed} bytes, got {actual}")]
    MalformedHeader { needed: usize, actual: usize },
    #[error("invalid DMX length: {length}")]
    InvalidLength { length: u16 },
    #[error("truncated payload: need {needed} bytes, got {actual}")]
    TruncatedPayload { needed: usize, actual: usize },
}
