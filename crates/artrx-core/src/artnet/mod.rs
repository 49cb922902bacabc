//! Art-Net ArtDMX decoding.
//!
//! The parser extracts the fixed 18-byte header unconditionally, then reads
//! exactly `length` channel bytes starting at offset 18. Signature, opcode
//! and protocol version are parsed and exposed but never enforced; callers
//! that only want well-formed ArtDMX traffic filter with [`Header::is_dmx`].
//! The `length` field is required to be within 2..=512 and covered by the
//! datagram, so channel reconstruction never reads past the buffer.
//!
//! Errors are explicit and per-datagram (`MalformedHeader`, `InvalidLength`,
//! `TruncatedPayload`). Byte offsets and protocol conventions live in
//! `layout` and `reader` respectively.
//!
//! Version française (résumé):
//! Le module décode les trames ArtDMX : en-tête fixe de 18 octets lu sans
//! rejet (signature/opcode/version exposés au lecteur), puis `length` octets
//! de canaux avec `length` dans 2..=512. Les positions sont dans `layout`,
//! les conventions dans `reader`.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::DecodeError;
pub use parser::{DmxPacket, Header, decode, parse_header};
