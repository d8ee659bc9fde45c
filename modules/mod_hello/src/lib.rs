//! ClientHello construction.
//!
//! Every layer is a length-prefixed vector nested inside the next:
//! record -> handshake -> ClientHello body -> extensions -> extension.
//! Construction is pure and deterministic; a length that overflows its
//! prefix is an error, never a truncation.

pub mod error;
pub mod extensions;
pub mod prefix;
pub mod samples;

pub use error::{DecodeError, EncodeError};
pub use extensions::{
    make_extension, make_key_share, make_key_share_entry, make_server_name,
    make_supported_groups, ExtensionType, KeyShareEntry, NamedGroup,
};
pub use prefix::{
    decode_prefixed, encode_prefixed, put_prefixed, split_prefixed, u16_prefix, u24_prefix,
    u8_prefix, PrefixWidth,
};

use bytes::{BufMut, Bytes, BytesMut};

pub const CONTENT_TYPE_HANDSHAKE: u8 = 0x16;
pub const LEGACY_RECORD_VERSION: u16 = 0x0301;
pub const HANDSHAKE_CLIENT_HELLO: u8 = 0x01;

pub const RECORD_HEADER_LEN: usize = 5;
pub const HANDSHAKE_HEADER_LEN: usize = 4;

/// Builds the complete ClientHello record for `server_name`.
///
/// Groups are X25519, P-256, P-384 with an X25519 key share. With
/// `include_hybrid_group` the X25519Kyber768 group and its ~1.2 KB share are
/// put in front, which pushes the record well past a typical first segment.
pub fn make_client_hello(
    server_name: &str,
    include_hybrid_group: bool,
) -> Result<Bytes, EncodeError> {
    let mut groups = vec![
        NamedGroup::X25519,
        NamedGroup::SECP256R1,
        NamedGroup::SECP384R1,
    ];
    let mut entries = vec![KeyShareEntry::new(NamedGroup::X25519, samples::x25519_key()?)];
    if include_hybrid_group {
        groups.insert(0, NamedGroup::X25519_KYBER768_DRAFT00);
        entries.insert(
            0,
            KeyShareEntry::new(
                NamedGroup::X25519_KYBER768_DRAFT00,
                samples::x25519_kyber768_key()?,
            ),
        );
    }

    let mut extensions = BytesMut::new();
    extensions.extend_from_slice(&make_supported_groups(&groups)?);
    extensions.extend_from_slice(&make_key_share(&entries)?);
    extensions.extend_from_slice(&make_server_name(server_name)?);
    extensions.extend_from_slice(&samples::auxiliary_extensions()?);

    let mut body = BytesMut::from(&samples::client_hello_prefix()?[..]);
    put_prefixed(&mut body, PrefixWidth::U16, &extensions)?;

    let mut handshake = BytesMut::with_capacity(HANDSHAKE_HEADER_LEN + body.len());
    handshake.put_u8(HANDSHAKE_CLIENT_HELLO);
    put_prefixed(&mut handshake, PrefixWidth::U24, &body)?;

    let mut record = BytesMut::with_capacity(RECORD_HEADER_LEN + handshake.len());
    record.put_u8(CONTENT_TYPE_HANDSHAKE);
    record.put_u16(LEGACY_RECORD_VERSION);
    put_prefixed(&mut record, PrefixWidth::U16, &handshake)?;

    Ok(record.freeze())
}

/// The two ClientHello shapes a probe run sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelloProfile {
    Hybrid,
    Classic,
}

impl HelloProfile {
    /// Run order: large message first, then the small control.
    pub const ALL: [HelloProfile; 2] = [HelloProfile::Hybrid, HelloProfile::Classic];

    pub fn includes_hybrid_group(self) -> bool {
        matches!(self, HelloProfile::Hybrid)
    }

    pub fn label(self) -> &'static str {
        match self {
            HelloProfile::Hybrid => "large",
            HelloProfile::Classic => "small",
        }
    }

    pub fn build(self, server_name: &str) -> Result<Bytes, EncodeError> {
        make_client_hello(server_name, self.includes_hybrid_group())
    }
}
