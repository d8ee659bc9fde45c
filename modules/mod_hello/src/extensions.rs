use crate::error::EncodeError;
use crate::prefix::{put_prefixed, PrefixWidth};
use bytes::{BufMut, Bytes, BytesMut};

/// TLS `NamedGroup` code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NamedGroup(pub u16);

impl NamedGroup {
    pub const SECP256R1: Self = Self(23);
    pub const SECP384R1: Self = Self(24);
    pub const X25519: Self = Self(29);
    /// Pre-standard X25519 + Kyber768 hybrid, private-use code point.
    pub const X25519_KYBER768_DRAFT00: Self = Self(0x6399);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtensionType(pub u16);

impl ExtensionType {
    pub const SERVER_NAME: Self = Self(0);
    pub const SUPPORTED_GROUPS: Self = Self(10);
    pub const KEY_SHARE: Self = Self(51);
}

const NAME_TYPE_HOST_NAME: u8 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyShareEntry {
    pub group: NamedGroup,
    pub key_exchange: Bytes,
}

impl KeyShareEntry {
    pub fn new(group: NamedGroup, key_exchange: impl Into<Bytes>) -> Self {
        Self {
            group,
            key_exchange: key_exchange.into(),
        }
    }
}

/// `type(u16) || u16_prefix(body)`
pub fn make_extension(ext_type: ExtensionType, body: &[u8]) -> Result<Bytes, EncodeError> {
    let mut buf = BytesMut::with_capacity(4 + body.len());
    buf.put_u16(ext_type.0);
    put_prefixed(&mut buf, PrefixWidth::U16, body)?;
    Ok(buf.freeze())
}

/// server_name with a single host_name entry.
pub fn make_server_name(name: &str) -> Result<Bytes, EncodeError> {
    if !name.is_ascii() {
        return Err(EncodeError::NonAsciiName(name.to_string()));
    }

    let mut entry = BytesMut::with_capacity(3 + name.len());
    entry.put_u8(NAME_TYPE_HOST_NAME);
    put_prefixed(&mut entry, PrefixWidth::U16, name.as_bytes())?;

    let mut list = BytesMut::with_capacity(2 + entry.len());
    put_prefixed(&mut list, PrefixWidth::U16, &entry)?;
    make_extension(ExtensionType::SERVER_NAME, &list)
}

pub fn make_supported_groups(groups: &[NamedGroup]) -> Result<Bytes, EncodeError> {
    let mut ids = BytesMut::with_capacity(2 * groups.len());
    for group in groups {
        ids.put_u16(group.0);
    }

    let mut body = BytesMut::with_capacity(2 + ids.len());
    put_prefixed(&mut body, PrefixWidth::U16, &ids)?;
    make_extension(ExtensionType::SUPPORTED_GROUPS, &body)
}

/// `group(u16) || u16_prefix(key_exchange)`
pub fn make_key_share_entry(entry: &KeyShareEntry) -> Result<Bytes, EncodeError> {
    let mut buf = BytesMut::with_capacity(4 + entry.key_exchange.len());
    buf.put_u16(entry.group.0);
    put_prefixed(&mut buf, PrefixWidth::U16, &entry.key_exchange)?;
    Ok(buf.freeze())
}

pub fn make_key_share(entries: &[KeyShareEntry]) -> Result<Bytes, EncodeError> {
    let mut shares = BytesMut::new();
    for entry in entries {
        shares.extend_from_slice(&make_key_share_entry(entry)?);
    }

    let mut body = BytesMut::with_capacity(2 + shares.len());
    put_prefixed(&mut body, PrefixWidth::U16, &shares)?;
    make_extension(ExtensionType::KEY_SHARE, &body)
}
