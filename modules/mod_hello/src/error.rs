use crate::prefix::PrefixWidth;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodeError {
    /// Payload too long for its length prefix. Never truncated or wrapped.
    #[error("{len} bytes do not fit a {width} length prefix (max {max})")]
    Length {
        width: PrefixWidth,
        len: usize,
        max: usize,
    },

    #[error("server name {0:?} is not ASCII")]
    NonAsciiName(String),

    #[error("sample constant {name} is not valid hex: {source}")]
    Template {
        name: &'static str,
        #[source]
        source: hex::FromHexError,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("need {needed} bytes for a {width} length prefix, have {available}")]
    TruncatedPrefix {
        width: PrefixWidth,
        needed: usize,
        available: usize,
    },

    #[error("prefix declares {declared} bytes but only {available} follow")]
    TruncatedPayload { declared: usize, available: usize },

    #[error("{0} unexpected bytes after the prefixed payload")]
    TrailingBytes(usize),
}
