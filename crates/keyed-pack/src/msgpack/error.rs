//! MessagePack decoder error type.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MsgPackError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid MessagePack byte at offset {0}")]
    InvalidByte(usize),
    #[error("invalid UTF-8")]
    InvalidUtf8,
    #[error("unsupported map key kind")]
    InvalidKey,
}
