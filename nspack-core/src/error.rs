use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A field read ran past the end of its source.
    #[error("source truncated: field needs {need} bytes at offset {offset:#x}, source is {have} bytes")]
    Truncated { offset: u64, need: usize, have: u64 },

    /// An end-relative offset resolved before the start of the source.
    #[error("field offset {0:#x} resolves before the start of the source")]
    InvalidOffset(i64),

    /// A classification byte matched no known kind.
    #[error("unknown {what} code {code:#04x}")]
    UnknownTypeCode { what: &'static str, code: u8 },

    /// Key material shorter than the range it must fill.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("invalid hex field: {0}")]
    Hex(#[from] hex::FromHexError),
}
