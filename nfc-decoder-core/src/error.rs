use thiserror::Error;

use crate::mifare::classic::ChecksumError;

/// Errors raised while decoding card data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Input did not have the expected shape (wrong length, bad digits, value out of byte range).
    #[error("invalid input, expected {expected}")]
    InvalidFormat { expected: &'static str },

    /// Invalid value for a MIFARE Classic 1K block.
    #[error("invalid block {0}")]
    InvalidBlock(u8),

    /// Invalid value for a MIFARE Classic 1K sector.
    #[error("invalid sector {0}")]
    InvalidSector(u8),

    /// Invalid NTAG page number.
    #[error("invalid page {0}")]
    InvalidPage(u16),

    /// The access bits failed their complement check.
    #[error(transparent)]
    Checksum(#[from] ChecksumError),
}

impl DecodeError {
    pub(crate) const fn invalid_format(expected: &'static str) -> Self {
        DecodeError::InvalidFormat { expected }
    }
}
