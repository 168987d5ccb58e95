use super::{AccessBits, AccessConditions, ChecksumError};

/// The sector trailer, the last block of every sector.
///
/// ```text
/// |  0 |  1 |  2 |  3 |  4 |  5 |  6 |  7 |  8 |  9 | 10 | 11 | 12 | 13 | 14 | 15 |
/// |            Key A            | Access Bits  | GP |            Key B            |
/// ```
///
/// Keys and the general purpose byte are optional since dumps frequently lack them.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SectorTrailer {
    pub key_a: Option<[u8; 6]>,
    pub access_bits: AccessBits,
    pub general_purpose_byte: Option<u8>,
    pub key_b: Option<[u8; 6]>,
}

impl SectorTrailer {
    pub fn from_bytes(bytes: &[u8; 16]) -> Self {
        SectorTrailer {
            key_a: Some(key(&bytes[..6])),
            access_bits: AccessBits::from_bytes([bytes[6], bytes[7], bytes[8]]),
            general_purpose_byte: Some(bytes[9]),
            key_b: Some(key(&bytes[10..])),
        }
    }

    /// Builds a trailer from partially known bytes.
    ///
    /// Returns `None` if any of the access bytes is unknown.
    pub fn from_partial(bytes: &[Option<u8>; 16]) -> Option<Self> {
        let access_bits = AccessBits::from_bytes([bytes[6]?, bytes[7]?, bytes[8]?]);
        Some(SectorTrailer {
            key_a: known_key(&bytes[..6]),
            access_bits,
            general_purpose_byte: bytes[9],
            key_b: known_key(&bytes[10..]),
        })
    }

    /// Validates and decodes the access bits.
    pub fn access_conditions(&self) -> Result<AccessConditions, ChecksumError> {
        AccessConditions::from_bits(self.access_bits)
    }
}

fn key(bytes: &[u8]) -> [u8; 6] {
    let mut out = [0u8; 6];
    out.copy_from_slice(bytes);
    out
}

fn known_key(bytes: &[Option<u8>]) -> Option<[u8; 6]> {
    let mut out = [0u8; 6];
    for (slot, byte) in out.iter_mut().zip(bytes) {
        *slot = (*byte)?;
    }
    Some(out)
}
