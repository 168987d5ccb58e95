use core::fmt;

use heapless::Vec;
use hex::FromHex;
use thiserror::Error;

use super::{AccessCode, FourBlockOffset};
use crate::error::DecodeError;

/// Positions of the access bytes within a sector trailer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum AccessByte {
    B6 = 6,
    B7,
    B8,
}

impl fmt::Display for AccessByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

/// A complement check between two access bytes failed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum ChecksumError {
    #[error("Something incorrect in byte {second} or {first}")]
    ByteMismatch { first: AccessByte, second: AccessByte },
}

/// The access bytes 6, 7 and 8 of a sector trailer.
///
/// Every access bit is stored twice, once inverted (`n`), which makes the three bytes self checking:
///
/// ```text
///         | Bit 7 | Bit 6 | Bit 5 | Bit 4 | Bit 3 | Bit 2 | Bit 1 | Bit 0 |
/// Byte 6: | nC2_3 | nC2_2 | nC2_1 | nC2_0 | nC1_3 | nC1_2 | nC1_1 | nC1_0 |
/// Byte 7: |  C1_3 |  C1_2 |  C1_1 |  C1_0 | nC3_3 | nC3_2 | nC3_1 | nC3_0 |
/// Byte 8: |  C3_3 |  C3_2 |  C3_1 |  C3_0 |  C2_3 |  C2_2 |  C2_1 |  C2_0 |
/// ```
///
/// Based on:
/// - [NXP MF1S50YYX datasheet](https://www.nxp.com/docs/en/data-sheet/MF1S50YYX_V1.pdf), section 8.7
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct AccessBits([u8; 3]);

impl AccessBits {
    /// Access bits of a card fresh from the factory: data blocks `000`, trailer `001`.
    pub const TRANSPORT: AccessBits = AccessBits([0xFF, 0x07, 0x80]);

    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        AccessBits(bytes)
    }

    /// Parses exactly six hexadecimal characters (either case), e.g. `FF0780`.
    pub fn parse(hex: &str) -> Result<Self, DecodeError> {
        let invalid = DecodeError::InvalidFormat {
            expected: "six hexadecimal characters like FF0780",
        };
        if hex.len() != 6 {
            return Err(invalid);
        }
        let bytes = <[u8; 3]>::from_hex(hex).map_err(|_| invalid)?;
        Ok(AccessBits(bytes))
    }

    pub fn bytes(&self) -> [u8; 3] {
        self.0
    }

    pub fn byte(&self, byte: AccessByte) -> u8 {
        self.0[byte as usize - AccessByte::B6 as usize]
    }

    /// Bits of one access byte, most significant first.
    pub fn bits(&self, byte: AccessByte) -> [bool; 8] {
        let value = self.byte(byte);
        core::array::from_fn(|i| bit(value, 7 - i as u8))
    }

    /// Checks the three complement relations in order, reporting the first that fails.
    ///
    /// - C1: high nibble of byte 7 against the inverted low nibble of byte 6.
    /// - C2: low nibble of byte 8 against the inverted high nibble of byte 6.
    /// - C3: high nibble of byte 8 against the inverted low nibble of byte 7.
    pub fn validate_checksum(&self) -> Result<(), ChecksumError> {
        match self.mismatches().next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Checks all three complement relations and reports every one that fails.
    pub fn validate_all(&self) -> Vec<ChecksumError, 3> {
        self.mismatches().collect()
    }

    /// Access code of each block, indexed by block offset. Index 3 is the sector trailer.
    ///
    /// Does not check the complement relations, see [`AccessBits::validate_checksum`].
    pub fn derive_access_codes(&self) -> [AccessCode; 4] {
        core::array::from_fn(|i| self.access_code(FourBlockOffset::from_u8(i as u8)))
    }

    /// Access code of the block at `offset`, taken from the non-inverted copies.
    pub fn access_code(&self, offset: FourBlockOffset) -> AccessCode {
        let [_, b7, b8] = self.0;
        let n = offset as u8;
        AccessCode::from_bits(bit(b7, 4 + n), bit(b8, n), bit(b8, 4 + n))
    }

    /// Encodes four access codes, indexed by block offset, into well formed access bytes.
    pub fn from_access_codes(codes: [AccessCode; 4]) -> Self {
        let (mut c1, mut c2, mut c3) = (0u8, 0u8, 0u8);
        for (n, code) in codes.iter().enumerate() {
            c1 |= (code.c1() as u8) << n;
            c2 |= (code.c2() as u8) << n;
            c3 |= (code.c3() as u8) << n;
        }

        AccessBits([
            (!c2 << 4) | (!c1 & 0x0F),
            (c1 << 4) | (!c3 & 0x0F),
            (c3 << 4) | c2,
        ])
    }

    fn mismatches(&self) -> impl Iterator<Item = ChecksumError> {
        let [b6, b7, b8] = self.0;
        [
            (high(b7) == low(!b6), AccessByte::B6, AccessByte::B7),
            (low(b8) == high(!b6), AccessByte::B6, AccessByte::B8),
            (high(b8) == low(!b7), AccessByte::B7, AccessByte::B8),
        ]
        .into_iter()
        .filter(|(matches, _, _)| !matches)
        .map(|(_, first, second)| ChecksumError::ByteMismatch { first, second })
    }
}

impl From<[u8; 3]> for AccessBits {
    fn from(bytes: [u8; 3]) -> Self {
        AccessBits(bytes)
    }
}

/// Formats as six uppercase hexadecimal characters, e.g. `FF0780`.
impl fmt::Display for AccessBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [b6, b7, b8] = self.0;
        write!(f, "{:02X}{:02X}{:02X}", b6, b7, b8)
    }
}

fn bit(value: u8, index: u8) -> bool {
    (value >> index) & 1 != 0
}

fn high(value: u8) -> u8 {
    value >> 4
}

fn low(value: u8) -> u8 {
    value & 0x0F
}
