use core::{fmt, mem::transmute};

use super::Sector;
use crate::error::DecodeError;

/// Represents offset of blocks in a MIFARE Classic 1K sector.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum FourBlockOffset {
    B0 = 0,
    B1,
    B2,
    /// The sector trailer.
    B3,
}

impl FourBlockOffset {
    /// Offset of the sector trailer within every sector.
    pub const TRAILER: FourBlockOffset = FourBlockOffset::B3;

    /// Iterate the offsets in order, ending with the sector trailer.
    pub fn iter() -> impl Iterator<Item = FourBlockOffset> {
        (0u8..=Self::B3 as u8).map(FourBlockOffset::from_u8)
    }

    pub fn is_sector_trailer(self) -> bool {
        self == Self::TRAILER
    }

    /// Converts a u8 block index into a `FourBlockOffset` enum variant.
    ///
    /// # Panics
    /// This code will panic if `block` is greater than 3 because there are only four blocks in a MIFARE Classic 1K sector.
    pub(crate) fn from_u8(block: u8) -> Self {
        assert!(block <= Self::B3 as u8);
        unsafe { transmute(block) }
    }
}

impl TryFrom<u8> for FourBlockOffset {
    type Error = DecodeError;

    fn try_from(block: u8) -> Result<Self, Self::Error> {
        match block {
            // 0 to 3 (inclusive) are always valid block offsets.
            0..=3 => Ok(FourBlockOffset::from_u8(block)),
            _ => Err(DecodeError::InvalidBlock(block)),
        }
    }
}

/// Represents a valid MIFARE Classic 1K block from 0 to 63.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Block(u8);

impl Block {
    /// Highest block number on a MIFARE Classic 1K.
    pub const MAX: u8 = 63;

    pub fn from_sector(sector: Sector, offset: FourBlockOffset) -> Block {
        let sector = sector as u8;
        let offset = offset as u8;
        Block((sector * 4) + offset)
    }

    /// Position of this block inside its sector.
    pub fn offset(self) -> FourBlockOffset {
        FourBlockOffset::from_u8(self.0 % 4)
    }

    pub fn is_sector_trailer(self) -> bool {
        self.offset().is_sector_trailer()
    }
}

/// Converts a `Block` into a u8 block address.
impl From<Block> for u8 {
    fn from(value: Block) -> Self {
        value.0
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block {}", self.0)
    }
}

/// Attempts conversion of a `u8` into a `Block`.
///
/// Valid values for a block are 0..=63
impl TryFrom<u8> for Block {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0..=Block::MAX => Ok(Block(value)),
            _ => Err(DecodeError::InvalidBlock(value)),
        }
    }
}

/// Converts a sector into its starting block address.
impl From<Sector> for Block {
    fn from(sector: Sector) -> Self {
        Block::from_sector(sector, FourBlockOffset::B0)
    }
}
