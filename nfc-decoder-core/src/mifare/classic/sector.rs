use core::{fmt, mem::transmute};

use crate::error::DecodeError;
use crate::mifare::classic::{Block, FourBlockOffset};

/// Represents a valid MIFARE Classic 1K sector index from 0 to 15.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Sector {
    S0 = 0,
    S1,
    S2,
    S3,
    S4,
    S5,
    S6,
    S7,
    S8,
    S9,
    S10,
    S11,
    S12,
    S13,
    S14,
    S15,
}

impl Sector {
    /// Gets the specified block offset from the current sector.
    pub fn block(&self, offset: FourBlockOffset) -> Block {
        Block::from_sector(*self, offset)
    }

    /// The sector trailer holding the keys and access bits of this sector.
    pub fn trailer(&self) -> Block {
        self.block(FourBlockOffset::TRAILER)
    }

    /// Iterate all sectors in order.
    pub fn iter() -> impl Iterator<Item = Sector> {
        (0u8..=Self::S15 as u8).map(Sector::from_u8)
    }

    /// Iterate the blocks of this sector, ending with the sector trailer.
    pub fn iter_blocks(&self) -> impl Iterator<Item = Block> {
        let sector = *self;
        FourBlockOffset::iter().map(move |offset| sector.block(offset))
    }

    /// Converts a u8 sector index into a `Sector` enum variant.
    ///
    /// # Panics
    /// This code will panic if `sector` is greater than 15 because there are only 16 sectors in MIFARE Classic 1K.
    fn from_u8(sector: u8) -> Self {
        assert!(sector <= Self::S15 as u8);
        unsafe { transmute(sector) }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sector {}", *self as u8)
    }
}

/// Converts a `Sector` into a `u8` sector address.
impl From<Sector> for u8 {
    fn from(value: Sector) -> Self {
        value as u8
    }
}

/// Attempts conversion of a `u8` into a `Sector`.
///
/// Valid values for a sector are 0..=15
impl TryFrom<u8> for Sector {
    type Error = DecodeError;

    fn try_from(sector: u8) -> Result<Self, Self::Error> {
        match sector {
            // 0 to 15 (inclusive) are always valid 1K sectors.
            0..=15 => Ok(Sector::from_u8(sector)),
            _ => Err(DecodeError::InvalidSector(sector)),
        }
    }
}

/// Converts a block address into its corresponding sector.
impl From<Block> for Sector {
    fn from(value: Block) -> Self {
        // Blocks never exceed 63, so this is always a valid sector.
        Sector::from_u8(u8::from(value) / 4)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::format;

    #[test]
    fn sector_try_from_u8() {
        for i in u8::MIN..=15u8 {
            let s = Sector::try_from(i).unwrap();
            assert_eq!(i, s as u8);
            assert_eq!(i, u8::from(s));
        }

        for i in 16u8..=u8::MAX {
            assert_eq!(Err(DecodeError::InvalidSector(i)), Sector::try_from(i));
        }
    }

    #[test]
    fn sector_from_u8() {
        for i in u8::MIN..=15u8 {
            let sector = Sector::from_u8(i);
            assert_eq!(i, sector as u8);
        }

        for i in 16u8..=u8::MAX {
            let result = std::panic::catch_unwind(|| Sector::from_u8(i));
            assert!(result.is_err());
        }
    }

    #[test]
    fn sector_block() {
        for s in Sector::iter() {
            for offset in FourBlockOffset::iter() {
                let block = s.block(offset);
                assert_eq!((s as u8 * 4) + offset as u8, u8::from(block));
            }
            assert_eq!(s as u8 * 4 + 3, u8::from(s.trailer()));
            assert!(s.trailer().is_sector_trailer());
        }
    }

    #[test]
    fn sector_iter() {
        assert_eq!(16, Sector::iter().count());
        assert!(Sector::iter().map(u8::from).eq(0u8..=15));
    }

    #[test]
    fn sector_iter_blocks() {
        for s in Sector::iter() {
            let first = s as u8 * 4;
            assert!(s.iter_blocks().map(u8::from).eq(first..first + 4));
        }
    }

    #[test]
    fn sector_display() {
        for s in Sector::iter() {
            assert_eq!(format!("{}", s), format!("Sector {}", s as u8));
        }
    }

    #[test]
    fn sector_from_block() {
        for i in u8::MIN..=63u8 {
            let block = Block::try_from(i).unwrap();
            let sector = Sector::from(block);
            assert_eq!(i / 4, sector as u8);
        }
    }
}
