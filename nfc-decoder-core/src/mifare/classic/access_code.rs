use core::fmt;

use super::permissions::{lookup_permissions, Permissions};
use super::FourBlockOffset;
use crate::error::DecodeError;

/// The access condition bits `C1 C2 C3` of one block, C1 most significant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccessCode(u8);

impl AccessCode {
    /// Access code of a sector trailer in transport configuration (`001`).
    pub const TRANSPORT_TRAILER: AccessCode = AccessCode(0b001);

    pub const fn from_bits(c1: bool, c2: bool, c3: bool) -> Self {
        AccessCode(((c1 as u8) << 2) | ((c2 as u8) << 1) | c3 as u8)
    }

    pub const fn c1(self) -> bool {
        self.0 & 0b100 != 0
    }

    pub const fn c2(self) -> bool {
        self.0 & 0b010 != 0
    }

    pub const fn c3(self) -> bool {
        self.0 & 0b001 != 0
    }

    /// Iterate all eight codes from `000` to `111`.
    pub fn iter() -> impl Iterator<Item = AccessCode> {
        (0u8..8).map(AccessCode)
    }

    /// Permissions granted by this code to the block at `offset`.
    pub fn permissions(self, offset: FourBlockOffset) -> Permissions {
        lookup_permissions(self, offset.is_sector_trailer())
    }
}

impl TryFrom<u8> for AccessCode {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0..=7 => Ok(AccessCode(value)),
            _ => Err(DecodeError::InvalidFormat {
                expected: "an access code between 0 and 7",
            }),
        }
    }
}

impl From<AccessCode> for u8 {
    fn from(value: AccessCode) -> Self {
        value.0
    }
}

/// Formats as the three bits `C1C2C3`, e.g. `001`.
impl fmt::Display for AccessCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03b}", self.0)
    }
}
