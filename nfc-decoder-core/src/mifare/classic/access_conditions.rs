use super::{AccessBits, AccessCode, ChecksumError, FourBlockOffset, Permissions};
use crate::error::DecodeError;

/// The access conditions of one sector, decoded from its trailer's access bytes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AccessConditions {
    bits: AccessBits,
    codes: [AccessCode; 4],
}

impl AccessConditions {
    /// Parses, validates and decodes six hexadecimal characters such as `FF0780`.
    pub fn decode(hex: &str) -> Result<Self, DecodeError> {
        let bits = AccessBits::parse(hex)?;
        Ok(Self::from_bits(bits)?)
    }

    /// Decodes access bits that pass every complement check.
    pub fn from_bits(bits: AccessBits) -> Result<Self, ChecksumError> {
        if let Err(error) = bits.validate_checksum() {
            log::warn!("Access bits {} failed validation: {}", bits, error);
            return Err(error);
        }
        Ok(Self::from_bits_unchecked(bits))
    }

    /// Decodes access bits without checking them, for diagnosing corrupt trailers.
    pub fn from_bits_unchecked(bits: AccessBits) -> Self {
        let codes = bits.derive_access_codes();
        log::debug!(
            "Access bits {} decode to {} {} {} {}",
            bits,
            codes[0],
            codes[1],
            codes[2],
            codes[3]
        );
        AccessConditions { bits, codes }
    }

    pub fn bits(&self) -> AccessBits {
        self.bits
    }

    /// Access codes indexed by block offset, index 3 is the sector trailer.
    pub fn codes(&self) -> [AccessCode; 4] {
        self.codes
    }

    pub fn code(&self, offset: FourBlockOffset) -> AccessCode {
        self.codes[offset as usize]
    }

    /// Permissions of the block at `offset`, with trailer semantics for block 3.
    pub fn permissions(&self, offset: FourBlockOffset) -> Permissions {
        self.code(offset).permissions(offset)
    }

    /// Iterate blocks 0 to 3 with their access code and permissions.
    pub fn blocks(&self) -> impl Iterator<Item = (FourBlockOffset, AccessCode, Permissions)> + '_ {
        FourBlockOffset::iter().map(move |offset| (offset, self.code(offset), self.permissions(offset)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mifare::classic::{
        Access, AccessByte, BlockUsage, DataBlockPermissions, TrailerPermissions,
        KEY_B_READABLE,
    };
    use std::vec::Vec;

    #[test]
    fn decode_transport() {
        let conditions = AccessConditions::decode("FF0780").unwrap();
        assert_eq!(AccessBits::TRANSPORT, conditions.bits());
        let codes: Vec<u8> = conditions.codes().iter().map(|&c| u8::from(c)).collect();
        assert_eq!(codes, [0u8, 0, 0, 1]);
        assert!(matches!(
            conditions.permissions(FourBlockOffset::B3),
            Permissions::Trailer(_)
        ));
        for offset in [FourBlockOffset::B0, FourBlockOffset::B1, FourBlockOffset::B2] {
            assert!(matches!(conditions.permissions(offset), Permissions::DataBlock(_)));
        }
    }

    // Access bits used by MIFARE Application Directory sectors.
    #[test]
    fn decode_mad_golden_vector() {
        let conditions = AccessConditions::decode("787788").unwrap();
        assert_eq!([0x78, 0x77, 0x88], conditions.bits().bytes());

        let data_block = Permissions::DataBlock(DataBlockPermissions {
            read: Access::KeyAOrB,
            write: Access::KeyB,
            increment: Access::Never,
            decrement: Access::Never,
            usage: BlockUsage::ReadWrite,
        });
        let trailer = Permissions::Trailer(TrailerPermissions {
            read_key_a: Access::Never,
            write_key_a: Access::KeyB,
            read_access_bits: Access::KeyAOrB,
            write_access_bits: Access::KeyB,
            read_key_b: Access::Never,
            write_key_b: Access::KeyB,
            warning: None,
        });

        let blocks: Vec<_> = conditions.blocks().collect();
        assert_eq!(
            blocks,
            [
                (FourBlockOffset::B0, AccessCode::try_from(0b100).unwrap(), data_block),
                (FourBlockOffset::B1, AccessCode::try_from(0b100).unwrap(), data_block),
                (FourBlockOffset::B2, AccessCode::try_from(0b100).unwrap(), data_block),
                (FourBlockOffset::B3, AccessCode::try_from(0b011).unwrap(), trailer),
            ]
        );
    }

    #[test]
    fn decode_invalid_format() {
        assert!(matches!(
            AccessConditions::decode("FF078"),
            Err(DecodeError::InvalidFormat { .. })
        ));
        assert!(matches!(
            AccessConditions::decode("GG0780"),
            Err(DecodeError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn decode_checksum_failure() {
        assert_eq!(
            Err(DecodeError::Checksum(ChecksumError::ByteMismatch {
                first: AccessByte::B6,
                second: AccessByte::B7,
            })),
            AccessConditions::decode("FE0780")
        );
    }

    #[test]
    fn unchecked_still_derives() {
        let bits = AccessBits::from_bytes([0x00, 0x07, 0x80]);
        assert!(AccessConditions::from_bits(bits).is_err());
        let conditions = AccessConditions::from_bits_unchecked(bits);
        assert_eq!(AccessCode::TRANSPORT_TRAILER, conditions.code(FourBlockOffset::TRAILER));
    }

    #[test]
    fn transport_trailer_warns() {
        let conditions = AccessConditions::decode("FF0780").unwrap();
        match conditions.permissions(FourBlockOffset::TRAILER) {
            Permissions::Trailer(t) => assert_eq!(Some(KEY_B_READABLE), t.warning),
            Permissions::DataBlock(_) => panic!("Expected trailer permissions"),
        }
    }
}
