/// Block 0 of a MIFARE Classic 1K with a four byte UID, written by the manufacturer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ManufacturerBlock {
    pub uid: [u8; 4],
    /// Block check character, the XOR of the UID bytes.
    pub bcc: u8,
    pub sak: u8,
    pub atqa: [u8; 2],
    pub manufacturer_data: [u8; 8],
}

impl ManufacturerBlock {
    pub fn from_bytes(bytes: &[u8; 16]) -> Self {
        let mut manufacturer_data = [0u8; 8];
        manufacturer_data.copy_from_slice(&bytes[8..]);
        ManufacturerBlock {
            uid: [bytes[0], bytes[1], bytes[2], bytes[3]],
            bcc: bytes[4],
            sak: bytes[5],
            atqa: [bytes[6], bytes[7]],
            manufacturer_data,
        }
    }

    pub fn bcc_matches(&self) -> bool {
        self.uid.iter().fold(0, |acc, b| acc ^ b) == self.bcc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes() {
        let bytes = [
            0xDE, 0xAD, 0xBE, 0xEF, 0x22, 0x08, 0x04, 0x00, 0x62, 0x63, 0x64, 0x65, 0x66, 0x67,
            0x68, 0x69,
        ];
        let block = ManufacturerBlock::from_bytes(&bytes);
        assert_eq!([0xDE, 0xAD, 0xBE, 0xEF], block.uid);
        assert_eq!(0x22, block.bcc);
        assert_eq!(0x08, block.sak);
        assert_eq!([0x04, 0x00], block.atqa);
        assert_eq!([0x62, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, 0x69], block.manufacturer_data);
        assert!(block.bcc_matches());
    }

    #[test]
    fn bcc_mismatch() {
        let mut bytes = [0u8; 16];
        bytes[0] = 0x01;
        assert!(!ManufacturerBlock::from_bytes(&bytes).bcc_matches());
        bytes[4] = 0x01;
        assert!(ManufacturerBlock::from_bytes(&bytes).bcc_matches());
    }
}
