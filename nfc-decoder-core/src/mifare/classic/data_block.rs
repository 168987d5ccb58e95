use crate::encoding::{encode, ByteEncoding};

/// The first eight bytes of a data block: four data bytes followed by their stored complement.
///
/// Value blocks store their value once plain and once inverted, other layouts frequently do
/// not, so a mismatch is informational.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DataBlockCheck {
    pub data: [u8; 4],
    pub stored: [u8; 4],
}

impl DataBlockCheck {
    pub fn from_bytes(bytes: &[u8; 16]) -> Self {
        DataBlockCheck {
            data: [bytes[0], bytes[1], bytes[2], bytes[3]],
            stored: [bytes[4], bytes[5], bytes[6], bytes[7]],
        }
    }

    /// Builds a check from partially known bytes, `None` unless bytes 0 to 7 are known.
    pub fn from_partial(bytes: &[Option<u8>; 16]) -> Option<Self> {
        let mut known = [0u8; 8];
        for (slot, byte) in known.iter_mut().zip(bytes.iter()) {
            *slot = (*byte)?;
        }
        Some(DataBlockCheck {
            data: [known[0], known[1], known[2], known[3]],
            stored: [known[4], known[5], known[6], known[7]],
        })
    }

    /// All four data bytes are zero.
    pub fn is_empty(&self) -> bool {
        self.data == [0; 4]
    }

    /// The complement of the data bytes.
    pub fn computed(&self) -> [u8; 4] {
        self.data.map(|b| !b)
    }

    pub fn matches(&self) -> bool {
        self.computed() == self.stored
    }

    pub fn encodings(&self) -> [ByteEncoding; 4] {
        self.data.map(encode)
    }
}
