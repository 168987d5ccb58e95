//! Scanning of Flipper Zero `.nfc` dump files.
//!
//! Only the `Block N: ..` and `Page N: ..` lines are read, every other line is ignored.
//! Bytes the reader could not recover are written as `??` and kept as `None`.

mod mifare_classic;

use std::collections::BTreeMap;
use std::string::String;

use hex::FromHex;

use crate::error::DecodeError;
use crate::mifare::classic::Block;
use crate::ntag;

pub use mifare_classic::ClassicReport;
pub use mifare_classic::DataBlockReport;
pub use mifare_classic::SectorReport;

/// The sixteen bytes of a MIFARE Classic block, `None` where unread.
pub type BlockBytes = [Option<u8>; 16];

/// The four bytes of an NTAG page, `None` where unread.
pub type PageBytes = [Option<u8>; 4];

/// Highest page number of the NTAG21x family (NTAG216).
pub const MAX_PAGE: u16 = 230;

/// The block and page data of a dump file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NfcDump {
    blocks: BTreeMap<Block, BlockBytes>,
    pages: BTreeMap<u16, PageBytes>,
}

impl NfcDump {
    pub fn parse(text: &str) -> Result<Self, DecodeError> {
        let mut dump = NfcDump::default();

        for line in text.lines().map(str::trim) {
            if let Some(entry) = line.strip_prefix("Block ") {
                let (number, data) = split_entry(entry)?;
                let number: u8 = number
                    .parse()
                    .map_err(|_| DecodeError::invalid_format("a block number"))?;
                let block = Block::try_from(number)?;
                if dump.blocks.insert(block, parse_bytes(data)?).is_some() {
                    log::warn!("{} appears more than once, keeping the last", block);
                }
            } else if let Some(entry) = line.strip_prefix("Page ") {
                let (number, data) = split_entry(entry)?;
                let page: u16 = number
                    .parse()
                    .map_err(|_| DecodeError::invalid_format("a page number"))?;
                if page > MAX_PAGE {
                    return Err(DecodeError::InvalidPage(page));
                }
                if dump.pages.insert(page, parse_bytes(data)?).is_some() {
                    log::warn!("Page {} appears more than once, keeping the last", page);
                }
            }
        }

        log::debug!(
            "Parsed {} block(s) and {} page(s)",
            dump.blocks.len(),
            dump.pages.len()
        );
        Ok(dump)
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.pages.is_empty()
    }

    /// The raw bytes of `block`, if the dump has it.
    pub fn block_bytes(&self, block: Block) -> Option<&BlockBytes> {
        self.blocks.get(&block)
    }

    /// The bytes of `block` if the dump has it and every byte was read.
    pub fn block(&self, block: Block) -> Option<[u8; 16]> {
        let bytes = self.blocks.get(&block)?;
        let mut out = [0u8; 16];
        for (slot, byte) in out.iter_mut().zip(bytes) {
            *slot = (*byte)?;
        }
        Some(out)
    }

    /// Iterate blocks in ascending order.
    pub fn blocks(&self) -> impl Iterator<Item = (Block, &BlockBytes)> {
        self.blocks.iter().map(|(block, bytes)| (*block, bytes))
    }

    /// Iterate pages in ascending order.
    pub fn pages(&self) -> impl Iterator<Item = (u16, &PageBytes)> {
        self.pages.iter().map(|(page, bytes)| (*page, bytes))
    }

    /// The ASCII text held in the pages, see [`ntag::write_text`].
    pub fn page_text(&self) -> String {
        ntag::extract_text(self.pages.values().map(|page| &page[..]))
    }
}

fn split_entry(entry: &str) -> Result<(&str, &str), DecodeError> {
    let (number, data) = entry
        .split_once(':')
        .ok_or(DecodeError::invalid_format("`N: XX XX ..` after Block or Page"))?;
    Ok((number.trim(), data.trim()))
}

fn parse_bytes<const N: usize>(data: &str) -> Result<[Option<u8>; N], DecodeError> {
    let invalid = DecodeError::invalid_format("space separated hex bytes or ?? for each byte");
    let mut out = [None; N];
    let mut tokens = data.split_whitespace();

    for slot in out.iter_mut() {
        let token = tokens.next().ok_or(invalid)?;
        *slot = match token {
            "??" => None,
            _ => Some(<[u8; 1]>::from_hex(token).map_err(|_| invalid)?[0]),
        };
    }

    if tokens.next().is_some() {
        return Err(invalid);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSIC: &str = "Filetype: Flipper NFC device
Version: 3
Device type: Mifare Classic
UID: DE AD BE EF
# Mifare Classic blocks, '??' means unknown data
Block 0: DE AD BE EF 22 08 04 00 62 63 64 65 66 67 68 69
Block 1: 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00
Block 3: FF FF FF FF FF FF FF 07 80 69 ?? ?? ?? ?? ?? ??
";

    const NTAG: &str = "Device type: NTAG213
Pages total: 45
Page 0: 04 A1 B2 C3
Page 4: 03 10 48 69
Page 5: 21 FE 00 00
";

    #[test]
    fn parse_blocks() {
        let dump = NfcDump::parse(CLASSIC).unwrap();
        assert_eq!(3, dump.blocks().count());
        assert_eq!(0, dump.pages().count());

        let block0 = dump.block(Block::try_from(0).unwrap()).unwrap();
        assert_eq!([0xDEu8, 0xAD, 0xBE, 0xEF], block0[..4]);

        let block3 = Block::try_from(3).unwrap();
        assert_eq!(None, dump.block(block3));
        let raw = dump.block_bytes(block3).unwrap();
        assert_eq!(Some(0x07), raw[7]);
        assert_eq!(None, raw[15]);

        assert_eq!(None, dump.block_bytes(Block::try_from(2).unwrap()));
    }

    #[test]
    fn parse_pages() {
        let dump = NfcDump::parse(NTAG).unwrap();
        let pages: std::vec::Vec<u16> = dump.pages().map(|(page, _)| page).collect();
        assert_eq!(pages, [0u16, 4, 5]);
        assert_eq!("Hi!", dump.page_text());
    }

    #[test]
    fn ignores_other_lines() {
        let dump = NfcDump::parse("Filetype: Flipper NFC device\nPages read: 45\n").unwrap();
        assert!(dump.is_empty());
    }

    #[test]
    fn invalid_lines() {
        let bad = [
            "Block 0 DE AD",
            "Block x: 00",
            "Block 0: DE AD",
            "Block 0: 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00",
            "Block 0: 0G 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00",
            "Page 1: 000 00 00 00",
            "Page 1: 00 00 00",
        ];
        for line in bad {
            assert!(
                matches!(NfcDump::parse(line), Err(DecodeError::InvalidFormat { .. })),
                "{}",
                line
            );
        }
    }

    #[test]
    fn out_of_range_numbers() {
        let line = "Block 64: 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00";
        assert_eq!(Err(DecodeError::InvalidBlock(64)), NfcDump::parse(line));
        assert_eq!(Err(DecodeError::InvalidPage(231)), NfcDump::parse("Page 231: 00 00 00 00"));
    }
}
