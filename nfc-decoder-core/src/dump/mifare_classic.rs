use std::vec::Vec;

use super::NfcDump;
use crate::mifare::classic::{
    AccessConditions, Block, ChecksumError, DataBlockCheck, ManufacturerBlock, Sector,
    SectorTrailer,
};

/// A data block with non-zero data bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataBlockReport {
    pub block: Block,
    pub check: DataBlockCheck,
}

/// Everything decoded from one sector of a MIFARE Classic 1K dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorReport {
    pub sector: Sector,
    /// Data blocks in order, skipping blocks with all zero or unread data bytes.
    pub data_blocks: Vec<DataBlockReport>,
    /// `None` when the trailer or its access bytes are missing from the dump.
    pub trailer: Option<SectorTrailer>,
    pub access: Option<Result<AccessConditions, ChecksumError>>,
}

impl SectorReport {
    /// Decodes `sector`, `None` if the dump holds none of its blocks.
    pub fn from_dump(dump: &NfcDump, sector: Sector) -> Option<Self> {
        let mut present = false;
        let mut data_blocks = Vec::new();
        let mut trailer = None;

        for block in sector.iter_blocks() {
            let Some(bytes) = dump.block_bytes(block) else {
                continue;
            };
            present = true;

            if block.is_sector_trailer() {
                trailer = SectorTrailer::from_partial(bytes);
                if trailer.is_none() {
                    log::warn!("{} of {} has unread access bits", block, sector);
                }
                continue;
            }

            match DataBlockCheck::from_partial(bytes) {
                Some(check) if !check.is_empty() => data_blocks.push(DataBlockReport { block, check }),
                Some(_) => log::trace!("Skipping {}, data bytes are zero", block),
                None => log::debug!("Skipping {}, data bytes are unread", block),
            }
        }

        if !present {
            return None;
        }

        let access = trailer.map(|t| t.access_conditions());
        Some(SectorReport {
            sector,
            data_blocks,
            trailer,
            access,
        })
    }
}

/// A decoded MIFARE Classic 1K dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassicReport {
    /// Block 0, when every byte of it was read.
    pub manufacturer: Option<ManufacturerBlock>,
    pub sectors: Vec<SectorReport>,
}

impl ClassicReport {
    pub fn from_dump(dump: &NfcDump) -> Self {
        let manufacturer = dump
            .block(Block::from(Sector::S0))
            .map(|bytes| ManufacturerBlock::from_bytes(&bytes));
        let sectors = Sector::iter()
            .filter_map(|sector| SectorReport::from_dump(dump, sector))
            .collect();

        ClassicReport {
            manufacturer,
            sectors,
        }
    }
}
