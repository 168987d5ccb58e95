use core::fmt;

use super::AccessCode;

/// Who may perform an operation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Access {
    Never,
    KeyA,
    KeyB,
    KeyAOrB,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Access::Never => "Never",
            Access::KeyA => "Key A",
            Access::KeyB => "Key B",
            Access::KeyAOrB => "Key A|B",
        })
    }
}

/// How a data block is meant to be used under a given access code.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BlockUsage {
    /// Transport configuration, everything allowed with either key.
    Transport,
    ReadWrite,
    /// Value block supporting increment/decrement.
    Value,
}

impl fmt::Display for BlockUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            BlockUsage::Transport => "Transport",
            BlockUsage::ReadWrite => "Read/Write Block",
            BlockUsage::Value => "Value Block",
        })
    }
}

/// Note attached to trailer codes where Key B is readable with Key A.
pub const KEY_B_READABLE: &str = "Key A is able to read Key B";

/// Sector trailer permissions for one access code.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TrailerPermissions {
    pub read_key_a: Access,
    pub write_key_a: Access,
    /// Reading the access bits (bytes 6 to 9).
    pub read_access_bits: Access,
    /// Writing the access bits (bytes 6 to 9).
    pub write_access_bits: Access,
    pub read_key_b: Access,
    pub write_key_b: Access,
    /// Set when Key B can be read and so cannot serve as a key.
    pub warning: Option<&'static str>,
}

/// Data block permissions for one access code.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DataBlockPermissions {
    pub read: Access,
    pub write: Access,
    pub increment: Access,
    /// Decrement, transfer and restore.
    pub decrement: Access,
    pub usage: BlockUsage,
}

/// Permissions of a block, interpreted as either a sector trailer or a data block.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Permissions {
    Trailer(TrailerPermissions),
    DataBlock(DataBlockPermissions),
}

const fn trailer(
    read_key_a: Access,
    write_key_a: Access,
    read_access_bits: Access,
    write_access_bits: Access,
    read_key_b: Access,
    write_key_b: Access,
    warning: Option<&'static str>,
) -> TrailerPermissions {
    TrailerPermissions {
        read_key_a,
        write_key_a,
        read_access_bits,
        write_access_bits,
        read_key_b,
        write_key_b,
        warning,
    }
}

const fn data(
    read: Access,
    write: Access,
    increment: Access,
    decrement: Access,
    usage: BlockUsage,
) -> DataBlockPermissions {
    DataBlockPermissions {
        read,
        write,
        increment,
        decrement,
        usage,
    }
}

use Access::*;

/// Sector trailer table, indexed by access code `C1C2C3`.
///
/// Based on:
/// - [NXP MF1S50YYX datasheet](https://www.nxp.com/docs/en/data-sheet/MF1S50YYX_V1.pdf), table 7
static TRAILER_PERMISSIONS: [TrailerPermissions; 8] = [
    /* 000 */ trailer(Never, KeyA, KeyA, Never, KeyA, KeyA, Some(KEY_B_READABLE)),
    /* 001 */ trailer(Never, KeyA, KeyA, KeyA, KeyA, KeyA, Some(KEY_B_READABLE)),
    /* 010 */ trailer(Never, Never, KeyA, Never, KeyA, Never, Some(KEY_B_READABLE)),
    /* 011 */ trailer(Never, KeyB, KeyAOrB, KeyB, Never, KeyB, None),
    /* 100 */ trailer(Never, KeyB, KeyAOrB, Never, Never, KeyB, None),
    /* 101 */ trailer(Never, Never, KeyAOrB, KeyB, Never, Never, None),
    /* 110 */ trailer(Never, Never, KeyAOrB, Never, Never, Never, None),
    /* 111 */ trailer(Never, Never, KeyAOrB, Never, Never, Never, None),
];

/// Data block table, indexed by access code `C1C2C3`.
///
/// Based on:
/// - [NXP MF1S50YYX datasheet](https://www.nxp.com/docs/en/data-sheet/MF1S50YYX_V1.pdf), table 8
static DATA_BLOCK_PERMISSIONS: [DataBlockPermissions; 8] = [
    /* 000 */ data(KeyAOrB, KeyAOrB, KeyAOrB, KeyAOrB, BlockUsage::Transport),
    /* 001 */ data(KeyAOrB, Never, Never, KeyAOrB, BlockUsage::Value),
    /* 010 */ data(KeyAOrB, Never, Never, Never, BlockUsage::ReadWrite),
    /* 011 */ data(KeyB, KeyB, Never, Never, BlockUsage::ReadWrite),
    /* 100 */ data(KeyAOrB, KeyB, Never, Never, BlockUsage::ReadWrite),
    /* 101 */ data(KeyB, Never, Never, Never, BlockUsage::ReadWrite),
    /* 110 */ data(KeyAOrB, KeyB, KeyB, KeyAOrB, BlockUsage::Value),
    /* 111 */ data(Never, Never, Never, Never, BlockUsage::ReadWrite),
];

pub fn trailer_permissions(code: AccessCode) -> &'static TrailerPermissions {
    &TRAILER_PERMISSIONS[usize::from(u8::from(code))]
}

pub fn data_block_permissions(code: AccessCode) -> &'static DataBlockPermissions {
    &DATA_BLOCK_PERMISSIONS[usize::from(u8::from(code))]
}

/// Looks up the permissions `code` grants, using sector trailer semantics when `is_trailer` is set.
pub fn lookup_permissions(code: AccessCode, is_trailer: bool) -> Permissions {
    if is_trailer {
        Permissions::Trailer(*trailer_permissions(code))
    } else {
        Permissions::DataBlock(*data_block_permissions(code))
    }
}
