mod access_bits;
mod access_code;
mod access_conditions;
mod block;
mod data_block;
mod manufacturer_block;
mod permissions;
mod sector;
mod trailer;

pub use access_bits::AccessBits;
pub use access_bits::AccessByte;
pub use access_bits::ChecksumError;
pub use access_code::AccessCode;
pub use access_conditions::AccessConditions;
pub use block::Block;
pub use block::FourBlockOffset;
pub use data_block::DataBlockCheck;
pub use manufacturer_block::ManufacturerBlock;
pub use permissions::data_block_permissions;
pub use permissions::lookup_permissions;
pub use permissions::trailer_permissions;
pub use permissions::Access;
pub use permissions::BlockUsage;
pub use permissions::DataBlockPermissions;
pub use permissions::Permissions;
pub use permissions::TrailerPermissions;
pub use permissions::KEY_B_READABLE;
pub use sector::Sector;
pub use trailer::SectorTrailer;
