mod byte_encoding;
mod input;

pub use byte_encoding::encode;
pub use byte_encoding::ByteEncoding;
pub use byte_encoding::UNPRINTABLE;
pub use input::parse_input;
pub use input::InputBase;
pub use input::InputBytes;
pub use input::MAX_INPUT_BYTES;
