use core::fmt::{self, Write};

use heapless::String;

/// Placeholder shown for values with no printable character.
pub const UNPRINTABLE: &str = "xxx";

/// Widest character cell, `"s.hyphen"`.
const CHAR_CAPACITY: usize = 8;

/// One byte rendered in every supported base, alongside its bitwise complement.
///
/// Created once per input byte by [`encode`] and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteEncoding {
    value: u8,
    inverted: u8,
    binary: String<8>,
    binary_inverted: String<8>,
    hex: String<2>,
    hex_inverted: String<2>,
    octal: String<3>,
    octal_inverted: String<3>,
    character: String<CHAR_CAPACITY>,
    character_inverted: String<CHAR_CAPACITY>,
}

impl ByteEncoding {
    /// The original byte.
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Bitwise complement of the original byte, always `255 - value`.
    pub fn inverted(&self) -> u8 {
        self.inverted
    }

    /// Eight `0`/`1` characters, most significant bit first.
    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn binary_inverted(&self) -> &str {
        &self.binary_inverted
    }

    /// Two uppercase hexadecimal digits.
    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn hex_inverted(&self) -> &str {
        &self.hex_inverted
    }

    /// Three zero padded octal digits.
    pub fn octal(&self) -> &str {
        &self.octal
    }

    pub fn octal_inverted(&self) -> &str {
        &self.octal_inverted
    }

    /// The printable character, a named placeholder (`space`, `delete`, `s.hyphen`) or [`UNPRINTABLE`].
    pub fn character(&self) -> &str {
        &self.character
    }

    /// The printable character of the inverted value or [`UNPRINTABLE`].
    ///
    /// Accepts 32..=135 and 160..=255 and never substitutes a named placeholder, unlike
    /// [`ByteEncoding::character`].
    pub fn character_inverted(&self) -> &str {
        &self.character_inverted
    }
}

impl From<u8> for ByteEncoding {
    fn from(value: u8) -> Self {
        encode(value)
    }
}

/// Renders `value` and its complement in binary, hexadecimal, octal and character form.
///
/// Total over `u8`, there is no failure case.
pub fn encode(value: u8) -> ByteEncoding {
    let inverted = !value;

    ByteEncoding {
        value,
        inverted,
        binary: fixed(format_args!("{:08b}", value)),
        binary_inverted: fixed(format_args!("{:08b}", inverted)),
        hex: fixed(format_args!("{:02X}", value)),
        hex_inverted: fixed(format_args!("{:02X}", inverted)),
        octal: fixed(format_args!("{:03o}", value)),
        octal_inverted: fixed(format_args!("{:03o}", inverted)),
        character: character(value),
        character_inverted: character_inverted(inverted),
    }
}

fn character(value: u8) -> String<CHAR_CAPACITY> {
    match value {
        32 => fixed(format_args!("space")),
        127 => fixed(format_args!("delete")),
        173 => fixed(format_args!("s.hyphen")),
        33..=126 | 161..=255 => fixed(format_args!("{}", char::from(value))),
        _ => fixed(format_args!("{}", UNPRINTABLE)),
    }
}

// Wider range than `character` and no named placeholders.
fn character_inverted(value: u8) -> String<CHAR_CAPACITY> {
    match value {
        32..=135 | 160..=255 => fixed(format_args!("{}", char::from(value))),
        _ => fixed(format_args!("{}", UNPRINTABLE)),
    }
}

fn fixed<const N: usize>(args: fmt::Arguments<'_>) -> String<N> {
    let mut out = String::new();
    // Every caller formats at most N bytes.
    let _ = out.write_fmt(args);
    out
}
