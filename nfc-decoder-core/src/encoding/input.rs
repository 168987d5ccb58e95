use heapless::Vec;

use crate::error::DecodeError;

/// Max number of values accepted from a single input string.
pub const MAX_INPUT_BYTES: usize = 256;

/// Bytes parsed from user input, in input order.
pub type InputBytes = Vec<u8, MAX_INPUT_BYTES>;

/// The notation a user supplied byte values in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputBase {
    /// Whitespace separated groups of `0`/`1`.
    Binary,
    /// Four bit groups, each a decimal digit, read together as one number.
    Bcd,
    /// Each non-space character by code point.
    Char,
    /// Whitespace separated decimal numbers.
    Decimal,
    /// Whitespace separated one or two digit hexadecimal values.
    Hex,
    /// Whitespace separated octal numbers.
    Octal,
}

impl InputBase {
    fn expected(self) -> &'static str {
        match self {
            InputBase::Binary => "binary values between 0 and 11111111",
            InputBase::Bcd => "four bit BCD digits forming a number up to 255",
            InputBase::Char => "characters with code points up to 255",
            InputBase::Decimal => "decimal values between 0 and 255",
            InputBase::Hex => "hexadecimal values between 0 and FF",
            InputBase::Octal => "octal values between 0 and 377",
        }
    }
}

/// Parses `input` written in `base` into byte values.
///
/// Fails with [`DecodeError::InvalidFormat`] if any value is malformed or does not fit in a byte,
/// if there are no values, or if there are more than [`MAX_INPUT_BYTES`] values.
pub fn parse_input(base: InputBase, input: &str) -> Result<InputBytes, DecodeError> {
    let mut bytes = InputBytes::new();

    match base {
        InputBase::Bcd => push(&mut bytes, parse_bcd(input)?)?,
        InputBase::Char => {
            for c in input.chars().filter(|&c| c != ' ') {
                let value = u8::try_from(c).map_err(|_| DecodeError::invalid_format(base.expected()))?;
                push(&mut bytes, value)?;
            }
        }
        InputBase::Binary => parse_tokens(&mut bytes, input, base, 2, usize::MAX)?,
        InputBase::Decimal => parse_tokens(&mut bytes, input, base, 10, usize::MAX)?,
        InputBase::Hex => parse_tokens(&mut bytes, input, base, 16, 2)?,
        InputBase::Octal => parse_tokens(&mut bytes, input, base, 8, usize::MAX)?,
    }

    if bytes.is_empty() {
        return Err(DecodeError::invalid_format(base.expected()));
    }

    log::debug!("Parsed {} {:?} value(s)", bytes.len(), base);
    Ok(bytes)
}

fn parse_tokens(
    bytes: &mut InputBytes,
    input: &str,
    base: InputBase,
    radix: u32,
    max_digits: usize,
) -> Result<(), DecodeError> {
    for token in input.split_whitespace() {
        // `from_str_radix` also takes a leading sign, so check the digits first.
        if token.len() > max_digits || !token.chars().all(|c| c.is_digit(radix)) {
            return Err(DecodeError::invalid_format(base.expected()));
        }
        let value = u8::from_str_radix(token, radix)
            .map_err(|_| DecodeError::invalid_format(base.expected()))?;
        push(bytes, value)?;
    }
    Ok(())
}

fn parse_bcd(input: &str) -> Result<u8, DecodeError> {
    let invalid = DecodeError::invalid_format(InputBase::Bcd.expected());
    let mut value: u8 = 0;
    let mut digits = 0;

    for group in input.split_whitespace() {
        if group.len() % 4 != 0 || !group.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(invalid);
        }
        // Unspaced input longer than one nibble is read four bits at a time.
        for nibble in group.as_bytes().chunks(4) {
            let digit = nibble.iter().fold(0u8, |acc, b| (acc << 1) | (b - b'0'));
            if digit > 9 {
                return Err(invalid);
            }
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit))
                .ok_or(invalid)?;
            digits += 1;
        }
    }

    if digits == 0 {
        return Err(invalid);
    }
    Ok(value)
}

fn push(bytes: &mut InputBytes, value: u8) -> Result<(), DecodeError> {
    bytes
        .push(value)
        .map_err(|_| DecodeError::invalid_format("at most 256 values"))
}
