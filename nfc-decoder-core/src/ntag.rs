//! Plain text recovery from NTAG21x page data.

use core::fmt;

/// Writes the ASCII text found in `pages` to `out`.
///
/// Control characters (`0x00` to `0x1F`) are dropped. A byte outside ASCII or an unread byte
/// ends the current page, reading resumes with the next one.
pub fn write_text<'a, W, I>(pages: I, out: &mut W) -> fmt::Result
where
    W: fmt::Write,
    I: IntoIterator<Item = &'a [Option<u8>]>,
{
    for page in pages {
        for byte in page {
            match *byte {
                Some(b) if b < 0x20 => continue,
                Some(b) if b.is_ascii() => out.write_char(char::from(b))?,
                _ => break,
            }
        }
    }
    Ok(())
}

/// Collects the ASCII text found in `pages`, see [`write_text`].
#[cfg(feature = "std")]
pub fn extract_text<'a, I>(pages: I) -> std::string::String
where
    I: IntoIterator<Item = &'a [Option<u8>]>,
{
    let mut text = std::string::String::new();
    // Writing to a `String` never fails.
    let _ = write_text(pages, &mut text);
    text
}
