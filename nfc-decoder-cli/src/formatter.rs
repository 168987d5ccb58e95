use std::fmt::{self, Write};

use nfc_decoder_core::dump::{ClassicReport, DataBlockReport, SectorReport};
use nfc_decoder_core::encoding::ByteEncoding;
use nfc_decoder_core::mifare::classic::{
    AccessConditions, DataBlockPermissions, FourBlockOffset, ManufacturerBlock, Permissions, Sector,
    TrailerPermissions,
};

const HEADERS: [&str; 10] = [
    "Hex", "Dec", "Oct", "Char", "Bin", "nBin", "nChar", "nOct", "nDec", "nHex",
];

/// Columns from this index on are right aligned.
const FIRST_INVERTED: usize = 5;

const LABEL_HEADER: &str = "S:B";

/// Width of the labels in the access rights listing.
const RIGHTS_WIDTH: usize = 20;

/// A table of byte encodings, one row per byte, optionally with a leading `S:B` column.
#[derive(Debug, Default)]
pub struct EncodingTable {
    labelled: bool,
    rows: Vec<(Option<String>, [String; 10])>,
    width: usize,
}

impl EncodingTable {
    pub fn new() -> Self {
        EncodingTable::default()
    }

    /// A table whose rows start with a `sector:block` label.
    pub fn labelled() -> Self {
        EncodingTable {
            labelled: true,
            ..EncodingTable::default()
        }
    }

    pub fn push(&mut self, encoding: &ByteEncoding) {
        self.push_row(None, encoding);
    }

    pub fn push_labelled(&mut self, label: String, encoding: &ByteEncoding) {
        self.push_row(Some(label), encoding);
    }

    fn push_row(&mut self, label: Option<String>, encoding: &ByteEncoding) {
        let cells = [
            encoding.hex().to_string(),
            encoding.value().to_string(),
            encoding.octal().to_string(),
            encoding.character().to_string(),
            encoding.binary().to_string(),
            encoding.binary_inverted().to_string(),
            encoding.character_inverted().to_string(),
            encoding.octal_inverted().to_string(),
            encoding.inverted().to_string(),
            encoding.hex_inverted().to_string(),
        ];
        let widest = cells
            .iter()
            .chain(label.iter())
            .map(|cell| cell.chars().count())
            .max()
            .unwrap_or(0);
        self.width = self.width.max(widest);
        self.rows.push((label, cells));
    }

    fn column_width(&self) -> usize {
        let header = HEADERS.iter().map(|h| h.len()).max().unwrap_or(0);
        self.width.max(header) + 1
    }

    pub fn render<W: Write>(&self, out: &mut W) -> fmt::Result {
        let width = self.column_width();

        if self.labelled {
            write!(out, "{:<width$}", LABEL_HEADER)?;
        }
        write_cells(out, HEADERS.iter().copied(), width)?;

        for (label, cells) in &self.rows {
            if self.labelled {
                write!(out, "{:<width$}", label.as_deref().unwrap_or(""))?;
            }
            write_cells(out, cells.iter().map(String::as_str), width)?;
        }
        Ok(())
    }
}

fn write_cells<'a, W: Write>(
    out: &mut W,
    cells: impl Iterator<Item = &'a str>,
    width: usize,
) -> fmt::Result {
    for (i, cell) in cells.enumerate() {
        if i < FIRST_INVERTED {
            write!(out, "{:<width$}", cell)?;
        } else {
            write!(out, "{:>width$}", cell)?;
        }
    }
    writeln!(out)
}

/// Output of the `encode` command: the table and the number of encodings produced.
pub fn render_encodings<W: Write>(encodings: &[ByteEncoding], out: &mut W) -> fmt::Result {
    let mut table = EncodingTable::new();
    for encoding in encodings {
        table.push(encoding);
    }
    table.render(out)?;
    writeln!(out)?;
    writeln!(out, "{} encodings completed.", encodings.len() * HEADERS.len())
}

/// Output of the `access` command for access bits that passed validation.
pub fn render_access_conditions<W: Write>(conditions: &AccessConditions, out: &mut W) -> fmt::Result {
    writeln!(out, "Access Bits (C1,C2,C3):")?;
    writeln!(out, "---------------------------")?;
    for (offset, code, _) in conditions.blocks() {
        write!(out, "{:<RIGHTS_WIDTH$}{}", format!("Block {}:", offset as u8), code)?;
        if offset.is_sector_trailer() {
            write!(out, " (Sector Trailer)")?;
        }
        writeln!(out)?;
    }

    writeln!(out)?;
    writeln!(out, "Access Rights:")?;
    writeln!(out, "-------------------------------")?;
    for (offset, _, permissions) in conditions.blocks() {
        if offset != FourBlockOffset::B0 {
            writeln!(out)?;
        }
        write!(out, "Block {}", offset as u8)?;
        if offset.is_sector_trailer() {
            write!(out, " (Sector Trailer)")?;
        }
        writeln!(out)?;
        match permissions {
            Permissions::Trailer(trailer) => render_trailer_permissions(&trailer, out)?,
            Permissions::DataBlock(data) => render_data_block_permissions(&data, out)?,
        }
    }
    Ok(())
}

fn render_trailer_permissions<W: Write>(p: &TrailerPermissions, out: &mut W) -> fmt::Result {
    let rows = [
        ("Read Key A:", p.read_key_a),
        ("Write Key A:", p.write_key_a),
        ("Read Access Bits:", p.read_access_bits),
        ("Write Access Bits:", p.write_access_bits),
        ("Read Key B:", p.read_key_b),
        ("Write Key B:", p.write_key_b),
    ];
    for (label, access) in rows {
        writeln!(out, "{:<RIGHTS_WIDTH$}{}", label, access)?;
    }
    writeln!(out, "{:<RIGHTS_WIDTH$}{}", "Warning:", p.warning.unwrap_or("None"))
}

fn render_data_block_permissions<W: Write>(p: &DataBlockPermissions, out: &mut W) -> fmt::Result {
    let rows = [
        ("Read block:", p.read),
        ("Write block:", p.write),
        ("Increment block:", p.increment),
        ("D/T/R block:", p.decrement),
    ];
    for (label, access) in rows {
        writeln!(out, "{:<RIGHTS_WIDTH$}{}", label, access)?;
    }
    writeln!(out, "{:<RIGHTS_WIDTH$}{}", "Application:", p.usage)
}

/// Output of the `m1k` command.
pub fn render_classic_report<W: Write>(report: &ClassicReport, out: &mut W) -> fmt::Result {
    for sector in &report.sectors {
        render_sector(sector, out)?;
    }

    match &report.manufacturer {
        Some(manufacturer) => render_manufacturer(manufacturer, out),
        None => writeln!(out, "Manufacturer block not fully read"),
    }
}

fn render_sector<W: Write>(sector: &SectorReport, out: &mut W) -> fmt::Result {
    for data_block in &sector.data_blocks {
        render_data_block(data_block, out)?;
    }

    let Some(trailer) = &sector.trailer else {
        return Ok(());
    };
    writeln!(out, "{} Trailer, Access Bits {}", sector.sector, trailer.access_bits)?;
    match &sector.access {
        Some(Ok(conditions)) => render_access_conditions(conditions, out)?,
        Some(Err(error)) => writeln!(out, "{}", error)?,
        None => {}
    }
    writeln!(out)
}

fn render_data_block<W: Write>(report: &DataBlockReport, out: &mut W) -> fmt::Result {
    let label = format!("{}:{}", Sector::from(report.block) as u8, report.block.offset() as u8);
    let mut table = EncodingTable::labelled();
    for encoding in report.check.encodings().iter() {
        table.push_labelled(label.clone(), encoding);
    }
    table.render(out)?;

    writeln!(out, "Card Checksum: {}", hex_bytes(&report.check.stored))?;
    write!(out, "Calc Checksum: {}", hex_bytes(&report.check.computed()))?;
    if !report.check.matches() {
        write!(out, " MISMATCH")?;
    }
    writeln!(out)?;
    writeln!(out)
}

fn render_manufacturer<W: Write>(block: &ManufacturerBlock, out: &mut W) -> fmt::Result {
    writeln!(out, "UID: {}", hex_bytes(&block.uid))?;
    write!(out, "UID BCC: {:02X}", block.bcc)?;
    if !block.bcc_matches() {
        write!(out, " MISMATCH")?;
    }
    writeln!(out)?;
    writeln!(out, "SAK: {:02X}", block.sak)?;
    writeln!(out, "ATQA: {}", hex_bytes(&block.atqa))?;
    writeln!(out, "Manufacturer Data: {}", hex_bytes(&block.manufacturer_data))
}

/// Space separated uppercase hex, e.g. `DE AD BE EF`.
fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use nfc_decoder_core::dump::NfcDump;
    use nfc_decoder_core::encoding::encode;

    fn render(f: impl FnOnce(&mut String) -> fmt::Result) -> String {
        let mut out = String::new();
        f(&mut out).unwrap();
        out
    }

    #[test]
    fn encoding_table() {
        let encodings = [encode(0x41)];
        let out = render(|out| render_encodings(&encodings, out));
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(
            "Hex      Dec      Oct      Char     Bin           nBin    nChar     nOct     nDec     nHex",
            lines[0]
        );
        assert_eq!(
            "41       65       101      A        01000001  10111110        ¾      276      190       BE",
            lines[1]
        );
        assert_eq!("", lines[2]);
        assert_eq!("10 encodings completed.", lines[3]);
    }

    #[test]
    fn encoding_count() {
        let encodings: Vec<_> = [1u8, 2, 3].into_iter().map(encode).collect();
        let out = render(|out| render_encodings(&encodings, out));
        assert!(out.ends_with("30 encodings completed.\n"));
    }

    #[test]
    fn labelled_table() {
        let mut table = EncodingTable::labelled();
        table.push_labelled("0:1".to_string(), &encode(0x20));
        let out = render(|out| table.render(out));
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("S:B      Hex      Dec"));
        assert!(lines[1].starts_with("0:1      20       32       040      space    00100000"));
    }

    #[test]
    fn transport_access_rights() {
        let conditions = AccessConditions::decode("FF0780").unwrap();
        let out = render(|out| render_access_conditions(&conditions, out));

        assert!(out.starts_with("Access Bits (C1,C2,C3):\n"));
        assert!(out.contains("Block 0:            000\n"));
        assert!(out.contains("Block 3:            001 (Sector Trailer)\n"));
        assert!(out.contains("Block 3 (Sector Trailer)\nRead Key A:         Never\n"));
        assert!(out.contains("Read block:         Key A|B\n"));
        assert!(out.contains("Application:        Transport\n"));
        assert!(out.contains("Write Access Bits:  Key A\n"));
        assert!(out.contains("Warning:            Key A is able to read Key B\n"));
    }

    #[test]
    fn access_rights_without_warning() {
        let conditions = AccessConditions::decode("787788").unwrap();
        let out = render(|out| render_access_conditions(&conditions, out));
        assert!(out.contains("Block 3:            011 (Sector Trailer)\n"));
        assert!(out.contains("Warning:            None\n"));
        assert!(out.contains("Write block:        Key B\n"));
    }

    #[test]
    fn classic_report() {
        let dump = NfcDump::parse(
            "Block 0: DE AD BE EF 22 08 04 00 62 63 64 65 66 67 68 69
Block 1: 01 02 03 04 FE FD FC FB 00 00 00 00 00 00 00 00
Block 3: FF FF FF FF FF FF FF 07 80 69 FF FF FF FF FF FF
Block 7: FF FF FF FF FF FF 00 00 00 69 FF FF FF FF FF FF",
        )
        .unwrap();
        let report = ClassicReport::from_dump(&dump);
        let out = render(|out| render_classic_report(&report, out));

        assert!(out.contains("\n0:1      01       1"));
        assert!(out.contains("Card Checksum: 22 08 04 00\nCalc Checksum: 21 52 41 10 MISMATCH\n"));
        assert!(out.contains("Card Checksum: FE FD FC FB\nCalc Checksum: FE FD FC FB\n"));
        assert!(out.contains("Sector 0 Trailer, Access Bits FF0780\nAccess Bits (C1,C2,C3):\n"));
        assert!(out.contains("Sector 1 Trailer, Access Bits 000000\nSomething incorrect in byte 7 or 6\n"));
        assert!(out.ends_with(
            "UID: DE AD BE EF\nUID BCC: 22\nSAK: 08\nATQA: 04 00\nManufacturer Data: 62 63 64 65 66 67 68 69\n"
        ));
    }

    #[test]
    fn missing_manufacturer_block() {
        let dump = NfcDump::parse("Block 1: 01 02 03 04 FE FD FC FB 00 00 00 00 00 00 00 00").unwrap();
        let out = render(|out| render_classic_report(&ClassicReport::from_dump(&dump), out));
        assert!(out.ends_with("Manufacturer block not fully read\n"));
    }
}
