//! The `Strings` collaborator: converts
//! between a selected single-byte Windows code page, UTF-16LE byte runs,
//! and the caller-facing `String`. This is deliberately kept out of the
//! hot decode path — variant decoders in [`crate::variant`] only ever
//! materialize owned byte buffers; callers opt into the conversion cost
//! through the typed name accessors on [`crate::item::Item`].

use byteorder::{ByteOrder, LittleEndian};
use encoding_rs::Encoding;

use crate::codepage::Codepage;

fn encoding_for(codepage: Codepage) -> Option<&'static Encoding> {
    use Codepage::*;
    match codepage {
        Windows874 => Some(encoding_rs::WINDOWS_874),
        Windows932 => Some(encoding_rs::SHIFT_JIS),
        Windows936 => Some(encoding_rs::GBK),
        Windows949 => Some(encoding_rs::EUC_KR),
        Windows950 => Some(encoding_rs::BIG5),
        Windows1250 => Some(encoding_rs::WINDOWS_1250),
        Windows1251 => Some(encoding_rs::WINDOWS_1251),
        Windows1252 => Some(encoding_rs::WINDOWS_1252),
        Windows1253 => Some(encoding_rs::WINDOWS_1253),
        Windows1254 => Some(encoding_rs::WINDOWS_1254),
        Windows1255 => Some(encoding_rs::WINDOWS_1255),
        Windows1256 => Some(encoding_rs::WINDOWS_1256),
        Windows1257 => Some(encoding_rs::WINDOWS_1257),
        Windows1258 => Some(encoding_rs::WINDOWS_1258),
        Iso8859_2 => Some(encoding_rs::ISO_8859_2),
        Iso8859_3 => Some(encoding_rs::ISO_8859_3),
        Iso8859_4 => Some(encoding_rs::ISO_8859_4),
        Iso8859_5 => Some(encoding_rs::ISO_8859_5),
        Iso8859_6 => Some(encoding_rs::ISO_8859_6),
        Iso8859_7 => Some(encoding_rs::ISO_8859_7),
        Iso8859_8 => Some(encoding_rs::ISO_8859_8),
        Iso8859_10 => Some(encoding_rs::ISO_8859_10),
        Iso8859_13 => Some(encoding_rs::ISO_8859_13),
        Iso8859_14 => Some(encoding_rs::ISO_8859_14),
        Iso8859_15 => Some(encoding_rs::ISO_8859_15),
        Iso8859_16 => Some(encoding_rs::ISO_8859_16),
        Koi8R => Some(encoding_rs::KOI8_R),
        Koi8U => Some(encoding_rs::KOI8_U),
        // ASCII, ISO-8859-1, ISO-8859-9 and ISO-8859-11 have no dedicated
        // `encoding_rs` static (the WHATWG encoding standard folds the
        // first two into windows-1252 and doesn't model the latter two at
        // all); handled by direct Latin-1 passthrough below instead.
        Ascii | Iso8859_1 | Iso8859_9 | Iso8859_11 => None,
    }
}

/// Decodes a single-byte, code-page-encoded run. `bytes` should include
/// its NUL terminator if one is present; any trailing NUL is stripped from
/// the returned `String`.
pub fn decode_single_byte(bytes: &[u8], codepage: Codepage) -> String {
    let trimmed = match bytes.iter().position(|&b| b == 0) {
        Some(nul) => &bytes[..nul],
        None => bytes,
    };
    match encoding_for(codepage) {
        Some(encoding) => {
            let (text, _, _) = encoding.decode(trimmed);
            text.into_owned()
        }
        None => trimmed.iter().map(|&b| b as char).collect(),
    }
}

/// Decodes a UTF-16LE run given as raw code units (as produced by
/// [`crate::cursor::scan_utf16le_string`]); any trailing NUL code unit is
/// stripped.
pub fn decode_utf16le_units(units: &[u16]) -> String {
    let trimmed = match units.iter().position(|&u| u == 0) {
        Some(nul) => &units[..nul],
        None => units,
    };
    String::from_utf16_lossy(trimmed)
}

/// Decodes a UTF-16LE run given as a raw little-endian byte slice.
pub fn decode_utf16le_bytes(bytes: &[u8]) -> String {
    let mut units = Vec::with_capacity(bytes.len() / 2);
    for chunk in bytes.chunks_exact(2) {
        units.push(LittleEndian::read_u16(chunk));
    }
    decode_utf16le_units(&units)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_ascii_with_terminator() {
        assert_eq!(decode_single_byte(b"C:\\\0", Codepage::Ascii), "C:\\");
    }

    #[test]
    fn decodes_windows_1252() {
        // 0xe9 is "e acute" in windows-1252.
        assert_eq!(decode_single_byte(&[0xe9, 0], Codepage::Windows1252), "é");
    }

    #[test]
    fn decodes_utf16le_units() {
        let units: Vec<u16> = "test".encode_utf16().chain(std::iter::once(0)).collect();
        assert_eq!(decode_utf16le_units(&units), "test");
    }
}
