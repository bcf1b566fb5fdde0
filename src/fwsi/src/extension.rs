//! Extension-block chain decoder (§4.5): parses the trailing
//! `{size, version, signature=0xBEEFxxxx, …}` records appended to a shell
//! item, dispatching on signature to one of the value shapes below. A
//! malformed or unsupported block stops the chain but never discards the
//! blocks already read — this mirrors how Explorer itself tolerates
//! partially-understood chains in the wild.

use byteorder::{ByteOrder, LittleEndian};
use uuid::Uuid;

use crate::codepage::Codepage;
use crate::cursor::{guid_at, scan_utf16le_string};
use crate::error::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionBlock {
    pub data_size: u16,
    pub version: u16,
    pub signature: u32,
    pub value: ExtensionValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExtensionValue {
    FileEntry(FileEntryExtensionValues),
    /// `0xBEEF0003`'s embedded shell-folder-identifier, present only when
    /// the block's total size is exactly 26 bytes.
    ShellFolder { identifier: Option<Uuid> },
    /// A version/size-checked value record not otherwise semantically
    /// parsed; the raw payload (after the common 8-byte header) is kept for
    /// callers that want it.
    Opaque(Vec<u8>),
    /// A signature not in the recognized `0xBEEFxxxx` set; still consumed.
    Unknown(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LocalizedName {
    Utf16(Vec<u16>),
    SingleByte(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileEntryExtensionValues {
    pub creation_time: u32,
    pub access_time: u32,
    /// MFT record number (low 48 bits) and sequence number (high 16 bits),
    /// present from version 7 onward.
    pub file_reference: Option<u64>,
    pub long_name: Vec<u16>,
    pub localized_name: Option<LocalizedName>,
}

/// `item_bytes` is the item's full byte range (after delegate unwrap and
/// variant decode); the chain's first-block offset is read from its last
/// two bytes.
pub fn parse_extension_chain(
    item_bytes: &[u8],
    codepage: Codepage,
) -> Result<Vec<ExtensionBlock>, Error> {
    let data_size = item_bytes.len();
    if data_size < 2 {
        return Ok(Vec::new());
    }
    let first_offset = LittleEndian::read_u16(&item_bytes[data_size - 2..data_size]) as usize;
    if first_offset < 4 || first_offset >= data_size - 2 {
        return Ok(Vec::new());
    }

    let mut blocks = Vec::new();
    let mut offset = first_offset;
    loop {
        if offset + 2 > item_bytes.len() {
            break;
        }
        let size = LittleEndian::read_u16(&item_bytes[offset..offset + 2]) as usize;
        if size == 0 {
            break;
        }
        if size < 10 || offset + size > item_bytes.len() {
            break;
        }
        let version = LittleEndian::read_u16(&item_bytes[offset + 2..offset + 4]);
        let signature = LittleEndian::read_u32(&item_bytes[offset + 4..offset + 8]);
        if signature >> 16 != 0xBEEF {
            break;
        }

        let block_bytes = &item_bytes[offset..offset + size];
        match decode_value(block_bytes, version, signature, codepage) {
            Ok(value) => blocks.push(ExtensionBlock {
                data_size: size as u16,
                version,
                signature,
                value,
            }),
            Err(_) => break,
        }
        offset += size;
    }
    Ok(blocks)
}

fn decode_value(
    block_bytes: &[u8],
    version: u16,
    signature: u32,
    codepage: Codepage,
) -> Result<ExtensionValue, Error> {
    match signature {
        0xBEEF0004 => decode_file_entry_extension(block_bytes, version, codepage).map(ExtensionValue::FileEntry),
        0xBEEF0003 => {
            let identifier = if block_bytes.len() == 26 {
                Some(guid_at(block_bytes, 8, "extension 0xBEEF0003 shell folder identifier")?)
            } else {
                None
            };
            Ok(ExtensionValue::ShellFolder { identifier })
        }
        0xBEEF0000 | 0xBEEF0001 | 0xBEEF0005 | 0xBEEF0006 | 0xBEEF0013 | 0xBEEF0014
        | 0xBEEF0019 | 0xBEEF0025 => Ok(ExtensionValue::Opaque(block_bytes[8..].to_vec())),
        0xBEEF000A => {
            if block_bytes.len() != 14 {
                return Err(Error::Malformed {
                    context: "extension 0xBEEF000A size",
                    offset: 0,
                });
            }
            Ok(ExtensionValue::Opaque(block_bytes[8..].to_vec()))
        }
        _ => Ok(ExtensionValue::Unknown(block_bytes[8..].to_vec())),
    }
}

fn decode_file_entry_extension(
    block_bytes: &[u8],
    version: u16,
    codepage: Codepage,
) -> Result<FileEntryExtensionValues, Error> {
    const CONTEXT: &str = "extension 0xBEEF0004 file entry";

    if block_bytes.len() < 20 {
        return Err(Error::Malformed {
            context: CONTEXT,
            offset: 0,
        });
    }
    if !matches!(version, 3 | 7 | 8 | 9) {
        return Err(Error::Unsupported { context: CONTEXT });
    }

    let creation_time = LittleEndian::read_u32(&block_bytes[8..12]);
    let access_time = LittleEndian::read_u32(&block_bytes[12..16]);
    let mut offset = 18;

    let file_reference = if version >= 7 {
        if block_bytes.len() < offset + 18 {
            return Err(Error::Malformed {
                context: CONTEXT,
                offset,
            });
        }
        offset += 2; // unknown u16
        let reference = LittleEndian::read_u64(&block_bytes[offset..offset + 8]);
        offset += 8 + 8; // file reference, then 8 unknown bytes
        Some(reference)
    } else {
        None
    };

    if block_bytes.len() < offset + 2 {
        return Err(Error::Malformed {
            context: CONTEXT,
            offset,
        });
    }
    let long_name_size = LittleEndian::read_u16(&block_bytes[offset..offset + 2]) as usize;
    offset += 2;

    if version >= 9 {
        offset += 4;
    }
    if version >= 8 {
        offset += 4;
    }
    if block_bytes.len() < offset {
        return Err(Error::Malformed {
            context: CONTEXT,
            offset,
        });
    }

    let (long_name, consumed) = scan_utf16le_string(block_bytes, offset, CONTEXT)?;
    offset += consumed;

    let localized_name = if long_name_size > 0 {
        if version >= 7 {
            let (units, consumed) = scan_utf16le_string(block_bytes, offset, CONTEXT)?;
            let _ = consumed;
            Some(LocalizedName::Utf16(units))
        } else if (3..7).contains(&version) {
            let (bytes, consumed) = crate::cursor::scan_single_byte_string(block_bytes, offset, CONTEXT)?;
            let _ = consumed;
            let _ = codepage;
            Some(LocalizedName::SingleByte(bytes.to_vec()))
        } else {
            None
        }
    } else {
        None
    };

    Ok(FileEntryExtensionValues {
        creation_time,
        access_time,
        file_reference,
        long_name,
        localized_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_entry_block(version: u16, long_name: &str, localized: Option<&str>) -> Vec<u8> {
        let mut payload = Vec::new();
        payload.extend_from_slice(&0u32.to_le_bytes()); // creation_time
        payload.extend_from_slice(&0u32.to_le_bytes()); // access_time
        payload.extend_from_slice(&0u16.to_le_bytes()); // unknown

        if version >= 7 {
            payload.extend_from_slice(&0u16.to_le_bytes());
            payload.extend_from_slice(&0u64.to_le_bytes());
            payload.extend_from_slice(&[0u8; 8]);
        }

        let long_name_units: Vec<u16> = long_name.encode_utf16().chain(std::iter::once(0)).collect();
        let long_name_size = (long_name_units.len() - 1) as u16;
        payload.extend_from_slice(&long_name_size.to_le_bytes());

        if version >= 9 {
            payload.extend_from_slice(&[0u8; 4]);
        }
        if version >= 8 {
            payload.extend_from_slice(&[0u8; 4]);
        }
        for unit in &long_name_units {
            payload.extend_from_slice(&unit.to_le_bytes());
        }
        if let Some(localized) = localized {
            let units: Vec<u16> = localized.encode_utf16().chain(std::iter::once(0)).collect();
            for unit in &units {
                payload.extend_from_slice(&unit.to_le_bytes());
            }
        }

        let mut block = Vec::new();
        let total_size = (8 + payload.len()) as u16;
        block.extend_from_slice(&total_size.to_le_bytes());
        block.extend_from_slice(&version.to_le_bytes());
        block.extend_from_slice(&0xBEEF_0004u32.to_le_bytes());
        block.extend_from_slice(&payload);
        block
    }

    #[test]
    fn decodes_version_three_without_file_reference() {
        let block = file_entry_block(3, "test.txt", Some("teste.txt"));
        let value = decode_value(&block, 3, 0xBEEF_0004, Codepage::Windows1252).unwrap();
        match value {
            ExtensionValue::FileEntry(values) => {
                assert!(values.file_reference.is_none());
                assert_eq!(
                    String::from_utf16_lossy(&values.long_name[..values.long_name.len() - 1]),
                    "test.txt"
                );
                assert!(matches!(values.localized_name, Some(LocalizedName::SingleByte(_))));
            }
            other => panic!("expected file entry, got {other:?}"),
        }
    }

    #[test]
    fn decodes_version_nine_with_file_reference_and_utf16_localized_name() {
        let block = file_entry_block(9, "COPYING.txt", Some("COPYING.txt"));
        let value = decode_value(&block, 9, 0xBEEF_0004, Codepage::Ascii).unwrap();
        match value {
            ExtensionValue::FileEntry(values) => {
                assert!(values.file_reference.is_some());
                assert!(matches!(values.localized_name, Some(LocalizedName::Utf16(_))));
            }
            other => panic!("expected file entry, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unsupported_version() {
        let block = file_entry_block(3, "x", None);
        let mut block = block;
        block[2..4].copy_from_slice(&42u16.to_le_bytes());
        assert!(decode_value(&block, 42, 0xBEEF_0004, Codepage::Ascii).is_err());
    }

    #[test]
    fn stops_chain_at_zero_size_sentinel_without_losing_prior_blocks() {
        let good = file_entry_block(3, "a", None);
        let mut item_bytes = vec![0u8; 16];
        item_bytes.extend_from_slice(&good);
        item_bytes.extend_from_slice(&[0u8, 0u8]); // chain sentinel (size == 0)
        item_bytes.extend_from_slice(&16u16.to_le_bytes()); // first-extension-block offset

        let blocks = parse_extension_chain(&item_bytes, Codepage::Ascii).unwrap();
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn out_of_range_first_offset_yields_no_blocks() {
        let item_bytes = vec![0u8; 20];
        let blocks = parse_extension_chain(&item_bytes, Codepage::Ascii).unwrap();
        assert!(blocks.is_empty());
    }
}
