//! Variant-body decoders (§4.4): given an item's raw bytes and its already
//! -determined [`crate::classify::Discriminant`], fills in the
//! variant-specific value record. Every decoder here only reads bytes that
//! belong to its own variant; all bounds failures surface as
//! [`Error::Malformed`].
//!
//! Name fields are kept as raw byte/code-unit buffers rather than decoded
//! `String`s — decoding happens lazily through [`crate::strings`] when a
//! caller asks for a name, using the list's code page (see
//! [`crate::item::Item`]'s name accessors).

use byteorder::{ByteOrder, LittleEndian};
use uuid::Uuid;

use crate::cursor::{guid_at, scan_single_byte_string, scan_utf16le_string};
use crate::error::Error;

/// A name whose on-wire encoding was determined at parse time; either raw
/// single-byte (decode with the list's code page) or raw UTF-16LE code
/// units (code-page-independent).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameBytes {
    SingleByte(Vec<u8>),
    Utf16(Vec<u16>),
}

impl NameBytes {
    pub fn decode(&self, codepage: crate::codepage::Codepage) -> String {
        match self {
            NameBytes::SingleByte(bytes) => crate::strings::decode_single_byte(bytes, codepage),
            NameBytes::Utf16(units) => crate::strings::decode_utf16le_units(units),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootFolderValues {
    pub shell_folder_identifier: Uuid,
}

pub fn decode_root_folder(bytes: &[u8]) -> Result<RootFolderValues, Error> {
    const CONTEXT: &str = "root folder";
    if bytes.len() < 20 {
        return Err(Error::Malformed { context: CONTEXT, offset: bytes.len() });
    }
    Ok(RootFolderValues {
        shell_folder_identifier: guid_at(bytes, 4, CONTEXT)?,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeValues {
    /// 20-byte fixed single-byte name; absent for class type `0x2E`.
    pub name: Option<Vec<u8>>,
    /// Only present when the item carries enough trailing bytes for it —
    /// confirmed against the real `fwsi_test_item_list_data1` drive-letter
    /// vector, which is 25 bytes (name only, no trailing GUID).
    pub shell_folder_identifier: Option<Uuid>,
}

pub fn decode_volume(bytes: &[u8]) -> Result<VolumeValues, Error> {
    const CONTEXT: &str = "volume";
    if bytes.len() < 20 {
        return Err(Error::Malformed { context: CONTEXT, offset: bytes.len() });
    }
    let class_type = bytes[2];
    if class_type == 0x2E {
        Ok(VolumeValues {
            name: None,
            shell_folder_identifier: Some(guid_at(bytes, 4, CONTEXT)?),
        })
    } else {
        if bytes.len() < 25 {
            return Err(Error::Malformed { context: CONTEXT, offset: bytes.len() });
        }
        let name = bytes[3..23].to_vec();
        let shell_folder_identifier = if bytes.len() >= 25 + 16 {
            Some(guid_at(bytes, 25, CONTEXT)?)
        } else {
            None
        };
        Ok(VolumeValues {
            name: Some(name),
            shell_folder_identifier,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntryValues {
    pub file_size: u32,
    pub fat_modification_time: u32,
    pub file_attribute_flags: u16,
    pub primary_name: NameBytes,
    pub is_pre_xp: bool,
    pub secondary_name: Option<NameBytes>,
    pub trailing_shell_folder_identifier: Option<Uuid>,
}

/// Scans a NUL-terminated name starting at `offset`, single-byte or
/// UTF-16LE depending on `is_unicode`. Returns the name (terminator
/// included, matching [`NameBytes`]'s other constructors) and bytes
/// consumed.
fn scan_name(bytes: &[u8], offset: usize, is_unicode: bool, context: &'static str) -> Result<(NameBytes, usize), Error> {
    if is_unicode {
        let (units, consumed) = scan_utf16le_string(bytes, offset, context)?;
        Ok((NameBytes::Utf16(units), consumed))
    } else {
        let (raw, consumed) = scan_single_byte_string(bytes, offset, context)?;
        Ok((NameBytes::SingleByte(raw.to_vec()), consumed))
    }
}

pub fn decode_file_entry(bytes: &[u8], class_type: u8) -> Result<FileEntryValues, Error> {
    const CONTEXT: &str = "file entry";
    if bytes.len() < 16 {
        return Err(Error::Malformed { context: CONTEXT, offset: bytes.len() });
    }
    let file_size = LittleEndian::read_u32(&bytes[4..8]);
    let fat_modification_time = LittleEndian::read_u32(&bytes[8..12]);
    let file_attribute_flags = LittleEndian::read_u16(&bytes[12..14]);

    let data_size = bytes.len();
    let has_watermark = data_size > 30 && &bytes[data_size - 30..data_size - 23] == b"S.W.N.1";
    let is_unicode = has_watermark || (class_type & 0x20) != 0;

    let data_offset = 14;
    let (primary_name, name_consumed) = scan_name(bytes, data_offset, is_unicode, CONTEXT)?;
    let mut offset = data_offset + name_consumed;
    if !is_unicode && name_consumed % 2 != 0 {
        offset += 1; // alignment padding after an odd-length single-byte name
    }

    let mut is_pre_xp = false;
    let mut secondary_name = None;

    if has_watermark {
        // Fixed 30-byte watermark trailer: ext-block size, 8-byte
        // signature, 4+4+8 unknown, 6 unknown.
        if bytes.len() < offset + 30 {
            return Err(Error::Malformed { context: CONTEXT, offset });
        }
        offset += 30;
    } else {
        let look_ahead_fits = offset + 2 <= data_size;
        let look_ahead = if look_ahead_fits {
            Some(LittleEndian::read_u16(&bytes[offset..offset + 2]) as usize)
        } else {
            None
        };
        let pre_xp = match look_ahead {
            Some(value) => value > data_size,
            None => true,
        };
        if pre_xp {
            is_pre_xp = true;
            let (name, consumed) = scan_name(bytes, offset, is_unicode, CONTEXT)?;
            secondary_name = Some(name);
            offset += consumed;
        }
        // Otherwise `look_ahead` is the first extension block's data_size;
        // extension parsing (§4.5) picks up from the item's trailing bytes
        // independently, so nothing further to do with `offset` here.
    }

    let trailing_shell_folder_identifier = if is_pre_xp && (class_type & 0x80) != 0 && offset + 16 <= bytes.len() {
        Some(guid_at(bytes, offset, CONTEXT)?)
    } else {
        None
    };

    Ok(FileEntryValues {
        file_size,
        fat_modification_time,
        file_attribute_flags,
        primary_name,
        is_pre_xp,
        secondary_name,
        trailing_shell_folder_identifier,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkLocationValues {
    pub location: Option<Vec<u8>>,
    pub description: Option<Vec<u8>>,
    pub comments: Option<Vec<u8>>,
}

pub fn decode_network_location(bytes: &[u8]) -> Result<NetworkLocationValues, Error> {
    const CONTEXT: &str = "network location";
    let mut offset = 4;
    let mut strings = Vec::with_capacity(3);
    for _ in 0..3 {
        if offset >= bytes.len() {
            strings.push(None);
            continue;
        }
        match scan_single_byte_string(bytes, offset, CONTEXT) {
            Ok((raw, consumed)) => {
                strings.push(Some(raw.to_vec()));
                offset += consumed;
            }
            Err(_) => strings.push(None),
        }
    }
    Ok(NetworkLocationValues {
        location: strings[0].take(),
        description: strings[1].take(),
        comments: strings[2].take(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriValues {
    pub flags: u8,
    pub sub_blobs: Vec<Vec<u8>>,
    pub uri: NameBytes,
}

pub fn decode_uri(bytes: &[u8]) -> Result<UriValues, Error> {
    const CONTEXT: &str = "uri";
    if bytes.len() < 6 {
        return Err(Error::Malformed { context: CONTEXT, offset: bytes.len() });
    }
    let flags = bytes[3];
    let item_data_size = LittleEndian::read_u16(&bytes[4..6]) as usize;

    let mut sub_blobs = Vec::new();
    let mut offset = 6;
    if item_data_size >= 36 {
        if bytes.len() < offset + 36 {
            return Err(Error::Malformed { context: CONTEXT, offset });
        }
        offset += 36;
        for _ in 0..3 {
            if bytes.len() < offset + 4 {
                return Err(Error::Malformed { context: CONTEXT, offset });
            }
            let blob_size = LittleEndian::read_u32(&bytes[offset..offset + 4]) as usize;
            offset += 4;
            if bytes.len() < offset + blob_size {
                return Err(Error::Malformed { context: CONTEXT, offset });
            }
            sub_blobs.push(bytes[offset..offset + blob_size].to_vec());
            offset += blob_size;
        }
    }

    let is_unicode = flags & 0x80 != 0;
    let (uri, _) = scan_name(bytes, offset, is_unicode, CONTEXT)?;

    Ok(UriValues { flags, sub_blobs, uri })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriSubValuesValues {
    pub url: Vec<u8>,
    pub title: Option<Vec<u8>>,
}

pub fn decode_uri_sub_values(bytes: &[u8]) -> Result<UriSubValuesValues, Error> {
    const CONTEXT: &str = "uri sub values";
    if bytes.len() < 6 {
        return Err(Error::Malformed { context: CONTEXT, offset: bytes.len() });
    }
    let mut offset = 2;
    let url_size = LittleEndian::read_u32(&bytes[offset..offset + 4]) as usize;
    offset += 4;
    if bytes.len() < offset + url_size {
        return Err(Error::Malformed { context: CONTEXT, offset });
    }
    let url = bytes[offset..offset + url_size].to_vec();
    offset += url_size;

    let title = if bytes.len() >= offset + 4 {
        let title_size = LittleEndian::read_u32(&bytes[offset..offset + 4]) as usize;
        offset += 4;
        if bytes.len() < offset + title_size {
            return Err(Error::Malformed { context: CONTEXT, offset });
        }
        Some(bytes[offset..offset + title_size].to_vec())
    } else {
        None
    };

    Ok(UriSubValuesValues { url, title })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlPanelCategoryValues {
    pub identifier: u32,
}

pub fn decode_control_panel_category(bytes: &[u8]) -> Result<ControlPanelCategoryValues, Error> {
    const CONTEXT: &str = "control panel category";
    if bytes.len() < 8 {
        return Err(Error::Malformed { context: CONTEXT, offset: bytes.len() });
    }
    Ok(ControlPanelCategoryValues {
        identifier: LittleEndian::read_u32(&bytes[4..8]),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlPanelItemValues {
    pub identifier: Uuid,
}

pub fn decode_control_panel_item(bytes: &[u8]) -> Result<ControlPanelItemValues, Error> {
    const CONTEXT: &str = "control panel item";
    if bytes.len() < 30 {
        return Err(Error::Malformed { context: CONTEXT, offset: bytes.len() });
    }
    Ok(ControlPanelItemValues {
        identifier: guid_at(bytes, 14, CONTEXT)?,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlPanelCplFileValues {
    pub cpl_file_path: Vec<u16>,
    pub display_name: Vec<u16>,
    pub comments: Vec<u16>,
}

pub fn decode_control_panel_cpl_file(bytes: &[u8]) -> Result<ControlPanelCplFileValues, Error> {
    const CONTEXT: &str = "control panel cpl file";
    if bytes.len() < 24 {
        return Err(Error::Malformed { context: CONTEXT, offset: bytes.len() });
    }
    let mut offset = 24;
    let (cpl_file_path, consumed) = scan_utf16le_string(bytes, offset, CONTEXT)?;
    offset += consumed;
    let (display_name, consumed) = scan_utf16le_string(bytes, offset, CONTEXT)?;
    offset += consumed;
    let (comments, _) = scan_utf16le_string(bytes, offset, CONTEXT)?;

    Ok(ControlPanelCplFileValues {
        cpl_file_path,
        display_name,
        comments,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressedFolderForm {
    WindowsXp,
    Windows10,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedFolderValues {
    pub form: CompressedFolderForm,
    /// Bytes beyond the recognized header; opaque to this decoder but
    /// still counted toward the item's `data_size`.
    pub trailing: Vec<u8>,
}

pub fn decode_compressed_folder(bytes: &[u8], form: CompressedFolderForm) -> Result<CompressedFolderValues, Error> {
    let header_size = match form {
        CompressedFolderForm::WindowsXp => 68,
        CompressedFolderForm::Windows10 => 78,
    };
    let trailing = if bytes.len() > header_size {
        bytes[header_size..].to_vec()
    } else {
        Vec::new()
    };
    Ok(CompressedFolderValues { form, trailing })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MtpPropertyValue {
    Fixed8([u8; 8]),
    Fixed2([u8; 2]),
    Fixed4([u8; 4]),
    Utf16String(Vec<u16>),
    Guid(Uuid),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MtpPropertyEntry {
    pub property_set: Uuid,
    pub property_identifier: u32,
    pub value_type: u32,
    pub value: MtpPropertyValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MtpValues {
    pub name: Vec<u16>,
    pub identifier: Vec<u16>,
    pub file_system_name: Vec<u16>,
    pub guid_strings: Vec<[u8; 78]>,
    pub class_identifier: Uuid,
    pub properties: Vec<MtpPropertyEntry>,
}

/// Shared by MTP volume and MTP file entry (§4.4): same header and trailing
/// property-list layout.
pub fn decode_mtp(bytes: &[u8]) -> Result<MtpValues, Error> {
    const CONTEXT: &str = "mtp";
    if bytes.len() < 54 {
        return Err(Error::Malformed { context: CONTEXT, offset: bytes.len() });
    }
    let name_size = LittleEndian::read_u32(&bytes[38..42]) as usize;
    let identifier_size = LittleEndian::read_u32(&bytes[42..46]) as usize;
    let file_system_name_size = LittleEndian::read_u32(&bytes[46..50]) as usize;
    let number_of_guid_strings = LittleEndian::read_u32(&bytes[50..54]) as usize;

    let mut offset = 54;
    let name = read_fixed_utf16(bytes, &mut offset, name_size, CONTEXT)?;
    let identifier = read_fixed_utf16(bytes, &mut offset, identifier_size, CONTEXT)?;
    let file_system_name = read_fixed_utf16(bytes, &mut offset, file_system_name_size, CONTEXT)?;

    // `number_of_guid_strings` is attacker-controlled; cap the allocation
    // hint against what the remaining buffer could actually hold rather
    // than trusting the field outright.
    let mut guid_strings = Vec::with_capacity(number_of_guid_strings.min(bytes.len() / 78 + 1));
    for _ in 0..number_of_guid_strings {
        if bytes.len() < offset + 78 {
            return Err(Error::Malformed { context: CONTEXT, offset });
        }
        let mut entry = [0u8; 78];
        entry.copy_from_slice(&bytes[offset..offset + 78]);
        guid_strings.push(entry);
        offset += 78;
    }

    if bytes.len() < offset + 4 {
        return Err(Error::Malformed { context: CONTEXT, offset });
    }
    offset += 4; // unknown10, immediately before the class identifier

    if bytes.len() < offset + 16 {
        return Err(Error::Malformed { context: CONTEXT, offset });
    }
    let class_identifier = guid_at(bytes, offset, CONTEXT)?;
    offset += 16;

    if bytes.len() < offset + 4 {
        return Err(Error::Malformed { context: CONTEXT, offset });
    }
    let number_of_properties = LittleEndian::read_u32(&bytes[offset..offset + 4]) as usize;
    offset += 4;

    // Same reasoning as `guid_strings` above: each property needs at least
    // 16 bytes, so cap the hint against the remaining buffer.
    let mut properties = Vec::with_capacity(number_of_properties.min(bytes.len().saturating_sub(offset) / 16 + 1));
    for _ in 0..number_of_properties {
        if bytes.len() < offset + 16 {
            break;
        }
        let property_set = guid_at(bytes, offset, CONTEXT)?;
        offset += 16;

        if bytes.len() < offset + 4 {
            break;
        }
        let property_identifier = LittleEndian::read_u32(&bytes[offset..offset + 4]);
        offset += 4;

        if bytes.len() < offset + 4 {
            break;
        }
        let value_type = LittleEndian::read_u32(&bytes[offset..offset + 4]);
        offset += 4;

        let value = match value_type {
            0x05 | 0x07 | 0x15 => {
                if bytes.len() < offset + 8 {
                    break;
                }
                let mut fixed = [0u8; 8];
                fixed.copy_from_slice(&bytes[offset..offset + 8]);
                offset += 8;
                MtpPropertyValue::Fixed8(fixed)
            }
            0x0B | 0x12 => {
                if bytes.len() < offset + 2 {
                    break;
                }
                let mut fixed = [0u8; 2];
                fixed.copy_from_slice(&bytes[offset..offset + 2]);
                offset += 2;
                MtpPropertyValue::Fixed2(fixed)
            }
            0x0A | 0x13 => {
                if bytes.len() < offset + 4 {
                    break;
                }
                let mut fixed = [0u8; 4];
                fixed.copy_from_slice(&bytes[offset..offset + 4]);
                offset += 4;
                MtpPropertyValue::Fixed4(fixed)
            }
            0x1F => {
                if bytes.len() < offset + 4 {
                    break;
                }
                let string_size = LittleEndian::read_u32(&bytes[offset..offset + 4]) as usize;
                offset += 4;
                if bytes.len() < offset + string_size {
                    break;
                }
                let mut units = Vec::with_capacity(string_size / 2);
                for chunk in bytes[offset..offset + string_size].chunks_exact(2) {
                    units.push(LittleEndian::read_u16(chunk));
                }
                offset += string_size;
                MtpPropertyValue::Utf16String(units)
            }
            0x48 => {
                if bytes.len() < offset + 16 {
                    break;
                }
                let guid = guid_at(bytes, offset, CONTEXT)?;
                offset += 16;
                MtpPropertyValue::Guid(guid)
            }
            // Unknown types terminate property parsing for the item.
            _ => break,
        };

        properties.push(MtpPropertyEntry {
            property_set,
            property_identifier,
            value_type,
            value,
        });
    }

    Ok(MtpValues {
        name,
        identifier,
        file_system_name,
        guid_strings,
        class_identifier,
        properties,
    })
}

/// `unit_count` is a count of UTF-16 code units, not bytes — the MTP header
/// fields it's called with are all code-unit counts that need doubling
/// before use (`libfwsi_mtp_volume_values.c`'s own `*_string_size *= 2`).
fn read_fixed_utf16(bytes: &[u8], offset: &mut usize, unit_count: usize, context: &'static str) -> Result<Vec<u16>, Error> {
    let size = unit_count * 2;
    if bytes.len() < *offset + size {
        return Err(Error::Malformed { context, offset: *offset });
    }
    let mut units = Vec::with_capacity(unit_count);
    for chunk in bytes[*offset..*offset + size].chunks_exact(2) {
        units.push(LittleEndian::read_u16(chunk));
    }
    *offset += size;
    Ok(units)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsersPropertyViewIdentifier {
    KnownFolder(Uuid),
    Opaque([u8; 4]),
    Raw(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsersPropertyViewValues {
    pub signature: u32,
    pub identifier: UsersPropertyViewIdentifier,
    pub property_store: Vec<u8>,
}

pub fn decode_users_property_view(bytes: &[u8], signature: u32) -> Result<UsersPropertyViewValues, Error> {
    const CONTEXT: &str = "users property view";
    if bytes.len() < 14 {
        return Err(Error::Malformed { context: CONTEXT, offset: bytes.len() });
    }
    let property_store_size = LittleEndian::read_u16(&bytes[10..12]) as usize;
    let identifier_size = LittleEndian::read_u16(&bytes[12..14]) as usize;

    if identifier_size + property_store_size > bytes.len() - 14 {
        return Err(Error::Malformed { context: CONTEXT, offset: 14 });
    }

    let identifier_bytes = &bytes[14..14 + identifier_size];
    let identifier = match signature {
        0x23FE_BBEE if identifier_size == 16 => {
            UsersPropertyViewIdentifier::KnownFolder(guid_at(bytes, 14, CONTEXT)?)
        }
        0x23A3_DFD5 | 0x3B93_AFBB | 0xBEEB_EE00 if identifier_size == 4 => {
            let mut fixed = [0u8; 4];
            fixed.copy_from_slice(identifier_bytes);
            UsersPropertyViewIdentifier::Opaque(fixed)
        }
        _ => UsersPropertyViewIdentifier::Raw(identifier_bytes.to_vec()),
    };

    let property_store_offset = 14 + identifier_size;
    let property_store = bytes[property_store_offset..property_store_offset + property_store_size].to_vec();

    Ok(UsersPropertyViewValues {
        signature,
        identifier,
        property_store,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebSiteValues {
    pub first_blob: Vec<u8>,
    pub second_blob: Vec<u8>,
}

pub fn decode_web_site(bytes: &[u8]) -> Result<WebSiteValues, Error> {
    const CONTEXT: &str = "web site";
    if bytes.len() < 24 {
        return Err(Error::Malformed { context: CONTEXT, offset: bytes.len() });
    }
    let first_blob_size = LittleEndian::read_u32(&bytes[20..24]) as usize;
    let mut offset = 24;
    if bytes.len() < offset + first_blob_size {
        return Err(Error::Malformed { context: CONTEXT, offset });
    }
    let first_blob = bytes[offset..offset + first_blob_size].to_vec();
    offset += first_blob_size;

    if bytes.len() < offset + 20 {
        return Err(Error::Malformed { context: CONTEXT, offset });
    }
    let second_blob_size = LittleEndian::read_u32(&bytes[offset + 16..offset + 20]) as usize;
    offset += 20;
    if bytes.len() < offset + second_blob_size {
        return Err(Error::Malformed { context: CONTEXT, offset });
    }
    let second_blob = bytes[offset..offset + second_blob_size].to_vec();

    Ok(WebSiteValues { first_blob, second_blob })
}

/// Opaque variants that carry only their matched signature beyond bounds
/// validation: CD-burn, Acronis-TIB file, game folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpaqueSignatureValues {
    pub signature: u32,
}

pub fn decode_opaque_signature(bytes: &[u8], offset: usize) -> Result<OpaqueSignatureValues, Error> {
    if bytes.len() < offset + 4 {
        return Err(Error::Malformed {
            context: "opaque-signature variant",
            offset: bytes.len(),
        });
    }
    Ok(OpaqueSignatureValues {
        signature: LittleEndian::read_u32(&bytes[offset..offset + 4]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_folder_reads_shell_folder_identifier() {
        let mut bytes = vec![0u8; 20];
        let guid = Uuid::from_u128(0x0102_0304_0506_0708_090A_0B0C_0D0E_0F10);
        bytes[4..20].copy_from_slice(guid.to_bytes_le().as_slice());
        let values = decode_root_folder(&bytes).unwrap();
        assert_eq!(values.shell_folder_identifier, guid);
    }

    #[test]
    fn volume_with_drive_letter_has_name() {
        let mut bytes = vec![0u8; 39];
        bytes[2] = 0x2F;
        bytes[3..6].copy_from_slice(b"C:\\");
        let values = decode_volume(&bytes).unwrap();
        assert_eq!(values.name.unwrap()[..3], b"C:\\"[..]);
    }

    #[test]
    fn volume_removable_has_no_name() {
        let mut bytes = vec![0u8; 20];
        bytes[2] = 0x2E;
        let values = decode_volume(&bytes).unwrap();
        assert!(values.name.is_none());
        assert!(values.shell_folder_identifier.is_some());
    }

    #[test]
    fn volume_with_short_data_has_no_trailing_identifier() {
        // Matches the real fwsi_test_item_list_data1 drive-letter vector:
        // name only, no room for a trailing GUID.
        let mut bytes = vec![0u8; 25];
        bytes[2] = 0x2F;
        bytes[3..6].copy_from_slice(b"C:\\");
        let values = decode_volume(&bytes).unwrap();
        assert!(values.shell_folder_identifier.is_none());
    }

    #[test]
    fn file_entry_decodes_ascii_name_with_extension_lookahead() {
        let mut bytes = vec![0u8; 14];
        bytes[2] = 0x32;
        bytes.extend_from_slice(b"test\0");
        bytes.push(0); // alignment padding (odd-length name incl NUL is 5, pad 1)
        bytes.extend_from_slice(&20u16.to_le_bytes()); // plausible extension size
        let values = decode_file_entry(&bytes, 0x32).unwrap();
        assert!(!values.is_pre_xp);
        match values.primary_name {
            NameBytes::SingleByte(raw) => assert_eq!(&raw, b"test\0"),
            other => panic!("expected single byte name, got {other:?}"),
        }
    }

    #[test]
    fn file_entry_unicode_flag_forces_utf16_name() {
        let mut bytes = vec![0u8; 14];
        bytes[2] = 0x30 | 0x20;
        let name: Vec<u16> = "test".encode_utf16().chain(std::iter::once(0)).collect();
        for unit in &name {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        bytes.extend_from_slice(&999u16.to_le_bytes()); // forces pre-XP (exceeds data_size)
        let values = decode_file_entry(&bytes, 0x30 | 0x20).unwrap();
        assert!(values.is_pre_xp);
        assert!(matches!(values.primary_name, NameBytes::Utf16(_)));
    }

    #[test]
    fn uri_sub_values_reads_url_and_title() {
        let mut bytes = vec![0u8; 2];
        bytes.extend_from_slice(&3u32.to_le_bytes());
        bytes.extend_from_slice(b"abc");
        bytes.extend_from_slice(&2u32.to_le_bytes());
        bytes.extend_from_slice(b"ti");
        let values = decode_uri_sub_values(&bytes).unwrap();
        assert_eq!(values.url, b"abc");
        assert_eq!(values.title.unwrap(), b"ti");
    }

    #[test]
    fn control_panel_category_reads_identifier() {
        let mut bytes = vec![0u8; 8];
        bytes[4..8].copy_from_slice(&0x39DE_2184u32.to_le_bytes());
        let values = decode_control_panel_category(&bytes).unwrap();
        assert_eq!(values.identifier, 0x39DE_2184);
    }

    #[test]
    fn control_panel_item_reads_identifier_guid() {
        let mut bytes = vec![0u8; 30];
        bytes[2] = 0x71;
        let guid = Uuid::from_u128(1);
        bytes[14..30].copy_from_slice(guid.to_bytes_le().as_slice());
        let values = decode_control_panel_item(&bytes).unwrap();
        assert_eq!(values.identifier, guid);
    }

    #[test]
    fn users_property_view_bounds_check_rejects_oversized_regions() {
        let mut bytes = vec![0u8; 14];
        bytes[10..12].copy_from_slice(&100u16.to_le_bytes());
        bytes[12..14].copy_from_slice(&4u16.to_le_bytes());
        assert!(decode_users_property_view(&bytes, 0x23A3_DFD5).is_err());
    }

    #[test]
    fn users_property_view_known_folder_identifier() {
        let mut bytes = vec![0u8; 14 + 16];
        bytes[10..12].copy_from_slice(&0u16.to_le_bytes());
        bytes[12..14].copy_from_slice(&16u16.to_le_bytes());
        let guid = Uuid::from_u128(42);
        bytes[14..30].copy_from_slice(guid.to_bytes_le().as_slice());
        let values = decode_users_property_view(&bytes, 0x23FE_BBEE).unwrap();
        assert_eq!(
            values.identifier,
            UsersPropertyViewIdentifier::KnownFolder(guid)
        );
    }

    #[test]
    fn mtp_header_string_sizes_are_code_units_not_bytes() {
        // 54-byte fixed header, then a 1-code-unit name, no identifier or
        // file system name, no GUID strings, the unknown10 field, the class
        // identifier, and a single VT_LPWSTR (0x1f) property.
        let mut bytes = vec![0u8; 54];
        bytes[6..10].copy_from_slice(&0x1031_2005u32.to_le_bytes());
        bytes[38..42].copy_from_slice(&1u32.to_le_bytes()); // name_size, in code units
        bytes[42..46].copy_from_slice(&0u32.to_le_bytes());
        bytes[46..50].copy_from_slice(&0u32.to_le_bytes());
        bytes[50..54].copy_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&0x0041u16.to_le_bytes()); // name = "A"

        bytes.extend_from_slice(&0u32.to_le_bytes()); // unknown10

        let class_identifier = Uuid::from_u128(7);
        bytes.extend_from_slice(class_identifier.to_bytes_le().as_slice());

        bytes.extend_from_slice(&1u32.to_le_bytes()); // number_of_properties

        bytes.extend_from_slice(Uuid::from_u128(9).to_bytes_le().as_slice()); // property_set
        bytes.extend_from_slice(&0u32.to_le_bytes()); // property_identifier
        bytes.extend_from_slice(&0x1Fu32.to_le_bytes()); // value_type: VT_LPWSTR
        bytes.extend_from_slice(&2u32.to_le_bytes()); // string size, in bytes
        bytes.extend_from_slice(&0x0042u16.to_le_bytes()); // string = "B"

        let values = decode_mtp(&bytes).unwrap();
        assert_eq!(values.name, vec![0x0041]);
        assert_eq!(values.class_identifier, class_identifier);
        assert_eq!(values.properties.len(), 1);
        match &values.properties[0].value {
            MtpPropertyValue::Utf16String(units) => assert_eq!(units, &vec![0x0042]),
            other => panic!("expected a UTF-16 string property, got {other:?}"),
        }
    }
}
