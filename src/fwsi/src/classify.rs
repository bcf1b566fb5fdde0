//! Variant dispatch (`classify_item`, §4.2 of the component design):
//! determines an item's [`Discriminant`] from its raw bytes and the kind of
//! the preceding sibling, without decoding any variant body. Classification
//! is pure and total — it always produces a value, defaulting to
//! [`Discriminant::Unknown`] rather than failing.

use byteorder::{ByteOrder, LittleEndian};

use crate::item::Kind;
use crate::variant::CompressedFolderForm;

/// The tag half of an item's `kind`: which variant decoder in
/// [`crate::variant`] should run, before that decoder has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discriminant {
    AcronisTib,
    ControlPanelCategory,
    CdBurn,
    GameFolder,
    WebSite,
    ControlPanelCplFile,
    MtpFileEntry,
    MtpVolume,
    UsersPropertyView,
    CompressedFolder,
    RootFolder,
    Volume,
    FileEntry,
    NetworkLocation,
    Uri,
    ControlPanelItem,
    UriSubValues,
    Unknown,
}

/// `bytes` is the item's full on-wire range, including its own 2-byte size
/// prefix (so `bytes[2]` is the class-type discriminator). `parent_kind` is
/// the preceding sibling's resolved kind, if any.
pub fn classify_item(bytes: &[u8], parent_kind: Option<&Kind>) -> Discriminant {
    let len = bytes.len();

    if len >= 6 && LittleEndian::read_u32(&bytes[2..6]) == 0xACB1_6752 {
        return Discriminant::AcronisTib;
    }

    if len >= 8 {
        match LittleEndian::read_u32(&bytes[4..8]) {
            0x39DE_2184 => return Discriminant::ControlPanelCategory,
            0x4D67_7541 => return Discriminant::CdBurn,
            0x4953_4647 => return Discriminant::GameFolder,
            0xC001_B000 => return Discriminant::WebSite,
            0xFFFF_FF38 => return Discriminant::ControlPanelCplFile,
            _ => {}
        }
    }

    if len >= 10 {
        match LittleEndian::read_u32(&bytes[6..10]) {
            0x0719_2006 => return Discriminant::MtpFileEntry,
            0x1031_2005 => return Discriminant::MtpVolume,
            0x1014_1981 | 0x23A3_DFD5 | 0x23FE_BBEE | 0x3B93_AFBB | 0x4950_5241
            | 0xBEEB_EE00 => return Discriminant::UsersPropertyView,
            _ => {}
        }
    }

    if len >= 56 && is_xp_compressed_folder(bytes) {
        return Discriminant::CompressedFolder;
    }
    if len >= 78 && is_windows10_compressed_folder(bytes) {
        return Discriminant::CompressedFolder;
    }

    let mut discriminant = Discriminant::Unknown;
    if len >= 3 {
        let class_type = bytes[2];
        discriminant = match class_type & 0x70 {
            0x10 if class_type == 0x1F => Discriminant::RootFolder,
            0x20 => Discriminant::Volume,
            0x30 => Discriminant::FileEntry,
            0x40 => Discriminant::NetworkLocation,
            0x60 if class_type == 0x61 => Discriminant::Uri,
            0x70 if class_type == 0x71 => Discriminant::ControlPanelItem,
            _ => Discriminant::Unknown,
        };
    }

    match parent_kind {
        Some(Kind::CompressedFolder(_)) => Discriminant::CompressedFolder,
        Some(Kind::Uri(_)) => Discriminant::UriSubValues,
        _ => discriminant,
    }
}

/// Re-derives which compressed-folder probe (§4.2 rule 4) matched, for
/// callers that already know `classify_item` returned
/// [`Discriminant::CompressedFolder`] and need the form to pick a header
/// layout in [`crate::variant::decode_compressed_folder`].
pub fn compressed_folder_form(bytes: &[u8]) -> CompressedFolderForm {
    if bytes.len() >= 56 && is_xp_compressed_folder(bytes) {
        CompressedFolderForm::WindowsXp
    } else {
        CompressedFolderForm::Windows10
    }
}

fn is_xp_compressed_folder(bytes: &[u8]) -> bool {
    byte_pair_is(bytes, 28, b'/') as usize
        + byte_pair_is(bytes, 34, b'/') as usize
        + byte_pair_is(bytes, 40, b' ') as usize
        + byte_pair_is(bytes, 42, b' ') as usize
        + byte_pair_is(bytes, 48, b':') as usize
        + byte_pair_is(bytes, 54, 0) as usize
        == 6
}

fn is_windows10_compressed_folder(bytes: &[u8]) -> bool {
    let na_scaffold = byte_pair_is(bytes, 36, b'N')
        && byte_pair_is(bytes, 38, b'/')
        && byte_pair_is(bytes, 40, b'A')
        && byte_pair_is(bytes, 42, 0);
    if na_scaffold {
        return true;
    }
    bytes.len() >= 78
        && byte_pair_is(bytes, 40, b'/')
        && byte_pair_is(bytes, 46, b'/')
        && byte_pair_is(bytes, 56, b' ')
        && byte_pair_is(bytes, 58, b' ')
        && byte_pair_is(bytes, 64, b':')
        && byte_pair_is(bytes, 70, b':')
        && byte_pair_is(bytes, 76, 0)
}

/// Tests whether the UTF-16LE code unit at `offset` equals `low_byte` with a
/// zero high byte — the compressed-folder probes only ever compare against
/// ASCII separators, so the high byte is always 0.
fn byte_pair_is(bytes: &[u8], offset: usize, low_byte: u8) -> bool {
    offset + 1 < bytes.len() && bytes[offset] == low_byte && bytes[offset + 1] == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_with_class_type(class_type: u8, len: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; len];
        let size = len as u16;
        bytes[0] = size as u8;
        bytes[1] = (size >> 8) as u8;
        bytes[2] = class_type;
        bytes
    }

    #[test]
    fn acronis_tib_signature_wins_over_everything_else() {
        let mut bytes = item_with_class_type(0x2F, 10);
        LittleEndian::write_u32(&mut bytes[2..6], 0xACB1_6752);
        assert_eq!(classify_item(&bytes, None), Discriminant::AcronisTib);
    }

    #[test]
    fn root_folder_requires_exact_class_type() {
        let bytes = item_with_class_type(0x1F, 20);
        assert_eq!(classify_item(&bytes, None), Discriminant::RootFolder);

        let bytes = item_with_class_type(0x10, 20);
        assert_eq!(classify_item(&bytes, None), Discriminant::Unknown);
    }

    #[test]
    fn volume_matches_the_whole_high_nibble() {
        let bytes = item_with_class_type(0x2F, 20);
        assert_eq!(classify_item(&bytes, None), Discriminant::Volume);
    }

    #[test]
    fn parent_compressed_folder_overrides_child_classification() {
        let bytes = item_with_class_type(0x30, 20);
        let parent = Kind::CompressedFolder(crate::variant::CompressedFolderValues {
            form: crate::variant::CompressedFolderForm::WindowsXp,
            trailing: Vec::new(),
        });
        assert_eq!(
            classify_item(&bytes, Some(&parent)),
            Discriminant::CompressedFolder
        );
    }

    #[test]
    fn uri_sub_values_requires_uri_parent() {
        let bytes = item_with_class_type(0x00, 20);
        assert_eq!(classify_item(&bytes, None), Discriminant::Unknown);
    }

    #[test]
    fn xp_compressed_folder_probe() {
        let mut bytes = vec![0u8; 56];
        bytes[0] = 56;
        for (offset, low_byte) in [(28, b'/'), (34, b'/'), (40, b' '), (42, b' '), (48, b':')] {
            bytes[offset] = low_byte;
        }
        assert_eq!(classify_item(&bytes, None), Discriminant::CompressedFolder);
    }
}
