//! Delegate unwrap (§4.3): detects the delegate-folder wrapper layer and
//! exposes the re-sliced inner item bytes for re-classification. The
//! wrapper and its unwrapped inner body describe the same [`crate::item::Item`]
//! — this is peeling a layer, not descending into a child.

use byteorder::{ByteOrder, LittleEndian};
use uuid::Uuid;

use crate::catalog;
use crate::cursor::guid_at;
use crate::error::Error;

/// Result of a successful delegate peel: the recorded wrapper identifier and
/// the byte range classification should continue on.
pub struct Delegate<'a> {
    pub delegate_folder_id: Uuid,
    pub bytes: &'a [u8],
}

/// Returns `Ok(None)` when `bytes` isn't a delegate wrapper (the common
/// case); `Ok(Some(_))` with the re-sliced bytes when it is.
pub fn unwrap_delegate<'a>(bytes: &'a [u8]) -> Result<Option<Delegate<'a>>, Error> {
    let data_size = bytes.len();
    if data_size < 38 {
        return Ok(None);
    }

    // The class identifier and the delegate folder identifier are two
    // contiguous trailing GUIDs, not separated by a gap: class id at
    // [data_size-32, data_size-16), folder id at [data_size-16, data_size).
    // Confirmed against the real `fwsi_test_delegate_values_data1` vector
    // (50 bytes: inner data at [6, 18), class id at [18, 34), folder id at
    // [34, 50) == data_size-32 and data_size-16 respectively).
    let class_identifier_offset = data_size - 32;
    let class_identifier = guid_at(bytes, class_identifier_offset, "delegate class identifier")?;
    if class_identifier != catalog::DELEGATE_CLASS_IDENTIFIER {
        return Ok(None);
    }

    let delegate_folder_id = guid_at(bytes, data_size - 16, "delegate folder identifier")?;

    let inner_data_size = LittleEndian::read_u16(&bytes[4..6]) as usize;
    if inner_data_size > data_size - 38 {
        return Err(Error::Malformed {
            context: "delegate inner data size",
            offset: 4,
        });
    }
    let inner_bytes = &bytes[6..6 + inner_data_size];

    let reslice = if delegate_folder_id == catalog::SEARCH_FOLDER {
        bytes
    } else if delegate_folder_id == catalog::USERS_FILES_FOLDER_DELEGATE
        || delegate_folder_id == catalog::REMOVABLE_DRIVES
    {
        if inner_bytes.len() < 4 {
            return Err(Error::Malformed {
                context: "delegate inner data preamble",
                offset: 6,
            });
        }
        &inner_bytes[4..]
    } else {
        inner_bytes
    };

    Ok(Some(Delegate {
        delegate_folder_id,
        bytes: reslice,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_with_trailer(inner: &[u8], delegate_folder_id: Uuid) -> Vec<u8> {
        // [size u16][class u8][unknown u8][inner_data_size u16][inner...][delegate class id 16][delegate folder id 16]
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&[0, 0]); // size, patched below
        bytes.push(0x00); // class indicator
        bytes.push(0x00); // unknown
        bytes.extend_from_slice(&(inner.len() as u16).to_le_bytes());
        bytes.extend_from_slice(inner);
        bytes.extend_from_slice(catalog::DELEGATE_CLASS_IDENTIFIER.to_bytes_le().as_slice());
        bytes.extend_from_slice(delegate_folder_id.to_bytes_le().as_slice());
        let size = bytes.len() as u16;
        bytes[0..2].copy_from_slice(&size.to_le_bytes());
        bytes
    }

    #[test]
    fn non_delegate_passes_through_untouched() {
        let bytes = vec![0u8; 60];
        assert!(unwrap_delegate(&bytes).unwrap().is_none());
    }

    #[test]
    fn search_folder_keeps_bytes_unchanged() {
        let inner = vec![0xAA; 20];
        let bytes = item_with_trailer(&inner, catalog::SEARCH_FOLDER);
        let delegate = unwrap_delegate(&bytes).unwrap().unwrap();
        assert_eq!(delegate.bytes.len(), bytes.len());
    }

    #[test]
    fn users_files_folder_delegate_skips_four_byte_preamble() {
        let inner = vec![0xBB; 20];
        let bytes = item_with_trailer(&inner, catalog::USERS_FILES_FOLDER_DELEGATE);
        let delegate = unwrap_delegate(&bytes).unwrap().unwrap();
        assert_eq!(delegate.bytes.len(), inner.len() - 4);
        assert_eq!(delegate.delegate_folder_id, catalog::USERS_FILES_FOLDER_DELEGATE);
    }

    #[test]
    fn other_delegate_uses_inner_bytes_as_is() {
        let inner = vec![0xCC; 20];
        let bytes = item_with_trailer(&inner, Uuid::nil());
        let delegate = unwrap_delegate(&bytes).unwrap().unwrap();
        assert_eq!(delegate.bytes.len(), inner.len());
    }
}
