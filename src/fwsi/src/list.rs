//! The item-list builder (§4.6) and the [`ItemList`] data model (§3):
//! decodes a size-terminated sequence of shell items, establishing
//! parent/child linkage during construction. This is the crate's one public
//! entry point, `parse_item_list`.

use byteorder::{ByteOrder, LittleEndian};

use crate::classify::{self, Discriminant};
use crate::codepage::Codepage;
use crate::delegate;
use crate::error::Error;
use crate::extension;
use crate::item::{Item, Kind};
use crate::variant;

/// Owns a sequence of [`Item`]s plus the total on-wire size (sum of child
/// `data_size` plus the 2-byte terminator), per §3.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemList {
    items: Vec<Item>,
    data_size: usize,
    code_page: Codepage,
}

impl ItemList {
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Total on-wire size: the sum of every item's `data_size` plus the
    /// 2-byte list terminator (§8 round-trip accounting law).
    pub fn data_size(&self) -> usize {
        self.data_size
    }

    pub fn code_page(&self) -> Codepage {
        self.code_page
    }

    /// Resolves an item's `parent_index` into a borrow scoped to this list
    /// (§5): parent access must never outlive the list it's borrowed from.
    pub fn parent_of(&self, item: &Item) -> Option<&Item> {
        item.parent_index().map(|index| &self.items[index])
    }
}

/// Decodes a shell item list from `bytes` (§4.6): `u16 size` + `size - 2`
/// payload, repeated until a terminating `u16 = 0`. A malformed item aborts
/// the whole list — no partial tree is ever returned (§7 propagation
/// policy). Unknown items (classification rule 7) are not failures.
pub fn parse_item_list(bytes: &[u8], codepage: Codepage) -> Result<ItemList, Error> {
    if bytes.len() < 2 {
        return Err(Error::Truncated {
            needed: 2,
            available: bytes.len(),
            context: "item list header",
        });
    }

    let mut items: Vec<Item> = Vec::new();
    let mut offset = 0usize;

    loop {
        if bytes.len() - offset < 2 {
            return Err(Error::Truncated {
                needed: 2,
                available: bytes.len() - offset,
                context: "item list entry size",
            });
        }
        let size = LittleEndian::read_u16(&bytes[offset..offset + 2]) as usize;
        if size == 0 {
            offset += 2;
            break;
        }
        let remaining = bytes.len() - offset;
        if size > remaining {
            return Err(Error::Malformed {
                context: "item list entry exceeds remaining input",
                offset,
            });
        }

        let item_bytes = &bytes[offset..offset + size];
        let parent = items.last().map(|item: &Item| item.kind().clone());
        let parent_index = if parent.is_some() {
            Some(items.len() - 1)
        } else {
            None
        };
        let item = parse_item(item_bytes, codepage, parent_index, parent.as_ref())?;
        items.push(item);
        offset += size;
    }

    Ok(ItemList {
        items,
        data_size: offset,
        code_page: codepage,
    })
}

/// Decodes one shell item from `bytes` (its full on-wire range, including
/// its own size prefix): delegate-unwrap, variant classification,
/// variant-body decoding, then extension-block parsing, in that order
/// (§2 control flow).
fn parse_item(
    bytes: &[u8],
    codepage: Codepage,
    parent_index: Option<usize>,
    parent_kind: Option<&Kind>,
) -> Result<Item, Error> {
    let data_size = bytes.len();

    let delegate = delegate::unwrap_delegate(bytes)?;
    let (effective_bytes, delegate_folder_id) = match &delegate {
        Some(wrapper) => (wrapper.bytes, Some(wrapper.delegate_folder_id)),
        None => (bytes, None),
    };

    let discriminant = classify::classify_item(effective_bytes, parent_kind);
    let class_type = effective_bytes.get(2).copied().unwrap_or(0);

    let (kind, signature) = decode_kind(discriminant, effective_bytes, class_type)?;

    let extension_blocks = extension::parse_extension_chain(effective_bytes, codepage)?;

    Ok(Item {
        kind,
        class_type,
        signature,
        data_size,
        delegate_folder_id,
        extension_blocks,
        parent: parent_index,
        code_page: codepage,
    })
}

fn decode_kind(
    discriminant: Discriminant,
    bytes: &[u8],
    class_type: u8,
) -> Result<(Kind, u32), Error> {
    Ok(match discriminant {
        Discriminant::AcronisTib => {
            let values = variant::decode_opaque_signature(bytes, 2)?;
            (Kind::AcronisTib(values), 0xACB1_6752)
        }
        Discriminant::ControlPanelCategory => {
            let values = variant::decode_control_panel_category(bytes)?;
            (Kind::ControlPanelCategory(values), 0x39DE_2184)
        }
        Discriminant::CdBurn => {
            let values = variant::decode_opaque_signature(bytes, 4)?;
            (Kind::CdBurn(values), 0x4D67_7541)
        }
        Discriminant::GameFolder => {
            let values = variant::decode_opaque_signature(bytes, 4)?;
            (Kind::GameFolder(values), 0x4953_4647)
        }
        Discriminant::WebSite => {
            let values = variant::decode_web_site(bytes)?;
            (Kind::WebSite(values), 0xC001_B000)
        }
        Discriminant::ControlPanelCplFile => {
            let values = variant::decode_control_panel_cpl_file(bytes)?;
            (Kind::ControlPanelCplFile(values), 0xFFFF_FF38)
        }
        Discriminant::MtpFileEntry => {
            let values = variant::decode_mtp(bytes)?;
            (Kind::MtpFileEntry(values), 0x0719_2006)
        }
        Discriminant::MtpVolume => {
            let values = variant::decode_mtp(bytes)?;
            (Kind::MtpVolume(values), 0x1031_2005)
        }
        Discriminant::UsersPropertyView => {
            let signature = if bytes.len() >= 10 {
                LittleEndian::read_u32(&bytes[6..10])
            } else {
                0
            };
            let values = variant::decode_users_property_view(bytes, signature)?;
            (Kind::UsersPropertyView(values), signature)
        }
        Discriminant::CompressedFolder => {
            let form = classify::compressed_folder_form(bytes);
            let values = variant::decode_compressed_folder(bytes, form)?;
            (Kind::CompressedFolder(values), 0)
        }
        Discriminant::RootFolder => (Kind::RootFolder(variant::decode_root_folder(bytes)?), 0),
        Discriminant::Volume => (Kind::Volume(variant::decode_volume(bytes)?), 0),
        Discriminant::FileEntry => (
            Kind::FileEntry(variant::decode_file_entry(bytes, class_type)?),
            0,
        ),
        Discriminant::NetworkLocation => (
            Kind::NetworkLocation(variant::decode_network_location(bytes)?),
            0,
        ),
        Discriminant::Uri => (Kind::Uri(variant::decode_uri(bytes)?), 0),
        Discriminant::ControlPanelItem => (
            Kind::ControlPanelItem(variant::decode_control_panel_item(bytes)?),
            0,
        ),
        Discriminant::UriSubValues => (
            Kind::UriSubValues(variant::decode_uri_sub_values(bytes)?),
            0,
        ),
        Discriminant::Unknown => (Kind::Unknown, 0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_has_data_size_two() {
        let list = parse_item_list(&[0, 0], Codepage::Ascii).unwrap();
        assert!(list.items().is_empty());
        assert_eq!(list.data_size(), 2);
    }

    #[test]
    fn short_input_is_truncated() {
        assert!(matches!(
            parse_item_list(&[0], Codepage::Ascii),
            Err(Error::Truncated { .. })
        ));
    }

    #[test]
    fn oversized_entry_is_malformed() {
        let bytes = [0xFF, 0xFF];
        assert!(matches!(
            parse_item_list(&bytes, Codepage::Ascii),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn single_root_folder_item_then_terminator() {
        let mut bytes = vec![0u8; 20];
        let size = 20u16;
        bytes[0..2].copy_from_slice(&size.to_le_bytes());
        bytes[2] = 0x1F;
        bytes.extend_from_slice(&[0, 0]);

        let list = parse_item_list(&bytes, Codepage::Ascii).unwrap();
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.data_size(), 22);
        assert!(matches!(list.items()[0].kind(), Kind::RootFolder(_)));
        assert_eq!(list.items()[0].parent_index(), None);
    }

    #[test]
    fn compressed_folder_parent_propagates_to_child() {
        // A Windows-10-style compressed folder header: the "N/A" scaffold at
        // offsets 36..43 (§4.2 rule 4).
        let mut parent = vec![0u8; 78];
        let size = 78u16;
        parent[0..2].copy_from_slice(&size.to_le_bytes());
        parent[36] = b'N';
        parent[38] = b'/';
        parent[40] = b'A';

        // A child whose own class-type byte would not otherwise resolve to
        // any recognized variant, but whose parent is a compressed folder
        // (§4.2 rule 6).
        let mut child = vec![0u8; 20];
        child[0..2].copy_from_slice(&20u16.to_le_bytes());
        child[2] = 0x00;

        let mut bytes = parent;
        bytes.extend_from_slice(&child);
        bytes.extend_from_slice(&[0, 0]);

        let list = parse_item_list(&bytes, Codepage::Ascii).unwrap();
        assert_eq!(list.items().len(), 2);
        assert!(matches!(list.items()[0].kind(), Kind::CompressedFolder(_)));
        assert!(matches!(list.items()[1].kind(), Kind::CompressedFolder(_)));
        assert_eq!(list.items()[1].parent_index(), Some(0));
    }
}
