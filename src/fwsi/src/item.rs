//! The `Item` data model (§3): one decoded shell item, carrying a
//! variant-tagged [`Kind`], the raw class-type/signature discriminators it
//! was classified from, its ordered extension-block chain, and a back
//! -reference to the preceding sibling in its enclosing [`crate::list::ItemList`].
//!
//! `parent` is realized as a `usize` index rather than a borrowed reference
//! (preferred over a weak cyclic reference, §9): it makes `Item` trivially
//! movable, and the index is only ever meaningful scoped to the owning
//! list, which is exactly the lifetime §5 requires ("never a standalone
//! handle that outlives the list").

use uuid::Uuid;

use crate::codepage::Codepage;
use crate::extension::ExtensionBlock;
use crate::variant::*;

/// One variant per recognized shell item type (§3), each carrying its own
/// value record from [`crate::variant`]. `Unknown` is the total fallback
/// every unrecognized byte pattern degrades to (§4.2 rule 7) — classification
/// never fails outright.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    RootFolder(RootFolderValues),
    Volume(VolumeValues),
    FileEntry(FileEntryValues),
    NetworkLocation(NetworkLocationValues),
    CompressedFolder(CompressedFolderValues),
    Uri(UriValues),
    UriSubValues(UriSubValuesValues),
    ControlPanelCategory(ControlPanelCategoryValues),
    ControlPanelItem(ControlPanelItemValues),
    ControlPanelCplFile(ControlPanelCplFileValues),
    GameFolder(OpaqueSignatureValues),
    MtpFileEntry(MtpValues),
    MtpVolume(MtpValues),
    UsersPropertyView(UsersPropertyViewValues),
    WebSite(WebSiteValues),
    CdBurn(OpaqueSignatureValues),
    AcronisTib(OpaqueSignatureValues),
    Unknown,
}

/// One decoded shell item (§3). Owned exclusively by its enclosing
/// [`crate::list::ItemList`], along with its extension blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub(crate) kind: Kind,
    pub(crate) class_type: u8,
    pub(crate) signature: u32,
    pub(crate) data_size: usize,
    pub(crate) delegate_folder_id: Option<Uuid>,
    pub(crate) extension_blocks: Vec<ExtensionBlock>,
    pub(crate) parent: Option<usize>,
    pub(crate) code_page: Codepage,
}

impl Item {
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// The raw class-type discriminator byte, preserved verbatim from
    /// `bytes[offset + 2]` regardless of how it was classified (§8: "the raw
    /// discriminator is preserved verbatim").
    pub fn class_type(&self) -> u8 {
        self.class_type
    }

    /// The secondary 32-bit discriminator this item was classified by, or 0
    /// if its kind doesn't use one (§3).
    pub fn signature(&self) -> u32 {
        self.signature
    }

    /// The item's on-wire size in bytes, including its own 2-byte length
    /// prefix.
    pub fn data_size(&self) -> usize {
        self.data_size
    }

    pub fn delegate_folder_id(&self) -> Option<Uuid> {
        self.delegate_folder_id
    }

    pub fn extension_blocks(&self) -> &[ExtensionBlock] {
        &self.extension_blocks
    }

    /// Index of the preceding sibling in the enclosing list, if any. Only
    /// meaningful against the same [`crate::list::ItemList`] that produced
    /// this item — see [`crate::list::ItemList::parent_of`].
    pub fn parent_index(&self) -> Option<usize> {
        self.parent
    }

    pub fn code_page(&self) -> Codepage {
        self.code_page
    }

    pub fn as_root_folder(&self) -> Option<&RootFolderValues> {
        match &self.kind {
            Kind::RootFolder(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_volume(&self) -> Option<&VolumeValues> {
        match &self.kind {
            Kind::Volume(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_file_entry(&self) -> Option<&FileEntryValues> {
        match &self.kind {
            Kind::FileEntry(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_network_location(&self) -> Option<&NetworkLocationValues> {
        match &self.kind {
            Kind::NetworkLocation(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_compressed_folder(&self) -> Option<&CompressedFolderValues> {
        match &self.kind {
            Kind::CompressedFolder(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_uri(&self) -> Option<&UriValues> {
        match &self.kind {
            Kind::Uri(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_uri_sub_values(&self) -> Option<&UriSubValuesValues> {
        match &self.kind {
            Kind::UriSubValues(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_control_panel_category(&self) -> Option<&ControlPanelCategoryValues> {
        match &self.kind {
            Kind::ControlPanelCategory(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_control_panel_item(&self) -> Option<&ControlPanelItemValues> {
        match &self.kind {
            Kind::ControlPanelItem(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_control_panel_cpl_file(&self) -> Option<&ControlPanelCplFileValues> {
        match &self.kind {
            Kind::ControlPanelCplFile(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_mtp_file_entry(&self) -> Option<&MtpValues> {
        match &self.kind {
            Kind::MtpFileEntry(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_mtp_volume(&self) -> Option<&MtpValues> {
        match &self.kind {
            Kind::MtpVolume(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_users_property_view(&self) -> Option<&UsersPropertyViewValues> {
        match &self.kind {
            Kind::UsersPropertyView(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_web_site(&self) -> Option<&WebSiteValues> {
        match &self.kind {
            Kind::WebSite(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_cd_burn(&self) -> Option<&OpaqueSignatureValues> {
        match &self.kind {
            Kind::CdBurn(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_acronis_tib(&self) -> Option<&OpaqueSignatureValues> {
        match &self.kind {
            Kind::AcronisTib(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_game_folder(&self) -> Option<&OpaqueSignatureValues> {
        match &self.kind {
            Kind::GameFolder(values) => Some(values),
            _ => None,
        }
    }

    /// The primary display name for this item, decoded through the
    /// `Strings` collaborator (§6: "UTF-8 and UTF-16 name accessors that
    /// internally perform encoding conversion"). Returns `None` for kinds
    /// with no single obvious display name.
    pub fn name(&self) -> Option<String> {
        match &self.kind {
            Kind::FileEntry(values) => Some(values.primary_name.decode(self.code_page)),
            Kind::Volume(values) => values
                .name
                .as_ref()
                .map(|raw| crate::strings::decode_single_byte(raw, self.code_page)),
            Kind::Uri(values) => Some(values.uri.decode(self.code_page)),
            Kind::UriSubValues(values) => {
                Some(crate::strings::decode_single_byte(&values.url, self.code_page))
            }
            Kind::ControlPanelCplFile(values) => {
                Some(crate::strings::decode_utf16le_units(&values.cpl_file_path))
            }
            Kind::MtpFileEntry(values) | Kind::MtpVolume(values) => {
                Some(crate::strings::decode_utf16le_units(&values.name))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessor_for_wrong_kind_is_none() {
        let item = Item {
            kind: Kind::Unknown,
            class_type: 0,
            signature: 0,
            data_size: 4,
            delegate_folder_id: None,
            extension_blocks: Vec::new(),
            parent: None,
            code_page: Codepage::Ascii,
        };
        assert!(item.as_file_entry().is_none());
        assert!(item.as_volume().is_none());
        assert!(item.name().is_none());
    }

    #[test]
    fn file_entry_name_uses_code_page() {
        let item = Item {
            kind: Kind::FileEntry(FileEntryValues {
                file_size: 0,
                fat_modification_time: 0,
                file_attribute_flags: 0,
                primary_name: NameBytes::SingleByte(b"test\0".to_vec()),
                is_pre_xp: false,
                secondary_name: None,
                trailing_shell_folder_identifier: None,
            }),
            class_type: 0x32,
            signature: 0,
            data_size: 20,
            delegate_folder_id: None,
            extension_blocks: Vec::new(),
            parent: None,
            code_page: Codepage::Windows1252,
        };
        assert_eq!(item.name().unwrap(), "test");
    }
}
