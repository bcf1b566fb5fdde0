//! Debug pretty-printing (§1, §9): a separate, optional formatter that
//! consumes an already-parsed [`crate::item::Item`] tree. Kept out of the
//! hot decode path entirely — nothing in [`crate::list`], [`crate::variant`]
//! or [`crate::extension`] calls into this module. Resolves known
//! identifiers through [`crate::catalog`] and renders FAT/FILETIME fields
//! through [`crate::timestamp`], both debug-only collaborators.

use std::fmt::Write as _;

use crate::catalog;
use crate::extension::ExtensionValue;
use crate::item::{Item, Kind};
use crate::list::ItemList;
use crate::timestamp;

/// Renders every item in `list`, one per line plus an indented block of
/// extension-block summaries, in wire order.
pub fn debug_item_list(list: &ItemList) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ItemList ({} items, {} bytes)", list.items().len(), list.data_size());
    for (index, item) in list.items().enumerate() {
        let _ = writeln!(out, "[{index}] {}", debug_item(item));
    }
    out
}

/// Renders a single item's kind, discriminators, and extension-block chain
/// as a single human-readable block (no trailing newline).
pub fn debug_item(item: &Item) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "class_type=0x{:02X} signature=0x{:08X} data_size={} kind={}",
        item.class_type(),
        item.signature(),
        item.data_size(),
        debug_kind(item.kind())
    );
    if let Some(delegate_folder_id) = item.delegate_folder_id() {
        let _ = write!(out, " delegate_folder_id={}", format_guid(&delegate_folder_id));
    }
    for block in item.extension_blocks() {
        let _ = write!(out, "\n    {}", debug_extension_block(block));
    }
    out
}

fn debug_kind(kind: &Kind) -> String {
    match kind {
        Kind::RootFolder(values) => format!(
            "RootFolder {{ shell_folder_identifier: {} }}",
            format_guid(&values.shell_folder_identifier)
        ),
        Kind::Volume(values) => format!(
            "Volume {{ name: {:?}, shell_folder_identifier: {:?} }}",
            values.name.as_ref().map(|raw| String::from_utf8_lossy(raw).trim_end_matches('\0').to_string()),
            values.shell_folder_identifier.map(|id| format_guid(&id))
        ),
        Kind::FileEntry(values) => format!(
            "FileEntry {{ file_size: {}, modified: {}, pre_xp: {} }}",
            values.file_size,
            timestamp::format_fat_date_time(values.fat_modification_time),
            values.is_pre_xp
        ),
        Kind::NetworkLocation(_) => "NetworkLocation".to_string(),
        Kind::CompressedFolder(values) => format!("CompressedFolder {{ form: {:?} }}", values.form),
        Kind::Uri(values) => format!("Uri {{ flags: 0x{:02X} }}", values.flags),
        Kind::UriSubValues(_) => "UriSubValues".to_string(),
        Kind::ControlPanelCategory(values) => {
            format!("ControlPanelCategory {{ identifier: 0x{:08X} }}", values.identifier)
        }
        Kind::ControlPanelItem(values) => format!(
            "ControlPanelItem {{ identifier: {} ({}) }}",
            format_guid(&values.identifier),
            catalog::identifier_name(&values.identifier).unwrap_or("unknown")
        ),
        Kind::ControlPanelCplFile(_) => "ControlPanelCplFile".to_string(),
        Kind::GameFolder(values) => format!("GameFolder {{ signature: 0x{:08X} }}", values.signature),
        Kind::MtpFileEntry(values) => format!("MtpFileEntry {{ properties: {} }}", values.properties.len()),
        Kind::MtpVolume(values) => format!("MtpVolume {{ properties: {} }}", values.properties.len()),
        Kind::UsersPropertyView(values) => format!(
            "UsersPropertyView {{ signature: 0x{:08X}, property_store: {} bytes }}",
            values.signature,
            values.property_store.len()
        ),
        Kind::WebSite(_) => "WebSite".to_string(),
        Kind::CdBurn(values) => format!("CdBurn {{ signature: 0x{:08X} }}", values.signature),
        Kind::AcronisTib(values) => format!("AcronisTib {{ signature: 0x{:08X} }}", values.signature),
        Kind::Unknown => "Unknown".to_string(),
    }
}

fn debug_extension_block(block: &crate::extension::ExtensionBlock) -> String {
    match &block.value {
        ExtensionValue::FileEntry(values) => format!(
            "ExtensionBlock 0x{:08X} v{} {{ created: {}, accessed: {}, file_reference: {:?} }}",
            block.signature,
            block.version,
            timestamp::format_fat_date_time(values.creation_time),
            timestamp::format_fat_date_time(values.access_time),
            values.file_reference,
        ),
        ExtensionValue::ShellFolder { identifier } => format!(
            "ExtensionBlock 0x{:08X} v{} {{ shell_folder_identifier: {:?} }}",
            block.signature,
            block.version,
            identifier.map(|id| format_guid(&id)),
        ),
        ExtensionValue::Opaque(bytes) => format!(
            "ExtensionBlock 0x{:08X} v{} {{ opaque: {} bytes }}",
            block.signature,
            block.version,
            bytes.len()
        ),
        ExtensionValue::Unknown(bytes) => format!(
            "ExtensionBlock 0x{:08X} v{} {{ unrecognized: {} bytes }}",
            block.signature,
            block.version,
            bytes.len()
        ),
    }
}

fn format_guid(guid: &uuid::Uuid) -> String {
    format!("{{{}}}", guid.hyphenated())
}

/// Renders `bytes` as a classic hex dump (16 bytes per row, offset prefix,
/// ASCII gutter) — used for opaque property-store and sub-blob payloads that
/// this crate never semantically decodes.
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::new();
    for (row, chunk) in bytes.chunks(16).enumerate() {
        let _ = write!(out, "{:08X}  ", row * 16);
        for byte in chunk {
            let _ = write!(out, "{byte:02X} ");
        }
        for _ in chunk.len()..16 {
            out.push_str("   ");
        }
        out.push_str(" ");
        for &byte in chunk {
            let ch = if (0x20..0x7f).contains(&byte) { byte as char } else { '.' };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codepage::Codepage;

    #[test]
    fn debug_item_list_reports_empty_list() {
        let list = crate::list::parse_item_list(&[0, 0], Codepage::Ascii).unwrap();
        let rendered = debug_item_list(&list);
        assert!(rendered.contains("0 items"));
    }

    #[test]
    fn hex_dump_pads_short_final_row() {
        let rendered = hex_dump(&[0x41, 0x42]);
        assert!(rendered.contains("AB"));
        assert!(rendered.starts_with("00000000"));
    }

    #[test]
    fn debug_kind_renders_root_folder_guid() {
        let values = crate::variant::RootFolderValues {
            shell_folder_identifier: uuid::Uuid::nil(),
        };
        let rendered = debug_kind(&Kind::RootFolder(values));
        assert!(rendered.contains("RootFolder"));
        assert!(rendered.contains("00000000-0000-0000-0000-000000000000"));
    }
}
