//! Decodes Windows Shell Items and Shell Item Lists: the binary format
//! Windows uses to encode a path through the Shell namespace (Desktop ->
//! My Computer -> drive -> folder -> file, or equivalents such as Control
//! Panel items, MTP devices, URI targets, and compressed-archive entries).
//! These structures turn up embedded in shortcut files, Jump Lists,
//! shellbag registry keys, recent-document MRUs and automatic
//! destinations, and are a staple of digital-forensic activity
//! reconstruction.
//!
//! The single entry point is [`parse_item_list`]: given a borrowed byte
//! slice and the single-byte [`Codepage`] to use for legacy strings, it
//! returns an [`ItemList`] of [`Item`]s in wire order, each carrying a
//! variant-tagged [`Kind`] and its ordered chain of [`ExtensionBlock`]s.
//! Parsing is pure, synchronous and allocation-bounded by input size — no
//! I/O, no mutation, no re-serialization.

mod catalog;
mod classify;
mod codepage;
mod cursor;
mod delegate;
mod error;
mod extension;
mod fmt;
mod item;
mod list;
mod strings;
mod timestamp;
mod variant;

pub use catalog::identifier_name;
pub use codepage::Codepage;
pub use error::Error;
pub use extension::{ExtensionBlock, ExtensionValue, FileEntryExtensionValues, LocalizedName};
pub use fmt::{debug_item, debug_item_list, hex_dump};
pub use item::{Item, Kind};
pub use list::{parse_item_list, ItemList};
pub use strings::{decode_single_byte, decode_utf16le_bytes, decode_utf16le_units};
pub use timestamp::{format_fat_date_time, format_file_time};
pub use variant::{
    CompressedFolderForm, CompressedFolderValues, ControlPanelCategoryValues,
    ControlPanelCplFileValues, ControlPanelItemValues, FileEntryValues, MtpPropertyEntry,
    MtpPropertyValue, MtpValues, NameBytes, NetworkLocationValues, OpaqueSignatureValues,
    RootFolderValues, UriSubValuesValues, UriValues, UsersPropertyViewIdentifier,
    UsersPropertyViewValues, VolumeValues,
};
