//! Content-metadata record decoding.
//!
//! A record is a fixed header, an extended header of declared size, a
//! table of 0x38-byte content entries, and a 0x20-byte trailer digest.
//! All multi-byte integers are little-endian on disk and surface here as
//! reverse-mode hex strings; hashes and ids keep their raw byte order.

use std::path::PathBuf;

use crate::field::{read_hex, read_u8, FieldOrder, FieldSource};
use crate::kind::{ContentKind, MetaKind};
use crate::Error;

const TITLE_ID_OFFSET: i64 = 0x0;
const VERSION_OFFSET: i64 = 0x8;
const META_KIND_OFFSET: i64 = 0xC;
const TABLE_OFFSET_OFFSET: i64 = 0xE;
const ENTRY_COUNT_OFFSET: i64 = 0x10;
const REQUIRED_DOWNLOAD_SYSTEM_VERSION_OFFSET: i64 = 0x18;
const REQUIRED_SYSTEM_VERSION_OFFSET: i64 = 0x28;
const DIGEST_OFFSET: i64 = -0x20;
const DIGEST_LEN: usize = 0x20;

/// Entry table starts here plus the record's declared extended-header size.
const TABLE_BASE: i64 = 0x20;
const ENTRY_STRIDE: i64 = 0x38;
const ENTRY_ID_OFFSET: i64 = 0x20;
const ENTRY_SIZE_OFFSET: i64 = 0x30;
const ENTRY_KIND_OFFSET: i64 = 0x36;

/// Key generation lives in the companion header blob, not the record.
const MASTER_KEY_REVISION_OFFSET: i64 = 0x220;

/// One content file referenced by a record, in table order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEntry {
    /// 64 hex digits, raw byte order.
    pub hash: String,
    /// 32 hex digits; the entry's identity and its file name on the server.
    pub id: String,
    /// 12 hex digits (a 6-byte little-endian count).
    pub size: String,
    pub kind: ContentKind,
}

/// A decoded content-metadata record.
#[derive(Debug, Clone)]
pub struct ContentMeta {
    /// Where the record was loaded from; empty until a loader fills it in.
    pub path: PathBuf,
    pub kind: MetaKind,
    /// 16 hex digits.
    pub title_id: String,
    /// 8 hex digits.
    pub version: String,
    pub required_system_version: String,
    pub required_download_system_version: String,
    /// Trailer digest, raw byte order.
    pub digest: String,
    /// 2 hex digits, from the header blob.
    pub master_key_revision: String,
    pub entries: Vec<ContentEntry>,
}

impl ContentMeta {
    /// Decode a record and its companion header blob.
    ///
    /// Entries are decoded strictly in table order; downstream packing
    /// and metadata generation rely on that order matching the on-disk
    /// content layout. Any failed read aborts the decode, so a partial
    /// record is never returned.
    pub fn decode<E, R, H>(record: &mut R, header: &mut H) -> Result<ContentMeta, E>
    where
        E: From<Error>,
        R: FieldSource<Err = E>,
        H: FieldSource<Err = E>,
    {
        let kind = MetaKind::from_code(read_u8(record, META_KIND_OFFSET)?)?;
        let title_id = read_hex(record, TITLE_ID_OFFSET, 8, FieldOrder::Reverse)?;
        let version = read_hex(record, VERSION_OFFSET, 4, FieldOrder::Reverse)?;
        let required_system_version =
            read_hex(record, REQUIRED_SYSTEM_VERSION_OFFSET, 8, FieldOrder::Reverse)?;
        let required_download_system_version = read_hex(
            record,
            REQUIRED_DOWNLOAD_SYSTEM_VERSION_OFFSET,
            8,
            FieldOrder::Reverse,
        )?;
        let digest = read_hex(record, DIGEST_OFFSET, DIGEST_LEN, FieldOrder::Preserve)?;

        let table_offset = read_u8(record, TABLE_OFFSET_OFFSET)? as i64;
        let entry_count = read_u8(record, ENTRY_COUNT_OFFSET)?;

        let mut entries = Vec::with_capacity(entry_count as usize);
        for i in 0..entry_count as i64 {
            let base = TABLE_BASE + table_offset + ENTRY_STRIDE * i;

            let hash = read_hex(record, base, 32, FieldOrder::Preserve)?;
            let id = read_hex(record, base + ENTRY_ID_OFFSET, 16, FieldOrder::Preserve)?;
            let size = read_hex(record, base + ENTRY_SIZE_OFFSET, 6, FieldOrder::Reverse)?;
            let kind = ContentKind::from_code(read_u8(record, base + ENTRY_KIND_OFFSET)?)?;

            entries.push(ContentEntry {
                hash,
                id,
                size,
                kind,
            });
        }

        let master_key_revision =
            read_hex(header, MASTER_KEY_REVISION_OFFSET, 1, FieldOrder::Preserve)?;

        Ok(ContentMeta {
            path: PathBuf::new(),
            kind,
            title_id,
            version,
            required_system_version,
            required_download_system_version,
            digest,
            master_key_revision,
            entries,
        })
    }
}
