//! On-disk layout of the flat archive container.
//!
//! The container is a 0x10-byte header, one 0x18-byte entry per file, a
//! NUL-joined name table padded so the whole header region ends on a
//! 16-byte boundary, and the file bodies concatenated in entry order.

use core::mem;

use bytemuck::{Pod, Zeroable};

pub const MAGIC: [u8; 4] = *b"PFS0";

pub const HEADER_SIZE: usize = mem::size_of::<Header>();
pub const ENTRY_SIZE: usize = mem::size_of::<Entry>();

/// Fixed container header. Integer fields are stored little-endian.
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
#[repr(C, packed)]
pub struct Header {
    pub magic: [u8; 4],
    count: u32,
    string_table_size: u32,
    reserved: u32,
}

impl Header {
    pub fn new(count: u32, string_table_size: u32) -> Header {
        Header {
            magic: MAGIC,
            count: count.to_le(),
            string_table_size: string_table_size.to_le(),
            reserved: 0,
        }
    }

    pub fn count(&self) -> u32 {
        u32::from_le(self.count)
    }

    pub fn string_table_size(&self) -> u32 {
        u32::from_le(self.string_table_size)
    }
}

/// Per-file entry. `offset` is relative to the start of the data
/// region, `name_offset` to the start of the string table.
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
#[repr(C, packed)]
pub struct Entry {
    offset: u64,
    size: u64,
    name_offset: u32,
    reserved: u32,
}

impl Entry {
    pub fn new(offset: u64, size: u64, name_offset: u32) -> Entry {
        Entry {
            offset: offset.to_le(),
            size: size.to_le(),
            name_offset: name_offset.to_le(),
            reserved: 0,
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from_le(self.offset)
    }

    pub fn size(&self) -> u64 {
        u64::from_le(self.size)
    }

    pub fn name_offset(&self) -> u32 {
        u32::from_le(self.name_offset)
    }
}

/// Serialize the whole header region (header, entry table, string
/// table, padding) for a listing of `(name, size)` pairs.
///
/// Each entry's data offset is the running sum of the sizes before it,
/// so the bodies must later be appended in the same order. The padding
/// after the string table is `0x10 - unpadded % 0x10`, which is a full
/// 0x10 bytes when the region is already aligned.
pub fn build_header<S: AsRef<str>>(files: &[(S, u64)]) -> Vec<u8> {
    let string_table = files
        .iter()
        .map(|(name, _)| name.as_ref())
        .collect::<Vec<_>>()
        .join("\0");
    let unpadded = HEADER_SIZE + files.len() * ENTRY_SIZE + string_table.len();
    let padding = 0x10 - unpadded % 0x10;

    let mut region = Vec::with_capacity(unpadded + padding);
    let header = Header::new(files.len() as u32, (string_table.len() + padding) as u32);
    region.extend_from_slice(bytemuck::bytes_of(&header));

    let mut data_offset = 0;
    let mut name_offset = 0;
    for (name, size) in files {
        let entry = Entry::new(data_offset, *size, name_offset);
        region.extend_from_slice(bytemuck::bytes_of(&entry));
        data_offset += size;
        name_offset += name.as_ref().len() as u32 + 1;
    }

    region.extend_from_slice(string_table.as_bytes());
    region.resize(unpadded + padding, 0);
    region
}
