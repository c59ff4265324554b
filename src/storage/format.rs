use bytemuck::{Pod, Zeroable};
use serde::de::DeserializeOwned;

/// File type magics ('PLNT', 'SOIL', 'IRRG'). Never zero, unique per schema.
pub const DB_MAGIC_PLANT: u32 = 0x504C_4E54;
pub const DB_MAGIC_SOIL: u32 = 0x534F_494C;
pub const DB_MAGIC_IRRIGATION: u32 = 0x4952_5247;

/// Bumped on any record layout change; the firmware reader rejects files
/// carrying a version it does not know.
pub const DB_VERSION_CURRENT: u16 = 1;

pub const HEADER_SIZE: usize = 16;

/// On-disk database header. Multi-byte fields are little-endian.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct DbHeader {
    pub magic: u32,
    pub version: u16,
    pub count: u16,
    pub crc32: u32,
    pub record_size: u16,
    pub reserved: u16,
}

impl DbHeader {
    /// Build a header with fields pre-swapped to little-endian, so
    /// `bytemuck::bytes_of` yields the wire layout on any host.
    pub fn new(magic: u32, count: u16, crc32: u32, record_size: u16) -> Self {
        Self {
            magic: magic.to_le(),
            version: DB_VERSION_CURRENT.to_le(),
            count: count.to_le(),
            crc32: crc32.to_le(),
            record_size: record_size.to_le(),
            reserved: 0,
        }
    }
}

// Ensure DbHeader is 16 bytes
const _: () = assert!(std::mem::size_of::<DbHeader>() == HEADER_SIZE);

/// Schema descriptor implemented once per database kind. The conversion
/// pipeline and writer are generic over this, so header packing and CRC
/// logic exist exactly once.
pub trait FlashRecord: Pod {
    const MAGIC: u32;
    const RECORD_SIZE: usize;
    /// Short name used in logs ("plants").
    const SCHEMA_NAME: &'static str;
    /// Source CSV file name, looked up under the csv directory.
    const CSV_NAME: &'static str;
    /// Output file name under the output directory.
    const OUTPUT_NAME: &'static str;
    /// Raw CSV row shape this record encodes from.
    type Row: DeserializeOwned;
    /// Encode one row. `index` is the 0-based CSV position; schemas whose
    /// source carries no explicit id use it as the record identifier, so
    /// row order is an observable part of the output.
    fn from_row(row: &Self::Row, index: usize) -> Self;
}

/// Encode a string into a fixed `LEN`-byte buffer: UTF-8, truncated to at
/// most `LEN - 1` bytes without splitting a character, zero-padded. The
/// buffer always ends with at least one NUL.
pub fn encode_fixed_str<const LEN: usize>(s: &str) -> [u8; LEN] {
    let mut buf = [0u8; LEN];
    let mut end = s.len().min(LEN - 1);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    buf[..end].copy_from_slice(&s.as_bytes()[..end]);
    buf
}
