//! CSV to binary agronomic database converter.
//!
//! Turns the human-edited plant, soil, and irrigation-method spreadsheets
//! into fixed-layout binary files an irrigation controller reads straight
//! from external flash: no pointers, no parsing on device, one integrity-
//! checked header per file.
//!
//! File format (little-endian):
//!   - 16-byte header: magic, version, count, crc32, record_size, reserved
//!   - `count` fixed-size records, back to back, no padding between them
//!
//! The CRC32 covers the payload only; the firmware recomputes it and
//! validates magic and version before trusting any record.

pub mod convert;
pub mod core;
pub mod schema;
pub mod storage;
