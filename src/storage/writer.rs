//! Database assembly and file output.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use bytemuck::bytes_of;
use serde::Serialize;
use thiserror::Error;

use crate::storage::format::{DbHeader, FlashRecord, HEADER_SIZE};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("record count {0} exceeds the 16-bit header field")]
    TooManyRecords(usize),
}

/// An assembled binary database: the record payload plus the header
/// metadata needed to emit it.
pub struct Database {
    magic: u32,
    count: u16,
    record_size: u16,
    payload: Vec<u8>,
}

/// Per-file result reported to the operator and the run manifest.
#[derive(Debug, Clone, Serialize)]
pub struct WriteSummary {
    pub file: String,
    pub records: u16,
    pub bytes: u64,
    pub crc32: u32,
}

impl Database {
    /// Concatenate encoded records into a payload, back to back with no
    /// padding between records.
    ///
    /// Each record's byte length is re-checked against the schema's
    /// declared size. A mismatch is a layout-definition bug, never bad
    /// input, and aborts hard: silent drift here would corrupt the format
    /// contract with the firmware reader.
    pub fn build<R: FlashRecord>(records: &[R]) -> Result<Self, StorageError> {
        let count = u16::try_from(records.len())
            .map_err(|_| StorageError::TooManyRecords(records.len()))?;

        let mut payload = Vec::with_capacity(records.len() * R::RECORD_SIZE);
        for record in records {
            let bytes = bytes_of(record);
            assert_eq!(
                bytes.len(),
                R::RECORD_SIZE,
                "{} record layout drifted from its declared {}-byte size",
                R::SCHEMA_NAME,
                R::RECORD_SIZE
            );
            payload.extend_from_slice(bytes);
        }

        Ok(Self {
            magic: R::MAGIC,
            count,
            record_size: R::RECORD_SIZE as u16,
            payload,
        })
    }

    pub fn count(&self) -> u16 {
        self.count
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// CRC32 over the payload only, header excluded. The header stores
    /// this value and the firmware recomputes it before trusting any
    /// record.
    pub fn crc32(&self) -> u32 {
        crc32fast::hash(&self.payload)
    }

    /// Write header + payload to `path`, replacing any prior file.
    ///
    /// Output goes to a sibling temp file first and is renamed into place,
    /// so the final name never holds a partially written database.
    pub fn write(&self, path: &Path) -> Result<WriteSummary, StorageError> {
        let crc = self.crc32();
        let header = DbHeader::new(self.magic, self.count, crc, self.record_size);

        let tmp = path.with_extension("tmp");
        let result = (|| -> Result<(), StorageError> {
            let mut file = File::create(&tmp)?;
            file.write_all(bytes_of(&header))?;
            file.write_all(&self.payload)?;
            file.sync_all()?;
            Ok(())
        })();
        if let Err(err) = result {
            let _ = fs::remove_file(&tmp);
            return Err(err);
        }
        fs::rename(&tmp, path)?;

        Ok(WriteSummary {
            file: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            records: self.count,
            bytes: (HEADER_SIZE + self.payload.len()) as u64,
            crc32: crc,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::soil::{SoilCsvRow, SoilRecord, SOIL_RECORD_SIZE};
    use crate::storage::format::DB_MAGIC_SOIL;
    use tempfile::tempdir;

    fn sample_records(n: usize) -> Vec<SoilRecord> {
        (0..n)
            .map(|i| {
                let row = SoilCsvRow {
                    soil_id: i.to_string(),
                    soil_type: format!("Soil {}", i),
                    ..Default::default()
                };
                SoilRecord::from_row(&row, i)
            })
            .collect()
    }

    #[test]
    fn payload_is_count_records_with_no_gaps() {
        let db = Database::build(&sample_records(5)).unwrap();
        assert_eq!(db.count(), 5);
        assert_eq!(db.payload().len(), 5 * SOIL_RECORD_SIZE);
    }

    #[test]
    fn written_file_has_header_then_payload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("soils.bin");
        let db = Database::build(&sample_records(2)).unwrap();
        let summary = db.write(&path).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(bytes.len(), HEADER_SIZE + 2 * SOIL_RECORD_SIZE);
        assert_eq!(summary.bytes, bytes.len() as u64);

        let magic = u32::from_le_bytes(bytes[0..4].try_into().unwrap());
        let version = u16::from_le_bytes(bytes[4..6].try_into().unwrap());
        let count = u16::from_le_bytes(bytes[6..8].try_into().unwrap());
        let crc = u32::from_le_bytes(bytes[8..12].try_into().unwrap());
        let record_size = u16::from_le_bytes(bytes[12..14].try_into().unwrap());
        let reserved = u16::from_le_bytes(bytes[14..16].try_into().unwrap());

        assert_eq!(magic, DB_MAGIC_SOIL);
        assert_eq!(version, 1);
        assert_eq!(count, 2);
        assert_eq!(record_size, SOIL_RECORD_SIZE as u16);
        assert_eq!(reserved, 0);

        // The stored CRC must match a fresh CRC over the payload bytes.
        assert_eq!(crc, crc32fast::hash(&bytes[HEADER_SIZE..]));
        assert_eq!(crc, summary.crc32);
    }

    #[test]
    fn rewriting_the_same_input_is_byte_identical() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("soils.bin");

        Database::build(&sample_records(3)).unwrap().write(&path).unwrap();
        let first = fs::read(&path).unwrap();
        Database::build(&sample_records(3)).unwrap().write(&path).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn no_temp_file_remains_after_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("soils.bin");
        Database::build(&sample_records(1)).unwrap().write(&path).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn record_count_must_fit_the_header_field() {
        let records = sample_records(65_536);
        match Database::build(&records) {
            Err(StorageError::TooManyRecords(n)) => assert_eq!(n, 65_536),
            other => panic!("expected TooManyRecords, got {:?}", other.map(|db| db.count())),
        }
    }

    #[test]
    fn empty_database_is_just_a_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("soils.bin");
        let db = Database::build::<SoilRecord>(&[]).unwrap();
        db.write(&path).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(bytes.len(), HEADER_SIZE);
        let count = u16::from_le_bytes(bytes[6..8].try_into().unwrap());
        assert_eq!(count, 0);
        // CRC of an empty payload is the CRC32 initial value.
        let crc = u32::from_le_bytes(bytes[8..12].try_into().unwrap());
        assert_eq!(crc, crc32fast::hash(&[]));
    }
}
