//! CSV to binary conversion pipeline.

use std::path::Path;

use thiserror::Error;

use crate::storage::format::FlashRecord;
use crate::storage::writer::{Database, StorageError};

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Read one schema's CSV and assemble its binary database.
///
/// Rows are consumed in file order. Field-level defects never fail here;
/// they coerce to defaults inside `from_row`. Only file-level problems
/// (unreadable file, malformed CSV structure) surface as errors.
pub fn convert_csv<R: FlashRecord>(csv_path: &Path) -> Result<Database, ConvertError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(csv_path)?;

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<R::Row>().enumerate() {
        let row = row?;
        records.push(R::from_row(&row, index));
    }

    let database = Database::build(&records)?;
    Ok(database)
}
