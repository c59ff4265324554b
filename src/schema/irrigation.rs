//! Irrigation method records (24 bytes each).
//!
//! Depth and application-rate columns often hold "min-max" ranges in the
//! source spreadsheet; those encode as the average of both ends.

use bytemuck::{Pod, Zeroable};
use serde::Deserialize;

use crate::core::{coerce, quantize};
use crate::storage::format::{encode_fixed_str, FlashRecord, DB_MAGIC_IRRIGATION};

pub const IRRIGATION_RECORD_SIZE: usize = 24;
pub const IRRIGATION_NAME_LEN: usize = 15;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct IrrigationCsvRow {
    pub method_id: String,
    pub method_name: String,
    pub efficiency_pct: String,
    pub wetting_fraction: String,
    pub depth_typical_mm: String,
    pub application_rate_mm_h: String,
    pub distribution_uniformity_pct: String,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct IrrigationRecord {
    pub method_id: u8,
    pub method_name: [u8; IRRIGATION_NAME_LEN],
    pub efficiency_pct: u8,
    pub wetting_fraction: u8,
    pub depth_typical_mm: u8,
    pub application_rate_mm_h: u8,
    pub distribution_uniformity_pct: u8,
    pub reserved: [u8; 3],
}

const _: () = assert!(std::mem::size_of::<IrrigationRecord>() == IRRIGATION_RECORD_SIZE);

impl FlashRecord for IrrigationRecord {
    const MAGIC: u32 = DB_MAGIC_IRRIGATION;
    const RECORD_SIZE: usize = IRRIGATION_RECORD_SIZE;
    const SCHEMA_NAME: &'static str = "irrigation methods";
    const CSV_NAME: &'static str = "irrigation_methods.csv";
    const OUTPUT_NAME: &'static str = "irrigation.bin";
    type Row = IrrigationCsvRow;

    fn from_row(row: &IrrigationCsvRow, _index: usize) -> Self {
        Self {
            method_id: quantize::clamp_u8(coerce::parse_i64(&row.method_id, 0)),
            method_name: encode_fixed_str(&row.method_name),
            efficiency_pct: quantize::clamp_u8(coerce::parse_i64(&row.efficiency_pct, 80)),
            wetting_fraction: quantize::scale_u8(coerce::parse_f64(&row.wetting_fraction, 0.5), 100.0),
            depth_typical_mm: quantize::clamp_u8(coerce::range_average(&row.depth_typical_mm, 30)),
            application_rate_mm_h: quantize::clamp_u8(coerce::range_average(&row.application_rate_mm_h, 10)),
            distribution_uniformity_pct: quantize::clamp_u8(
                coerce::parse_i64(&row.distribution_uniformity_pct, 85),
            ),
            reserved: [0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytemuck::bytes_of;

    #[test]
    fn encoded_length_matches_declared_size() {
        let record = IrrigationRecord::from_row(&IrrigationCsvRow::default(), 0);
        assert_eq!(bytes_of(&record).len(), IRRIGATION_RECORD_SIZE);
    }

    #[test]
    fn drip_row_encodes_field_by_field() {
        let row = IrrigationCsvRow {
            method_id: "0".into(),
            method_name: "Drip".into(),
            efficiency_pct: "90".into(),
            wetting_fraction: "0.3".into(),
            depth_typical_mm: "25".into(),
            application_rate_mm_h: "4".into(),
            distribution_uniformity_pct: "90".into(),
        };
        let record = IrrigationRecord::from_row(&row, 0);
        assert_eq!(record.method_id, 0);
        assert_eq!(&record.method_name[..4], b"Drip");
        assert_eq!(record.efficiency_pct, 90);
        assert_eq!(record.wetting_fraction, 30);
        assert_eq!(record.depth_typical_mm, 25);
        assert_eq!(record.application_rate_mm_h, 4);
        assert_eq!(record.distribution_uniformity_pct, 90);
        assert_eq!(record.reserved, [0; 3]);
    }

    #[test]
    fn range_cells_store_the_average() {
        let row = IrrigationCsvRow {
            depth_typical_mm: "40-80".into(),
            application_rate_mm_h: "5-15".into(),
            ..Default::default()
        };
        let record = IrrigationRecord::from_row(&row, 0);
        assert_eq!(record.depth_typical_mm, 60);
        assert_eq!(record.application_rate_mm_h, 10);
    }

    #[test]
    fn overdriven_efficiency_saturates_not_wraps() {
        let row = IrrigationCsvRow {
            efficiency_pct: "500".into(),
            ..Default::default()
        };
        let record = IrrigationRecord::from_row(&row, 0);
        // 500 % 256 would be 244; saturation must win.
        assert_eq!(record.efficiency_pct, 255);
    }

    #[test]
    fn blank_row_encodes_documented_defaults() {
        let record = IrrigationRecord::from_row(&IrrigationCsvRow::default(), 0);
        assert_eq!(record.method_id, 0);
        assert_eq!(record.efficiency_pct, 80);
        assert_eq!(record.wetting_fraction, 50);
        assert_eq!(record.depth_typical_mm, 30);
        assert_eq!(record.application_rate_mm_h, 10);
        assert_eq!(record.distribution_uniformity_pct, 85);
    }
}
