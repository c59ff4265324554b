//! Soil database records (24 bytes each).

use bytemuck::{Pod, Zeroable};
use serde::Deserialize;

use crate::core::{coerce, quantize};
use crate::storage::format::{encode_fixed_str, FlashRecord, DB_MAGIC_SOIL};

pub const SOIL_RECORD_SIZE: usize = 24;
pub const SOIL_NAME_LEN: usize = 15;

/// Raw soil CSV row; see [`PlantCsvRow`](crate::schema::plant::PlantCsvRow)
/// for the optional-column convention.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SoilCsvRow {
    pub soil_id: String,
    pub soil_type: String,
    pub fc_pctvol: String,
    pub pwp_pctvol: String,
    pub awc_mm_per_m: String,
    pub infil_mm_h: String,
    pub p_raw: String,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct SoilRecord {
    pub soil_id: u8,
    pub soil_type: [u8; SOIL_NAME_LEN],
    pub fc_pctvol: u8,
    pub pwp_pctvol: u8,
    pub awc_mm_per_m: u16,
    pub infil_mm_h: u8,
    pub p_raw: u8,
    pub reserved: [u8; 2],
}

const _: () = assert!(std::mem::size_of::<SoilRecord>() == SOIL_RECORD_SIZE);

impl FlashRecord for SoilRecord {
    const MAGIC: u32 = DB_MAGIC_SOIL;
    const RECORD_SIZE: usize = SOIL_RECORD_SIZE;
    const SCHEMA_NAME: &'static str = "soils";
    const CSV_NAME: &'static str = "soil_db_new.csv";
    const OUTPUT_NAME: &'static str = "soils.bin";
    type Row = SoilCsvRow;

    fn from_row(row: &SoilCsvRow, _index: usize) -> Self {
        Self {
            soil_id: quantize::clamp_u8(coerce::parse_i64(&row.soil_id, 0)),
            soil_type: encode_fixed_str(&row.soil_type),
            fc_pctvol: quantize::clamp_u8(coerce::parse_i64(&row.fc_pctvol, 30)),
            pwp_pctvol: quantize::clamp_u8(coerce::parse_i64(&row.pwp_pctvol, 15)),
            awc_mm_per_m: quantize::clamp_u16(coerce::parse_i64(&row.awc_mm_per_m, 150)).to_le(),
            infil_mm_h: quantize::clamp_u8(coerce::parse_i64(&row.infil_mm_h, 10)),
            p_raw: quantize::scale_u8(coerce::parse_f64(&row.p_raw, 0.5), 100.0),
            reserved: [0; 2],
        }
    }
}
