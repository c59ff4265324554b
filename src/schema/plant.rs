//! Plant database records (48 bytes each).
//!
//! Real-valued FAO-56 parameters are stored fixed-point to fit in bytes:
//! Kc values and fractions as value * 100, root depth in decimetres.

use bitflags::bitflags;
use bytemuck::{Pod, Zeroable};
use serde::Deserialize;

use crate::core::{coerce, lookup, quantize};
use crate::storage::format::{encode_fixed_str, FlashRecord, DB_MAGIC_PLANT};

pub const PLANT_RECORD_SIZE: usize = 48;
pub const PLANT_NAME_LEN: usize = 24;

bitflags! {
    /// Plant attribute flag byte. Bit assignments are shared with the
    /// firmware reader.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PlantFlags: u8 {
        const INDOOR = 0x01;
        const TOXIC = 0x02;
        const EDIBLE = 0x04;
    }
}

/// Raw plant CSV row. Every column is optional: a missing column and a
/// blank cell coerce identically at the encoding boundary.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlantCsvRow {
    pub category: String,
    pub common_name_en: String,
    pub common_name_ro: String,
    pub kc_ini: String,
    pub kc_mid: String,
    pub kc_end: String,
    pub root_depth_max_m: String,
    pub depletion_fraction_p: String,
    pub stage_days_ini: String,
    pub stage_days_dev: String,
    pub stage_days_mid: String,
    pub stage_days_end: String,
    pub indoor_ok: String,
    pub toxic_flag: String,
    pub edible_part: String,
    pub drought_tolerance: String,
    pub typ_irrig_method: String,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct PlantRecord {
    pub subtype_id: u16,
    pub category_id: u8,
    pub _padding: u8,
    pub common_name: [u8; PLANT_NAME_LEN],
    pub kc_ini: u8,
    pub kc_mid: u8,
    pub kc_end: u8,
    pub root_depth_max_dm: u8,
    pub depletion_fraction: u8,
    pub stage_ini: u8,
    pub stage_dev: u8,
    pub stage_mid: u8,
    pub stage_end: u8,
    pub flags: u8,
    pub drought_tolerance: u8,
    pub default_irrigation: u8,
    pub reserved: [u8; 8],
}

const _: () = assert!(std::mem::size_of::<PlantRecord>() == PLANT_RECORD_SIZE);

impl FlashRecord for PlantRecord {
    const MAGIC: u32 = DB_MAGIC_PLANT;
    const RECORD_SIZE: usize = PLANT_RECORD_SIZE;
    const SCHEMA_NAME: &'static str = "plants";
    const CSV_NAME: &'static str = "plants_full.csv";
    const OUTPUT_NAME: &'static str = "plants.bin";
    type Row = PlantCsvRow;

    fn from_row(row: &PlantCsvRow, index: usize) -> Self {
        let mut flags = PlantFlags::empty();
        if coerce::parse_flag(&row.indoor_ok) {
            flags |= PlantFlags::INDOOR;
        }
        if coerce::parse_flag(&row.toxic_flag) {
            flags |= PlantFlags::TOXIC;
        }
        if !row.edible_part.trim().is_empty() {
            flags |= PlantFlags::EDIBLE;
        }

        let name = if row.common_name_en.trim().is_empty() {
            &row.common_name_ro
        } else {
            &row.common_name_en
        };

        Self {
            // Plant rows carry no explicit id; CSV position is the id.
            subtype_id: quantize::clamp_u16(index as i64).to_le(),
            category_id: lookup::category_code(&row.category),
            _padding: 0,
            common_name: encode_fixed_str(name),
            kc_ini: quantize::scale_u8(coerce::parse_f64(&row.kc_ini, 0.3), 100.0),
            kc_mid: quantize::scale_u8(coerce::parse_f64(&row.kc_mid, 1.0), 100.0),
            kc_end: quantize::scale_u8(coerce::parse_f64(&row.kc_end, 0.5), 100.0),
            root_depth_max_dm: quantize::scale_u8(coerce::parse_f64(&row.root_depth_max_m, 0.5), 10.0),
            depletion_fraction: quantize::scale_u8(coerce::parse_f64(&row.depletion_fraction_p, 0.5), 100.0),
            stage_ini: quantize::clamp_u8(coerce::parse_i64(&row.stage_days_ini, 20)),
            stage_dev: quantize::clamp_u8(coerce::parse_i64(&row.stage_days_dev, 30)),
            stage_mid: quantize::clamp_u8(coerce::parse_i64(&row.stage_days_mid, 40)),
            stage_end: quantize::clamp_u8(coerce::parse_i64(&row.stage_days_end, 20)),
            flags: flags.bits(),
            drought_tolerance: lookup::tolerance_code(&row.drought_tolerance),
            default_irrigation: lookup::method_code(&row.typ_irrig_method),
            reserved: [0; 8],
        }
    }
}
