use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};

use agridb::convert::convert_csv;
use agridb::schema::irrigation::IrrigationRecord;
use agridb::schema::plant::PlantRecord;
use agridb::schema::soil::SoilRecord;
use agridb::storage::format::FlashRecord;
use agridb::storage::writer::WriteSummary;

#[derive(Parser, Debug)]
#[command(version, about = "Convert agronomic CSV databases to binary flash images", long_about = None)]
struct Args {
    /// Directory containing the source CSV files
    #[arg(short = 'c', long, default_value = ".")]
    csv_dir: PathBuf,

    /// Output directory for the binary database files
    #[arg(short = 'o', long, default_value = "flash_db")]
    output_dir: PathBuf,

    /// Write a JSON manifest of the run to this path
    #[arg(long)]
    manifest: Option<PathBuf>,
}

#[derive(Serialize)]
struct Manifest<'a> {
    produced: &'a [WriteSummary],
    skipped: &'a [&'static str],
}

/// Convert one schema, or skip it with a warning when its source CSV is
/// absent. A missing spreadsheet must not block the other databases.
fn run_schema<R: FlashRecord>(
    csv_dir: &Path,
    output_dir: &Path,
) -> Result<Option<WriteSummary>, Box<dyn Error>> {
    let csv_path = csv_dir.join(R::CSV_NAME);
    if !csv_path.exists() {
        warn!("{} not found, skipping {}", csv_path.display(), R::SCHEMA_NAME);
        return Ok(None);
    }

    info!("Converting {} from {}", R::SCHEMA_NAME, csv_path.display());
    let database = convert_csv::<R>(&csv_path)?;
    let summary = database.write(&output_dir.join(R::OUTPUT_NAME))?;
    info!(
        "Created {}: {} records, {} bytes (CRC32: 0x{:08X})",
        summary.file, summary.records, summary.bytes, summary.crc32
    );
    Ok(Some(summary))
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    fs::create_dir_all(&args.output_dir)?;

    // The three schemas are independent of each other; each either
    // produces its file or is skipped.
    let outcomes = [
        (
            PlantRecord::OUTPUT_NAME,
            run_schema::<PlantRecord>(&args.csv_dir, &args.output_dir)?,
        ),
        (
            SoilRecord::OUTPUT_NAME,
            run_schema::<SoilRecord>(&args.csv_dir, &args.output_dir)?,
        ),
        (
            IrrigationRecord::OUTPUT_NAME,
            run_schema::<IrrigationRecord>(&args.csv_dir, &args.output_dir)?,
        ),
    ];

    let mut produced = Vec::new();
    let mut skipped = Vec::new();
    for (name, outcome) in outcomes {
        match outcome {
            Some(summary) => produced.push(summary),
            None => skipped.push(name),
        }
    }

    info!(
        "Produced {} of {} database files in {}",
        produced.len(),
        produced.len() + skipped.len(),
        args.output_dir.display()
    );
    for summary in &produced {
        info!("  {} ({} records)", summary.file, summary.records);
    }
    for name in &skipped {
        warn!("  {} skipped (no source CSV)", name);
    }

    if let Some(manifest_path) = &args.manifest {
        let manifest = Manifest {
            produced: &produced,
            skipped: &skipped,
        };
        fs::write(manifest_path, serde_json::to_string_pretty(&manifest)?)?;
        info!("Wrote manifest to {}", manifest_path.display());
    }

    Ok(())
}
