//! CLI command implementations

pub mod generate;
pub mod print;
pub mod verify;

use crate::TableArgs;
use anyhow::{Context, Result, bail};
use cie_table::{CieTable, EntrySink, Preset, Rounding, TableConfig};
use tracing::debug;

/// Resolve the table configuration: preset, then config file, then flags.
pub fn build_config(args: &TableArgs) -> Result<TableConfig> {
    let mut config = match &args.config {
        Some(path) => TableConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => {
            let preset: Preset = args
                .preset
                .parse()
                .with_context(|| format!("Unknown preset: {} (expected byte or wide)", args.preset))?;
            TableConfig::preset(preset)
        }
    };

    if let Some(size) = args.size {
        config.input_size = size;
    }
    if let Some(range) = args.range {
        config.output_range = range;
    }
    if let Some(scale) = args.scale {
        config.scale_factor = scale;
    }
    if let Some(rounding) = &args.rounding {
        config.rounding = parse_rounding(rounding)?;
    }
    if let Some(name) = &args.table_name {
        config.style.table_name = name.clone();
    }
    if let Some(int_type) = &args.int_type {
        config.style.int_type = int_type.clone();
    }

    config.validate().context("Invalid table parameters")?;
    debug!(
        size = config.input_size,
        range = config.output_range,
        scale = config.scale_factor,
        rounding = ?config.rounding,
        "Resolved table config"
    );
    Ok(config)
}

/// Generate the table, feeding every entry to `sink`.
pub fn build_table(args: &TableArgs, sink: &mut dyn EntrySink) -> Result<CieTable> {
    let config = build_config(args)?;
    let table = CieTable::generate_with(config, sink).context("Failed to generate table")?;
    if !table.is_monotonic() {
        tracing::warn!("Generated table is not monotonic");
    }
    Ok(table)
}

fn parse_rounding(s: &str) -> Result<Rounding> {
    match s.to_lowercase().as_str() {
        "even" | "half-even" | "half_even" => Ok(Rounding::HalfEven),
        "away" | "half-away" | "half_away" => Ok(Rounding::HalfAway),
        _ => bail!("Unknown rounding: {} (expected even or away)", s),
    }
}
