//! Header verification command

use crate::VerifyArgs;
use anyhow::{Context, Result, bail};
use cie_table::{NullSink, header};
use tracing::info;

pub fn run(args: VerifyArgs, verbose: u8) -> Result<()> {
    let parsed = header::read_header(&args.header)
        .with_context(|| format!("Failed to read header: {}", args.header.display()))?;
    let table = super::build_table(&args.table, &mut NullSink)?;

    if let Some(index) = parsed.first_mismatch(&table) {
        let found = parsed.values.get(index).map(|v| v.to_string());
        let expected = table.lookup(index).map(|v| v.to_string());
        bail!(
            "{} differs at index {}: found {}, expected {}",
            args.header.display(),
            index,
            found.as_deref().unwrap_or("end of table"),
            expected.as_deref().unwrap_or("end of table"),
        );
    }

    info!(path = %args.header.display(), entries = parsed.values.len(), "Header matches");
    if verbose > 0 {
        println!("{}: OK ({} entries)", args.header.display(), parsed.values.len());
    }
    Ok(())
}
