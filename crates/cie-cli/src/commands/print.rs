//! Print index/value pairs

use crate::PrintArgs;
use anyhow::Result;
use tracing::debug;

pub fn run(args: PrintArgs, _verbose: u8) -> Result<()> {
    let mut sink = |index: usize, value: u32| println!("{} {}", index, value);
    let table = super::build_table(&args.table, &mut sink)?;
    debug!(entries = table.len(), "Printed table");
    Ok(())
}
