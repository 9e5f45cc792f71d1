//! Header generation command

use crate::GenerateArgs;
use anyhow::{Context, Result};
use cie_table::header;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: GenerateArgs, verbose: u8) -> Result<()> {
    let print = args.print;
    let mut sink = |index: usize, value: u32| {
        trace!(index, value, "entry");
        if print {
            println!("{} {}", index, value);
        }
    };
    let table = super::build_table(&args.table, &mut sink)?;

    if args.stdout {
        print!("{}", header::render_header(&table));
        return Ok(());
    }

    header::write_header(&args.output, &table)
        .with_context(|| format!("Failed to write: {}", args.output.display()))?;

    info!(
        path = %args.output.display(),
        entries = table.len(),
        max = table.max_value(),
        "Wrote correction table"
    );
    if verbose > 0 {
        println!(
            "Wrote {} ({} entries, 0..={})",
            args.output.display(),
            table.len(),
            table.max_value()
        );
    }

    Ok(())
}
