//! # cie-table
//!
//! CIE1931 perceptual brightness correction tables for LED dimming.
//!
//! LEDs driven by PWM look far brighter at low duty cycles than a linear
//! ramp suggests. This crate precomputes a lookup table that maps a linear
//! input level to a duty cycle following the CIE1931 lightness curve, and
//! renders it as a C header for firmware.
//!
//! # Modules
//!
//! - [`transfer`] - The L* to luminance curve
//! - [`header`] - C header rendering and parsing
//!
//! # Usage
//!
//! ```rust
//! use cie_table::{CieTable, Preset, TableConfig, header};
//!
//! // 8-bit table: 256 entries, values 0..=255
//! let table = CieTable::generate(TableConfig::preset(Preset::ByteRange)).unwrap();
//! assert_eq!(table.lookup(255), Some(255));
//!
//! let text = header::render_header(&table);
//! assert!(text.contains("#define CIE_SIZE 255"));
//! ```
//!
//! # Presets
//!
//! - [`Preset::ByteRange`] - 8-bit output, `{:>3},` entries
//! - [`Preset::WideRange`] - 10-bit output, `{}, ` entries
//!
//! # Dependencies
//!
//! - [`thiserror`] - Error handling
//! - [`serde`], [`serde_yaml`] - Config files
//! - [`regex`] - Header parsing
//! - [`tracing`] - Diagnostics
//!
//! # Used By
//!
//! - `cie-cli` - The `cie1931` command

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod config;
mod error;
mod table;
pub mod header;
pub mod transfer;

pub use config::{EntryStyle, HeaderStyle, MacroStyle, Preset, Rounding, TableConfig};
pub use error::{CieError, CieResult};
pub use header::{ParsedHeader, parse_header, read_header, render_header, write_header, write_header_to};
pub use table::{CieTable, EntrySink, NullSink};
