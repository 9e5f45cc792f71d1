//! Table parameters, header style, and the named presets.
//!
//! A [`TableConfig`] fully describes one generated header: the size of the
//! input domain, the output range, the lightness scale, how values are rounded,
//! and how the C declaration is laid out.
//!
//! # Presets
//!
//! | Preset | Size | Range | Scale | Macros | Entries |
//! |--------|------|-------|-------|--------|---------|
//! | [`Preset::ByteRange`] | 255 | 255 | 103.0 | maxima | `{:>3},` |
//! | [`Preset::WideRange`] | 255 | 1023 | 100.0 | counts | `{}, ` |
//!
//! # Example
//!
//! ```rust
//! use cie_table::{Preset, TableConfig};
//!
//! let config = TableConfig::preset(Preset::WideRange);
//! assert_eq!(config.output_range, 1023);
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CieError, CieResult};

/// How a scaled luminance is rounded to an integer table entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Ties go to the even neighbour.
    #[default]
    HalfEven,
    /// Ties go away from zero.
    HalfAway,
}

impl Rounding {
    /// Rounds `value` to the nearest integer using this mode.
    #[inline]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Rounding::HalfEven => value.round_ties_even(),
            Rounding::HalfAway => value.round(),
        }
    }
}

/// What the `_SIZE` and `_RANGE` macros hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacroStyle {
    /// Maximum input index and maximum output value; the array is declared
    /// as `[<PREFIX>_SIZE+1]`.
    Maxima,
    /// Entry count and value count (`+1` each); the array is declared with
    /// a literal length.
    Counts,
}

/// How each value is written inside the array body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStyle {
    /// Right-aligned to width 3, comma, no space: `  7,`
    Padded,
    /// Plain integer, comma, space: `7, `
    Plain,
}

/// Layout of the generated C header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderStyle {
    /// Macro semantics
    pub macros: MacroStyle,
    /// Value formatting
    pub entries: EntryStyle,
    /// C element type, e.g. `const unsigned int`
    pub int_type: String,
    /// C array identifier
    pub table_name: String,
    /// Macro prefix (`CIE` gives `CIE_SIZE` and `CIE_RANGE`)
    pub macro_prefix: String,
    /// Appended to the "Automatically generated" line as `, see <note>`
    pub source_note: Option<String>,
    /// Emit an empty line after the closing `};`
    pub trailing_blank_line: bool,
}

impl HeaderStyle {
    /// Style of the 8-bit header.
    pub fn byte_range() -> Self {
        Self {
            macros: MacroStyle::Maxima,
            entries: EntryStyle::Padded,
            source_note: Some("cie1931".into()),
            trailing_blank_line: false,
            ..Self::base()
        }
    }

    /// Style of the 10-bit header.
    pub fn wide_range() -> Self {
        Self {
            macros: MacroStyle::Counts,
            entries: EntryStyle::Plain,
            source_note: None,
            trailing_blank_line: true,
            ..Self::base()
        }
    }

    fn base() -> Self {
        Self {
            macros: MacroStyle::Maxima,
            entries: EntryStyle::Padded,
            int_type: "const unsigned int".into(),
            table_name: "cie".into(),
            macro_prefix: "CIE".into(),
            source_note: None,
            trailing_blank_line: false,
        }
    }

    /// Name of the size macro, e.g. `CIE_SIZE`.
    pub fn size_macro(&self) -> String {
        format!("{}_SIZE", self.macro_prefix)
    }

    /// Name of the range macro, e.g. `CIE_RANGE`.
    pub fn range_macro(&self) -> String {
        format!("{}_RANGE", self.macro_prefix)
    }
}

impl Default for HeaderStyle {
    fn default() -> Self {
        Self::byte_range()
    }
}

/// Named table configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// 256 entries, values 0..=255, scale 103.
    ByteRange,
    /// 256 entries, values 0..=1023, scale 100.
    WideRange,
}

impl Preset {
    /// All presets, in display order.
    pub const ALL: [Preset; 2] = [Preset::ByteRange, Preset::WideRange];

    /// Short name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Preset::ByteRange => "byte",
            Preset::WideRange => "wide",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = CieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "byte" | "byte-range" | "8" | "8bit" => Ok(Preset::ByteRange),
            "wide" | "wide-range" | "10" | "10bit" => Ok(Preset::WideRange),
            other => Err(CieError::UnknownPreset(other.to_string())),
        }
    }
}

/// Parameters of one correction table and its header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Maximum input index; the table holds `input_size + 1` entries
    pub input_size: u32,
    /// Maximum output value
    pub output_range: u32,
    /// L* reached at the last index
    pub scale_factor: f64,
    /// Rounding mode for scaled values
    pub rounding: Rounding,
    /// Header layout
    pub style: HeaderStyle,
}

impl TableConfig {
    /// Builds the configuration for a named preset.
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::ByteRange => Self {
                input_size: 255,
                output_range: 255,
                scale_factor: 103.0,
                rounding: Rounding::HalfEven,
                style: HeaderStyle::byte_range(),
            },
            Preset::WideRange => Self {
                input_size: 255,
                output_range: 1023,
                scale_factor: 100.0,
                rounding: Rounding::HalfEven,
                style: HeaderStyle::wide_range(),
            },
        }
    }

    /// Number of table entries (`input_size + 1`).
    #[inline]
    pub fn len(&self) -> usize {
        self.input_size as usize + 1
    }

    /// Always false; a table holds at least one entry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Checks that the parameters describe a computable table.
    pub fn validate(&self) -> CieResult<()> {
        if self.input_size == 0 {
            return Err(CieError::InvalidSize("input size must be > 0".into()));
        }
        if self.output_range == 0 {
            return Err(CieError::InvalidRange("output range must be > 0".into()));
        }
        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            return Err(CieError::InvalidScale(self.scale_factor));
        }
        if self.style.table_name.is_empty() || self.style.macro_prefix.is_empty() {
            return Err(CieError::InvalidStyle(
                "table name and macro prefix must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Parses a configuration from YAML. Missing fields take the byte-range
    /// defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cie_table::TableConfig;
    ///
    /// let config = TableConfig::from_yaml_str("output_range: 4095\n").unwrap();
    /// assert_eq!(config.output_range, 4095);
    /// assert_eq!(config.input_size, 255);
    /// ```
    pub fn from_yaml_str(text: &str) -> CieResult<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a YAML configuration file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> CieResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&text)
    }

    /// Serializes the configuration as YAML.
    pub fn to_yaml(&self) -> CieResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::preset(Preset::ByteRange)
    }
}
