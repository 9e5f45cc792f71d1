//! Correction table generation.
//!
//! Each input index `i` in `[0, input_size]` is normalized, scaled to a
//! lightness `L* = i / input_size * scale_factor`, converted to luminance with
//! [`transfer::luminance`](crate::transfer::luminance), scaled to the output
//! range and rounded.
//!
//! Rounded values are clamped to `[previous, output_range]`. The transfer curve
//! has a small step down just above its linear cutoff, which can otherwise
//! produce a one-count dip in wide output ranges. Neither preset is affected.

use tracing::debug;

use crate::transfer::luminance;
use crate::{CieResult, TableConfig};

/// Receives each `(index, value)` pair as the table is built.
///
/// Closures `FnMut(usize, u32)` implement this trait.
pub trait EntrySink {
    /// Called once per entry, in index order.
    fn entry(&mut self, index: usize, value: u32);
}

impl<F: FnMut(usize, u32)> EntrySink for F {
    #[inline]
    fn entry(&mut self, index: usize, value: u32) {
        self(index, value)
    }
}

/// Sink that discards every entry.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EntrySink for NullSink {
    #[inline]
    fn entry(&mut self, _index: usize, _value: u32) {}
}

/// A generated CIE1931 correction table.
///
/// # Example
///
/// ```rust
/// use cie_table::{CieTable, Preset, TableConfig};
///
/// let table = CieTable::generate(TableConfig::preset(Preset::ByteRange)).unwrap();
/// assert_eq!(table.len(), 256);
/// assert_eq!(table.lookup(0), Some(0));
/// assert_eq!(table.lookup(255), Some(255));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CieTable {
    config: TableConfig,
    values: Vec<u32>,
}

impl CieTable {
    /// Generates the table for `config`.
    pub fn generate(config: TableConfig) -> CieResult<Self> {
        Self::generate_with(config, &mut NullSink)
    }

    /// Generates the table, reporting every entry to `sink`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cie_table::{CieTable, TableConfig};
    ///
    /// let mut seen = Vec::new();
    /// let mut record = |i: usize, v: u32| seen.push((i, v));
    /// let table = CieTable::generate_with(TableConfig::default(), &mut record).unwrap();
    /// assert_eq!(seen.len(), table.len());
    /// ```
    pub fn generate_with<S: EntrySink + ?Sized>(config: TableConfig, sink: &mut S) -> CieResult<Self> {
        config.validate()?;

        let size = config.input_size as f64;
        let range = config.output_range as f64;
        let mut values = Vec::with_capacity(config.len());
        let mut floor = 0u32;

        for i in 0..=config.input_size {
            let l_star = (i as f64 / size) * config.scale_factor;
            let scaled = config.rounding.apply(luminance(l_star) * range);
            let value = (scaled.max(0.0) as u32).clamp(floor, config.output_range);
            floor = value;
            sink.entry(i as usize, value);
            values.push(value);
        }

        debug!(
            entries = values.len(),
            range = config.output_range,
            scale = config.scale_factor,
            last = values.last().copied().unwrap_or(0),
            "Generated CIE1931 table"
        );

        Ok(Self { config, values })
    }

    /// Table values, index 0 first.
    #[inline]
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a generated table.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Configuration the table was built from.
    #[inline]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Value at `index`, or `None` past the end.
    #[inline]
    pub fn lookup(&self, index: usize) -> Option<u32> {
        self.values.get(index).copied()
    }

    /// Largest value in the table (the last entry).
    pub fn max_value(&self) -> u32 {
        self.values.iter().copied().max().unwrap_or(0)
    }

    /// True if no entry is smaller than the one before it.
    pub fn is_monotonic(&self) -> bool {
        self.values.windows(2).all(|w| w[0] <= w[1])
    }

    /// Consumes the table, returning its values.
    pub fn into_values(self) -> Vec<u32> {
        self.values
    }
}
