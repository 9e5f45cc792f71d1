//! C header output for correction tables.
//!
//! Renders a [`CieTable`] as a `#define`-plus-array header for firmware, and
//! reads such a header back.
//!
//! # Format
//!
//! ```text
//! // CIE1931 correction table
//! // Automatically generated, see cie1931
//!
//! #define CIE_SIZE 255
//! #define CIE_RANGE 255
//! const unsigned int cie[CIE_SIZE+1] = {
//! 	  0,  0,  0,  0,  0,  1,  1,  1,  1,  1,
//! 	...
//! };
//! ```
//!
//! With [`HeaderStyle::trailing_blank_line`](crate::HeaderStyle) set, one more
//! newline follows the closing brace.
//!
//! Ten values per line, each line indented by one tab.
//!
//! # Example
//!
//! ```rust
//! use cie_table::{CieTable, TableConfig, header};
//!
//! let table = CieTable::generate(TableConfig::default()).unwrap();
//! let text = header::render_header(&table);
//! let parsed = header::parse_header(&text).unwrap();
//! assert!(parsed.matches(&table));
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::{CieError, CieResult, CieTable, EntryStyle, MacroStyle};

/// Values per line in the array body.
pub const VALUES_PER_LINE: usize = 10;

static DEFINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#define\s+(\w+)\s+(\d+)\s*$").expect("valid regex"));

static DECL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(.*?)\s*\b(\w+)\s*\[\s*([^\]]*?)\s*\]\s*=\s*\{(.*)$").expect("valid regex")
});

static LEN_EXPR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)\s*(?:\+\s*(\d+))?$").expect("valid regex"));

/// Renders the header text for `table`.
pub fn render_header(table: &CieTable) -> String {
    let config = table.config();
    let style = &config.style;
    let mut out = String::with_capacity(table.len() * 6 + 256);

    out.push_str("// CIE1931 correction table\n");
    match &style.source_note {
        Some(note) => out.push_str(&format!("// Automatically generated, see {}\n", note)),
        None => out.push_str("// Automatically generated\n"),
    }
    out.push('\n');

    let (size, range, len_expr) = match style.macros {
        MacroStyle::Maxima => (
            config.input_size as u64,
            config.output_range as u64,
            format!("{}+1", style.size_macro()),
        ),
        MacroStyle::Counts => (
            config.input_size as u64 + 1,
            config.output_range as u64 + 1,
            table.len().to_string(),
        ),
    };
    out.push_str(&format!("#define {} {}\n", style.size_macro(), size));
    out.push_str(&format!("#define {} {}\n", style.range_macro(), range));
    out.push_str(&format!("{} {}[{}] = {{\n", style.int_type, style.table_name, len_expr));

    out.push('\t');
    for (i, value) in table.values().iter().enumerate() {
        let entry = match style.entries {
            EntryStyle::Padded => format!("{:>3},", value),
            EntryStyle::Plain => format!("{}, ", value),
        };
        out.push_str(&entry);
        if i % VALUES_PER_LINE == VALUES_PER_LINE - 1 {
            out.push_str("\n\t");
        }
    }
    out.push_str("\n};\n");
    if style.trailing_blank_line {
        out.push('\n');
    }
    out
}

/// Writes the header for `table` to any writer.
pub fn write_header_to<W: Write>(writer: &mut W, table: &CieTable) -> CieResult<()> {
    writer.write_all(render_header(table).as_bytes())?;
    Ok(())
}

/// Writes the header for `table` to `path`, replacing any existing file.
///
/// # Example
///
/// ```rust,ignore
/// let table = CieTable::generate(TableConfig::preset(Preset::WideRange))?;
/// header::write_header("cie1931.h", &table)?;
/// ```
pub fn write_header<P: AsRef<Path>>(path: P, table: &CieTable) -> CieResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_header_to(&mut writer, table)?;
    writer.flush()?;
    debug!(path = %path.display(), entries = table.len(), "Wrote header");
    Ok(())
}

/// A header read back from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHeader {
    /// `#define` names and values, in file order
    pub macros: Vec<(String, u64)>,
    /// Element type before the array name
    pub int_type: String,
    /// Array identifier
    pub table_name: String,
    /// Length expression as written between the brackets
    pub length_expr: String,
    /// Length after resolving macros
    pub declared_len: usize,
    /// Array values
    pub values: Vec<u32>,
}

impl ParsedHeader {
    /// Value of a `#define`, if present.
    pub fn macro_value(&self, name: &str) -> Option<u64> {
        self.macros.iter().find(|(n, _)| n == name).map(|&(_, v)| v)
    }

    /// True if the values equal those of `table`.
    pub fn matches(&self, table: &CieTable) -> bool {
        self.values == table.values()
    }

    /// Index of the first value that differs from `table`, or the shorter
    /// length when one is a prefix of the other.
    pub fn first_mismatch(&self, table: &CieTable) -> Option<usize> {
        let expected = table.values();
        if let Some(i) = self.values.iter().zip(expected).position(|(a, b)| a != b) {
            return Some(i);
        }
        (self.values.len() != expected.len()).then(|| self.values.len().min(expected.len()))
    }
}

/// Parses a generated header.
pub fn parse_header(text: &str) -> CieResult<ParsedHeader> {
    let mut macros: Vec<(String, u64)> = Vec::new();
    let mut lines = text.lines().enumerate();
    let mut decl = None;

    for (idx, line) in lines.by_ref() {
        if let Some(caps) = DEFINE_RE.captures(line) {
            let value = caps[2].parse::<u64>().map_err(|e| parse_err(idx + 1, e))?;
            macros.push((caps[1].to_string(), value));
        } else if let Some(caps) = DECL_RE.captures(line) {
            decl = Some((
                idx + 1,
                caps[1].to_string(),
                caps[2].to_string(),
                caps[3].to_string(),
                caps[4].to_string(),
            ));
            break;
        }
    }

    let (decl_line, int_type, table_name, length_expr, rest) = decl.ok_or_else(|| CieError::Parse {
        line: 0,
        message: "no array declaration found".into(),
    })?;

    let lookup: HashMap<&str, u64> = macros.iter().map(|(n, v)| (n.as_str(), *v)).collect();
    let declared_len = resolve_length(&length_expr, &lookup).ok_or_else(|| CieError::Parse {
        line: decl_line,
        message: format!("cannot resolve array length '{}'", length_expr),
    })?;

    let mut values = Vec::with_capacity(declared_len);
    let mut closed = parse_body(&rest, decl_line, &mut values)?;
    for (idx, line) in lines {
        if closed {
            break;
        }
        closed = parse_body(line, idx + 1, &mut values)?;
    }
    if !closed {
        return Err(CieError::Parse {
            line: 0,
            message: "array is not closed with '};'".into(),
        });
    }

    if values.len() != declared_len {
        return Err(CieError::LengthMismatch {
            declared: declared_len,
            found: values.len(),
        });
    }

    Ok(ParsedHeader {
        macros,
        int_type,
        table_name,
        length_expr,
        declared_len,
        values,
    })
}

/// Reads and parses a header file.
pub fn read_header<P: AsRef<Path>>(path: P) -> CieResult<ParsedHeader> {
    let text = std::fs::read_to_string(path.as_ref())?;
    parse_header(&text)
}

/// Parses the comma separated values on one body line. Returns true once the
/// closing brace is seen.
fn parse_body(line: &str, line_no: usize, values: &mut Vec<u32>) -> CieResult<bool> {
    let (body, closed) = match line.find('}') {
        Some(end) => (&line[..end], true),
        None => (line, false),
    };
    for token in body.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let value = token.parse::<u32>().map_err(|e| parse_err(line_no, e))?;
        values.push(value);
    }
    Ok(closed)
}

fn resolve_length(expr: &str, macros: &HashMap<&str, u64>) -> Option<usize> {
    let caps = LEN_EXPR_RE.captures(expr)?;
    let base = match caps[1].parse::<u64>() {
        Ok(n) => n,
        Err(_) => *macros.get(&caps[1])?,
    };
    let offset = match caps.get(2) {
        Some(m) => m.as_str().parse::<u64>().ok()?,
        None => 0,
    };
    usize::try_from(base.checked_add(offset)?).ok()
}

fn parse_err(line: usize, err: impl std::fmt::Display) -> CieError {
    CieError::Parse {
        line,
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HeaderStyle, Preset, TableConfig};

    fn small(style: HeaderStyle) -> CieTable {
        CieTable::generate(TableConfig {
            input_size: 10,
            output_range: 100,
            scale_factor: 103.0,
            style,
            ..TableConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn render_byte_style() {
        let text = render_header(&small(HeaderStyle::byte_range()));
        let expected = "// CIE1931 correction table\n\
                        // Automatically generated, see cie1931\n\
                        \n\
                        #define CIE_SIZE 10\n\
                        #define CIE_RANGE 100\n\
                        const unsigned int cie[CIE_SIZE+1] = {\n\
                        \t  0,  1,  3,  6, 11, 18, 28, 41, 57, 76,\n\
                        \t100,\n\
                        };\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn render_wide_style() {
        let text = render_header(&small(HeaderStyle::wide_range()));
        let expected = "// CIE1931 correction table\n\
                        // Automatically generated\n\
                        \n\
                        #define CIE_SIZE 11\n\
                        #define CIE_RANGE 101\n\
                        const unsigned int cie[11] = {\n\
                        \t0, 1, 3, 6, 11, 18, 28, 41, 57, 76, \n\
                        \t100, \n\
                        };\n\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn render_wraps_every_ten() {
        let table = CieTable::generate(TableConfig::preset(Preset::ByteRange)).unwrap();
        let text = render_header(&table);
        let body: Vec<&str> = text.lines().filter(|l| l.starts_with('\t')).collect();
        // 256 values: 25 full lines, one line of 6
        assert_eq!(body.len(), 26);
        assert!(body[..25].iter().all(|l| l.matches(',').count() == 10));
        assert_eq!(body[25].matches(',').count(), 6);
        assert!(text.ends_with("252,255,\n};\n"));
    }

    #[test]
    fn render_exact_multiple_of_ten() {
        let table = CieTable::generate(TableConfig {
            input_size: 9,
            ..TableConfig::default()
        })
        .unwrap();
        let text = render_header(&table);
        assert!(text.ends_with("255,\n\t\n};\n"));
        assert!(parse_header(&text).unwrap().matches(&table));
    }

    #[test]
    fn render_custom_names() {
        let mut style = HeaderStyle::wide_range();
        style.int_type = "static const uint16_t".into();
        style.table_name = "gamma".into();
        style.macro_prefix = "LED".into();
        let text = render_header(&small(style));
        assert!(text.contains("#define LED_SIZE 11\n#define LED_RANGE 101\n"));
        assert!(text.contains("static const uint16_t gamma[11] = {\n"));

        let parsed = parse_header(&text).unwrap();
        assert_eq!(parsed.int_type, "static const uint16_t");
        assert_eq!(parsed.table_name, "gamma");
        assert_eq!(parsed.macro_value("LED_RANGE"), Some(101));
    }

    #[test]
    fn parse_presets() {
        for preset in Preset::ALL {
            let table = CieTable::generate(TableConfig::preset(preset)).unwrap();
            let parsed = parse_header(&render_header(&table)).unwrap();
            assert_eq!(parsed.values, table.values());
            assert_eq!(parsed.declared_len, 256);
            assert_eq!(parsed.first_mismatch(&table), None);
        }
    }

    #[test]
    fn parse_wide_macros() {
        let table = CieTable::generate(TableConfig::preset(Preset::WideRange)).unwrap();
        let parsed = parse_header(&render_header(&table)).unwrap();
        assert_eq!(parsed.macro_value("CIE_SIZE"), Some(256));
        assert_eq!(parsed.macro_value("CIE_RANGE"), Some(1024));
        assert_eq!(parsed.length_expr, "256");
    }

    #[test]
    fn parse_byte_macros() {
        let table = CieTable::generate(TableConfig::preset(Preset::ByteRange)).unwrap();
        let parsed = parse_header(&render_header(&table)).unwrap();
        assert_eq!(parsed.macro_value("CIE_SIZE"), Some(255));
        assert_eq!(parsed.macro_value("CIE_RANGE"), Some(255));
        assert_eq!(parsed.length_expr, "CIE_SIZE+1");
    }

    #[test]
    fn parse_length_mismatch() {
        let text = "#define N 3\nconst int t[N+1] = {\n\t1, 2, 3,\n};\n";
        match parse_header(text) {
            Err(CieError::LengthMismatch { declared, found }) => {
                assert_eq!(declared, 4);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            parse_header("// nothing here\n"),
            Err(CieError::Parse { .. })
        ));
        assert!(matches!(
            parse_header("const int t[MISSING] = {\n1,\n};\n"),
            Err(CieError::Parse { .. })
        ));
        match parse_header("const int t[2] = {\n\t1, x,\n};\n") {
            Err(CieError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(matches!(
            parse_header("const int t[2] = {\n\t1, 2,\n"),
            Err(CieError::Parse { .. })
        ));
    }

    #[test]
    fn first_mismatch_reports_index() {
        let table = small(HeaderStyle::wide_range());
        let text = render_header(&table).replace("\t0, 1, 3,", "\t0, 1, 4,");
        let parsed = parse_header(&text).unwrap();
        assert!(!parsed.matches(&table));
        assert_eq!(parsed.first_mismatch(&table), Some(2));
    }

    #[test]
    fn render_trailer_follows_style() {
        let wide = render_header(&CieTable::generate(TableConfig::preset(Preset::WideRange)).unwrap());
        assert!(wide.ends_with("938, 948, \n};\n\n"));

        let byte = render_header(&CieTable::generate(TableConfig::preset(Preset::ByteRange)).unwrap());
        assert!(byte.ends_with("252,255,\n};\n"));
        assert!(!byte.ends_with("};\n\n"));

        let mut style = HeaderStyle::byte_range();
        style.trailing_blank_line = true;
        assert!(render_header(&small(style)).ends_with("100,\n};\n\n"));
    }

    #[test]
    fn render_is_deterministic() {
        let config = TableConfig::preset(Preset::WideRange);
        let a = render_header(&CieTable::generate(config.clone()).unwrap());
        let b = render_header(&CieTable::generate(config).unwrap());
        assert_eq!(a, b);
    }
}
