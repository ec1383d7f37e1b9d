// EXPLAIN Experiment Model
// Shared header/curve types and the loader interface

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DtaError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("DTA file not loaded: run load() first")]
    NotLoaded,

    #[error("required header field {0} is missing")]
    MissingField(&'static str),

    #[error("header field {field} is not numeric: {value}")]
    FieldType { field: &'static str, value: String },

    #[error("curve index {index} out of range: {count} curves loaded")]
    CurveOutOfRange { index: usize, count: usize },

    #[error("curve is missing required column {0}")]
    MissingColumn(&'static str),

    #[error("column {column} has {got} rows, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        got: usize,
    },

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, DtaError>;

/// Elapsed-time column of an EXPLAIN curve table, in seconds.
pub const COL_TIME: &str = "T";
/// Measured-potential column, in volts vs. the reference electrode.
pub const COL_POTENTIAL: &str = "Vf";
/// Measured-current column, in amperes.
pub const COL_CURRENT: &str = "Im";

/// A single scalar cell of an EXPLAIN header.
///
/// EXPLAIN headers are text; the loader decides per field whether a value
/// stays a string or becomes a number. The coercion helpers accept numeric
/// text either way, so `Str("3")` and `Int(3)` read the same through
/// [`HeaderValue::as_i64`].
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValue {
    Str(String),
    Int(i64),
    Float(f64),
}

impl HeaderValue {
    /// Borrow the value as text. `None` for numeric variants.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            HeaderValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Read the value as an integer.
    ///
    /// Floats truncate toward zero; strings must hold integer text
    /// ("3" coerces, "3.5" does not).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            HeaderValue::Int(i) => Some(*i),
            HeaderValue::Float(f) if f.is_finite() => Some(*f as i64),
            HeaderValue::Float(_) => None,
            HeaderValue::Str(s) => s.trim().parse().ok(),
        }
    }

    /// Read the value as a float, parsing numeric text if needed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            HeaderValue::Int(i) => Some(*i as f64),
            HeaderValue::Float(f) => Some(*f),
            HeaderValue::Str(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderValue::Str(s) => write!(f, "{s}"),
            HeaderValue::Int(i) => write!(f, "{i}"),
            HeaderValue::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for HeaderValue {
    fn from(s: &str) -> Self {
        HeaderValue::Str(s.to_string())
    }
}

impl From<String> for HeaderValue {
    fn from(s: String) -> Self {
        HeaderValue::Str(s)
    }
}

impl From<i64> for HeaderValue {
    fn from(i: i64) -> Self {
        HeaderValue::Int(i)
    }
}

impl From<f64> for HeaderValue {
    fn from(f: f64) -> Self {
        HeaderValue::Float(f)
    }
}

/// Experiment metadata as ordered field/value pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    fields: BTreeMap<String, HeaderValue>,
}

impl Header {
    pub fn new() -> Self {
        Header::default()
    }

    /// Insert a field, replacing any previous value under the same name.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<HeaderValue>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&HeaderValue> {
        self.fields.get(key)
    }

    /// Field as text, `None` when absent or numeric.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(HeaderValue::as_str)
    }

    /// Field as an integer, `None` when absent or not integer-valued.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.fields.get(key).and_then(HeaderValue::as_i64)
    }

    /// Field as a float, `None` when absent or non-numeric.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(HeaderValue::as_f64)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// One recorded segment as an ordered table of named numeric columns.
///
/// Column order matches the source file; every column holds one value per
/// sample row. [`Curve::push_column`] rejects a column whose row count
/// disagrees with the columns already stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Curve {
    columns: Vec<(String, Vec<f64>)>,
}

impl Curve {
    pub fn new() -> Self {
        Curve::default()
    }

    /// Append a named column to the table.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        if let Some((_, first)) = self.columns.first() {
            if values.len() != first.len() {
                return Err(DtaError::ColumnLength {
                    column: name,
                    expected: first.len(),
                    got: values.len(),
                });
            }
        }
        self.columns.push((name, values));
        Ok(())
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Column names in file order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of sample rows.
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, |(_, values)| values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Interface over an EXPLAIN loader.
///
/// The loader owns all file handling; implementors populate the header and
/// curve tables during [`Experiment::load`] and report readiness through
/// [`Experiment::loaded`]. Experiment views take an implementation by value
/// and only ever read from it.
pub trait Experiment {
    /// Parse the DTA file at `path`, populating header and curves.
    fn load(&mut self, path: &Path) -> Result<()>;

    /// Whether a file has been loaded successfully.
    fn loaded(&self) -> bool;

    fn header(&self) -> &Header;

    /// Recorded curves, in acquisition order.
    fn curves(&self) -> &[Curve];
}
