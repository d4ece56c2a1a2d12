//! Plot-range file reader
//!
//! One line per tiling: `name: min,max; min,max; ...` with one range for each
//! statistic in [`Statistic::ALL`] order. Whitespace is ignored anywhere on a
//! line; blank lines and lines starting with `#` are skipped.

use crate::analysis::statistics::Statistic;
use crate::io::error::{Result, TilingError};
use std::collections::HashMap;
use std::path::Path;

const COLUMNS: usize = Statistic::ALL.len();

type Ranges = [(f64, f64); COLUMNS];

/// Histogram x-axis ranges per tiling and statistic
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotRanges {
    entries: HashMap<String, Ranges>,
}

impl PlotRanges {
    /// Read and parse a plot-range file
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` if the file cannot be read and `Config` for the
    /// first malformed line
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| TilingError::FileSystem {
            path: path.to_path_buf(),
            operation: "read plot ranges",
            source: e,
        })?;
        Self::parse(&text, path)
    }

    /// Parse plot-range text; `path` is only used in error messages
    ///
    /// A later line for the same tiling replaces an earlier one.
    ///
    /// # Errors
    ///
    /// Returns `Config` with the 1-based line number of the first malformed line
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        let mut entries = HashMap::new();
        for (index, raw) in text.lines().enumerate() {
            let line: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fail = |reason: String| TilingError::Config {
                path: path.to_path_buf(),
                line: index + 1,
                reason,
            };

            let (tiling, body) = line
                .split_once(':')
                .ok_or_else(|| fail("expected 'tiling: min,max; ...'".to_string()))?;
            if tiling.is_empty() {
                return Err(fail("missing tiling name".to_string()));
            }
            let fields: Vec<&str> = body.split(';').collect();
            if fields.len() != COLUMNS {
                return Err(fail(format!(
                    "expected {COLUMNS} ranges, found {}",
                    fields.len()
                )));
            }

            let mut ranges: Ranges = [(0.0, 0.0); COLUMNS];
            for (slot, field) in ranges.iter_mut().zip(fields) {
                *slot = parse_range(field).map_err(fail)?;
            }
            entries.insert(tiling.to_string(), ranges);
        }
        Ok(Self { entries })
    }

    /// Read `path` if it exists, otherwise return an empty table
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_path`] for an existing file
    pub fn from_optional_path(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_path(path)
        } else {
            tracing::debug!(path = %path.display(), "no plot-range file, using data ranges");
            Ok(Self::default())
        }
    }

    /// Range configured for `tiling` and `statistic`
    ///
    /// # Errors
    ///
    /// Returns `MissingRange` if the tiling has no entry
    pub fn range(&self, tiling: &str, statistic: Statistic) -> Result<(f64, f64)> {
        self.entries
            .get(tiling)
            .and_then(|ranges| ranges.get(statistic.column()))
            .copied()
            .ok_or_else(|| TilingError::MissingRange {
                tiling: tiling.to_string(),
                statistic: statistic.key(),
            })
    }

    /// Whether `tiling` has an entry
    pub fn contains(&self, tiling: &str) -> bool {
        self.entries.contains_key(tiling)
    }

    /// Number of tilings with an entry
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no tiling has an entry
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_range(field: &str) -> std::result::Result<(f64, f64), String> {
    let (min, max) = field
        .split_once(',')
        .ok_or_else(|| format!("range '{field}' is not 'min,max'"))?;
    let number = |text: &str| {
        text.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("'{text}' is not a finite number"))
    };
    let (min, max) = (number(min)?, number(max)?);
    if min >= max {
        return Err(format!("range minimum {min} is not below maximum {max}"));
    }
    Ok((min, max))
}

