use std::path::Path;

use super::error::{ArtifactError, Result};

// ---------------------------------------------------------------------------
// NumericArray – a parsed plain-text numeric table
// ---------------------------------------------------------------------------

/// A rectangular table of `f64`, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericArray {
    pub rows: usize,
    pub cols: usize,
    pub values: Vec<f64>,
}

impl NumericArray {
    /// Whether the table has a single row or a single column.
    pub fn is_vector(&self) -> bool {
        self.rows <= 1 || self.cols <= 1
    }

    /// Flatten a single row or single column into a vector.
    pub fn into_vector(self, path: &Path) -> Result<Vec<f64>> {
        if !self.is_vector() {
            return Err(ArtifactError::malformed(
                path,
                format!("expected a 1-D array, found {}x{}", self.rows, self.cols),
            ));
        }
        Ok(self.values)
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.cols..(i + 1) * self.cols]
    }

    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Read and parse a numeric text file.
pub fn read_numeric(path: &Path) -> Result<NumericArray> {
    let text = std::fs::read_to_string(path).map_err(|e| ArtifactError::from_io(path, e))?;
    parse_numeric(&text, path)
}

/// Parse numeric text: one row per non-blank line, values separated by
/// whitespace or commas, `#` to end of line is a comment.
pub fn parse_numeric(text: &str, path: &Path) -> Result<NumericArray> {
    let mut values = Vec::new();
    let mut rows = 0;
    let mut cols = 0;

    for (line_no, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let before = values.len();
        for tok in line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            let v = tok.parse::<f64>().map_err(|_| {
                ArtifactError::malformed(
                    path,
                    format!("line {}: '{tok}' is not a number", line_no + 1),
                )
            })?;
            values.push(v);
        }

        let width = values.len() - before;
        if rows == 0 {
            cols = width;
        } else if width != cols {
            return Err(ArtifactError::shape(
                format!("{} line {}", path.display(), line_no + 1),
                format!("{cols} columns"),
                format!("{width} columns"),
            ));
        }
        rows += 1;
    }

    if rows == 0 {
        return Err(ArtifactError::malformed(path, "file contains no data"));
    }

    Ok(NumericArray { rows, cols, values })
}
