//! CSV persistence for the vector store
//!
//! File format: one `name,x,y,z` line per vector, no header. Components are
//! written with two decimals and read back with any `f64` syntax.

use crate::error::{MinimatError, Result};
use crate::store::{validate_name, Vector, VectorStore};
use crate::vector::Vec3;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use tracing::{info, warn};

/// Extension every persisted file carries
pub const CSV_EXTENSION: &str = "csv";

/// Why a line was skipped during load
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    Blank,
    Malformed(String),
}

/// A line that [`load`] did not turn into a vector
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number
    pub line: usize,
    pub reason: SkipReason,
}

/// Outcome of a successful [`load`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub path: String,
    pub loaded: usize,
    pub skipped: Vec<SkippedLine>,
}

/// Outcome of a successful [`save`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveReport {
    pub path: String,
    pub saved: usize,
}

/// Ensure `path` ends in `.csv`
///
/// The suffix is appended, not substituted. When the result would be longer
/// than `max_len` bytes the path is returned unchanged.
///
/// # Examples
///
/// ```
/// use minimat::csv_codec::normalize_path;
///
/// assert_eq!(normalize_path("data", 255), "data.csv");
/// assert_eq!(normalize_path("data.csv", 255), "data.csv");
/// assert_eq!(normalize_path("data.txt", 255), "data.txt.csv");
/// ```
pub fn normalize_path(path: &str, max_len: usize) -> String {
    let has_extension = matches!(path.rsplit_once('.'), Some((_, ext)) if ext == CSV_EXTENSION);
    if has_extension {
        return path.to_string();
    }

    let normalized = format!("{path}.{CSV_EXTENSION}");
    if normalized.len() > max_len {
        warn!(path, max_len, "path too long to append extension, using as-is");
        return path.to_string();
    }
    normalized
}

/// Format one vector as a CSV line, without the newline.
pub fn encode_line(vector: &Vector) -> String {
    let Vec3 { x, y, z } = vector.value;
    format!("{},{:.2},{:.2},{:.2}", vector.name, x, y, z)
}

/// Parse one `name,x,y,z` line.
pub fn decode_line(line: &str, max_name_len: usize) -> std::result::Result<Vector, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 4 {
        return Err(format!("expected 4 fields, found {}", fields.len()));
    }

    let name = fields[0];
    validate_name(name, max_name_len).map_err(|e| e.to_string())?;

    let mut components = [0.0f64; 3];
    for (slot, text) in components.iter_mut().zip(&fields[1..]) {
        *slot = text
            .parse::<f64>()
            .map_err(|_| format!("invalid number '{text}'"))?;
    }

    Ok(Vector::new(name, Vec3::from(components)))
}

/// Read vectors from a CSV file into `store`
///
/// Each parsed line is upserted, so later duplicates win. Blank and
/// malformed lines are skipped and listed in the report.
pub fn load(
    store: &mut VectorStore,
    path: &str,
    max_path_len: usize,
    max_name_len: usize,
) -> Result<LoadReport> {
    let path = normalize_path(path, max_path_len);
    let file = File::open(&path).map_err(|e| MinimatError::file(&path, e))?;
    let reader = BufReader::new(file);

    let mut report = LoadReport {
        path: path.clone(),
        ..LoadReport::default()
    };

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| MinimatError::file(&path, e))?;
        let line_no = idx + 1;

        if line.trim().is_empty() {
            warn!(path = %path, line = line_no, "skipping blank line");
            report.skipped.push(SkippedLine {
                line: line_no,
                reason: SkipReason::Blank,
            });
            continue;
        }

        match decode_line(&line, max_name_len) {
            Ok(vector) => {
                store.upsert_vec(&vector.name, vector.value)?;
                report.loaded += 1;
            }
            Err(reason) => {
                warn!(path = %path, line = line_no, %reason, "skipping malformed line");
                report.skipped.push(SkippedLine {
                    line: line_no,
                    reason: SkipReason::Malformed(reason),
                });
            }
        }
    }

    info!(
        path = %report.path,
        loaded = report.loaded,
        skipped = report.skipped.len(),
        "loaded vectors"
    );
    Ok(report)
}

/// Write every vector in `store` to a CSV file, truncating it first.
pub fn save(store: &VectorStore, path: &str, max_path_len: usize) -> Result<SaveReport> {
    let path = normalize_path(path, max_path_len);
    let file = File::create(&path).map_err(|e| MinimatError::file(&path, e))?;
    let mut writer = BufWriter::new(file);

    for vector in store.list() {
        writeln!(writer, "{}", encode_line(vector)).map_err(|e| MinimatError::file(&path, e))?;
    }
    writer.flush().map_err(|e| MinimatError::file(&path, e))?;

    info!(path = %path, saved = store.len(), "saved vectors");
    Ok(SaveReport {
        path,
        saved: store.len(),
    })
}
