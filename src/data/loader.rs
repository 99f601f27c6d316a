use std::path::{Path, PathBuf};

use calamine::Reader as _;
use log::{debug, info, warn};
use thiserror::Error;

use super::model::Measurements;

/// Header of the energy column, as written by the acquisition software.
pub const ENERGY_COLUMN: &str = "Энергия, Дж";
/// Header of the signal-duration column.
pub const DURATION_COLUMN: &str = "Длительность сигнала, мс";

const SUPPORTED_EXTENSIONS: [&str; 4] = ["txt", "csv", "xls", "xlsx"];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),
    #[error("unsupported file extension: {0}")]
    UnsupportedFormat(String),
    #[error("required column {0:?} not found in file")]
    MissingColumn(&'static str),
    #[error("workbook has no readable worksheet")]
    NoWorksheet,
    #[error("reading file")]
    Io(#[from] std::io::Error),
    #[error("parsing delimited data")]
    Csv(#[from] csv::Error),
    #[error("reading spreadsheet")]
    Excel(#[from] calamine::Error),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the energy and signal-duration series from a file.  Dispatch by
/// extension.
///
/// Supported formats:
/// * `.txt` / `.csv` – delimited text; encoding and delimiter are detected
///   from the file itself, decimal commas are accepted
/// * `.xls` / `.xlsx` – first worksheet, first row as header
///
/// Both required columns ([`ENERGY_COLUMN`], [`DURATION_COLUMN`]) must be
/// present. Cells that do not parse as numbers are dropped, independently
/// per column.
pub fn load(path: &Path) -> Result<Measurements, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(LoadError::UnsupportedFormat(format!(".{ext}")));
    }

    let measurements = match ext.as_str() {
        "txt" | "csv" => load_delimited(path)?,
        _ => load_excel(path)?,
    };

    if !measurements.is_aligned() {
        warn!(
            "series lengths differ after dropping bad cells: {} energy vs {} duration ({})",
            measurements.energy.len(),
            measurements.duration.len(),
            path.display()
        );
    }
    info!(
        "loaded {} energy / {} duration values from {}",
        measurements.energy.len(),
        measurements.duration.len(),
        path.display()
    );

    Ok(measurements)
}

// ---------------------------------------------------------------------------
// Delimited text loader (.txt / .csv)
// ---------------------------------------------------------------------------

fn load_delimited(path: &Path) -> Result<Measurements, LoadError> {
    let raw = std::fs::read(path)?;
    let text = decode_bytes(&raw);

    let header_line = text.lines().next().unwrap_or("");
    let delimiter = sniff_delimiter(header_line);
    debug!("sniffed delimiter {:?} from header {header_line:?}", delimiter as char);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let energy_idx = find_column(headers.iter(), ENERGY_COLUMN)?;
    let duration_idx = find_column(headers.iter(), DURATION_COLUMN)?;

    let mut energy_cells = Vec::new();
    let mut duration_cells = Vec::new();
    for record in reader.records() {
        let record = record?;
        energy_cells.push(record.get(energy_idx).unwrap_or("").to_string());
        duration_cells.push(record.get(duration_idx).unwrap_or("").to_string());
    }

    Ok(Measurements {
        energy: parse_column(&energy_cells, ENERGY_COLUMN),
        duration: parse_column(&duration_cells, DURATION_COLUMN),
    })
}

/// Decode raw file bytes using a heuristic encoding guess.  Acquisition
/// software in the field still exports windows-1251 text.
fn decode_bytes(raw: &[u8]) -> String {
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(raw, true);
    let encoding = detector.guess(None, true);

    let (text, actual, malformed) = encoding.decode(raw);
    if malformed {
        warn!("malformed byte sequences while decoding as {}", actual.name());
    } else {
        debug!("decoded file as {}", actual.name());
    }
    text.into_owned()
}

/// Pick the column delimiter from the header line.
///
/// The column names themselves contain commas ("Энергия, Дж"), so a tab or
/// semicolon wins whenever one appears at all; a comma is only the fallback
/// (in which case the headers must be quoted).
fn sniff_delimiter(header_line: &str) -> u8 {
    for candidate in [b'\t', b';'] {
        if header_line.bytes().any(|b| b == candidate) {
            return candidate;
        }
    }
    b','
}

// ---------------------------------------------------------------------------
// Excel loader (.xls / .xlsx)
// ---------------------------------------------------------------------------

fn load_excel(path: &Path) -> Result<Measurements, LoadError> {
    let mut workbook = calamine::open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(LoadError::NoWorksheet)??;

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .map(|cells| cells.iter().map(|c| c.to_string()).collect())
        .unwrap_or_default();

    let energy_idx = find_column(header.iter().map(String::as_str), ENERGY_COLUMN)?;
    let duration_idx = find_column(header.iter().map(String::as_str), DURATION_COLUMN)?;

    let mut energy_cells = Vec::new();
    let mut duration_cells = Vec::new();
    for row in rows {
        energy_cells.push(cell_text(row, energy_idx));
        duration_cells.push(cell_text(row, duration_idx));
    }

    Ok(Measurements {
        energy: parse_column(&energy_cells, ENERGY_COLUMN),
        duration: parse_column(&duration_cells, DURATION_COLUMN),
    })
}

fn cell_text(row: &[calamine::Data], idx: usize) -> String {
    row.get(idx).map(|c| c.to_string()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn find_column<'a>(
    headers: impl Iterator<Item = &'a str>,
    name: &'static str,
) -> Result<usize, LoadError> {
    headers
        .enumerate()
        .find(|(_, h)| h.trim() == name)
        .map(|(i, _)| i)
        .ok_or(LoadError::MissingColumn(name))
}

/// Parse a column of cell texts to `f64`, normalising decimal commas.
/// Cells that fail to parse are dropped.
fn parse_column(cells: &[String], column: &str) -> Vec<f64> {
    let mut values = Vec::with_capacity(cells.len());
    for cell in cells {
        let normalised = cell.trim().replace(',', ".");
        match normalised.parse::<f64>() {
            Ok(v) if v.is_finite() => values.push(v),
            _ => debug!("dropping unparseable {column} cell {cell:?}"),
        }
    }
    values
}
