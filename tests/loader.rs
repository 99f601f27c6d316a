use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use hodograph::data::loader::{self, LoadError, DURATION_COLUMN, ENERGY_COLUMN};

fn write_fixture(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("failed to write fixture");
    path
}

#[test]
fn semicolon_csv_with_decimal_commas_loads_all_rows() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "probe.csv",
        format!(
            "{ENERGY_COLUMN};{DURATION_COLUMN}\n\
             81,8928;0,0898\n\
             42,4162;0,0677\n\
             23,2282;0,0493\n"
        )
        .as_bytes(),
    );

    let measurements = loader::load(&path).unwrap();
    assert_eq!(measurements.energy, vec![81.8928, 42.4162, 23.2282]);
    assert_eq!(measurements.duration, vec![0.0898, 0.0677, 0.0493]);
    assert!(measurements.is_aligned());
}

#[test]
fn tab_delimited_txt_loads() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "probe.txt",
        format!("{ENERGY_COLUMN}\t{DURATION_COLUMN}\n14,6381\t0,0336\n16,4917\t0,0314\n").as_bytes(),
    );

    let measurements = loader::load(&path).unwrap();
    assert_eq!(measurements.energy, vec![14.6381, 16.4917]);
    assert_eq!(measurements.duration, vec![0.0336, 0.0314]);
}

#[test]
fn comma_delimited_csv_with_quoted_headers_loads() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "probe.csv",
        format!(
            "\"{ENERGY_COLUMN}\",\"{DURATION_COLUMN}\"\n81.8928,0.0898\n42.4162,0.0677\n"
        )
        .as_bytes(),
    );

    let measurements = loader::load(&path).unwrap();
    assert_eq!(measurements.energy, vec![81.8928, 42.4162]);
    assert_eq!(measurements.duration, vec![0.0898, 0.0677]);
}

#[test]
fn windows_1251_file_is_decoded() {
    let dir = TempDir::new().unwrap();
    let contents = format!("{ENERGY_COLUMN};{DURATION_COLUMN}\n23,2282;0,0493\n16,4917;0,0314\n");
    let (encoded, _, had_unmappable) = encoding_rs::WINDOWS_1251.encode(&contents);
    assert!(!had_unmappable);
    let path = write_fixture(&dir, "legacy.txt", &encoded);

    let measurements = loader::load(&path).unwrap();
    assert_eq!(measurements.energy, vec![23.2282, 16.4917]);
    assert_eq!(measurements.duration, vec![0.0493, 0.0314]);
}

#[test]
fn unparseable_cells_are_dropped_per_column() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "probe.csv",
        format!(
            "{ENERGY_COLUMN};{DURATION_COLUMN}\n\
             81,8928;0,0898\n\
             нет данных;0,0677\n\
             23,2282;0,0493\n"
        )
        .as_bytes(),
    );

    let measurements = loader::load(&path).unwrap();
    // The bad energy cell disappears; the duration column keeps all rows.
    assert_eq!(measurements.energy, vec![81.8928, 23.2282]);
    assert_eq!(measurements.duration, vec![0.0898, 0.0677, 0.0493]);
    assert!(!measurements.is_aligned());
}

#[test]
fn missing_required_column_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "probe.csv",
        format!("{ENERGY_COLUMN};Амплитуда, дБ\n81,8928;44,1\n").as_bytes(),
    );

    match loader::load(&path) {
        Err(LoadError::MissingColumn(column)) => assert_eq!(column, DURATION_COLUMN),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn nonexistent_path_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no-such-file.csv");

    match loader::load(&path) {
        Err(LoadError::NotFound(p)) => assert_eq!(p, path),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn unsupported_extension_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "probe.json", b"{}");

    match loader::load(&path) {
        Err(LoadError::UnsupportedFormat(ext)) => assert_eq!(ext, ".json"),
        other => panic!("expected UnsupportedFormat, got {other:?}"),
    }
}

#[test]
fn xlsx_first_sheet_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("probe.xlsx");

    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, ENERGY_COLUMN).unwrap();
    sheet.write_string(0, 1, DURATION_COLUMN).unwrap();
    for (row, (energy, duration)) in [(81.8928, 0.0898), (42.4162, 0.0677), (23.2282, 0.0493)]
        .into_iter()
        .enumerate()
    {
        sheet.write_number(row as u32 + 1, 0, energy).unwrap();
        sheet.write_number(row as u32 + 1, 1, duration).unwrap();
    }
    workbook.save(&path).unwrap();

    let measurements = loader::load(&path).unwrap();
    assert_eq!(measurements.energy, vec![81.8928, 42.4162, 23.2282]);
    assert_eq!(measurements.duration, vec![0.0898, 0.0677, 0.0493]);
}

#[test]
fn xlsx_missing_column_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("probe.xlsx");

    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, DURATION_COLUMN).unwrap();
    sheet.write_number(1, 0, 0.0898).unwrap();
    workbook.save(&path).unwrap();

    match loader::load(&path) {
        Err(LoadError::MissingColumn(column)) => assert_eq!(column, ENERGY_COLUMN),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}
