use std::collections::HashMap;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use calamine::{Data, Reader};
use thiserror::Error;

use super::model::{CellValue, Column, Dataset};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong while turning a file into a [`Dataset`].
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("No such file: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("Workbook contains no worksheets")]
    NoWorksheet,
}

type Result<T> = std::result::Result<T, LoadError>;

pub const NOT_FOUND_MESSAGE: &str = "File not found. Please provide a valid file path.";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a dataset, reporting failures on `out` instead of returning them.
///
/// A missing file prints [`NOT_FOUND_MESSAGE`]; anything else prints
/// `An error occurred: <error>`. Either way the caller just gets `None`.
pub fn load_data(path: &Path, out: &mut impl io::Write) -> Option<Dataset> {
    match load_file(path) {
        Ok(dataset) => {
            log::info!(
                "Loaded {} rows x {} columns: {:?}",
                dataset.n_rows(),
                dataset.n_columns(),
                dataset.column_names()
            );
            Some(dataset)
        }
        Err(LoadError::NotFound(p)) => {
            log::warn!("Dataset not found at {}", p.display());
            report(out, NOT_FOUND_MESSAGE);
            None
        }
        Err(e) => {
            log::error!("Failed to load {}: {e}", path.display());
            report(out, &format!("An error occurred: {e}"));
            None
        }
    }
}

/// The load outcome is `None` either way, so a failed write is only logged.
fn report(out: &mut impl io::Write, message: &str) {
    if let Err(e) = writeln!(out, "{message}").and_then(|()| out.flush()) {
        log::error!("Could not write load message {message:?}: {e}");
    }
}

/// Load a tabular dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – first worksheet, header row first
/// * `.csv` – header row first, cell types guessed per value
pub fn load_file(path: &Path) -> Result<Dataset> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io(e),
    })?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_spreadsheet(bytes),
        "csv" => load_csv(&bytes),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Spreadsheet loader
// ---------------------------------------------------------------------------

/// Reads the first worksheet. The format is sniffed from the content, so a
/// workbook with a misleading extension still opens.
fn load_spreadsheet(bytes: Vec<u8>) -> Result<Dataset> {
    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(LoadError::NoWorksheet)??;

    // The range starts at the first used cell, so blank leading columns are
    // restored as unnamed, empty columns.
    let offset = range.start().map_or(0, |(_, col)| col as usize);

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Dataset::default());
    };
    let headers: Vec<Option<String>> = std::iter::repeat(None)
        .take(offset)
        .chain(header_row.iter().map(|cell| match cell {
            Data::Empty => None,
            other => Some(other.to_string()),
        }))
        .collect();

    let body: Vec<Vec<CellValue>> = rows
        .map(|row| {
            std::iter::repeat(CellValue::Null)
                .take(offset)
                .chain(row.iter().map(spreadsheet_cell))
                .collect()
        })
        .collect();

    Ok(build_dataset(headers, body))
}

fn spreadsheet_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Null,
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) if f.is_nan() => CellValue::Null,
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) if is_na_marker(s) => CellValue::Null,
        Data::String(s) => CellValue::Text(s.clone()),
        // Dates and durations are not analysed numerically; keep their text form.
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(bytes: &[u8]) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);
    let headers: Vec<Option<String>> = reader
        .headers()?
        .iter()
        .map(|h| (!h.is_empty()).then(|| h.to_string()))
        .collect();

    let mut body = Vec::new();
    for result in reader.records() {
        let record = result?;
        body.push(record.iter().map(guess_cell_type).collect());
    }

    Ok(build_dataset(headers, body))
}

fn guess_cell_type(s: &str) -> CellValue {
    if is_na_marker(s) {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        // Spellings like "nAn" parse to NaN without being listed markers.
        return if f.is_nan() {
            CellValue::Null
        } else {
            CellValue::Float(f)
        };
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::Text(s.to_string())
}

// ---------------------------------------------------------------------------
// Shared: missing-value markers, header naming and row → column transposition
// ---------------------------------------------------------------------------

/// Text cells read as missing values. Infinities are not in the list and stay
/// numeric.
const NA_VALUES: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_na_marker(s: &str) -> bool {
    NA_VALUES.contains(&s)
}

/// Turns raw header cells into unique column names: blanks become
/// `Unnamed: <index>` and repeats get a `.1`, `.2`, ... suffix.
fn column_names(headers: Vec<Option<String>>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(headers.len());

    for (idx, header) in headers.into_iter().enumerate() {
        let base = header.unwrap_or_else(|| format!("Unnamed: {idx}"));
        let mut name = base.clone();
        while let Some(n) = seen.get_mut(&name) {
            *n += 1;
            name = format!("{base}.{n}");
        }
        seen.insert(name.clone(), 0);
        names.push(name);
    }
    names
}

/// Rows shorter than the header are padded with nulls; cells past the last
/// header are dropped.
fn build_dataset(headers: Vec<Option<String>>, rows: Vec<Vec<CellValue>>) -> Dataset {
    let names = column_names(headers);
    let mut columns: Vec<Column> = names
        .into_iter()
        .map(|name| Column::new(name, Vec::with_capacity(rows.len())))
        .collect();

    for row in rows {
        let mut cells = row.into_iter();
        for column in &mut columns {
            column.values.push(cells.next().unwrap_or(CellValue::Null));
        }
    }

    Dataset::from_columns(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_xlsxwriter::Workbook;
    use tempfile::TempDir;

    fn write_beans_workbook(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("beans.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "A").unwrap();
        sheet.write_string(0, 1, "B").unwrap();
        sheet.write_string(0, 2, "Class").unwrap();
        let rows = [(1.0, 10.5, "x"), (2.0, 11.5, "y"), (3.0, 12.5, "x")];
        for (i, (a, b, class)) in rows.iter().enumerate() {
            let r = i as u32 + 1;
            sheet.write_number(r, 0, *a).unwrap();
            sheet.write_number(r, 1, *b).unwrap();
            sheet.write_string(r, 2, *class).unwrap();
        }
        workbook.save(&path).unwrap();
        path
    }

    #[test]
    fn test_load_xlsx_keeps_class_categorical() {
        let dir = TempDir::new().unwrap();
        let path = write_beans_workbook(&dir);

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.n_rows(), 3);
        assert_eq!(ds.n_columns(), 3);
        assert_eq!(ds.column_names(), vec!["A", "B", "Class"]);
        assert!(ds.column("A").unwrap().is_numeric());
        assert!(ds.column("B").unwrap().is_numeric());

        let class = ds.column("Class").unwrap();
        assert!(!class.is_numeric());
        assert_eq!(
            class.values,
            vec![
                CellValue::Text("x".into()),
                CellValue::Text("y".into()),
                CellValue::Text("x".into()),
            ]
        );
    }

    #[test]
    fn test_load_xlsx_blank_cells_are_null() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gaps.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "A").unwrap();
        sheet.write_string(0, 1, "B").unwrap();
        sheet.write_number(1, 0, 1.0).unwrap();
        sheet.write_number(1, 1, 2.0).unwrap();
        sheet.write_number(2, 1, 3.0).unwrap();
        workbook.save(&path).unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.n_rows(), 2);
        assert_eq!(ds.column("A").unwrap().values[1], CellValue::Null);
        assert_eq!(ds.column("A").unwrap().null_count(), 1);
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = load_file(&dir.path().join("nope.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[test]
    fn test_load_data_missing_file_prints_once() {
        let dir = TempDir::new().unwrap();
        let mut out = Vec::new();
        let ds = load_data(&dir.path().join("nope.xlsx"), &mut out);
        assert!(ds.is_none());

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(NOT_FOUND_MESSAGE).count(), 1);
        assert!(!text.contains("An error occurred"));
    }

    #[test]
    fn test_load_data_corrupt_workbook_prints_generic_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"definitely not a zip archive").unwrap();

        let mut out = Vec::new();
        assert!(load_data(&path, &mut out).is_none());
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("An error occurred: "));
        assert!(!text.contains(NOT_FOUND_MESSAGE));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.txt");
        std::fs::write(&path, "A,B\n1,2\n").unwrap();
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ext) if ext == "txt"));
    }

    #[test]
    fn test_load_csv_guesses_types() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "A,B,Class\n1,2.5,x\n,3.5,y\n").unwrap();

        let ds = load_file(&path).unwrap();
        let a = ds.column("A").unwrap();
        assert_eq!(a.values, vec![CellValue::Integer(1), CellValue::Null]);
        assert_eq!(
            ds.column("B").unwrap().values,
            vec![CellValue::Float(2.5), CellValue::Float(3.5)]
        );
        assert!(!ds.column("Class").unwrap().is_numeric());
    }

    #[test]
    fn test_column_names_blank_and_duplicate_headers() {
        let names = column_names(vec![
            Some("A".into()),
            None,
            Some("A".into()),
            Some("A".into()),
        ]);
        assert_eq!(names, vec!["A", "Unnamed: 1", "A.1", "A.2"]);
    }

    #[test]
    fn test_build_dataset_pads_short_rows() {
        let ds = build_dataset(
            vec![Some("A".into()), Some("B".into())],
            vec![
                vec![CellValue::Integer(1)],
                vec![CellValue::Integer(2), CellValue::Integer(3)],
            ],
        );
        assert_eq!(
            ds.column("B").unwrap().values,
            vec![CellValue::Null, CellValue::Integer(3)]
        );
    }

    #[test]
    fn test_load_csv_na_markers_are_null() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("na.csv");
        std::fs::write(&path, "A,Class
1.5,x
NaN,NA
NA,y
2.5,N/A
").unwrap();

        let ds = load_file(&path).unwrap();
        let a = ds.column("A").unwrap();
        assert_eq!(
            a.values,
            vec![
                CellValue::Float(1.5),
                CellValue::Null,
                CellValue::Null,
                CellValue::Float(2.5),
            ]
        );
        assert!(a.is_numeric());
        assert_eq!(ds.column("Class").unwrap().null_count(), 2);
    }

    #[test]
    fn test_guess_cell_type_keeps_infinity_and_text() {
        assert_eq!(guess_cell_type("inf"), CellValue::Float(f64::INFINITY));
        assert_eq!(guess_cell_type("nAn"), CellValue::Null);
        assert_eq!(guess_cell_type("Nan bean"), CellValue::Text("Nan bean".into()));
    }

    #[test]
    fn test_load_xlsx_na_text_is_null() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("na.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "A").unwrap();
        sheet.write_number(1, 0, 1.0).unwrap();
        sheet.write_string(2, 0, "NA").unwrap();
        sheet.write_string(3, 0, "#N/A").unwrap();
        workbook.save(&path).unwrap();

        let a = load_file(&path).unwrap().column("A").unwrap().clone();
        assert_eq!(a.values, vec![CellValue::Float(1.0), CellValue::Null, CellValue::Null]);
        assert!(a.is_numeric());
    }

    #[test]
    fn test_load_xlsx_leading_blank_column_kept() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("offset.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 1, "A").unwrap();
        sheet.write_number(1, 1, 1.0).unwrap();
        sheet.write_number(2, 1, 2.0).unwrap();
        workbook.save(&path).unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.column_names(), vec!["Unnamed: 0", "A"]);
        let unnamed = ds.column("Unnamed: 0").unwrap();
        assert_eq!(unnamed.values, vec![CellValue::Null, CellValue::Null]);
        assert_eq!(
            ds.column("A").unwrap().values,
            vec![CellValue::Float(1.0), CellValue::Float(2.0)]
        );
    }

    struct BrokenPipe;

    impl io::Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_load_data_survives_unwritable_output() {
        let dir = TempDir::new().unwrap();
        assert!(load_data(&dir.path().join("nope.xlsx"), &mut BrokenPipe).is_none());

        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"not a workbook").unwrap();
        assert!(load_data(&path, &mut BrokenPipe).is_none());
    }
}
