//! Delimited-text loading with native type inference.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::Path;

use encoding_rs::Encoding;
use tracing::debug;

use crate::error::{LoadError, LoadResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Load a delimited text file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - The file is decoded with the encoding named by `encoding` (a WHATWG label such as
///   `utf-8`, `windows-1251`, `latin1`).
/// - The first record is the header row.
/// - Cells equal to one of `missing_markers` (after trimming) become [`Value::Null`].
/// - Each column gets the narrowest native type that fits all of its non-missing cells.
pub fn load_csv_from_path(
    path: impl AsRef<Path>,
    separator: u8,
    encoding: &str,
    missing_markers: &[String],
) -> LoadResult<DataSet> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io(e),
    })?;
    let text = decode(&bytes, encoding)?;

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(separator)
        .from_reader(text.as_bytes());
    load_csv_from_reader(&mut rdr, missing_markers)
}

/// Load delimited text from an existing CSV reader.
///
/// The reader must be configured with `has_headers(true)`.
pub fn load_csv_from_reader<R: io::Read>(
    rdr: &mut csv::Reader<R>,
    missing_markers: &[String],
) -> LoadResult<DataSet> {
    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(LoadError::Empty);
    }
    let names = dedupe_headers(headers.iter());

    // Column-major raw cells; `None` marks a missing cell.
    let mut raw: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];
    for result in rdr.records() {
        let record = result?;
        for (idx, column) in raw.iter_mut().enumerate() {
            let cell = record.get(idx).unwrap_or("").trim();
            if is_missing(cell, missing_markers) {
                column.push(None);
            } else {
                column.push(Some(cell.to_owned()));
            }
        }
    }

    let mut fields = Vec::with_capacity(names.len());
    let mut columns: Vec<Vec<Value>> = Vec::with_capacity(names.len());
    for (name, cells) in names.into_iter().zip(raw) {
        let data_type = infer_type(cells.iter().flatten().map(String::as_str));
        debug!(column = %name, %data_type, "inferred column type");
        columns.push(cells.into_iter().map(|c| convert(c, data_type)).collect());
        fields.push(Field::new(name, data_type));
    }

    let row_count = columns.first().map_or(0, Vec::len);
    let mut iters: Vec<_> = columns.into_iter().map(Vec::into_iter).collect();
    let rows = (0..row_count)
        .map(|_| {
            iters
                .iter_mut()
                .map(|it| it.next().unwrap_or(Value::Null))
                .collect()
        })
        .collect();

    Ok(DataSet::new(Schema::new(fields), rows))
}

/// Decode raw bytes using the encoding named by `label`.
///
/// A byte-order mark, when present, takes precedence over the label.
pub fn decode(bytes: &[u8], label: &str) -> LoadResult<String> {
    let encoding =
        Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| LoadError::UnknownEncoding {
            label: label.to_owned(),
        })?;
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(LoadError::Decode {
            encoding: used.name().to_owned(),
        });
    }
    Ok(text.into_owned())
}

fn is_missing(cell: &str, missing_markers: &[String]) -> bool {
    cell.is_empty() || missing_markers.iter().any(|m| m == cell)
}

/// Repeated header names get a `.N` suffix so every column stays addressable by name.
///
/// A suffixed name never collides with a header that appears literally elsewhere in the row.
fn dedupe_headers<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let headers: Vec<&str> = headers.map(str::trim).collect();
    let mut used: HashSet<String> = HashSet::new();
    let mut next_suffix: HashMap<&str, usize> = HashMap::new();
    let mut out = Vec::with_capacity(headers.len());
    for (idx, &header) in headers.iter().enumerate() {
        let name = if used.contains(header) {
            let n = next_suffix.entry(header).or_insert(1);
            loop {
                let candidate = format!("{header}.{n}");
                *n += 1;
                // Skip names that are taken or still to come as a literal header.
                let taken =
                    used.contains(&candidate) || headers[idx + 1..].contains(&candidate.as_str());
                if !taken {
                    break candidate;
                }
            }
        } else {
            header.to_owned()
        };
        used.insert(name.clone());
        out.push(name);
    }
    out
}

fn infer_type<'a>(cells: impl Iterator<Item = &'a str>) -> DataType {
    let mut seen = false;
    let mut int = true;
    let mut float = true;
    let mut boolean = true;
    for cell in cells {
        seen = true;
        int = int && cell.parse::<i64>().is_ok();
        float = float && cell.parse::<f64>().is_ok();
        boolean = boolean && parse_bool(cell).is_some();
        if !int && !float && !boolean {
            return DataType::Utf8;
        }
    }

    match (seen, int, float, boolean) {
        // A column with no values at all is an all-missing numeric column.
        (false, ..) => DataType::Float64,
        (true, true, ..) => DataType::Int64,
        (true, false, true, _) => DataType::Float64,
        (true, false, false, true) => DataType::Bool,
        _ => DataType::Utf8,
    }
}

fn convert(cell: Option<String>, data_type: DataType) -> Value {
    let Some(cell) = cell else {
        return Value::Null;
    };
    // Inference guarantees every cell parses as its column type.
    match data_type {
        DataType::Int64 => cell.parse().map(Value::Int64).unwrap_or(Value::Null),
        DataType::Float64 => cell.parse().map(Value::Float64).unwrap_or(Value::Null),
        DataType::Bool => parse_bool(&cell).map(Value::Bool).unwrap_or(Value::Null),
        DataType::Utf8 => Value::Utf8(cell),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{decode, dedupe_headers, infer_type, load_csv_from_reader};
    use crate::types::{DataType, Value};

    fn markers() -> Vec<String> {
        vec!["NA".to_string(), "null".to_string()]
    }

    #[test]
    fn infers_narrowest_type() {
        assert_eq!(infer_type(["1", "2", "-3"].into_iter()), DataType::Int64);
        assert_eq!(infer_type(["1", "2.5"].into_iter()), DataType::Float64);
        assert_eq!(infer_type(["True", "false"].into_iter()), DataType::Bool);
        assert_eq!(infer_type(["1", "x"].into_iter()), DataType::Utf8);
        assert_eq!(infer_type(std::iter::empty()), DataType::Float64);
    }

    #[test]
    fn missing_markers_become_null() {
        let input = "age,city\n10,A\nNA,\n30,null\n";
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(input.as_bytes());

        let ds = load_csv_from_reader(&mut rdr, &markers()).unwrap();
        assert_eq!(ds.row_count(), 3);
        assert_eq!(ds.schema.fields[0].data_type, DataType::Int64);
        assert_eq!(ds.schema.fields[1].data_type, DataType::Utf8);
        assert_eq!(ds.rows[1], vec![Value::Null, Value::Null]);
        assert_eq!(ds.rows[2], vec![Value::Int64(30), Value::Null]);
    }

    #[test]
    fn header_only_input_has_zero_rows() {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader("a,b\n".as_bytes());

        let ds = load_csv_from_reader(&mut rdr, &markers()).unwrap();
        assert_eq!(ds.row_count(), 0);
        assert_eq!(ds.column_count(), 2);
    }

    #[test]
    fn empty_input_is_an_error() {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader("".as_bytes());

        let err = load_csv_from_reader(&mut rdr, &markers()).unwrap_err();
        assert!(err.to_string().contains("no header row"));
    }

    #[test]
    fn repeated_headers_are_suffixed() {
        let names = dedupe_headers(["a", "b", "a", "a"].into_iter());
        assert_eq!(names, vec!["a", "b", "a.1", "a.2"]);
    }

    #[test]
    fn suffixed_headers_do_not_clash_with_literal_ones() {
        let names = dedupe_headers(["a", "a", "a.1"].into_iter());
        assert_eq!(names, vec!["a", "a.2", "a.1"]);

        let names = dedupe_headers(["a", "a.1", "a", "a"].into_iter());
        assert_eq!(names, vec!["a", "a.1", "a.2", "a.3"]);

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader("a,a,a.1\n1,2,3\n4,5,6\n".as_bytes());
        let ds = load_csv_from_reader(&mut rdr, &markers()).unwrap();
        let names: Vec<&str> = ds.schema.field_names().collect();
        assert_eq!(names, vec!["a", "a.2", "a.1"]);
    }

    #[test]
    fn decode_rejects_unknown_label() {
        let err = decode(b"a,b\n", "no-such-encoding").unwrap_err();
        assert!(err.to_string().contains("unknown text encoding"));
    }

    #[test]
    fn decode_windows_1251() {
        // "Мир" in windows-1251.
        let text = decode(&[0xCC, 0xE8, 0xF0], "windows-1251").unwrap();
        assert_eq!(text, "Мир");
    }

    #[test]
    fn decode_rejects_invalid_utf8() {
        let err = decode(&[0x61, 0xFF, 0x62], "utf-8").unwrap_err();
        assert!(err.to_string().contains("UTF-8"));
    }
}
