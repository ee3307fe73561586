use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use eda_report::LoadError;
use eda_report::ingestion::{LoadOptions, load_from_path};
use eda_report::types::{DataType, Value};

fn tmp_file(ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("eda-report-load-{nanos}.{ext}"))
}

#[test]
fn load_sample_infers_types_and_missing_values() {
    let ds = load_from_path("tests/fixtures/sample.csv", &LoadOptions::default()).unwrap();

    assert_eq!(ds.row_count(), 4);
    assert_eq!(ds.column_count(), 3);
    let types: Vec<DataType> = ds.schema.fields.iter().map(|f| f.data_type).collect();
    assert_eq!(types, vec![DataType::Int64, DataType::Float64, DataType::Utf8]);

    assert_eq!(ds.rows[0][0], Value::Int64(10));
    assert_eq!(ds.rows[1][1], Value::Null);
    assert_eq!(ds.rows[2][0], Value::Null);
    assert_eq!(ds.rows[3][2], Value::Null);
    assert_eq!(ds.rows[2][1], Value::Float64(170.0));
}

#[test]
fn load_semicolon_separated_windows_1251() {
    let path = tmp_file("csv");
    // "Москва" and "Мир" in windows-1251.
    std::fs::write(
        &path,
        b"city;pop\n\xcc\xee\xf1\xea\xe2\xe0;12\n\xcc\xe8\xf0;NA\n",
    )
    .unwrap();

    let opts = LoadOptions {
        separator: b';',
        encoding: "windows-1251".to_string(),
        ..Default::default()
    };
    let ds = load_from_path(&path, &opts).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(ds.row_count(), 2);
    assert_eq!(ds.rows[0][0], Value::Utf8("Москва".to_string()));
    assert_eq!(ds.rows[1][0], Value::Utf8("Мир".to_string()));
    assert_eq!(ds.schema.fields[1].data_type, DataType::Int64);
    assert_eq!(ds.rows[1][1], Value::Null);
}

#[test]
fn load_windows_1251_bytes_as_utf8_is_rejected() {
    let path = tmp_file("csv");
    std::fs::write(&path, b"city\n\xcc\xe8\xf0\n").unwrap();

    let err = load_from_path(&path, &LoadOptions::default()).unwrap_err();
    let _ = std::fs::remove_file(&path);

    assert!(matches!(err, LoadError::Decode { .. }));
}

#[test]
fn missing_file_is_not_found() {
    let err = load_from_path("tests/fixtures/does_not_exist.csv", &LoadOptions::default())
        .unwrap_err();
    match err {
        LoadError::NotFound { path } => assert!(path.ends_with("does_not_exist.csv")),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn unknown_encoding_is_rejected() {
    let opts = LoadOptions {
        encoding: "klingon-8".to_string(),
        ..Default::default()
    };
    let err = load_from_path("tests/fixtures/sample.csv", &opts).unwrap_err();
    assert!(matches!(err, LoadError::UnknownEncoding { label } if label == "klingon-8"));
}

#[test]
fn ragged_record_is_a_csv_error() {
    let path = tmp_file("csv");
    std::fs::write(&path, "a,b\n1,2\n3,4,5\n").unwrap();

    let err = load_from_path(&path, &LoadOptions::default()).unwrap_err();
    let _ = std::fs::remove_file(&path);

    assert!(matches!(err, LoadError::Csv(_)));
}
