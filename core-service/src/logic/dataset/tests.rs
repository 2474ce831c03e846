use super::{parse_csv, PreviewRow, TrainingDataset};
use crate::error::Error;
use crate::logic::features::{SchemaError, FEATURE_LAYOUT, TARGET_NAME};

fn header() -> String {
    let mut columns: Vec<&str> = FEATURE_LAYOUT.to_vec();
    columns.push(TARGET_NAME);
    columns.join(",")
}

const ROW_A: &str = "80,5,2,2,0.64,1425,4.5,4.5,3.2,320,2200,3.8";
const ROW_B: &str = "78,5.2,2.1,1.9,0.62,1440,4.4,4.1,3.0,330,2100,4.1";

#[test]
fn test_parse_csv_basic() {
    let csv = format!("{}\n{}\n{}\n", header(), ROW_A, ROW_B);
    let dataset = parse_csv(csv.as_bytes()).unwrap();

    assert_eq!(dataset.len(), 2);
    let first = &dataset.rows()[0];
    assert_eq!(first.features.get_by_name("kiln_temp"), Some(1425.0));
    assert_eq!(first.features.get_by_name("lsf"), Some(0.64));
    assert_eq!(first.strength_28d, 3.8);
    assert_eq!(dataset.targets(), vec![3.8, 4.1]);
}

#[test]
fn test_parse_csv_reordered_and_extra_columns() {
    // Target first, a text column in the middle, features reversed
    let mut columns: Vec<&str> = vec![TARGET_NAME, "batch_id"];
    columns.extend(FEATURE_LAYOUT.iter().rev());
    let values = "3.9,B-17,2200,320,3.2,4.5,4.5,1425,0.64,2,2,5,80";
    let csv = format!("{}\r\n{}\r\n", columns.join(","), values);

    let dataset = parse_csv(csv.as_bytes()).unwrap();
    let row = &dataset.rows()[0];
    assert_eq!(row.features.get_by_name("limestone_pct"), Some(80.0));
    assert_eq!(row.features.get_by_name("mill_power"), Some(2200.0));
    assert_eq!(row.strength_28d, 3.9);
}

#[test]
fn test_parse_csv_missing_column_is_schema_error() {
    let columns: Vec<&str> = FEATURE_LAYOUT
        .iter()
        .copied()
        .filter(|c| *c != "o2")
        .chain(std::iter::once(TARGET_NAME))
        .collect();
    let csv = format!("{}\n1,2,3,4,5,6,7,8,9,10,11\n", columns.join(","));

    match parse_csv(csv.as_bytes()) {
        Err(Error::Schema(SchemaError::MissingColumns { missing })) => {
            assert_eq!(missing, vec!["o2".to_string()]);
        }
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn test_parse_csv_bad_cell_is_format_error() {
    let csv = format!("{}\n{}\n80,5,2,2,0.64,hot,4.5,4.5,3.2,320,2200,3.8\n", header(), ROW_A);
    let err = parse_csv(csv.as_bytes()).unwrap_err();
    match err {
        Error::DataFormat(msg) => {
            assert!(msg.contains("line 3"), "{msg}");
            assert!(msg.contains("kiln_temp"), "{msg}");
        }
        other => panic!("expected format error, got {other:?}"),
    }
}

#[test]
fn test_parse_csv_short_row_is_format_error() {
    let csv = format!("{}\n80,5,2\n", header());
    assert!(matches!(parse_csv(csv.as_bytes()), Err(Error::DataFormat(_))));
}

#[test]
fn test_parse_csv_empty_inputs() {
    assert!(matches!(parse_csv(b""), Err(Error::DataFormat(_))));
    assert!(matches!(parse_csv(header().as_bytes()), Err(Error::DataFormat(_))));
    assert!(matches!(parse_csv(&[0xff, 0xfe, 0x00]), Err(Error::DataFormat(_))));
}

#[test]
fn test_parse_csv_strips_bom_and_blank_lines() {
    let csv = format!("\u{feff}{}\n\n{}\n   \n", header(), ROW_A);
    let dataset = parse_csv(csv.as_bytes()).unwrap();
    assert_eq!(dataset.len(), 1);
}

#[test]
fn test_from_table_checks_row_width() {
    let columns: Vec<&str> = FEATURE_LAYOUT
        .iter()
        .copied()
        .chain(std::iter::once(TARGET_NAME))
        .collect();
    let err = TrainingDataset::from_table(&columns, &[vec![1.0; 5]]).unwrap_err();
    assert!(matches!(err, Error::DataFormat(_)));
}

#[test]
fn test_feature_matrix_shape() {
    let csv = format!("{}\n{}\n{}\n", header(), ROW_A, ROW_B);
    let dataset = parse_csv(csv.as_bytes()).unwrap();
    let matrix = dataset.feature_matrix();
    assert_eq!(matrix.dim(), (2, FEATURE_LAYOUT.len()));
    assert_eq!(matrix[[1, 5]], 1440.0);
}

#[test]
fn test_parse_csv_multiline_quoted_note() {
    let csv = format!(
        "batch_note,{}\n\"line one\nline two\",{}\n\"plain\",{}\n",
        header(),
        ROW_A,
        ROW_B
    );
    let dataset = parse_csv(csv.as_bytes()).unwrap();
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.rows()[0].features.get_by_name("limestone_pct"), Some(80.0));
    assert_eq!(dataset.targets(), vec![3.8, 4.1]);
}

#[test]
fn test_parse_csv_error_line_counts_quoted_breaks() {
    let bad = "80,5,2,2,0.64,hot,4.5,4.5,3.2,320,2200,3.8";
    let csv = format!("batch_note,{}\n\"a\nb\",{}\n\"c\",{}\n", header(), ROW_A, bad);
    match parse_csv(csv.as_bytes()) {
        Err(Error::DataFormat(msg)) => assert!(msg.contains("line 4"), "{msg}"),
        other => panic!("expected format error, got {other:?}"),
    }
}

#[test]
fn test_preview_keeps_schema_order() {
    // Columns arrive reversed; the preview follows the layout
    let mut columns: Vec<&str> = vec![TARGET_NAME];
    columns.extend(FEATURE_LAYOUT.iter().rev());
    let csv = format!("{}\n3.9,2200,320,3.2,4.5,4.5,1425,0.64,2,2,5,80\n", columns.join(","));
    let preview = parse_csv(csv.as_bytes()).unwrap().rows()[0].to_preview();

    let mut expected: Vec<&str> = FEATURE_LAYOUT.to_vec();
    expected.push(TARGET_NAME);
    assert_eq!(preview.columns().collect::<Vec<_>>(), expected);
    assert_eq!(preview.get("kiln_temp"), Some(1425.0));

    let json = serde_json::to_string(&preview).unwrap();
    assert!(json.starts_with(r#"{"limestone_pct":80.0,"silica_pct":5.0,"#), "{json}");
    assert!(json.ends_with(r#""mill_power":2200.0,"strength_28d":3.9}"#), "{json}");

    let back: PreviewRow = serde_json::from_str(&json).unwrap();
    assert_eq!(back, preview);
}
