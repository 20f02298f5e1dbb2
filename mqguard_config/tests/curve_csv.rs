use mqguard_config::{load_curve_csv, parse_curve_csv};
use std::io::Write;

fn write_temp_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().expect("create temp file");
    f.write_all(contents.as_bytes()).expect("write csv");
    f
}

#[test]
fn loads_well_formed_curve() {
    let f = write_temp_csv("ratio,ppm\n1000,0\n800,10\n650,20\n15,10000\n");
    let rows = load_curve_csv(f.path()).expect("load curve");
    assert_eq!(rows.len(), 4);
    assert_eq!((rows[0].ratio, rows[0].ppm), (1000, 0));
    assert_eq!((rows[3].ratio, rows[3].ppm), (15, 10000));
}

#[test]
fn rejects_wrong_headers() {
    let f = write_temp_csv("resistance,ppm\n1000,0\n800,10\n");
    let err = load_curve_csv(f.path()).expect_err("wrong headers");
    assert!(format!("{err}").contains("must have headers 'ratio,ppm'"));
}

#[test]
fn rejects_non_decreasing_ratio() {
    let err = parse_curve_csv("ratio,ppm\n800,0\n800,10\n".as_bytes())
        .expect_err("duplicate ratio");
    assert!(format!("{err}").contains("strictly decreasing"));

    let err = parse_curve_csv("ratio,ppm\n800,0\n900,10\n".as_bytes())
        .expect_err("increasing ratio");
    assert!(format!("{err}").contains("strictly decreasing"));
}

#[test]
fn rejects_non_increasing_ppm() {
    let err = parse_curve_csv("ratio,ppm\n1000,10\n800,10\n".as_bytes())
        .expect_err("flat ppm");
    assert!(format!("{err}").contains("strictly increasing"));
}

#[test]
fn rejects_short_tables() {
    let err = parse_curve_csv("ratio,ppm\n1000,0\n".as_bytes()).expect_err("single row");
    assert!(format!("{err}").contains("at least two rows"));
}

#[test]
fn rejects_malformed_rows_with_line_numbers() {
    let err = parse_curve_csv("ratio,ppm\n1000,0\nnot-a-number,10\n".as_bytes())
        .expect_err("bad cell");
    assert!(format!("{err}").contains("invalid CSV row 3"));
}

#[test]
fn missing_file_reports_path() {
    let err = load_curve_csv(std::path::Path::new("/nonexistent/curve.csv"))
        .expect_err("missing file");
    assert!(format!("{err}").contains("open curve CSV"));
}
