use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::*;
use crate::error::RunControlError;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_runcontrol_mut_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    let mut f = BufWriter::new(File::create(path).unwrap());
    f.write_all(contents.as_bytes()).unwrap();
}

fn write_table(path: &Path, table: &MutationTable) {
    let mut w = csv::Writer::from_path(path).unwrap();
    let mut header = vec!["pos".to_string(), "mut".to_string(), "freq".to_string()];
    header.extend(table.extra_columns.iter().cloned());
    w.write_record(&header).unwrap();
    for r in &table.records {
        let mut row = vec![r.pos.to_string(), r.mutation.to_string(), r.freq.to_string()];
        row.extend(r.extra.iter().map(|v| v.to_string()));
        w.write_record(&row).unwrap();
    }
    w.flush().unwrap();
}

#[test]
fn test_insertions_truncated_and_summed() {
    let dir = make_temp_dir();
    let path = dir.join("sample.csv");
    write_file(
        &path,
        "freq,mut,pos\n0.3,A,10\n0.2,AT,10\n0.5,G,10\n1.0,C,11\n",
    );

    let table = load_mutations(&path).unwrap();
    assert_eq!(table.records.len(), 3);
    assert_eq!(table.records[0].pos, 10);
    assert_eq!(table.records[0].mutation, 'A');
    assert!((table.records[0].freq - 0.5).abs() < 1e-12);
    assert_eq!(table.records[1].mutation, 'G');
    assert_eq!(table.records[2].pos, 11);
    assert_eq!(table.records[2].mutation, 'C');
}

#[test]
fn test_records_ordered_by_pos_then_mut() {
    let dir = make_temp_dir();
    let path = dir.join("sample.csv");
    write_file(&path, "pos,mut,freq\n20,T,0.1\n5,G,0.2\n20,A,0.7\n5,C,0.8\n");

    let table = load_mutations(&path).unwrap();
    let keys: Vec<(i64, char)> = table.records.iter().map(|r| (r.pos, r.mutation)).collect();
    assert_eq!(keys, vec![(5, 'C'), (5, 'G'), (20, 'A'), (20, 'T')]);
}

#[test]
fn test_numeric_extra_columns_summed_text_dropped() {
    let dir = make_temp_dir();
    let path = dir.join("sample.csv");
    write_file(
        &path,
        "freq,mut,pos,cov,ref\n0.4,A,7,100,A\n0.1,AA,7,50,A\n0.5,G,7,,A\n",
    );

    let table = load_mutations(&path).unwrap();
    assert_eq!(table.extra_columns, vec!["cov".to_string()]);
    assert_eq!(table.records[0].extra, vec![150.0]);
    assert_eq!(table.records[1].extra, vec![0.0]);
}

#[test]
fn test_missing_freq_contributes_nothing() {
    let dir = make_temp_dir();
    let path = dir.join("sample.csv");
    write_file(&path, "pos,mut,freq\n3,A,\n3,A,0.25\n4,C,\n");

    let table = load_mutations(&path).unwrap();
    assert_eq!(table.records[0].freq, 0.25);
    assert_eq!(table.records[1].freq, 0.0);
}

#[test]
fn test_empty_mut_is_malformed() {
    let dir = make_temp_dir();
    let path = dir.join("sample.csv");
    write_file(&path, "pos,mut,freq\n3,A,0.5\n4,,0.5\n");

    let err = load_mutations(&path).unwrap_err();
    assert!(matches!(
        err,
        RunControlError::MalformedMutationField { line: 3, .. }
    ));
}

#[test]
fn test_missing_column_reported() {
    let dir = make_temp_dir();
    let path = dir.join("sample.csv");
    write_file(&path, "pos,mut\n3,A\n");

    let err = load_mutations(&path).unwrap_err();
    assert!(matches!(
        err,
        RunControlError::MissingColumn { column: "freq", .. }
    ));
}

#[test]
fn test_bad_position_is_malformed_record() {
    let dir = make_temp_dir();
    let path = dir.join("sample.csv");
    write_file(&path, "pos,mut,freq\nx12,A,0.5\n");

    let err = load_mutations(&path).unwrap_err();
    assert!(matches!(err, RunControlError::MalformedRecord { line: 2, .. }));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = make_temp_dir();
    let err = load_mutations(&dir.join("absent.csv")).unwrap_err();
    assert!(matches!(err, RunControlError::FileIo { .. }));
}

#[test]
fn test_gzip_input() {
    let dir = make_temp_dir();
    let path = dir.join("sample.csv.gz");
    let mut enc = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
    enc.write_all(b"pos,mut,freq\n1,A,0.6\n1,G,0.4\n").unwrap();
    enc.finish().unwrap();

    let table = load_mutations(&path).unwrap();
    assert_eq!(table.records.len(), 2);
    assert_eq!(table.records[1].mutation, 'G');
}

#[test]
fn test_normalization_idempotent() {
    let dir = make_temp_dir();
    let path = dir.join("sample.csv");
    write_file(
        &path,
        concat!(
            "freq,mut,pos,cov\n0.3,A,10,5\n0.2,AT,10,5\n0.2,A,10,1\n",
            "0.3,G,10,5\n0.7,-,11,2\n0.1,-,11,2\n",
        ),
    );
    let first = load_mutations(&path).unwrap();

    let again_path = dir.join("normalized.csv");
    write_table(&again_path, &first);
    let second = load_mutations(&again_path).unwrap();

    assert_eq!(first.records.len(), second.records.len());
    assert_eq!(first.extra_columns, second.extra_columns);
    for (a, b) in first.records.iter().zip(second.records.iter()) {
        assert_eq!((a.pos, a.mutation), (b.pos, b.mutation));
        assert!((a.freq - b.freq).abs() < 1e-12);
        assert_eq!(a.extra, b.extra);
    }
}
