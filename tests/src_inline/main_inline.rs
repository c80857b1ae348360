use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

use clap::error::ErrorKind;

use super::*;
use crate::error::RunControlError;
use crate::model::thresholds::ThresholdProfile;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_runcontrol_main_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Reference sites end up at 100 and 200; 300, 400 and 500 are filtered out.
fn write_training_set(dir: &Path) {
    for i in 0..20 {
        let mut csv = String::from("freq,mut,pos,cov\n");
        let a = 0.40 + 0.01 * (i % 5) as f64;
        csv.push_str(&format!("{},A,100,900\n{},G,100,900\n", a, 1.0 - a));
        csv.push_str("0.3,A,200,800\n0.2,AT,200,800\n0.5,C,200,800\n");
        csv.push_str("1.0,A,300,700\n0.0,-,300,700\n");
        csv.push_str("0.1,A,400,600\n0.9,G,400,600\n");
        let b = if i % 2 == 0 { 0.21 } else { 0.79 };
        csv.push_str(&format!("{},A,500,500\n{},G,500,500\n", b, 1.0 - b));
        fs::write(dir.join(format!("runko_{:02}.csv", i)), csv).unwrap();
    }
}

#[test]
fn test_cli_debug_assert() {
    Cli::command().debug_assert();
}

#[test]
fn test_cli_parses_csv_flag() {
    let cli = Cli::try_parse_from(["runControl", "-f", "sample.csv"]).unwrap();
    assert_eq!(cli.csv, PathBuf::from("sample.csv"));
    let cli = Cli::try_parse_from(["runControl", "--csv", "other.csv"]).unwrap();
    assert_eq!(cli.csv, PathBuf::from("other.csv"));
}

#[test]
fn test_cli_short_version_flag() {
    let err = Cli::try_parse_from(["runControl", "-v"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisplayVersion);
    let err = Cli::try_parse_from(["runControl", "--version"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisplayVersion);
}

#[test]
fn test_cli_rejects_unknown_flags() {
    let err = Cli::try_parse_from(["runControl", "-f", "a.csv", "--training", "x"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownArgument);
}

#[test]
fn test_bare_invocation_prints_help() {
    assert!(wants_help(&[OsString::from("runControl")]));
    assert!(!wants_help(&[
        OsString::from("runControl"),
        OsString::from("-f"),
        OsString::from("x.csv"),
    ]));
}

struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_usage_lists_flags() {
    let mut out = Vec::new();
    print_usage(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("-f, --csv <CSV>"));
    assert!(text.contains("-v, --version"));
    assert!(text.ends_with('\n'));
}

#[test]
fn test_usage_reports_write_failure() {
    let err = print_usage(&mut BrokenPipe).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
}

#[test]
fn test_score_run_end_to_end() {
    let root = make_temp_dir();
    let training_dir = root.join("training");
    fs::create_dir_all(&training_dir).unwrap();
    write_training_set(&training_dir);

    let sample_path = root.join("sample.csv");
    fs::write(
        &sample_path,
        "freq,mut,pos\n0.5,A,100\n0.5,G,100\n0.9,A,200\n0.1,C,200\n0.5,A,999\n",
    )
    .unwrap();

    let config = RunConfig {
        sample_path,
        training_dir,
        report_path: root.join("score_report.txt"),
        thresholds: ThresholdProfile::default_v1(),
    };
    let score = score_run(&config).unwrap();
    assert_eq!(score.training_points, 2);
    assert_eq!(score.valid_sample_points, 1);
    assert_eq!(score.score, 0.5);

    let report = fs::read_to_string(&config.report_path).unwrap();
    assert!(report.starts_with("The run control score is 0.500000.\n"));
    assert!(report.contains("WARNING, run control score is below 1.\n"));
    assert!(report.contains("0.000010"));
}

#[test]
fn test_score_run_missing_training_dir() {
    let root = make_temp_dir();
    let config = RunConfig {
        sample_path: root.join("sample.csv"),
        training_dir: root.join("absent"),
        report_path: root.join("score_report.txt"),
        thresholds: ThresholdProfile::default_v1(),
    };
    let err = score_run(&config).unwrap_err();
    assert!(matches!(err, RunControlError::MissingTrainingDirectory(_)));
    assert!(!config.report_path.exists());
}
