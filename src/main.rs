mod config;
mod error;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Arg, ArgAction, CommandFactory, Parser};

use crate::config::{LOG_FILE_NAME, RunConfig};
use crate::error::Result;
use crate::pipeline::stage3_population::run_stage3;
use crate::pipeline::stage4_reference::run_stage4;
use crate::pipeline::stage5_score::{SampleScore, run_stage5};
use crate::pipeline::stage6_report::run_stage6;
use crate::report::json::{ScoreSummary, render_summary_json};

/// Run control score of an NGS sample against the training population.
#[derive(Debug, Parser)]
#[command(
    name = "runControl",
    version,
    disable_version_flag = true,
    arg(Arg::new("version")
        .short('v')
        .long("version")
        .action(ArgAction::Version)
        .help("Print version"))
)]
struct Cli {
    /// input reads in csv format
    #[arg(short = 'f', long = "csv", value_name = "CSV", help_heading = "Input file")]
    csv: PathBuf,
}

fn main() {
    let args: Vec<OsString> = std::env::args_os().collect();
    if wants_help(&args) {
        if let Err(err) = print_usage(&mut io::stdout().lock()) {
            eprintln!("{err}");
            std::process::exit(1);
        }
        return;
    }
    let cli = Cli::parse_from(&args);

    logging::init_logging(Path::new(LOG_FILE_NAME));
    tracing::info!(
        "{}",
        args.iter()
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    );

    if let Err(err) = run(cli) {
        tracing::error!("{err}");
        eprintln!("{err}");
        std::process::exit(1);
    }
}

/// A bare invocation prints help and succeeds.
fn wants_help(args: &[OsString]) -> bool {
    args.len() <= 1
}

fn print_usage(out: &mut impl Write) -> io::Result<()> {
    Cli::command().write_help(out)?;
    writeln!(out)
}

fn run(cli: Cli) -> Result<()> {
    let config = RunConfig::resolve(cli.csv)?;
    let score = score_run(&config)?;
    if score.score < 1.0 {
        tracing::warn!("run control score {:.6} is below 1", score.score);
    }
    println!("The run control score is {:.6}.", score.score);
    Ok(())
}

/// Training directory and sample in, report file and score out.
fn score_run(config: &RunConfig) -> Result<SampleScore> {
    let thresholds = &config.thresholds;
    let stage3 = run_stage3(&config.training_dir, None, thresholds)?;
    let stage4 = run_stage4(&stage3.matrix, thresholds)?;
    let stage5 = run_stage5(&config.sample_path, &stage4.reference, thresholds)?;
    run_stage6(&config.report_path, &stage4.reference, &stage5)?;

    let summary = ScoreSummary {
        tool: "kira-runcontrol",
        version: env!("CARGO_PKG_VERSION"),
        sample: config.sample_path.display().to_string(),
        training_dir: config.training_dir.display().to_string(),
        training_files: stage3.matrix.n_files(),
        population_positions: stage3.n_positions_joined,
        reference_filters: stage4.counts,
        score: stage5.score,
    };
    tracing::info!(summary = %render_summary_json(&summary), "run complete");

    Ok(stage5.score)
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
