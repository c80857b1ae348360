use std::fs;
use std::path::Path;

use crate::error::{Result, RunControlError};
use crate::model::nucleotide::Nucleotide;
use crate::model::reference::ReferenceTable;
use crate::pipeline::stage5_score::Stage5Output;
use crate::report::text::render_score_report;
use crate::report::{ReportContext, ReportTable, format_cell};

/// Renders the score report and writes it to `path`, replacing any
/// previous report.
pub fn run_stage6(
    path: &Path,
    reference: &ReferenceTable,
    stage5: &Stage5Output,
) -> Result<String> {
    let ctx = build_report_context(reference, stage5);
    let report = render_score_report(&ctx);
    fs::write(path, &report).map_err(|e| RunControlError::io(path, e))?;
    tracing::info!(
        "report written to {} ({} rows)",
        path.display(),
        ctx.table.rows.len()
    );
    Ok(report)
}

/// Reference statistics joined with the sample frequencies, one row per
/// reference site.
pub fn build_report_context(
    reference: &ReferenceTable,
    stage5: &Stage5Output,
) -> ReportContext {
    let extra_codes = stage5.sample.extra_codes();

    let mut header = vec!["pos".to_string()];
    for nt in Nucleotide::ALL {
        header.push(nt.mean_column().to_string());
        header.push(nt.std_column().to_string());
    }
    for nt in Nucleotide::ALL {
        header.push(nt.code().to_string());
    }
    for code in &extra_codes {
        header.push(code.to_string());
    }
    header.push("pass".to_string());

    let mut rows = Vec::with_capacity(reference.len());
    for (&pos, site) in &reference.sites {
        let mut row = vec![pos.to_string()];
        for nt in Nucleotide::ALL {
            let stats = site.get(nt);
            row.push(format_cell(stats.mean));
            row.push(format_cell(stats.std));
        }
        let sample_row = stage5.sample.get(pos);
        for nt in Nucleotide::ALL {
            row.push(format_cell(sample_row.and_then(|r| r.get(nt))));
        }
        for code in &extra_codes {
            row.push(format_cell(sample_row.and_then(|r| r.extra.get(code).copied())));
        }
        row.push(
            match stage5.pass_state(pos) {
                Some(true) => "yes",
                Some(false) => "no",
                None => "",
            }
            .to_string(),
        );
        rows.push(row);
    }

    ReportContext {
        score: stage5.score,
        table: ReportTable { header, rows },
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_report.rs"]
mod tests;
