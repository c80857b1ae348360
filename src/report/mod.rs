pub mod json;
pub mod text;

use crate::pipeline::stage5_score::SampleScore;

/// Header plus pre-formatted cells; the first column is the row index.
#[derive(Debug, Clone, Default)]
pub struct ReportTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct ReportContext {
    pub score: SampleScore,
    pub table: ReportTable,
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

pub fn format_cell(v: Option<f64>) -> String {
    match v {
        Some(v) => format_f64_6(v),
        None => "NaN".to_string(),
    }
}

/// Renders a table with every column right-aligned to its widest cell.
pub fn render_aligned(table: &ReportTable) -> String {
    let n_cols = table
        .rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(table.header.len()))
        .max()
        .unwrap_or(0);
    let mut widths = vec![0usize; n_cols];
    for row in std::iter::once(&table.header).chain(table.rows.iter()) {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in std::iter::once(&table.header).chain(table.rows.iter()) {
        let mut line = String::new();
        for (i, width) in widths.iter().enumerate() {
            if i > 0 {
                line.push_str("  ");
            }
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            line.push_str(&format!("{:>width$}", cell, width = *width));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
