use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Result, RunControlError};
use crate::input::reader::open_maybe_gz;
use crate::model::records::{MutationRecord, MutationTable};

pub const POS_COLUMN: &str = "pos";
pub const MUT_COLUMN: &str = "mut";
pub const FREQ_COLUMN: &str = "freq";

struct RawRow {
    pos: i64,
    mutation: char,
    freq: Option<f64>,
    extra: Vec<String>,
}

/// Reads a mutation-frequency CSV and normalizes it.
///
/// Each `mut` value is cut down to its first character, so insertion calls
/// such as `AT` collapse onto `A`. Rows sharing `(pos, mut)` are then merged
/// by summing `freq` and every numeric extra column. Records come back
/// ordered by `(pos, mut)`.
pub fn load_mutations(path: &Path) -> Result<MutationTable> {
    let reader = open_maybe_gz(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let find = |column: &'static str| {
        headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| RunControlError::MissingColumn {
                path: path.to_path_buf(),
                column,
            })
    };
    let pos_idx = find(POS_COLUMN)?;
    let mut_idx = find(MUT_COLUMN)?;
    let freq_idx = find(FREQ_COLUMN)?;

    let extra_idx: Vec<usize> = (0..headers.len())
        .filter(|&i| i != pos_idx && i != mut_idx && i != freq_idx)
        .collect();

    let mut raw = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let pos_str = field(pos_idx);
        let pos = pos_str
            .parse::<i64>()
            .map_err(|e| malformed(path, line, format!("pos `{pos_str}`: {e}")))?;

        let mutation = field(mut_idx)
            .chars()
            .next()
            .ok_or_else(|| RunControlError::MalformedMutationField {
                path: path.to_path_buf(),
                line,
            })?;

        let freq = parse_optional_f64(field(freq_idx))
            .map_err(|msg| malformed(path, line, format!("freq {msg}")))?;

        raw.push(RawRow {
            pos,
            mutation,
            freq,
            extra: extra_idx.iter().map(|&i| field(i).to_string()).collect(),
        });
    }

    let numeric: Vec<bool> = (0..extra_idx.len())
        .map(|col| {
            raw.iter()
                .all(|row| parse_optional_f64(&row.extra[col]).is_ok())
        })
        .collect();

    let mut extra_columns = Vec::new();
    for (col, &idx) in extra_idx.iter().enumerate() {
        if numeric[col] {
            extra_columns.push(headers[idx].to_string());
        } else {
            tracing::debug!(
                "dropping non-numeric column `{}` from {}",
                &headers[idx],
                path.display()
            );
        }
    }

    let mut grouped: BTreeMap<(i64, char), (f64, Vec<f64>)> = BTreeMap::new();
    for row in &raw {
        let entry = grouped
            .entry((row.pos, row.mutation))
            .or_insert_with(|| (0.0, vec![0.0; extra_columns.len()]));
        entry.0 += row.freq.unwrap_or(0.0);
        let mut slot = 0usize;
        for (col, value) in row.extra.iter().enumerate() {
            if !numeric[col] {
                continue;
            }
            if let Ok(Some(v)) = parse_optional_f64(value) {
                entry.1[slot] += v;
            }
            slot += 1;
        }
    }

    let records: Vec<MutationRecord> = grouped
        .into_iter()
        .map(|((pos, mutation), (freq, extra))| MutationRecord {
            pos,
            mutation,
            freq,
            extra,
        })
        .collect();

    tracing::debug!(
        "loaded {}: {} raw rows, {} normalized records",
        path.display(),
        raw.len(),
        records.len()
    );

    Ok(MutationTable {
        extra_columns,
        records,
    })
}

fn parse_optional_f64(value: &str) -> std::result::Result<Option<f64>, String> {
    if value.is_empty() || value.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    value
        .parse::<f64>()
        .map(Some)
        .map_err(|e| format!("`{value}`: {e}"))
}

fn malformed(path: &Path, line: u64, msg: String) -> RunControlError {
    RunControlError::MalformedRecord {
        path: path.to_path_buf(),
        line,
        msg,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/mutations.rs"]
mod tests;
