use std::collections::BTreeMap;

use crate::model::nucleotide::Nucleotide;

/// Frequencies observed at one position. `None` means the channel was not
/// reported at all, which is distinct from a frequency of zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WideRow {
    pub channels: [Option<f64>; 4],
    pub extra: BTreeMap<char, f64>,
}

impl WideRow {
    pub fn get(&self, nt: Nucleotide) -> Option<f64> {
        self.channels[nt.index()]
    }

    /// Number of non-missing cells, extra codes included.
    pub fn present_cells(&self) -> usize {
        self.channels.iter().filter(|v| v.is_some()).count() + self.extra.len()
    }

    pub fn add(&mut self, code: char, freq: f64) {
        let slot = match Nucleotide::from_code(code) {
            Some(nt) => &mut self.channels[nt.index()],
            None => {
                *self.extra.entry(code).or_insert(0.0) += freq;
                return;
            }
        };
        *slot = Some(slot.unwrap_or(0.0) + freq);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WideTable {
    pub rows: BTreeMap<i64, WideRow>,
}

impl WideTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, pos: i64) -> Option<&WideRow> {
        self.rows.get(&pos)
    }

    /// Extra (non-ACGT) codes seen anywhere in the table, sorted.
    pub fn extra_codes(&self) -> Vec<char> {
        let mut codes = std::collections::BTreeSet::new();
        for row in self.rows.values() {
            codes.extend(row.extra.keys().copied());
        }
        codes.into_iter().collect()
    }

    pub fn restrict_to<F>(&self, mut keep: F) -> WideTable
    where
        F: FnMut(i64) -> bool,
    {
        WideTable {
            rows: self
                .rows
                .iter()
                .filter(|(pos, _)| keep(**pos))
                .map(|(pos, row)| (*pos, row.clone()))
                .collect(),
        }
    }
}
