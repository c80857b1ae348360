use std::collections::BTreeMap;

use crate::model::nucleotide::Nucleotide;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChannelStats {
    pub mean: Option<f64>,
    pub std: Option<f64>,
}

/// Per-channel population statistics at one position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReferenceSite {
    pub channels: [ChannelStats; 4],
}

impl ReferenceSite {
    pub fn get(&self, nt: Nucleotide) -> ChannelStats {
        self.channels[nt.index()]
    }

    pub fn means(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.channels.iter().map(|c| c.mean)
    }

    pub fn stds(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.channels.iter().map(|c| c.std)
    }
}

/// Variable sites learned from the training population. Built once per run
/// and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceTable {
    pub sites: BTreeMap<i64, ReferenceSite>,
}

impl ReferenceTable {
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn contains(&self, pos: i64) -> bool {
        self.sites.contains_key(&pos)
    }

    pub fn get(&self, pos: i64) -> Option<&ReferenceSite> {
        self.sites.get(&pos)
    }
}
