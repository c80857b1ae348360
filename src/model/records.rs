/// One normalized row of a mutation-frequency table.
///
/// `extra` is aligned with [`MutationTable::extra_columns`].
#[derive(Debug, Clone, PartialEq)]
pub struct MutationRecord {
    pub pos: i64,
    pub mutation: char,
    pub freq: f64,
    pub extra: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutationTable {
    pub extra_columns: Vec<String>,
    pub records: Vec<MutationRecord>,
}
