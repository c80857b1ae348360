pub mod nucleotide;
pub mod population;
pub mod records;
pub mod reference;
pub mod thresholds;
pub mod wide;

#[cfg(test)]
#[path = "../../tests/src_inline/model/tests.rs"]
mod tests;
