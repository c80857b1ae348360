pub mod mutations;
pub mod reader;
pub mod training;

pub use mutations::load_mutations;
pub use training::list_training_files;
