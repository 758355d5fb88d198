//! Vector index and knowledge base ingestion

pub mod csv_loader;
mod in_memory;

pub use csv_loader::{read_facts, read_facts_from_reader};
pub use in_memory::InMemoryVectorIndex;
