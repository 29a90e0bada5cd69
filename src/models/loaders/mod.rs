pub mod json_loader;

pub use json_loader::{load_vocab_entries, write_defined_entries};
