pub mod loaders;
pub mod vocab;

pub use loaders::{load_vocab_entries, write_defined_entries};
pub use vocab::{DefinedEntry, DefinitionMap, VocabEntry};
