//! Read-only views over the document tree.

pub mod collect;
pub mod lexical;

pub use collect::{collect, CollectedPhrase, CollectedSentence};
pub use lexical::LexicalStats;
