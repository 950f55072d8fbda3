//! Domain ports
//!
//! Trait seams between the core and its adapters and collaborators.

pub mod corpus;
pub mod embedding;
pub mod generation;
pub mod loader;
pub mod vector_index;

pub use corpus::CorpusSource;
pub use embedding::EmbeddingProvider;
pub use generation::AnswerGenerator;
pub use loader::{DocumentLoader, LoadOutcome};
pub use vector_index::{IndexError, VectorIndex};
