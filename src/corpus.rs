//! Corpus directories on disk.
//!
//! [`loader`] reads class-per-directory corpora into document groups;
//! [`results`] writes classification outcomes and learned parameters back to
//! an output directory.

pub mod loader;
pub mod results;

pub use loader::{CorpusConfig, CorpusLoader, CorpusSplit, LoadedCorpus, SourceDirectories};
pub use results::{ResultSummary, ResultWriter};
