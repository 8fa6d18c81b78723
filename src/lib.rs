/// This crate is a Word Frequency Analysis Engine.
pub mod engine;
pub mod error;
pub mod utils;

/// Word Frequency Engine
/// The top-level struct of this crate.
/// It normalizes and tokenizes text, keeps one word-count table per source
/// (a file path or any logical name), and answers queries over the sum of
/// all sources.
///
/// Internally, it holds:
/// - The engine configuration (minimum word length, encoding chain)
/// - An insertion-ordered map of source -> `FrequencyTable`
///
/// # Ingestion
/// - `ingest(source, text)` stores the analysis of a string, replacing any
///   previous table for that source
/// - `ingest_file(path)` decodes a file with the configured encodings, tried
///   in order
/// - `ingest_files(paths)` does the same for a batch, reading in parallel
///
/// # Queries
/// `top_n` and `statistics` work on the per-word sum over all sources.
/// Ties in `top_n` are ordered by word ascending.
///
/// # Serialization
/// `export` writes `{ source: { word: count } }` as JSON; `import` reads it
/// back. CBOR is available through `export_as` / `import_as`.
pub use engine::FrequencyEngine;

/// Frequency Table
/// word -> count map for one source, in first-occurrence order.
/// Every stored count is at least 1.
pub use engine::token::FrequencyTable;

/// Engine Configuration
/// `min_word_length` (default 2, must be >= 1) and the ordered list of
/// encodings tried by file ingestion (default UTF-8 then Latin-1).
pub use engine::config::EngineConfig;

/// Statistics over aggregated counts: min, max, and mean rounded to
/// 2 decimals. All zeros when the engine holds no words.
pub use engine::stats::FrequencyStats;

/// Export formats and the serializable engine snapshot.
pub use engine::serde::{EngineData, ExportFormat};

/// Character encodings for file ingestion.
pub use utils::encoding::Encoding;

pub use error::{FrequencyError, Result};
