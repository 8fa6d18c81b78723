pub mod config;
pub mod serde;
pub mod stats;
pub mod token;

use std::{fs, path::Path};

use indexmap::IndexMap;
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::{
    engine::{
        config::EngineConfig,
        serde::{read_from, write_atomic, EngineData, ExportFormat},
        stats::FrequencyStats,
        token::FrequencyTable,
    },
    error::{FrequencyError, Result},
    utils::{normalizer, sort::top_k_by_frequency},
};

/// Word frequency engine.
///
/// Keeps one [`FrequencyTable`] per source and answers queries over the
/// sum of all of them.
///
/// Mutation goes through `&mut self`; share across threads by giving each
/// worker its own engine and combining them with [`FrequencyEngine::merge`].
#[derive(Debug, Clone)]
pub struct FrequencyEngine {
    config: EngineConfig,
    /// source -> table
    pub(crate) sources: IndexMap<String, FrequencyTable>,
}

impl Default for FrequencyEngine {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            sources: IndexMap::new(),
        }
    }
}

impl FrequencyEngine {
    /// Engine with the given threshold and the default encodings.
    pub fn new(min_word_length: usize) -> Result<Self> {
        Self::with_config(EngineConfig::new().with_min_word_length(min_word_length))
    }

    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            sources: IndexMap::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn min_word_length(&self) -> usize {
        self.config.min_word_length
    }
}

/// text pipeline
impl FrequencyEngine {
    /// See [`normalizer::normalize`].
    pub fn normalize(&self, text: &str) -> String {
        normalizer::normalize(text)
    }

    /// Whitespace split, dropping tokens shorter than `min_word_length`.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        normalizer::tokenize(text, self.config.min_word_length)
    }

    pub fn count_frequencies<T>(&self, tokens: &[T]) -> FrequencyTable
    where
        T: AsRef<str>,
    {
        let mut table = FrequencyTable::new();
        table.add_tokens(tokens);
        table
    }

    /// normalize -> tokenize -> count
    ///
    /// # Examples
    /// ```
    /// use word_frequency_engine::FrequencyEngine;
    /// let engine = FrequencyEngine::new(3).unwrap();
    /// let table = engine.analyze("Python is powerful and Python is fun to learn");
    /// assert_eq!(table.count("python"), 2);
    /// assert!(!table.contains("is"));
    /// ```
    pub fn analyze(&self, text: &str) -> FrequencyTable {
        let normalized = self.normalize(text);
        let tokens = self.tokenize(&normalized);
        self.count_frequencies(&tokens)
    }
}

/// ingestion
impl FrequencyEngine {
    /// Stores `analyze(text)` under `source`, replacing any previous table.
    pub fn ingest(&mut self, source: impl Into<String>, text: &str) -> &FrequencyTable {
        let table = self.analyze(text);
        self.insert_table(source.into(), table)
    }

    /// Reads and decodes `path`, then ingests it with the path as source.
    /// The path must be valid UTF-8. On failure nothing is stored.
    pub fn ingest_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&FrequencyTable> {
        let path = path.as_ref();
        let source = source_id(path)?;
        let text = self.read_text(path)?;
        let table = self.analyze(&text);
        Ok(self.insert_table(source, table))
    }

    /// Reads, decodes and analyzes every file in parallel, then stores the
    /// tables in input order.
    ///
    /// All or nothing: if any file fails, the first failure in input order
    /// is returned and none of the batch is stored.
    pub fn ingest_files<P>(&mut self, paths: &[P]) -> Result<usize>
    where
        P: AsRef<Path> + Sync,
    {
        info!("ingesting {} files (threads={})", paths.len(), rayon::current_num_threads());
        let results: Vec<Result<(String, FrequencyTable)>> = paths
            .par_iter()
            .map(|path| -> Result<(String, FrequencyTable)> {
                let path = path.as_ref();
                let source = source_id(path)?;
                let text = self.read_text(path)?;
                Ok((source, self.analyze(&text)))
            })
            .collect();
        let analyzed = results.into_iter().collect::<Result<Vec<_>>>()?;

        let added = analyzed.len();
        for (source, table) in analyzed {
            self.insert_table(source, table);
        }
        Ok(added)
    }

    /// Moves every source of `other` into `self`. Same-named sources are
    /// replaced, as with [`FrequencyEngine::ingest`].
    pub fn merge(&mut self, other: FrequencyEngine) -> &mut Self {
        for (source, table) in other.sources {
            self.insert_table(source, table);
        }
        self
    }

    pub fn remove_source(&mut self, source: &str) -> Option<FrequencyTable> {
        self.sources.shift_remove(source)
    }

    pub fn clear(&mut self) {
        self.sources.clear();
    }

    fn insert_table(&mut self, source: String, table: FrequencyTable) -> &FrequencyTable {
        debug!(
            "analyzed {}: tokens={} vocab={}",
            source,
            table.total_count(),
            table.len()
        );
        let (index, _) = self.sources.insert_full(source, table);
        &self.sources[index]
    }

    /// Tries each configured encoding in order.
    fn read_text(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).map_err(|source| FrequencyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        for (i, encoding) in self.config.encodings.iter().enumerate() {
            if let Some(text) = encoding.decode(&bytes) {
                if i > 0 {
                    warn!("{}: decoded with fallback encoding {}", path.display(), encoding);
                }
                return Ok(text);
            }
            debug!("{}: not valid {}", path.display(), encoding);
        }
        warn!("{}: no configured encoding could decode the file", path.display());
        Err(FrequencyError::Decode {
            path: path.to_path_buf(),
            attempted: self.config.encodings.clone(),
        })
    }
}

/// queries
impl FrequencyEngine {
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn contains_source(&self, source: &str) -> bool {
        self.sources.contains_key(source)
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    pub fn table(&self, source: &str) -> Option<&FrequencyTable> {
        self.sources.get(source)
    }

    /// Per-word sum over every source.
    pub fn aggregate(&self) -> FrequencyTable {
        let mut combined = FrequencyTable::new();
        for table in self.sources.values() {
            combined.merge(table);
        }
        combined
    }

    /// The `n` most frequent words across all sources.
    /// Ordered by count descending, ties by word ascending.
    pub fn top_n(&self, n: usize) -> Vec<(String, u64)> {
        let combined = self.aggregate();
        let entries: Vec<(String, u64)> = combined
            .iter()
            .map(|(word, &count)| (word.to_string(), count))
            .collect();
        top_k_by_frequency(entries, n)
    }

    /// min / max / mean over the aggregated counts; zeros when there are
    /// no words at all.
    pub fn statistics(&self) -> FrequencyStats {
        FrequencyStats::from_counts(self.aggregate().counts())
    }
}

/// export / import
impl FrequencyEngine {
    /// Writes the store as pretty printed JSON.
    pub fn export<P: AsRef<Path>>(&self, destination: P) -> Result<()> {
        self.export_as(destination, ExportFormat::Json)
    }

    pub fn export_as<P: AsRef<Path>>(&self, destination: P, format: ExportFormat) -> Result<()> {
        let destination = destination.as_ref();
        write_atomic(destination, &EngineData::from(self), format)?;
        info!(
            "exported {} sources to {} ({})",
            self.sources.len(),
            destination.display(),
            format
        );
        Ok(())
    }

    /// Reads a JSON export into an engine with the default config.
    pub fn import<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::import_as(path, ExportFormat::Json, EngineConfig::default())
    }

    pub fn import_as<P: AsRef<Path>>(path: P, format: ExportFormat, config: EngineConfig) -> Result<Self> {
        let path = path.as_ref();
        let engine = read_from(path, format)?.into_engine(config)?;
        info!("imported {} sources from {}", engine.len(), path.display());
        Ok(engine)
    }
}

/// The path as given. Non UTF-8 paths are rejected so distinct files never
/// share a lossy key.
fn source_id(path: &Path) -> Result<String> {
    path.to_str()
        .map(str::to_owned)
        .ok_or_else(|| FrequencyError::NonUtf8Path(path.to_path_buf()))
}
