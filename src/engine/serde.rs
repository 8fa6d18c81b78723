use std::{
    fmt,
    fs,
    io::Write,
    path::Path,
    str::FromStr,
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::{
    engine::{config::EngineConfig, token::FrequencyTable, FrequencyEngine},
    error::{FrequencyError, Result},
    utils::normalizer::is_token,
};

/// On-disk format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// pretty printed `{ source: { word: count } }`
    #[default]
    Json,
    /// same shape, CBOR encoded
    Cbor,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => f.write_str("json"),
            ExportFormat::Cbor => f.write_str("cbor"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "cbor" => Ok(ExportFormat::Cbor),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

/// FrequencyEngineのシリアライズ用のデータ構造
/// Holds only the `source -> table` store, not the config.
/// `into_engine` rebuilds a `FrequencyEngine` from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngineData {
    pub sources: IndexMap<String, FrequencyTable>,
}

impl EngineData {
    pub fn to_bytes(&self, format: ExportFormat) -> Result<Vec<u8>> {
        Ok(match format {
            ExportFormat::Json => serde_json::to_vec_pretty(self)?,
            ExportFormat::Cbor => serde_cbor::to_vec(self)?,
        })
    }

    pub fn from_bytes(bytes: &[u8], format: ExportFormat) -> Result<Self> {
        Ok(match format {
            ExportFormat::Json => serde_json::from_slice(bytes)?,
            ExportFormat::Cbor => serde_cbor::from_slice(bytes)?,
        })
    }

    /// `EngineData`から`FrequencyEngine`に変換します。
    ///
    /// Every word must be one `config` would have produced: normalized,
    /// free of whitespace and at least `min_word_length` chars long.
    pub fn into_engine(self, config: EngineConfig) -> Result<FrequencyEngine> {
        let mut engine = FrequencyEngine::with_config(config)?;
        let min_len = engine.min_word_length();
        for (source, table) in &self.sources {
            if let Some((word, _)) = table.iter().find(|(word, _)| !is_token(word, min_len)) {
                return Err(FrequencyError::InvalidData(format!(
                    "source {source:?}: {word:?} is not a normalized word of at least {min_len} chars"
                )));
            }
        }
        engine.sources = self.sources;
        Ok(engine)
    }
}

impl From<&FrequencyEngine> for EngineData {
    fn from(engine: &FrequencyEngine) -> Self {
        EngineData {
            sources: engine.sources.clone(),
        }
    }
}

/// Writes `data` next to `path` in a temporary file, then renames it over
/// `path`. The destination is either fully replaced or left untouched.
/// The parent directory must already exist.
pub fn write_atomic(path: &Path, data: &EngineData, format: ExportFormat) -> Result<()> {
    let bytes = data.to_bytes(format)?;
    let export_err = |source: std::io::Error| FrequencyError::Export {
        path: path.to_path_buf(),
        source,
    };

    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut temp_file = NamedTempFile::new_in(parent_dir).map_err(export_err)?;
    temp_file.write_all(&bytes).map_err(export_err)?;
    // temp files are created 0600; keep the destination's mode, or 0644 for a new file
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(path)
            .map(|meta| meta.permissions().mode() & 0o7777)
            .unwrap_or(0o644);
        temp_file
            .as_file()
            .set_permissions(fs::Permissions::from_mode(mode))
            .map_err(export_err)?;
    }
    temp_file.as_file().sync_all().map_err(export_err)?;
    temp_file.persist(path).map_err(|e| export_err(e.error))?;
    Ok(())
}

pub fn read_from(path: &Path, format: ExportFormat) -> Result<EngineData> {
    let bytes = fs::read(path).map_err(|source| FrequencyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    EngineData::from_bytes(&bytes, format)
}
