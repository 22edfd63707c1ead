use serde::{Deserialize, Serialize};
use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};

use crate::{query::Mode, ScriptureError};

/// Where the feeds live and how queries default.
///
/// ```toml
/// text_corpus = "data/kjv.json"
/// link_corpus = "data/cross_references.json"
/// default_mode = "verse"
/// strict_names = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptureConfig {
    pub text_corpus: PathBuf,
    pub link_corpus: PathBuf,
    #[serde(default)]
    pub default_mode: Mode,
    /// Fail corpus loading when a book name misses the alias tables.
    #[serde(default)]
    pub strict_names: bool,
}

impl ScriptureConfig {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(text_corpus: P, link_corpus: Q) -> Self {
        ScriptureConfig {
            text_corpus: text_corpus.into(),
            link_corpus: link_corpus.into(),
            default_mode: Mode::default(),
            strict_names: false,
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ScriptureError> {
        Ok(toml::from_str(content)?)
    }

    /// Read a config file. Relative corpus paths are resolved against the file's directory.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ScriptureError> {
        let path = path.as_ref();
        tracing::debug!("Reading config from: {:?}", path);
        if !path.exists() {
            return Err(ScriptureError::Config(format!(
                "config file {} not found",
                path.display()
            )));
        }
        let mut config = ScriptureConfig::from_toml_str(&read_to_string(path)?)?;
        if let Some(base) = path.parent() {
            config.text_corpus = resolve_against(base, &config.text_corpus);
            config.link_corpus = resolve_against(base, &config.link_corpus);
        }
        Ok(config)
    }
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
