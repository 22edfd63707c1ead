//! Shared test utilities for integration tests.
//!
//! Import from integration test files as:
//! ```ignore
//! mod common;
//! ```

use std::path::PathBuf;
use tempfile::TempDir;

/// Initialize tracing for tests, respecting RUST_LOG env var.
///
/// Safe to call multiple times; subsequent calls are no-ops.
#[allow(dead_code)]
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

#[allow(dead_code)]
pub const TEXT_FEED: &str = r#"[
  {"name": "Genesis", "chapters": [
    {"chapter": 1, "verses": [
      {"verse": 1, "text": "In the beginning God created the heaven and the earth."},
      {"verse": 2, "text": "And the earth was without form, and void."},
      {"verse": 3, "text": "And God said, Let there be light: and there was light."}
    ]}
  ]},
  {"name": "Psalms", "chapters": [
    {"chapter": 33, "verses": [
      {"verse": 6, "text": "By the word of the LORD were the heavens made."}
    ]}
  ]},
  {"name": "John", "chapters": [
    {"chapter": 1, "verses": [
      {"verse": 1, "text": "In the beginning was the Word."},
      {"verse": 5, "text": "And the light shineth in darkness."}
    ]}
  ]},
  {"name": "Matthew", "chapters": [
    {"chapter": 1, "verses": [
      {"verse": 1, "text": "The book of the generation of Jesus Christ."}
    ]}
  ]}
]"#;

#[allow(dead_code)]
pub const LINK_FEED: &str = r#"[
  {"source": "Gen.1.1", "target": "John.1.1", "weight": 2},
  {"source": "Gen.1.1", "target": "Ps.33.6"},
  {"source": "Gen.1.2", "target": "John.1.5"},
  {"source": "Gen.1.3", "target": "Matt.1.1"},
  {"source": "Gen.1.3", "target": "2Cor.4.6"},
  {"source": "John.1.1", "target": "Gen.1.1"}
]"#;

/// Write the text and link feeds plus an `xref.toml` that names them by relative path.
///
/// Returns the path to the config file.
#[allow(dead_code)]
pub fn create_test_feeds(
    temp_dir: &TempDir,
    text: &str,
    links: &str,
    extra_config: &str,
) -> PathBuf {
    let data_dir = temp_dir.path().join("data");
    std::fs::create_dir(&data_dir).unwrap();
    std::fs::write(data_dir.join("text.json"), text).unwrap();
    std::fs::write(data_dir.join("links.json"), links).unwrap();

    let config_path = temp_dir.path().join("xref.toml");
    let config = format!(
        "text_corpus = \"data/text.json\"\nlink_corpus = \"data/links.json\"\n{extra_config}\n"
    );
    std::fs::write(&config_path, config).unwrap();
    config_path
}
