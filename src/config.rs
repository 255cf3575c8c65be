use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Error, Result};

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub preview: PreviewConfig,
    pub html: HtmlConfig,
    pub typst: TypstConfig,
    pub page: PageConfig,
    pub repurpose: RepurposeConfig,
}

/// Social preview truncation rules.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub x_limit: usize,
    pub instagram_limit: usize,
    pub ellipsis: String,
    /// Characters removed from the markup before truncating.
    pub strip_chars: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            x_limit: 280,
            instagram_limit: 150,
            ellipsis: "...".to_string(),
            strip_chars: "*#-".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    /// Wrap runs of consecutive bullet items in a single list.
    pub group_bullets: bool,
    pub spacer_class: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            group_bullets: true,
            spacer_class: "spacer".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TypstConfig {
    /// Body font family. Must be one the compiler can find.
    pub font: Option<String>,
    pub bold_table_header: bool,
}

impl Default for TypstConfig {
    fn default() -> Self {
        Self {
            font: None,
            bold_table_header: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct PageConfig {
    pub numbers: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RepurposeConfig {
    /// Characters of source content quoted in a repurpose prompt.
    pub source_limit: usize,
}

impl Default for RepurposeConfig {
    fn default() -> Self {
        Self { source_limit: 800 }
    }
}

impl Config {
    /// The defaults shipped in `default_config.toml`, checked by the build script.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return compiled defaults if it doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::compiled_default());
            }
            Err(e) => return Err(Error::io(path, e)),
        };

        toml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
