//! Configuration management for SHM.
//!
//! Loads configuration from ${SHM_HOME}/config.toml with sensible defaults.
//! Field values are read once at startup and written once at shutdown.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::string::FromUtf8Error;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use toml_edit::{DocumentMut, Item, Table, value};

use crate::output;

/// Markup layout produced by the renderer.
///
/// Written in lowercase; read with the same case-insensitive rules as
/// [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Layout {
    /// Single-form layout: `_shine` name suffix, two animation tables,
    /// trailing `legacy_lazy_load = no`, repeat count honoured.
    #[default]
    Classic,
    /// Tabbed-form layout: one animation table, braces on their own lines.
    Tabbed,
}

impl Layout {
    pub fn display_name(self) -> &'static str {
        match self {
            Layout::Classic => "classic",
            Layout::Tabbed => "tabbed",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Layout::Classic),
            "tabbed" => Ok(Layout::Tabbed),
            other => Err(format!(
                "unknown layout '{other}' (expected 'classic' or 'tabbed')"
            )),
        }
    }
}

impl TryFrom<String> for Layout {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

pub mod paths {
    //! Path resolution for SHM configuration and data directories.
    //!
    //! SHM_HOME resolution order:
    //! 1. SHM_HOME environment variable (if set)
    //! 2. <platform config dir>/shm
    //! 3. ./.shm when no config dir can be determined

    use std::env;
    use std::path::PathBuf;

    /// Returns the SHM home directory.
    pub fn shm_home() -> PathBuf {
        if let Ok(home) = env::var("SHM_HOME") {
            return PathBuf::from(home);
        }

        dirs::config_dir().map_or_else(|| PathBuf::from(".shm"), |dir| dir.join("shm"))
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        shm_home().join("config.toml")
    }

    /// Returns the directory holding log files.
    pub fn logs_dir() -> PathBuf {
        shm_home().join("logs")
    }
}

/// Editor preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Markup layout.
    pub layout: Layout,
    /// Whether syntax highlighting starts enabled.
    pub highlight: bool,
    /// Wrap width for visual line numbering; `None` numbers logical lines.
    pub wrap_width: Option<u16>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            layout: Layout::Classic,
            highlight: true,
            wrap_width: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Editor preferences.
    pub editor: EditorConfig,

    /// Last-used field values keyed by field label (without trailing colon).
    pub fields: BTreeMap<String, String>,
}

/// Text of a freshly initialized config file.
const TEMPLATE: &str = include_str!("../default_config.toml");

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Reads the config at `path`.
    ///
    /// A missing file yields defaults. So does a file that is not UTF-8 or
    /// does not parse, after a logged warning; only an unreadable file is an
    /// error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let parsed = match read_if_exists(path)? {
            None => return Ok(Config::default()),
            Some(Ok(text)) => toml::from_str::<Config>(&text).map_err(|err| err.to_string()),
            Some(Err(err)) => Err(err.to_string()),
        };

        Ok(parsed.unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), %err, "config_corrupt_using_defaults");
            Config::default()
        }))
    }

    /// Stores field values in the default config file.
    pub fn save_fields(values: &BTreeMap<String, String>) -> Result<()> {
        Self::save_fields_to(&paths::config_path(), values)
    }

    /// Rewrites the `[fields]` table of the config at `path`.
    ///
    /// The rest of the document, comments included, is left as the user
    /// wrote it. A missing or unparsable file starts over from the template.
    pub fn save_fields_to(path: &Path, values: &BTreeMap<String, String>) -> Result<()> {
        let parsed = match read_if_exists(path)? {
            None => Ok(template_document()),
            Some(Ok(text)) => text.parse::<DocumentMut>().map_err(|err| err.to_string()),
            Some(Err(err)) => Err(err.to_string()),
        };
        let mut doc = parsed.unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), %err, "config_corrupt_rewriting");
            template_document()
        });

        let fields = doc
            .entry("fields")
            .or_insert_with(|| Item::Table(Table::new()));
        let Some(fields) = fields.as_table_like_mut() else {
            anyhow::bail!("'fields' in {} is not a table", path.display());
        };
        for (key, val) in values {
            fields.insert(key, value(val.as_str()));
        }

        write_file(path, &doc.to_string())
    }

    /// Writes the commented template to `path`, refusing to overwrite.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }
        write_file(path, TEMPLATE)
    }
}

fn template_document() -> DocumentMut {
    TEMPLATE.parse().unwrap_or_default()
}

/// Reads the file at `path`, or `None` when it does not exist.
///
/// Bytes that are not UTF-8 come back as the inner error so callers can
/// treat them like any other corrupt content.
fn read_if_exists(path: &Path) -> Result<Option<Result<String, FromUtf8Error>>> {
    if !path.exists() {
        return Ok(None);
    }
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read config from {}", path.display()))?;
    Ok(Some(String::from_utf8(bytes)))
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }
    output::write_atomic(path, content)
        .with_context(|| format!("Failed to save config to {}", path.display()))
}
