//! Indexer configuration.
//!
//! Built from command-line flags; every field has a default so a bare
//! `ablidx index src` works.

use std::path::{Path, PathBuf};

use abl_ir::Schema;
use abl_parse::DEFAULT_MAX_BLOCK_CHARS;

use crate::error::{Error, Result};

/// Source extensions indexed by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &["p", "w", "i", "cls", "t"];

/// How command results are printed.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    fn parse(value: &str) -> Result<Self> {
        match value {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(Error::invalid(format!(
                "unknown format '{other}' (expected text or json)"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexConfig {
    /// Directories searched for RUN targets and go-to-definition by file
    /// name, in order.
    pub propath: Vec<PathBuf>,
    /// Extensions (without the dot) of files picked up from directories.
    pub extensions: Vec<String>,
    /// Limit for the `IS_TOO_LONG` facet, in bytes of block text.
    pub max_block_chars: u32,
    pub format: OutputFormat,
    /// JSON schema dump to load.
    pub schema: Option<PathBuf>,
    /// Worker threads for parallel indexing; `None` uses one per core.
    pub jobs: Option<usize>,
    /// Extra files or directories indexed next to the file a `complete`
    /// or `goto` request is about.
    pub roots: Vec<PathBuf>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            propath: vec![PathBuf::from(".")],
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_owned()).collect(),
            max_block_chars: DEFAULT_MAX_BLOCK_CHARS,
            format: OutputFormat::Text,
            schema: None,
            jobs: None,
            roots: Vec::new(),
        }
    }
}

impl IndexConfig {
    #[must_use]
    pub fn with_propath(mut self, propath: Vec<PathBuf>) -> Self {
        self.propath = propath;
        self
    }

    #[must_use]
    pub fn with_max_block_chars(mut self, max_block_chars: u32) -> Self {
        self.max_block_chars = max_block_chars;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<PathBuf>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Worker threads for parallel indexing; `0` means one per core.
    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = (jobs > 0).then_some(jobs);
        self
    }

    #[must_use]
    pub fn with_roots(mut self, roots: Vec<PathBuf>) -> Self {
        self.roots = roots;
        self
    }

    /// Extensions are stored lowercased and without a leading dot.
    #[must_use]
    pub fn with_extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.extensions = extensions
            .iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        self
    }

    /// Split `args` into configuration flags and positional arguments.
    ///
    /// Flags take the `--name=value` form and may appear anywhere.
    pub fn from_args(args: &[String]) -> Result<(Self, Vec<String>)> {
        let mut config = IndexConfig::default();
        let mut positional = Vec::new();
        for arg in args {
            if arg.starts_with("--") {
                config = config.apply_flag(arg)?;
            } else {
                positional.push(arg.clone());
            }
        }
        Ok((config, positional))
    }

    fn apply_flag(self, arg: &str) -> Result<Self> {
        Ok(if let Some(value) = arg.strip_prefix("--propath=") {
            self.with_propath(split_paths(value))
        } else if let Some(value) = arg.strip_prefix("--extensions=") {
            self.with_extensions(value.split(',').collect::<Vec<_>>().as_slice())
        } else if let Some(value) = arg.strip_prefix("--max-block=") {
            self.with_max_block_chars(parse_number(arg, value)?)
        } else if let Some(value) = arg.strip_prefix("--format=") {
            self.with_format(OutputFormat::parse(value)?)
        } else if let Some(value) = arg.strip_prefix("--schema=") {
            self.with_schema(value)
        } else if let Some(value) = arg.strip_prefix("--jobs=") {
            self.with_jobs(parse_number(arg, value)?)
        } else if let Some(value) = arg.strip_prefix("--index=") {
            self.with_roots(split_paths(value))
        } else if arg == "--json" {
            self.with_format(OutputFormat::Json)
        } else {
            return Err(Error::invalid(format!("unknown option '{arg}'")));
        })
    }

    /// Whether `path` carries one of the indexed extensions.
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    /// Load the schema dump, or an empty schema when none is configured.
    pub fn load_schema(&self) -> Result<Schema> {
        let Some(path) = &self.schema else {
            return Ok(Schema::default());
        };
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(serde_json::from_str(&text)?)
    }
}

fn split_paths(value: &str) -> Vec<PathBuf> {
    value
        .split([',', ';'])
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn parse_number<T: std::str::FromStr>(arg: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::invalid(format!("'{arg}' expects a number")))
}
