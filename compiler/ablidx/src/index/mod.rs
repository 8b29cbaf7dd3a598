//! Project-wide index of parsed files.
//!
//! Each file is parsed and resolved on its own; the finished
//! [`ParseOutput`] is then published into a map guarded by a
//! `parking_lot::RwLock`, replacing that file's previous output wholesale.
//! Readers take an `Arc` snapshot and never observe a half-built output.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use abl_complete::{Caret, CompletionItem, Projection};
use abl_ir::{Locator, Schema, ScopeRef};
use abl_parse::{resolve, ParseOutput, ResolveEnv};
use parking_lot::RwLock;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

use crate::config::IndexConfig;
use crate::error::{Error, Result};

pub struct ProjectIndex {
    config: IndexConfig,
    schema: Schema,
    files: RwLock<FxHashMap<String, Arc<ParseOutput>>>,
}

impl ProjectIndex {
    pub fn new(config: IndexConfig, schema: Schema) -> Self {
        ProjectIndex {
            config,
            schema,
            files: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }

    pub fn get(&self, file: &str) -> Option<Arc<ParseOutput>> {
        self.files.read().get(file).cloned()
    }

    /// Indexed file identifiers, sorted.
    pub fn files(&self) -> Vec<String> {
        let mut files: Vec<_> = self.files.read().keys().cloned().collect();
        files.sort_unstable();
        files
    }

    pub fn remove(&self, file: &str) -> bool {
        self.files.write().remove(file).is_some()
    }

    /// Parse and resolve `source` as `file`, then publish the result.
    #[tracing::instrument(level = "debug", skip(self, source), fields(len = source.len()))]
    pub fn update(&self, file: &str, source: &str) -> Arc<ParseOutput> {
        let mut output = abl_parse::parse(file, source);
        self.resolve(&mut output, &FxHashSet::default());
        let output = Arc::new(output);
        self.files
            .write()
            .insert(file.to_owned(), Arc::clone(&output));
        output
    }

    /// Index every source file under `paths` (files or directories).
    ///
    /// Files are read and parsed in parallel. Resolution runs once every
    /// file has been parsed, so a RUN target is found no matter which file
    /// finished first. Returns the number of files indexed.
    #[tracing::instrument(level = "debug", skip_all, fields(roots = paths.len()))]
    pub fn index_paths(&self, paths: &[PathBuf]) -> Result<usize> {
        let mut sources = Vec::new();
        for path in paths {
            collect_sources(path, &self.config, &mut sources)?;
        }
        sources.sort_unstable();
        sources.dedup();
        let pending: FxHashSet<String> = sources.iter().map(|p| file_key(p)).collect();

        let outputs = self.in_pool(|| -> Result<Vec<ParseOutput>> {
            let mut outputs = sources
                .par_iter()
                .map(|path| {
                    let text = read_text(path)?;
                    Ok(abl_parse::parse(&file_key(path), &text))
                })
                .collect::<Result<Vec<_>>>()?;
            outputs
                .par_iter_mut()
                .for_each(|output| self.resolve(output, &pending));
            Ok(outputs)
        })?;

        let count = outputs.len();
        let mut files = self.files.write();
        for output in outputs {
            files.insert(output.file.clone(), Arc::new(output));
        }
        debug!(count, "indexed");
        Ok(count)
    }

    /// Completion list for `caret`, over every indexed file and the schema.
    ///
    /// Without a caret every symbol of every file is listed.
    pub fn completions(&self, caret: Option<Caret<'_>>) -> Vec<CompletionItem> {
        let snapshot = self.snapshot(caret.map(|c| c.file));
        let mut projection = Projection::new().with_schema(&self.schema);
        for output in &snapshot {
            projection = projection.with_output(output);
        }
        if let Some(caret) = caret {
            projection = projection.at(caret);
        }
        projection.build()
    }

    /// Definition of `word` as seen from `offset` in `file`.
    ///
    /// Searched in order: the file itself, the file-level definitions of
    /// other indexed files, then a file whose path or name matches `word`
    /// (for `RUN util/lib.p` and the like).
    pub fn find_definition(&self, file: &str, word: &str, offset: u32) -> Option<Locator> {
        if let Some(found) = self
            .get(file)
            .and_then(|output| abl_complete::find_definition(&output, word, offset))
        {
            return Some(found);
        }

        for output in self.snapshot(None) {
            if output.file == file {
                continue;
            }
            let found = output
                .items_named(word)
                .find(|(_, item)| item.is_definition() && item.scope == ScopeRef::File);
            if let Some((_, item)) = found {
                return Some(item.locator(&output.file));
            }
        }

        self.find_file(word).map(|file| Locator {
            file,
            line: 1,
            column: 1,
        })
    }

    /// Outputs sorted by file, `first` leading when indexed.
    fn snapshot(&self, first: Option<&str>) -> Vec<Arc<ParseOutput>> {
        let mut outputs: Vec<_> = self.files.read().values().cloned().collect();
        outputs.sort_by(|a, b| {
            let a_first = Some(a.file.as_str()) == first;
            let b_first = Some(b.file.as_str()) == first;
            b_first.cmp(&a_first).then_with(|| a.file.cmp(&b.file))
        });
        outputs
    }

    fn resolve(&self, output: &mut ParseOutput, pending: &FxHashSet<String>) {
        let exists = |target: &str| self.target_exists(target, pending);
        let env = ResolveEnv::new(&self.schema)
            .with_files(&exists)
            .with_max_block_chars(self.config.max_block_chars);
        resolve(output, &env);
    }

    fn target_exists(&self, target: &str, pending: &FxHashSet<String>) -> bool {
        let wanted = target.replace('\\', "/");
        if pending.iter().any(|key| key_matches(key, &wanted))
            || self.files.read().keys().any(|key| key_matches(key, &wanted))
        {
            return true;
        }
        self.config
            .propath
            .iter()
            .any(|dir| dir.join(&wanted).is_file())
    }

    /// An indexed file or propath file named by `word`.
    fn find_file(&self, word: &str) -> Option<String> {
        let wanted = word.replace('\\', "/");
        let indexed = self.files();
        if let Some(key) = indexed.iter().find(|key| key_matches(key, &wanted)) {
            return Some(key.clone());
        }
        if let Some(key) = indexed.iter().find(|key| stem_matches(key, &wanted)) {
            return Some(key.clone());
        }
        self.config
            .propath
            .iter()
            .map(|dir| dir.join(&wanted))
            .find(|path| path.is_file())
            .map(|path| file_key(&path))
    }

    fn in_pool<R: Send>(&self, work: impl FnOnce() -> R + Send) -> R {
        let Some(jobs) = self.config.jobs else {
            return work();
        };
        match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
            Ok(pool) => pool.install(work),
            Err(e) => {
                warn!("failed to create thread pool ({e}), using the global pool");
                work()
            }
        }
    }
}

/// Read a source file. Bytes that are not UTF-8 (legacy code pages) are
/// replaced with U+FFFD rather than failing the whole file.
pub(crate) fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            debug!(path = %path.display(), "source is not UTF-8, decoding lossily");
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

/// Identifier a file is indexed under: its path with `/` separators.
pub fn file_key(path: &Path) -> String {
    let key = path.to_string_lossy().replace('\\', "/");
    match key.strip_prefix("./") {
        Some(rest) => rest.to_owned(),
        None => key,
    }
}

/// `key` is `wanted`, or ends with `/wanted`, ignoring ASCII case.
fn key_matches(key: &str, wanted: &str) -> bool {
    let key = key.to_ascii_lowercase();
    let wanted = wanted.to_ascii_lowercase();
    key == wanted || key.ends_with(&format!("/{wanted}"))
}

fn stem_matches(key: &str, wanted: &str) -> bool {
    Path::new(key)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.eq_ignore_ascii_case(wanted))
}

fn collect_sources(path: &Path, config: &IndexConfig, out: &mut Vec<PathBuf>) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| Error::io(path, e))?;
    if metadata.is_file() {
        out.push(path.to_path_buf());
        return Ok(());
    }

    let entries = std::fs::read_dir(path).map_err(|e| Error::io(path, e))?;
    for entry in entries.flatten() {
        let child = entry.path();
        let hidden = child
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with('.'));
        if hidden {
            continue;
        }
        if child.is_dir() {
            collect_sources(&child, config, out)?;
        } else if config.is_source_file(&child) {
            out.push(child);
        }
    }
    Ok(())
}
