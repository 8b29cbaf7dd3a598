//! Post-pass resolution.
//!
//! Runs after a file has been parsed and only ever adds the post-pass
//! facets of [`ParseFlags`]:
//!
//! - `MISSING_DB_NAME`: a buffer or `LIKE` table resolves in the schema but
//!   was written without its database qualifier.
//! - `NOT_FOUND`: a RUN target that names a file no resolver can find.
//! - `IS_TOO_LONG`: the block body of a procedure, function, or trigger is
//!   longer than the configured limit.

use abl_ir::{ItemKind, ParseFlags, Schema};
use tracing::debug;

use crate::output::ParseOutput;

/// Limit for `IS_TOO_LONG`, in bytes of block text.
pub const DEFAULT_MAX_BLOCK_CHARS: u32 = 32_000;

/// File extensions that mark a RUN target as a file rather than an
/// internal procedure.
const FILE_EXTENSIONS: &[&str] = &["p", "w", "r", "i", "cls", "t"];

/// Answers whether a file referenced by source exists.
pub trait FileResolver {
    /// `path` is as written in source, e.g. `util/lib.p`.
    fn exists(&self, path: &str) -> bool;
}

impl<F: Fn(&str) -> bool> FileResolver for F {
    fn exists(&self, path: &str) -> bool {
        self(path)
    }
}

/// Inputs of the post-pass.
#[derive(Clone, Copy)]
pub struct ResolveEnv<'a> {
    pub schema: &'a Schema,
    /// Without a resolver, `NOT_FOUND` is never set.
    pub files: Option<&'a dyn FileResolver>,
    pub max_block_chars: u32,
}

impl<'a> ResolveEnv<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        ResolveEnv {
            schema,
            files: None,
            max_block_chars: DEFAULT_MAX_BLOCK_CHARS,
        }
    }

    #[must_use]
    pub fn with_files(mut self, files: &'a dyn FileResolver) -> Self {
        self.files = Some(files);
        self
    }

    #[must_use]
    pub fn with_max_block_chars(mut self, max: u32) -> Self {
        self.max_block_chars = max;
        self
    }
}

/// Whether a RUN target names a file.
pub fn is_file_target(target: &str) -> bool {
    target
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| {
            !stem.is_empty() && FILE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext))
        })
}

/// Apply every post-pass check to `output`.
#[tracing::instrument(level = "debug", skip_all, fields(file = output.file.as_str()))]
pub fn resolve(output: &mut ParseOutput, env: &ResolveEnv<'_>) {
    let mut flagged = 0usize;

    let internal: Vec<String> = output
        .items
        .iter()
        .filter(|i| matches!(i.kind, ItemKind::Procedure { .. }))
        .map(|i| i.name.to_ascii_lowercase())
        .collect();

    let mut additions = vec![ParseFlags::empty(); output.items.len()];

    for (idx, item) in output.items.iter().enumerate() {
        let table = match &item.kind {
            ItemKind::Buffer {
                table,
                temp_table: false,
            } => Some(table.as_str()),
            ItemKind::TempTable { like: Some(like) } => Some(like.as_str()),
            _ => None,
        };
        if let Some(table) = table {
            if missing_db_name(env.schema, table) {
                additions[idx] |= ParseFlags::MISSING_DB_NAME;
            }
        }

        if let (ItemKind::Run { target }, Some(files)) = (&item.kind, env.files) {
            let unresolved = !item.flags.contains(ParseFlags::UNCERTAIN)
                && is_file_target(target)
                && !internal.contains(&target.to_ascii_lowercase())
                && !files.exists(target);
            if unresolved {
                additions[idx] |= ParseFlags::NOT_FOUND;
            }
        }
    }

    for region in &output.regions {
        if region.len() <= env.max_block_chars {
            continue;
        }
        if let Some(id) = region.scope.item() {
            if let Some(slot) = additions.get_mut(id.index()) {
                *slot |= ParseFlags::IS_TOO_LONG;
            }
        }
    }

    for (item, add) in output.items.iter_mut().zip(additions) {
        if !add.is_empty() {
            flagged += 1;
            item.add_post_pass_flags(add);
        }
    }
    debug!(flagged, "post-pass done");
}

/// An unqualified name that the schema resolves.
fn missing_db_name(schema: &Schema, table: &str) -> bool {
    !table.is_empty() && !table.contains('.') && schema.find_table(table).is_some()
}
