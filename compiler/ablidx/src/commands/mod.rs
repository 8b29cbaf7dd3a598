//! Command dispatch for the `ablidx` binary.
//!
//! Every command renders into a `String` first and writes it in one go, so
//! a failing command never leaves half an answer on stdout.

use std::io::Write;
use std::path::{Path, PathBuf};

use abl_complete::{filter, Caret};
use abl_lexer::strip_bom;
use serde::Serialize;
use tracing::debug;

use crate::config::{IndexConfig, OutputFormat};
use crate::edit::toggle_comment;
use crate::error::{Error, Result};
use crate::index::{file_key, read_text, ProjectIndex};
use crate::report::{CompletionRow, FileSummary, ItemRow, TokenRow};

pub const USAGE: &str = "\
Usage: ablidx <command> [options]

Commands:
  index <path>...                       Index files and directories, report warnings
  items <file>                          List the symbols parsed from one file
  complete <file> <pos> [prefix]        Completion list at a position
  goto <file> <pos> [word]              Definition of the word at a position
  lex <file>                            Dump tokens
  toggle-comment <file> <first> [last]  Print the file with /* */ toggled on a line range
  help                                  Show this message
  version                               Show the version

Positions are LINE:COLUMN (1-based) or a byte offset.

Options:
  --propath=<dir,...>    Directories searched for RUN targets (default: .)
  --index=<path,...>     Files or directories indexed next to the target file
  --extensions=<ext,...> Source extensions picked up from directories
  --schema=<file.json>   Database schema dump
  --max-block=<n>        Block length that raises IS_TOO_LONG (default: 32000)
  --jobs=<n>             Worker threads for indexing
  --format=text|json     Output format (--json is short for --format=json)
";

/// Run one command line (without the program name), writing to `out`.
pub fn run(args: &[String], out: &mut dyn Write) -> Result<()> {
    let Some((command, rest)) = args.split_first() else {
        return write_out(out, USAGE);
    };
    debug!(command = command.as_str(), "run");

    let text = match command.as_str() {
        "help" | "--help" | "-h" => USAGE.to_owned(),
        "version" | "--version" | "-V" => format!("ablidx {}\n", env!("CARGO_PKG_VERSION")),
        other => {
            let (config, positional) = IndexConfig::from_args(rest)?;
            match other {
                "index" => index(config, &positional)?,
                "items" => items(config, &positional)?,
                "complete" => complete(config, &positional)?,
                "goto" => goto(config, &positional)?,
                "lex" => lex(&config, &positional)?,
                "toggle-comment" => toggle(&config, &positional)?,
                _ => {
                    return Err(Error::invalid(format!(
                        "unknown command '{other}' (run `ablidx help`)"
                    )))
                }
            }
        }
    };
    write_out(out, &text)
}

fn write_out(out: &mut dyn Write, text: &str) -> Result<()> {
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .map_err(Error::Output)
}

fn index(config: IndexConfig, paths: &[String]) -> Result<String> {
    if paths.is_empty() {
        return Err(Error::invalid("usage: ablidx index <path>..."));
    }
    let format = config.format;
    let schema = config.load_schema()?;
    let project = ProjectIndex::new(config, schema);
    let roots: Vec<PathBuf> = paths.iter().map(PathBuf::from).collect();
    project.index_paths(&roots)?;

    let outputs: Vec<_> = project
        .files()
        .iter()
        .filter_map(|file| project.get(file))
        .collect();
    let summaries: Vec<_> = outputs.iter().map(|o| FileSummary::new(o)).collect();
    render(format, &summaries, FileSummary::render)
}

fn items(config: IndexConfig, args: &[String]) -> Result<String> {
    let [path] = args else {
        return Err(Error::invalid("usage: ablidx items <file>"));
    };
    let format = config.format;
    let (key, source) = read_source(Path::new(path))?;
    let project = open_project(config)?;
    let output = project.update(&key, &source);
    let rows: Vec<_> = output
        .items
        .iter()
        .map(|item| ItemRow::new(&output, item))
        .collect();
    render(format, &rows, ItemRow::render)
}

fn complete(config: IndexConfig, args: &[String]) -> Result<String> {
    let (path, position, prefix) = match args {
        [path, position] => (path, position, None),
        [path, position, prefix] => (path, position, Some(prefix.as_str())),
        _ => return Err(Error::invalid("usage: ablidx complete <file> <pos> [prefix]")),
    };
    let format = config.format;
    let (key, source) = read_source(Path::new(path))?;
    let text = strip_bom(&source).0;
    let offset = parse_position(text, position)?;
    let prefix = prefix.unwrap_or_else(|| word_before(text, offset));

    let project = open_project(config)?;
    project.update(&key, &source);
    let items = project.completions(Some(Caret { file: &key, offset }));
    let rows: Vec<_> = filter(&items, prefix)
        .into_iter()
        .map(CompletionRow::new)
        .collect();
    render(format, &rows, CompletionRow::render)
}

fn goto(config: IndexConfig, args: &[String]) -> Result<String> {
    let (path, position, word) = match args {
        [path, position] => (path, position, None),
        [path, position, word] => (path, position, Some(word.as_str())),
        _ => return Err(Error::invalid("usage: ablidx goto <file> <pos> [word]")),
    };
    let format = config.format;
    let (key, source) = read_source(Path::new(path))?;
    let text = strip_bom(&source).0;
    let offset = parse_position(text, position)?;
    let word = word.unwrap_or_else(|| word_at(text, offset));
    if word.is_empty() {
        return Err(Error::invalid(format!("no word at {position}")));
    }

    let project = open_project(config)?;
    project.update(&key, &source);
    let found = project.find_definition(&key, word, offset);
    match format {
        OutputFormat::Json => json(&found),
        OutputFormat::Text => Ok(match found {
            Some(locator) => format!("{locator}\n"),
            None => format!("no definition found for '{word}'\n"),
        }),
    }
}

fn lex(config: &IndexConfig, args: &[String]) -> Result<String> {
    let [path] = args else {
        return Err(Error::invalid("usage: ablidx lex <file>"));
    };
    let (_, source) = read_source(Path::new(path))?;
    let tokens = abl_lexer::lex(&source);
    render(config.format, &TokenRow::all(&tokens), TokenRow::render)
}

fn toggle(config: &IndexConfig, args: &[String]) -> Result<String> {
    let (path, first, last) = match args {
        [path, first] => (path, first, first),
        [path, first, last] => (path, first, last),
        _ => {
            return Err(Error::invalid(
                "usage: ablidx toggle-comment <file> <first> [last]",
            ))
        }
    };
    let first = parse_line(first)?;
    let last = parse_line(last)?;
    if last < first {
        return Err(Error::invalid(format!(
            "line range {first}..{last} is empty"
        )));
    }
    let (_, source) = read_source(Path::new(path))?;
    let result = toggle_comment(&source, first, last);
    match config.format {
        OutputFormat::Json => json(&result),
        OutputFormat::Text => Ok(result.text),
    }
}

/// Project with the schema and the configured extra roots loaded.
fn open_project(config: IndexConfig) -> Result<ProjectIndex> {
    let schema = config.load_schema()?;
    let roots = config.roots.clone();
    let project = ProjectIndex::new(config, schema);
    if !roots.is_empty() {
        project.index_paths(&roots)?;
    }
    Ok(project)
}

fn read_source(path: &Path) -> Result<(String, String)> {
    let source = read_text(path)?;
    Ok((file_key(path), source))
}

fn render<T: Serialize>(
    format: OutputFormat,
    rows: &[T],
    text: impl Fn(&T, &mut String),
) -> Result<String> {
    match format {
        OutputFormat::Json => json(&rows),
        OutputFormat::Text => {
            let mut out = String::new();
            for row in rows {
                text(row, &mut out);
            }
            Ok(out)
        }
    }
}

fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

fn parse_line(arg: &str) -> Result<usize> {
    match arg.parse::<usize>() {
        Ok(line) if line > 0 => Ok(line),
        _ => Err(Error::invalid(format!("invalid line number '{arg}'"))),
    }
}

/// Byte offset for `LINE:COLUMN` (1-based, columns in characters) or a raw
/// byte offset, clamped to the end of `source`.
fn parse_position(source: &str, arg: &str) -> Result<u32> {
    let invalid = || {
        Error::invalid(format!(
            "invalid position '{arg}' (expected LINE:COLUMN or a byte offset)"
        ))
    };
    let offset = match arg.split_once(':') {
        Some((line, column)) => {
            let line: usize = line.parse().map_err(|_| invalid())?;
            let column: usize = column.parse().map_err(|_| invalid())?;
            line_column_offset(source, line, column).ok_or_else(invalid)?
        }
        None => arg.parse::<usize>().map_err(|_| invalid())?,
    };
    u32::try_from(floor_char_boundary(source, offset)).map_err(|_| invalid())
}

fn line_column_offset(source: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 || column == 0 {
        return None;
    }
    let start: usize = source
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    let rest = source.get(start..)?;
    let line_text = rest.split('\n').next().unwrap_or_default();
    let within = line_text
        .char_indices()
        .nth(column - 1)
        .map_or(line_text.len(), |(idx, _)| idx);
    Some(start + within)
}

fn floor_char_boundary(source: &str, offset: usize) -> usize {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '&' | '/' | '\\' | '.' | '#' | '$' | '%')
}

fn word_start(source: &str, offset: usize) -> usize {
    let before = source.get(..offset).unwrap_or_default();
    before
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_word_char(*c))
        .last()
        .map_or(offset, |(idx, _)| idx)
}

/// The part of the word that ends at the caret.
fn word_before(source: &str, offset: u32) -> &str {
    let offset = offset as usize;
    source
        .get(word_start(source, offset)..offset)
        .unwrap_or_default()
}

/// The whole word around the caret, without a trailing statement end.
fn word_at(source: &str, offset: u32) -> &str {
    let offset = offset as usize;
    let after = source.get(offset..).unwrap_or_default();
    let end = offset
        + after
            .char_indices()
            .find(|(_, c)| !is_word_char(*c))
            .map_or(after.len(), |(idx, _)| idx);
    source
        .get(word_start(source, offset)..end)
        .unwrap_or_default()
        .trim_end_matches(['.', ':'])
}

#[cfg(test)]
mod tests;
