//! Template tree rendering.
//! Mirrors the template tree into the preset folder, replacing `[$name]`
//! tokens line by line through a [`TokenResolver`].

use crate::constants::{LINE_BREAK_PATTERN, LINE_ENDING, TOKEN_PATTERN};
use crate::error::{Error, Result};
use crate::resolver::{LookupSource, Resolution, TokenResolver};
use log::{debug, warn};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TOKEN_PATTERN).expect("token pattern is a valid regex"));

static LINE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LINE_BREAK_PATTERN).expect("line break pattern is a valid regex"));

/// Splits `content` into lines ending at `\r\n`, `\n` or a lone `\r`.
///
/// A terminator at the very end does not start another line, and empty
/// content has no lines.
pub fn split_lines(content: &str) -> impl Iterator<Item = &str> + '_ {
    let body = content
        .strip_suffix("\r\n")
        .or_else(|| content.strip_suffix('\n'))
        .or_else(|| content.strip_suffix('\r'))
        .unwrap_or(content);
    let has_lines = !content.is_empty();
    LINE_BREAK_RE.split(body).filter(move |_| has_lines)
}

/// A token occurrence that could not be resolved and was left in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedToken {
    pub name: String,
    pub source: LookupSource,
    /// File path relative to the template root
    pub file: PathBuf,
    /// 1-based line number
    pub line: usize,
}

/// Counters collected while rendering a template tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub directories: usize,
    pub files_rendered: usize,
    pub files_copied: usize,
    pub tokens_replaced: usize,
    pub unresolved: Vec<UnresolvedToken>,
}

/// Output of [`render_line`].
#[derive(Debug)]
pub struct RenderedLine<'l> {
    pub text: Cow<'l, str>,
    pub replaced: usize,
    pub unresolved: Vec<(String, LookupSource)>,
}

/// Replaces every token in `line` in a single left-to-right pass.
///
/// The captured identifier is handed to the resolver as written. Replacement
/// values are inserted literally and never scanned again. Unresolved tokens
/// keep their original text.
pub fn render_line<'l>(line: &'l str, resolver: &TokenResolver<'_>) -> RenderedLine<'l> {
    let mut replaced = 0;
    let mut unresolved = Vec::new();

    let text = TOKEN_RE.replace_all(line, |caps: &Captures| {
        let name = &caps[1];
        match resolver.resolve(name) {
            Resolution::Resolved(value) => {
                replaced += 1;
                value
            }
            Resolution::Unresolved(source) => {
                unresolved.push((name.to_string(), source));
                caps[0].to_string()
            }
        }
    });

    RenderedLine { text, replaced, unresolved }
}

/// Whether a template file was rewritten or copied byte for byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Rendered,
    Copied,
}

/// Renders one template file into `target`.
///
/// Files that are not valid UTF-8 are copied unchanged. Text files are
/// rewritten line by line with [`LINE_ENDING`] after every line; a leading
/// byte order mark is dropped.
pub fn render_file(
    source: &Path,
    target: &Path,
    relative: &Path,
    resolver: &TokenResolver<'_>,
    summary: &mut RenderSummary,
) -> Result<FileAction> {
    let bytes = fs::read(source)?;
    let content = match std::str::from_utf8(&bytes) {
        Ok(content) => content,
        Err(_) => {
            debug!("Copying non-text file: {}", relative.display());
            fs::write(target, &bytes)?;
            summary.files_copied += 1;
            return Ok(FileAction::Copied);
        }
    };
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    debug!("Rendering file: {}", relative.display());
    let mut output = BufWriter::new(File::create(target)?);
    for (index, line) in split_lines(content).enumerate() {
        let rendered = render_line(line, resolver);
        summary.tokens_replaced += rendered.replaced;
        for (name, source) in rendered.unresolved {
            warn!("{source} '{name}' not found ({}:{}).", relative.display(), index + 1);
            summary.unresolved.push(UnresolvedToken {
                name,
                source,
                file: relative.to_path_buf(),
                line: index + 1,
            });
        }
        output.write_all(rendered.text.as_bytes())?;
        output.write_all(LINE_ENDING.as_bytes())?;
    }
    output.flush()?;

    summary.files_rendered += 1;
    Ok(FileAction::Rendered)
}

/// Recreates `source` under `destination`, rendering every file.
///
/// The walk is depth-first with entries ordered by name, and each directory
/// is created before anything inside it. `destination` must not exist yet.
///
/// # Errors
/// * `Error::IoError` if a directory or file cannot be created or written
/// * `Error::WalkError` if the template tree cannot be read
pub fn render_tree(
    source: &Path,
    destination: &Path,
    resolver: &TokenResolver<'_>,
) -> Result<RenderSummary> {
    let mut summary = RenderSummary::default();
    fs::create_dir_all(destination)?;

    for entry in WalkDir::new(source).min_depth(1).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        let relative = entry.path().strip_prefix(source).map_err(|_| Error::PathError {
            path: entry.path().display().to_string(),
            root: source.display().to_string(),
        })?;
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            debug!("Creating directory: {}", relative.display());
            fs::create_dir(&target)?;
            summary.directories += 1;
        } else {
            render_file(entry.path(), &target, relative, resolver, &mut summary)?;
        }
    }

    Ok(summary)
}
