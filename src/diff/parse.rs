use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::types::FileChangeRecord;
use super::ParseError;

/// Marks the start of a per-file section: at the very beginning of the blob
/// or immediately after a newline. A `diff --git ` embedded mid-line (e.g.
/// inside an added hunk line) is not a boundary.
static SECTION_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^diff --git ").expect("Invalid section boundary regex"));

/// Matches one section fragment: the `a/` and `b/` path tokens on the header
/// line, then the rest of the section as an opaque body spanning any number
/// of lines (including blank ones).
static SECTION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\Aa/([^\n]+) b/([^\n]+)(?:\n(.*))?\z").expect("Invalid section header regex")
});

/// Split fragments whose trimmed length does not exceed this are discarded as
/// split debris (stray whitespace, a trailing newline after the last section)
/// rather than treated as file sections.
const MIN_FRAGMENT_LEN: usize = 10;

/// Longest excerpt of a malformed fragment carried in the error.
const EXCERPT_LEN: usize = 80;

/// Parse a combined multi-file unified diff blob into per-file records.
///
/// The input is the raw text a hosting API returns for a pull request: zero
/// or more sections, each opening with `diff --git a/<path> b/<path>` and
/// followed by standard unified-diff content. Everything after a section's
/// header line is kept as the file's opaque patch body, up to (but not
/// including) the next section boundary.
///
/// The file's identity is the `b/` path (the post-change side, which is what
/// matters for renames). Records come back in input order.
///
/// Parsing is all-or-nothing: one section that does not match the expected
/// header shape, or two sections resolving to the same post-change path,
/// fails the whole parse.
pub fn parse_diff(blob: &str) -> Result<Vec<FileChangeRecord>, ParseError> {
    let boundaries: Vec<regex::Match> = SECTION_BOUNDARY.find_iter(blob).collect();

    // Anything before the first boundary is a fragment too; real blobs have
    // nothing there, so it either filters out as whitespace or fails below.
    let mut fragments: Vec<&str> = Vec::with_capacity(boundaries.len() + 1);
    fragments.push(match boundaries.first() {
        Some(first) => &blob[..first.start()],
        None => blob,
    });
    for (i, boundary) in boundaries.iter().enumerate() {
        let end = boundaries
            .get(i + 1)
            .map_or(blob.len(), |next| next.start());
        fragments.push(&blob[boundary.end()..end]);
    }

    let mut records = Vec::new();
    let mut seen = HashSet::new();

    for fragment in fragments {
        if fragment.trim().len() <= MIN_FRAGMENT_LEN {
            continue;
        }

        let captures = SECTION_HEADER.captures(fragment).ok_or_else(|| {
            ParseError::MalformedSection {
                excerpt: excerpt(fragment),
            }
        })?;

        let path = captures[2].trim().to_string();
        if path.is_empty() {
            return Err(ParseError::MalformedSection {
                excerpt: excerpt(fragment),
            });
        }
        if !seen.insert(path.clone()) {
            return Err(ParseError::DuplicatePath(path));
        }

        let patch_body = captures.get(3).map_or("", |m| m.as_str()).to_string();
        records.push(FileChangeRecord { path, patch_body });
    }

    Ok(records)
}

/// Truncate a fragment for error diagnostics.
fn excerpt(fragment: &str) -> String {
    let trimmed = fragment.trim();
    match trimmed.char_indices().nth(EXCERPT_LEN) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
