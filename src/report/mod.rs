pub mod types;

pub use types::{ChangeStatus, FileRow, Listing};

use crate::diff::DiffIndex;
use colored::Colorize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write listing file: {0}")]
    FileWrite(#[from] std::io::Error),
}

/// Build a file listing from an indexed diff, one row per changed file in
/// appearance order.
pub fn build(index: &DiffIndex) -> Listing {
    let rows: Vec<FileRow> = index
        .records()
        .iter()
        .map(|record| {
            let status = if record.is_new() {
                ChangeStatus::Added
            } else if record.is_deleted() {
                ChangeStatus::Deleted
            } else {
                ChangeStatus::Modified
            };
            FileRow {
                path: record.path.clone(),
                status,
                additions: record.additions(),
                deletions: record.deletions(),
            }
        })
        .collect();

    let total_additions = rows.iter().map(|row| row.additions).sum();
    let total_deletions = rows.iter().map(|row| row.deletions).sum();

    Listing {
        rows,
        total_additions,
        total_deletions,
    }
}

/// Output the listing to the terminal (default) or as markdown to a file.
#[instrument(skip(listing), fields(files = listing.rows.len()))]
pub fn output(listing: &Listing, output_path: Option<&Path>) -> Result<(), ReportError> {
    match output_path {
        None => {
            debug!("writing listing to terminal");
            print_terminal_listing(listing);
            Ok(())
        }
        Some(path) => {
            debug!(path = %path.display(), "writing listing to file");
            write_markdown_listing(listing, path)
        }
    }
}

/// Format and print the listing to the terminal with colors:
///
/// M src/sync/worker.rs +4 -2
/// A src/sync/retry.rs +20 -0
///
/// 2 files changed, +24 -2
fn print_terminal_listing(listing: &Listing) {
    for row in &listing.rows {
        println!(
            "{} {} {} {}",
            colorize_status(row.status),
            row.path,
            format!("+{}", row.additions).green(),
            format!("-{}", row.deletions).red()
        );
    }
    println!();
    println!(
        "{} files changed, +{} -{}",
        listing.rows.len(),
        listing.total_additions,
        listing.total_deletions
    );
}

/// Write the listing as a markdown table.
fn write_markdown_listing(listing: &Listing, path: &Path) -> Result<(), ReportError> {
    let mut md = String::new();
    md.push_str("# Changed files\n\n");
    md.push_str("| Status | File | Added | Removed |\n");
    md.push_str("|--------|------|-------|---------|\n");
    for row in &listing.rows {
        md.push_str(&format!(
            "| {} | `{}` | {} | {} |\n",
            row.status, row.path, row.additions, row.deletions
        ));
    }
    md.push_str(&format!(
        "\n**{} files changed** (+{} -{})\n",
        listing.rows.len(),
        listing.total_additions,
        listing.total_deletions
    ));

    std::fs::write(path, md)?;
    Ok(())
}

/// Helper to colorize a change status letter for terminal output.
fn colorize_status(status: ChangeStatus) -> colored::ColoredString {
    match status {
        ChangeStatus::Added => "A".green().bold(),
        ChangeStatus::Deleted => "D".red().bold(),
        ChangeStatus::Modified => "M".yellow().bold(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{parse_diff, DiffIndex};

    const MIXED_DIFF: &str = "diff --git a/src/worker.rs b/src/worker.rs\n--- a/src/worker.rs\n+++ b/src/worker.rs\n@@ -1,3 +1,3 @@\n context\n-removed\n+added\ndiff --git a/src/retry.rs b/src/retry.rs\nnew file mode 100644\n--- /dev/null\n+++ b/src/retry.rs\n@@ -0,0 +1,2 @@\n+one\n+two\ndiff --git a/docs/notes.md b/docs/notes.md\ndeleted file mode 100644\n--- a/docs/notes.md\n+++ /dev/null\n@@ -1,1 +0,0 @@\n-gone\n";

    fn mixed_index() -> DiffIndex {
        DiffIndex::build(parse_diff(MIXED_DIFF).unwrap()).unwrap()
    }

    #[test]
    fn test_build_listing_rows() {
        let listing = build(&mixed_index());
        assert_eq!(listing.rows.len(), 3);
        assert_eq!(listing.rows[0].path, "src/worker.rs");
        assert_eq!(listing.rows[0].status, ChangeStatus::Modified);
        assert_eq!(listing.rows[1].status, ChangeStatus::Added);
        assert_eq!(listing.rows[1].additions, 2);
        assert_eq!(listing.rows[2].status, ChangeStatus::Deleted);
        assert_eq!(listing.rows[2].deletions, 1);
    }

    #[test]
    fn test_build_listing_totals() {
        let listing = build(&mixed_index());
        assert_eq!(listing.total_additions, 3);
        assert_eq!(listing.total_deletions, 2);
    }

    #[test]
    fn test_write_markdown_listing() {
        let listing = build(&mixed_index());

        let dir = std::env::temp_dir();
        let path = dir.join("test_listing.md");
        write_markdown_listing(&listing, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("# Changed files"));
        assert!(content.contains("| A | `src/retry.rs` | 2 | 0 |"));
        assert!(content.contains("**3 files changed** (+3 -2)"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_terminal_listing_does_not_panic() {
        let listing = build(&mixed_index());
        print_terminal_listing(&listing);
    }

    #[test]
    fn test_output_to_file() {
        let listing = build(&mixed_index());
        let dir = std::env::temp_dir();
        let path = dir.join("test_listing_output.md");
        output(&listing, Some(&path)).unwrap();
        assert!(path.exists());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_output_to_terminal() {
        let listing = build(&mixed_index());
        output(&listing, None).unwrap();
    }
}
