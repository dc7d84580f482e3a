pub mod index;
pub mod parse;
pub mod types;

pub use index::DiffIndex;
pub use parse::parse_diff;
pub use types::FileChangeRecord;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unrecognized diff section: {excerpt}")]
    MalformedSection { excerpt: String },

    #[error("Duplicate file path in diff: {0}")]
    DuplicatePath(String),
}
