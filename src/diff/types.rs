/// A single file's patch extracted from a combined pull request diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChangeRecord {
    /// Repository-relative path on the post-change side (the `b/` path)
    pub path: String,
    /// Raw unified-diff text for this file, from just after the path header
    /// line up to the next file boundary. Kept opaque; hunk syntax is the
    /// renderer's concern.
    pub patch_body: String,
}

impl FileChangeRecord {
    /// Lines added by this patch (`+` lines, excluding the `+++` marker).
    pub fn additions(&self) -> usize {
        self.patch_body
            .lines()
            .filter(|line| line.starts_with('+') && !line.starts_with("+++"))
            .count()
    }

    /// Lines removed by this patch (`-` lines, excluding the `---` marker).
    pub fn deletions(&self) -> usize {
        self.patch_body
            .lines()
            .filter(|line| line.starts_with('-') && !line.starts_with("---"))
            .count()
    }

    /// True when the pre-change side is `/dev/null`, i.e. the file was added.
    pub fn is_new(&self) -> bool {
        self.has_marker("--- ")
    }

    /// True when the post-change side is `/dev/null`, i.e. the file was
    /// deleted.
    pub fn is_deleted(&self) -> bool {
        self.has_marker("+++ ")
    }

    fn has_marker(&self, prefix: &str) -> bool {
        self.patch_body.lines().any(|line| {
            line.strip_prefix(prefix)
                .map(|rest| rest.trim() == "/dev/null")
                .unwrap_or(false)
        })
    }
}
