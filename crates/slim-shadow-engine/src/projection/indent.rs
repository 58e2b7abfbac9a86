use std::collections::HashMap;

/// Memoized indentation prefixes, two spaces per nesting level.
///
/// Owned by one projector instance. The memo never changes output; it only
/// avoids re-allocating the same short string for depths a tree visits many
/// times.
#[derive(Debug, Default)]
pub(crate) struct IndentCache {
    levels: HashMap<usize, String>,
}

impl IndentCache {
    pub(crate) fn space(&mut self, level: usize) -> &str {
        self.levels
            .entry(level)
            .or_insert_with(|| "  ".repeat(level))
    }
}
