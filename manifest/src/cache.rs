//! Version-keyed cache of the parsed object tree.
//!
//! Completion runs on every keystroke, so the tree is reparsed only when the editor version
//! or the text changes. While the user is mid-edit the text is often invalid YAML; in that
//! case the last tree that parsed is served and flagged as stale.

use std::sync::Arc;

use crate::document::ManifestTree;

/// Tree handed out by [`DocumentCache::get`].
#[derive(Debug, Clone)]
pub struct CachedTree {
    pub tree: Arc<ManifestTree>,
    /// `true` if the current text failed to parse and `tree` belongs to an older version.
    pub stale: bool,
}

#[derive(Debug)]
struct Entry {
    version: i64,
    text: String,
    parsed: Option<Arc<ManifestTree>>,
}

#[derive(Debug, Default)]
pub struct DocumentCache {
    entry: Option<Entry>,
    last_good: Option<Arc<ManifestTree>>,
}

impl DocumentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Version of the cached text, if any.
    pub fn version(&self) -> Option<i64> {
        self.entry.as_ref().map(|entry| entry.version)
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
        self.last_good = None;
    }

    /// Tree for `text` at `version`, parsing only on a cache miss.
    ///
    /// Returns `None` only if no version of the document has ever parsed.
    pub fn get(&mut self, version: i64, text: &str) -> Option<CachedTree> {
        let hit = self
            .entry
            .as_ref()
            .is_some_and(|entry| entry.version == version && entry.text == text);

        if !hit {
            tracing::debug!(version, len = text.len(), "reparsing manifest");
            let parsed = match ManifestTree::parse(text) {
                Ok(tree) => {
                    let tree = Arc::new(tree);
                    self.last_good = Some(Arc::clone(&tree));
                    Some(tree)
                }
                Err(err) => {
                    tracing::warn!(version, error = %err, "manifest did not parse; keeping last good tree");
                    None
                }
            };
            self.entry = Some(Entry {
                version,
                text: text.to_string(),
                parsed,
            });
        }

        let fresh = self.entry.as_ref().and_then(|entry| entry.parsed.clone());
        match fresh {
            Some(tree) => Some(CachedTree { tree, stale: false }),
            None => self.last_good.clone().map(|tree| CachedTree { tree, stale: true }),
        }
    }
}
