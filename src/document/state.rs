//! Document state management for the PlantUML LSP.

use std::sync::Arc;

use dashmap::DashMap;
use tower_lsp::lsp_types::Url;

use crate::checker::SyntaxResult;
use crate::lsp::{annotate, Annotation};

use super::text::LineIndex;

/// Snapshot of one open document and its latest checker verdict.
///
/// Rebuilt from scratch on every change; nothing here is reused across
/// versions of the text.
#[derive(Debug, Clone)]
pub struct DocumentState {
    /// Pre-computed line index for position conversion.
    pub line_index: LineIndex,
    /// The full document text as last synced by the client.
    pub source: String,
    /// Document version from the client.
    pub version: i32,
    /// The resolved diagnostic and its fixes, when the check failed.
    pub annotation: Option<Annotation>,
}

impl DocumentState {
    /// Build the state for `source` from an already-obtained verdict.
    pub fn new(source: String, version: i32, check: SyntaxResult) -> Self {
        let line_index = LineIndex::new(&source);
        let annotation = annotate(&source, &check, &line_index);

        Self {
            line_index,
            source,
            version,
            annotation,
        }
    }
}

/// Thread-safe storage for open documents.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<Url, Arc<DocumentState>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
        }
    }

    /// Open or update a document with the given source text and verdict.
    pub fn open(
        &self,
        uri: Url,
        source: String,
        version: i32,
        check: SyntaxResult,
    ) -> Arc<DocumentState> {
        let state = Arc::new(DocumentState::new(source, version, check));
        self.documents.insert(uri, Arc::clone(&state));
        state
    }

    /// Close a document.
    pub fn close(&self, uri: &Url) {
        self.documents.remove(uri);
    }

    /// Get a document's state.
    pub fn get(&self, uri: &Url) -> Option<Arc<DocumentState>> {
        self.documents.get(uri).map(|r| Arc::clone(&r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passing_check_leaves_no_annotation() {
        let state = DocumentState::new(
            "@startuml\nactor User\n@enduml\n".to_string(),
            1,
            SyntaxResult::ok(),
        );
        assert!(state.annotation.is_none());
    }

    #[test]
    fn store_replaces_state_on_reopen() {
        let store = DocumentStore::new();
        let uri = Url::parse("file:///diagram.puml").unwrap();

        store.open(uri.clone(), "@startuml\n".to_string(), 1, SyntaxResult::ok());
        store.open(uri.clone(), "@startuml\n@enduml\n".to_string(), 2, SyntaxResult::ok());

        let state = store.get(&uri).unwrap();
        assert_eq!(state.version, 2);
        assert_eq!(state.source, "@startuml\n@enduml\n");

        store.close(&uri);
        assert!(store.get(&uri).is_none());
    }
}
