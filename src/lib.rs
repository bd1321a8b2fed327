//! PlantUML syntax diagnostics language server.
//!
//! Delegates syntax checking to an external PlantUML checker and maps its
//! marker-relative error line back onto the document, publishing at most
//! one diagnostic per document plus quickfix replacements for the
//! checker's suggestions.

use std::sync::{Arc, OnceLock};

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService};

mod checker;
mod document;
mod lsp;
pub(crate) mod settings;

pub use checker::{ProcessChecker, SyntaxChecker, SyntaxResult, NO_ENDUML_FOUND, NO_STARTUML_FOUND};
pub use document::{
    resolve_error_line, DocumentState, DocumentStore, LineIndex, MarkerNotFound, TAG_ENDUML,
    TAG_STARTUML,
};
pub use lsp::{annotate, code_actions, hover_at_position, Annotation, SuggestedFix};
pub use settings::{build_checker, discover_settings, load_settings};

pub struct Backend {
    client: Client,
    documents: DocumentStore,
    checker: OnceLock<Arc<dyn SyntaxChecker>>,
}

impl Backend {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
            documents: DocumentStore::new(),
            checker: OnceLock::new(),
        }
    }

    fn checker(&self) -> Arc<dyn SyntaxChecker> {
        Arc::clone(
            self.checker
                .get_or_init(|| Arc::new(ProcessChecker::default())),
        )
    }

    /// Check the document and publish its diagnostics.
    async fn on_document_change(&self, uri: Url, text: String, version: i32) {
        // When the start tag is absent the checker would only tell us as
        // much, so skip the subprocess and synthesize its verdict.
        let check = if text.contains(TAG_STARTUML) {
            self.checker().check_syntax(&text).await
        } else {
            SyntaxResult::error(0, vec![NO_STARTUML_FOUND.to_string()], Vec::new())
        };

        let state = self.documents.open(uri.clone(), text, version, check);

        let diagnostics = state
            .annotation
            .as_ref()
            .map(|annotation| vec![annotation.diagnostic.clone()])
            .unwrap_or_default();
        self.client
            .publish_diagnostics(uri, diagnostics, Some(version))
            .await;
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let workspace_root = params
            .workspace_folders
            .as_ref()
            .and_then(|folders| folders.first())
            .and_then(|f| f.uri.to_file_path().ok())
            .or_else(|| {
                #[allow(deprecated)]
                params.root_uri.as_ref()?.to_file_path().ok()
            });

        if let Some(root) = workspace_root {
            let (settings, _settings_dir) = settings::discover_settings(&root);
            let _ = self
                .checker
                .set(Arc::new(settings::build_checker(&settings)));
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                code_action_provider: Some(CodeActionProviderCapability::Simple(true)),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "PlantUML language server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        self.on_document_change(
            params.text_document.uri,
            params.text_document.text,
            params.text_document.version,
        )
        .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        // We use FULL sync, so there's exactly one change with the full text
        if let Some(change) = params.content_changes.into_iter().next() {
            self.on_document_change(
                params.text_document.uri,
                change.text,
                params.text_document.version,
            )
            .await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.documents.close(&params.text_document.uri);
        // Clear diagnostics
        self.client
            .publish_diagnostics(params.text_document.uri, vec![], None)
            .await;
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let Some(doc) = self.documents.get(uri) else {
            return Ok(None);
        };

        Ok(lsp::hover_at_position(&doc, position))
    }

    async fn code_action(
        &self,
        params: CodeActionParams,
    ) -> Result<Option<Vec<CodeActionOrCommand>>> {
        let uri = params.text_document.uri;

        let Some(doc) = self.documents.get(&uri) else {
            return Ok(None);
        };

        let actions = lsp::code_actions(&doc, &uri, params.range);
        if actions.is_empty() {
            Ok(None)
        } else {
            Ok(Some(actions))
        }
    }
}

pub fn create_service() -> (LspService<Backend>, tower_lsp::ClientSocket) {
    LspService::new(Backend::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_can_be_created() {
        let (_service, _socket) = create_service();
    }
}
