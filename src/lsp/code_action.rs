//! Quickfix code actions for suggested line replacements.

use std::collections::HashMap;

use tower_lsp::lsp_types::{
    CodeAction, CodeActionKind, CodeActionOrCommand, Range, TextEdit, Url, WorkspaceEdit,
};

use crate::document::DocumentState;

/// Build the quickfix actions for a `textDocument/codeAction` request.
///
/// Returns one action per suggested fix when the requested range touches
/// the diagnostic's range. Each edit replaces only the erroring line's
/// content; the trailing terminator stays in place.
pub fn code_actions(
    state: &DocumentState,
    uri: &Url,
    requested: Range,
) -> Vec<CodeActionOrCommand> {
    let Some(annotation) = &state.annotation else {
        return Vec::new();
    };

    if !ranges_overlap(annotation.diagnostic.range, requested) {
        return Vec::new();
    }

    annotation
        .fixes
        .iter()
        .map(|fix| {
            let edit_range = state
                .line_index
                .span_to_range(&state.source, &fix.edit_range);
            let edits = vec![TextEdit::new(edit_range, fix.replacement.clone())];
            let changes = HashMap::from([(uri.clone(), edits)]);

            CodeActionOrCommand::CodeAction(CodeAction {
                title: fix.title.clone(),
                kind: Some(CodeActionKind::QUICKFIX),
                diagnostics: Some(vec![annotation.diagnostic.clone()]),
                edit: Some(WorkspaceEdit {
                    changes: Some(changes),
                    ..Default::default()
                }),
                ..Default::default()
            })
        })
        .collect()
}

/// Whether two LSP ranges touch, end positions included. A cursor sitting
/// at either boundary of the diagnostic still gets its fixes.
fn ranges_overlap(a: Range, b: Range) -> bool {
    a.start <= b.end && b.start <= a.end
}
