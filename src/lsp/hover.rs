//! Hover tooltip for the active diagnostic.
//!
//! The checker's message doubles as the hover tooltip when the cursor is
//! inside the erroring range.

use tower_lsp::lsp_types::{Hover, HoverContents, MarkedString, Position};

use crate::document::DocumentState;

/// Return the diagnostic message as a tooltip when `position` falls within
/// the annotated range.
pub fn hover_at_position(state: &DocumentState, position: Position) -> Option<Hover> {
    let annotation = state.annotation.as_ref()?;
    let offset = state.line_index.position_to_offset(&state.source, position)?;

    // End bound is inclusive so the cursor at the very end of the line
    // still shows the tooltip.
    if offset < annotation.span.start || offset > annotation.span.end {
        return None;
    }

    Some(Hover {
        contents: HoverContents::Scalar(MarkedString::String(
            annotation.diagnostic.message.clone(),
        )),
        range: Some(annotation.diagnostic.range),
    })
}
