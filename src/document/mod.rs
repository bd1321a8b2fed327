//! Document state and offset arithmetic.
//!
//! This module provides:
//! - `resolve_error_line` for mapping checker-relative error lines to
//!   absolute byte offset ranges
//! - `LineIndex` for byte offset <-> LSP position conversion
//! - `DocumentState` and `DocumentStore` for document lifecycle management

mod scan;
mod state;
mod text;

pub use scan::{resolve_error_line, MarkerNotFound, EOL_WIDTH, TAG_ENDUML, TAG_STARTUML};
pub use state::{DocumentState, DocumentStore};
pub use text::LineIndex;
