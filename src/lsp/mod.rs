//! LSP protocol feature implementations.
//!
//! This module provides implementations for LSP features:
//! - Diagnostics built from external checker verdicts
//! - Quickfix code actions for suggested line replacements
//! - Hover tooltips repeating the diagnostic message

mod code_action;
mod diagnostics;
mod hover;

pub use code_action::code_actions;
pub use diagnostics::{annotate, Annotation, SuggestedFix};
pub use hover::hover_at_position;
