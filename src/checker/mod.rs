//! Syntax checker contract.
//!
//! The server does not parse PlantUML itself; it delegates to an external
//! checker and only interprets the verdict. The checker sees the text
//! starting at the `@startuml` line, so the error line position it reports
//! is relative to that line.

mod process;

pub use process::ProcessChecker;

/// First error string reported when the document has no `@startuml` tag.
pub const NO_STARTUML_FOUND: &str = "No @startuml found";

/// First error string reported when the document has no `@enduml` tag.
pub const NO_ENDUML_FOUND: &str = "No @enduml found";

/// Verdict of one syntax check run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxResult {
    /// Whether the document failed the check.
    pub is_error: bool,
    /// 0-based error line, counted from the line containing `@startuml`.
    /// Meaningless when `is_error` is false.
    pub error_line_position: i64,
    /// Human-readable error messages, in reported order.
    pub errors: Vec<String>,
    /// Suggested one-line replacements, in reported order. By checker
    /// convention the first entry repeats the erroring line and is not a
    /// usable fix.
    pub suggestions: Vec<String>,
}

impl SyntaxResult {
    /// A passing verdict.
    pub fn ok() -> Self {
        Self::default()
    }

    /// A failing verdict at the given marker-relative line.
    pub fn error(error_line_position: i64, errors: Vec<String>, suggestions: Vec<String>) -> Self {
        Self {
            is_error: true,
            error_line_position,
            errors,
            suggestions,
        }
    }

    /// The first reported error message, if any.
    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }
}

/// External syntax checker for PlantUML documents.
///
/// Implementations must never fail: any internal fault degrades to a
/// passing verdict so the server stays quiet rather than crashing the
/// annotation pipeline.
#[tower_lsp::async_trait]
pub trait SyntaxChecker: Send + Sync {
    /// Check the full document text and report the first error, if any.
    async fn check_syntax(&self, source: &str) -> SyntaxResult;
}
