//! Conversion of checker verdicts into LSP diagnostics and fixes.
//!
//! At most one diagnostic is produced per document: the checker only ever
//! reports its first error.

use std::ops::Range;

use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity};

use crate::checker::{SyntaxResult, NO_ENDUML_FOUND, NO_STARTUML_FOUND};
use crate::document::{resolve_error_line, LineIndex, EOL_WIDTH, TAG_ENDUML, TAG_STARTUML};

/// One suggested line replacement, offered to the client as a quickfix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestedFix {
    /// Client-visible action title, `change to '<suggestion>'`.
    pub title: String,
    /// Byte range of the erroring line's content, terminator excluded.
    pub edit_range: Range<usize>,
    /// Replacement text for that range.
    pub replacement: String,
}

/// A resolved diagnostic plus the fixes attached to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Byte range the diagnostic covers in the source.
    pub span: Range<usize>,
    pub diagnostic: Diagnostic,
    pub fixes: Vec<SuggestedFix>,
}

/// Build the diagnostic for a checker verdict, if it reported an error.
///
/// Marker-missing verdicts are recognized by their first error string and
/// anchored at the first character of the document. Everything else is
/// anchored at the erroring line via [`resolve_error_line`]; if that line
/// cannot be located the diagnostic degrades to the missing-`@startuml`
/// form rather than failing.
pub fn annotate(source: &str, check: &SyntaxResult, line_index: &LineIndex) -> Option<Annotation> {
    if !check.is_error {
        return None;
    }

    match check.first_error() {
        Some(NO_STARTUML_FOUND) => Some(missing_tag_annotation(source, line_index, TAG_STARTUML)),
        Some(NO_ENDUML_FOUND) => Some(missing_tag_annotation(source, line_index, TAG_ENDUML)),
        _ => match resolve_error_line(source, check.error_line_position) {
            Ok(span) => Some(error_line_annotation(source, check, line_index, span)),
            Err(_) => Some(missing_tag_annotation(source, line_index, TAG_STARTUML)),
        },
    }
}

fn error_line_annotation(
    source: &str,
    check: &SyntaxResult,
    line_index: &LineIndex,
    span: Range<usize>,
) -> Annotation {
    let message = check
        .errors
        .iter()
        .chain(check.suggestions.iter())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n");

    // The first suggestion repeats the erroring line; only the rest are
    // offered as fixes.
    let edit_range = span.start..span.end - EOL_WIDTH;
    let fixes = check
        .suggestions
        .iter()
        .skip(1)
        .map(|suggestion| SuggestedFix {
            title: format!("change to '{}'", suggestion),
            edit_range: edit_range.clone(),
            replacement: suggestion.clone(),
        })
        .collect();

    Annotation {
        diagnostic: error_diagnostic(line_index.span_to_range(source, &span), message),
        span,
        fixes,
    }
}

fn missing_tag_annotation(source: &str, line_index: &LineIndex, tag: &str) -> Annotation {
    let span = 0..1;
    Annotation {
        diagnostic: error_diagnostic(
            line_index.span_to_range(source, &span),
            format!("tag {} not found", tag),
        ),
        span,
        fixes: Vec::new(),
    }
}

fn error_diagnostic(range: tower_lsp::lsp_types::Range, message: String) -> Diagnostic {
    Diagnostic {
        range,
        severity: Some(DiagnosticSeverity::ERROR),
        code: None,
        code_description: None,
        source: Some("plantuml".to_string()),
        message,
        related_information: None,
        tags: None,
        data: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_lsp::lsp_types::Position;

    fn annotate_source(source: &str, check: &SyntaxResult) -> Option<Annotation> {
        annotate(source, check, &LineIndex::new(source))
    }

    #[test]
    fn no_error_no_annotation() {
        let source = "@startuml\nactor User\n@enduml\n";
        assert_eq!(annotate_source(source, &SyntaxResult::ok()), None);
    }

    #[test]
    fn missing_startuml_tag() {
        let source = "\nfoo\nerror\n@enduml\n";
        let check = SyntaxResult::error(0, vec![NO_STARTUML_FOUND.to_string()], vec![]);

        let annotation = annotate_source(source, &check).unwrap();
        assert_eq!(annotation.span, 0..1);
        assert_eq!(annotation.diagnostic.message, "tag @startuml not found");
        assert!(annotation.fixes.is_empty());
    }

    #[test]
    fn missing_enduml_tag() {
        let source = "@startuml\nactor User\n";
        let check = SyntaxResult::error(0, vec![NO_ENDUML_FOUND.to_string()], vec![]);

        let annotation = annotate_source(source, &check).unwrap();
        assert_eq!(annotation.span, 0..1);
        assert_eq!(annotation.diagnostic.message, "tag @enduml not found");
        assert!(annotation.fixes.is_empty());
    }

    #[test]
    fn syntax_error_is_anchored_at_the_reported_line() {
        let source = "@startuml\nerror\n@enduml\n";
        let check = SyntaxResult::error(1, vec!["Syntax Error?".to_string()], vec![]);

        let annotation = annotate_source(source, &check).unwrap();
        assert_eq!(annotation.span, 10..16);
        assert_eq!(annotation.diagnostic.range.start, Position::new(1, 0));
        assert_eq!(annotation.diagnostic.range.end, Position::new(2, 0));
        assert_eq!(annotation.diagnostic.message, "Syntax Error?");
    }

    #[test]
    fn message_lists_errors_then_suggestions() {
        let source = "@startuml\nactr User\n@enduml\n";
        let check = SyntaxResult::error(
            1,
            vec!["Syntax Error?".to_string()],
            vec!["actr User".to_string(), "actor User".to_string()],
        );

        let annotation = annotate_source(source, &check).unwrap();
        assert_eq!(
            annotation.diagnostic.message,
            "Syntax Error?\nactr User\nactor User"
        );
    }

    #[test]
    fn first_suggestion_never_becomes_a_fix() {
        let source = "@startuml\nactr User\n@enduml\n";
        let check = SyntaxResult::error(
            1,
            vec!["Syntax Error?".to_string()],
            vec![
                "actr User".to_string(),
                "actor User".to_string(),
                "agent User".to_string(),
            ],
        );

        let annotation = annotate_source(source, &check).unwrap();
        assert_eq!(annotation.fixes.len(), 2);
        assert_eq!(annotation.fixes[0].title, "change to 'actor User'");
        assert_eq!(annotation.fixes[1].title, "change to 'agent User'");
    }

    #[test]
    fn fix_edit_range_excludes_the_terminator() {
        let source = "@startuml\nactr User\n@enduml\n";
        let check = SyntaxResult::error(
            1,
            vec!["Syntax Error?".to_string()],
            vec!["actr User".to_string(), "actor User".to_string()],
        );

        let annotation = annotate_source(source, &check).unwrap();
        assert_eq!(annotation.span, 10..20);
        assert_eq!(annotation.fixes[0].edit_range, 10..19);
        assert_eq!(&source[10..19], "actr User");
        assert_eq!(annotation.fixes[0].replacement, "actor User");
    }

    #[test]
    fn unresolvable_error_line_degrades_to_missing_startuml() {
        // Checker claims a line error, but the document carries no tag to
        // anchor it.
        let source = "actor User\n";
        let check = SyntaxResult::error(1, vec!["Syntax Error?".to_string()], vec![]);

        let annotation = annotate_source(source, &check).unwrap();
        assert_eq!(annotation.span, 0..1);
        assert_eq!(annotation.diagnostic.message, "tag @startuml not found");
        assert!(annotation.fixes.is_empty());
    }

    #[test]
    fn single_suggestion_yields_no_fixes() {
        let source = "@startuml\nerror\n@enduml\n";
        let check = SyntaxResult::error(
            1,
            vec!["Syntax Error?".to_string()],
            vec!["error".to_string()],
        );

        let annotation = annotate_source(source, &check).unwrap();
        assert!(annotation.fixes.is_empty());
    }
}
