//! Error line resolution for checker-relative line numbers.
//!
//! The external syntax checker only sees the text starting at the line
//! containing the `@startuml` tag, so the line numbers it reports are
//! relative to that line, not to the start of the document. This module
//! maps such a relative line number back to an absolute byte offset range
//! in the full document text.

use std::fmt;
use std::ops::Range;

/// Tag opening the region the syntax checker analyzes.
pub const TAG_STARTUML: &str = "@startuml";

/// Tag closing the region the syntax checker analyzes.
pub const TAG_ENDUML: &str = "@enduml";

/// Width of a line terminator in offset units.
///
/// Line lengths are counted as `content + 1` regardless of the actual
/// terminator. Documents using `\r\n` are therefore off by one unit per
/// preceding line; this numbering scheme is inherited from the checker
/// contract and kept as-is.
pub const EOL_WIDTH: usize = 1;

/// The `@startuml` tag could not be located where the requested relative
/// line number demands it.
///
/// Covers both a document without the tag and a relative line number
/// pointing past the lines that follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerNotFound;

impl fmt::Display for MarkerNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not locate the {} tag for the error line", TAG_STARTUML)
    }
}

impl std::error::Error for MarkerNotFound {}

/// Scan progress relative to the `@startuml` tag.
///
/// Transitions `BeforeStart -> WithinStart` at most once, on the first
/// line that begins with the tag; later occurrences are ordinary lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    BeforeStart,
    WithinStart { marker_line: i64 },
}

/// Resolve a checker-relative error line to an absolute byte offset range.
///
/// Scans the document once, left to right. Lines before the `@startuml`
/// tag contribute to the running offset but are otherwise skipped; once
/// the tag line is found it becomes relative line 0, and the range of the
/// line `error_line` steps after it is returned. `end` includes one
/// terminator unit, so for a final line without a terminator it may point
/// one past the end of the text.
///
/// A line only counts as the tag line when its text *starts with* the tag;
/// a mid-line occurrence never matches. A negative `error_line` can never
/// be satisfied and resolves to `MarkerNotFound`.
pub fn resolve_error_line(text: &str, error_line: i64) -> Result<Range<usize>, MarkerNotFound> {
    let mut state = ScanState::BeforeStart;
    let mut offset = 0usize;
    let mut line_number = 0i64;

    for raw_line in text.split_inclusive('\n') {
        let content = raw_line.strip_suffix('\n').unwrap_or(raw_line);
        let line_len = content.len() + EOL_WIDTH;

        if state == ScanState::BeforeStart && content.starts_with(TAG_STARTUML) {
            state = ScanState::WithinStart {
                marker_line: line_number,
            };
        }

        if let ScanState::WithinStart { marker_line } = state {
            if marker_line + error_line == line_number {
                return Ok(offset..offset + line_len);
            }
        }

        offset += line_len;
        line_number += 1;
    }

    Err(MarkerNotFound)
}
