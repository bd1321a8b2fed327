//! Subprocess-backed syntax checker.
//!
//! Pipes the document into a PlantUML executable running in `-syntax`
//! mode. On failure that mode prints a report of the form:
//!
//! ```text
//! ERROR
//! <line>
//! <message...>
//! ```
//!
//! where `<line>` is 0-based and relative to the `@startuml` line. Any
//! other output (usually the detected diagram type) is a pass.

use std::io;
use std::process::Stdio;
use std::sync::OnceLock;

use regex::Regex;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::{SyntaxChecker, SyntaxResult};

/// Syntax checker that shells out to an external PlantUML executable.
#[derive(Debug, Clone)]
pub struct ProcessChecker {
    command: String,
    args: Vec<String>,
}

impl ProcessChecker {
    pub fn new(command: String, args: Vec<String>) -> Self {
        Self { command, args }
    }

    async fn run(&self, source: &str) -> io::Result<SyntaxResult> {
        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(source.as_bytes()).await?;
        }

        let output = child.wait_with_output().await?;
        Ok(parse_report(&String::from_utf8_lossy(&output.stdout)))
    }
}

impl Default for ProcessChecker {
    fn default() -> Self {
        Self::new("plantuml".to_string(), vec!["-syntax".to_string()])
    }
}

#[tower_lsp::async_trait]
impl SyntaxChecker for ProcessChecker {
    async fn check_syntax(&self, source: &str) -> SyntaxResult {
        match self.run(source).await {
            Ok(result) => result,
            Err(err) => {
                eprintln!("Warning: syntax checker '{}' failed: {}", self.command, err);
                SyntaxResult::ok()
            }
        }
    }
}

fn error_report_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)^ERROR\r?\n(\d+)\r?\n(.*)$").unwrap())
}

/// Parse the checker's stdout into a verdict.
fn parse_report(stdout: &str) -> SyntaxResult {
    let Some(captures) = error_report_pattern().captures(stdout.trim_end()) else {
        return SyntaxResult::ok();
    };

    let Ok(error_line) = captures[1].parse::<i64>() else {
        return SyntaxResult::ok();
    };

    let errors = captures[2]
        .lines()
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect();

    // `-syntax` mode does not carry the checker's suggestion list.
    SyntaxResult::error(error_line, errors, Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_report() {
        assert_eq!(parse_report("SEQUENCE\n"), SyntaxResult::ok());
    }

    #[test]
    fn error_report() {
        let result = parse_report("ERROR\n1\nSyntax Error?\n");
        assert!(result.is_error);
        assert_eq!(result.error_line_position, 1);
        assert_eq!(result.errors, vec!["Syntax Error?".to_string()]);
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn error_report_with_multiple_messages() {
        let result = parse_report("ERROR\n3\nSyntax Error?\nSome diagram description contains errors\n");
        assert_eq!(result.error_line_position, 3);
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn error_report_with_crlf() {
        let result = parse_report("ERROR\r\n2\r\nSyntax Error?\r\n");
        assert!(result.is_error);
        assert_eq!(result.error_line_position, 2);
        assert_eq!(result.errors, vec!["Syntax Error?".to_string()]);
    }

    #[test]
    fn empty_output_is_a_pass() {
        assert_eq!(parse_report(""), SyntaxResult::ok());
    }

    #[test]
    fn garbled_output_is_a_pass() {
        assert_eq!(parse_report("ERROR\nnot-a-number\nhuh\n"), SyntaxResult::ok());
    }
}
