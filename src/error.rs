//! Unified error type and source-context formatting.
//!
//! Every fallible entry point in the crate (bignum parsing, lexing,
//! parsing, evaluation, multinode transforms, expansion) returns
//! `Result<_, CasError>`. Positional variants carry a byte offset into
//! the original source string; non-positional ones (bignum arithmetic,
//! which never sees source text) carry none. [`ErrorFormatter`] renders
//! either kind with one line of source context and a caret.

use std::fmt;

/// The complete error taxonomy of the substrate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CasError {
    // --- input shape -----------------------------------------------------
    #[error("non-ASCII byte at offset {offset}")]
    NonAscii { offset: usize },
    #[error("empty input")]
    EmptyInput,
    #[error("premature end of input at offset {offset}")]
    PrematureEnd { offset: usize },
    #[error("illegal character at offset {offset}")]
    IllegalChar { offset: usize },
    #[error("missing digit at offset {offset}")]
    MissingDigit { offset: usize },

    // --- parse -------------------------------------------------------------
    #[error("expected '|' at offset {offset}")]
    ExpectedOr { offset: usize },
    #[error("expected '&' at offset {offset}")]
    ExpectedAnd { offset: usize },
    #[error("expected boolean term at offset {offset}")]
    ExpectedBoolTerm { offset: usize },
    #[error("expected boolean factor at offset {offset}")]
    ExpectedBoolFactor { offset: usize },
    #[error("expected expression at offset {offset}")]
    ExpectedExpression { offset: usize },
    #[error("expected term at offset {offset}")]
    ExpectedTerm { offset: usize },
    #[error("expected factor at offset {offset}")]
    ExpectedFactor { offset: usize },
    #[error("expected '(' at offset {offset}")]
    ExpectedLParen { offset: usize },
    #[error("expected ')' at offset {offset}")]
    ExpectedRParen { offset: usize },
    #[error("expected atom at offset {offset}")]
    ExpectedAtom { offset: usize },
    #[error("expected comparison operator at offset {offset}")]
    ExpectedCompareOp { offset: usize },
    #[error("expected boolean expression at offset {offset}")]
    ExpectedBoolExp { offset: usize },
    #[error("could not produce a sorted variable list")]
    VariableSortFailure,

    // --- semantic ------------------------------------------------------------
    #[error("unknown AST node kind")]
    UnknownNodeKind,
    #[error("unknown function {name:?}")]
    UnknownFunction { name: String },
    #[error("unknown math constant {name:?}")]
    UnknownMathConst { name: String },
    #[error("no parse tree available")]
    NoParseTree,
    #[error("multinode tree has no children")]
    EmptyMultinodeTree,
    #[error("expected a term multinode")]
    ExpectedTermMultinode,

    // --- evaluation --------------------------------------------------------
    #[error("missing binding for variable {name:?}")]
    MissingVariable { name: String },
    #[error("no value supplied for variable {name:?}")]
    MissingVariableValue { name: String },
    #[error("variable {name:?} is not bound to a number")]
    VariableNotNumeric { name: String },
    #[error("division by a (near-)zero denominator")]
    ZeroDenominator,

    // --- bignum --------------------------------------------------------------
    #[error("rational denominator is zero")]
    RationalDenominatorZero,
    #[error("reciprocal of zero is undefined")]
    ReciprocalOfZero,
    #[error("zero raised to a negative power is undefined")]
    NegativePowerOfZero,
    #[error("malformed rational literal {literal:?}")]
    MalformedRationalLiteral { literal: String },
}

impl CasError {
    /// The byte offset carried by this error, if any.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match *self {
            Self::NonAscii { offset }
            | Self::PrematureEnd { offset }
            | Self::IllegalChar { offset }
            | Self::MissingDigit { offset }
            | Self::ExpectedOr { offset }
            | Self::ExpectedAnd { offset }
            | Self::ExpectedBoolTerm { offset }
            | Self::ExpectedBoolFactor { offset }
            | Self::ExpectedExpression { offset }
            | Self::ExpectedTerm { offset }
            | Self::ExpectedFactor { offset }
            | Self::ExpectedLParen { offset }
            | Self::ExpectedRParen { offset }
            | Self::ExpectedAtom { offset }
            | Self::ExpectedCompareOp { offset }
            | Self::ExpectedBoolExp { offset } => Some(offset),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type CasResult<T> = Result<T, CasError>;

/// Formats error messages with source code context.
///
/// Takes source code and provides methods to format error messages with
/// contextual lines and a caret pointing at the exact location of the
/// error, either from an explicit line/column pair or from a
/// [`CasError`]'s byte offset.
///
/// # Examples
///
/// ```
/// use nanocas::error::{CasError, ErrorFormatter};
///
/// let formatter = ErrorFormatter::new("1 + @");
/// let rendered = formatter.format(&CasError::IllegalChar { offset: 4 });
/// assert!(rendered.contains("illegal character"));
/// assert!(rendered.contains('^'));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorFormatter {
    source: String,
    lines: Vec<String>,
}

impl ErrorFormatter {
    /// Creates a new error formatter with the given source code.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let lines = source.lines().map(String::from).collect();
        Self { source, lines }
    }

    /// Formats a [`CasError`] against the source this formatter was built
    /// from, converting its byte offset (if any) to a line/column pair.
    #[must_use]
    pub fn format(&self, error: &CasError) -> String {
        match error.offset() {
            Some(offset) => {
                let (line, column) = self.locate(offset);
                self.format_error(&error.to_string(), line, column)
            }
            None => format!("Error: {error}"),
        }
    }

    /// Converts a byte offset into the source into a 1-based `(line, column)`.
    fn locate(&self, offset: usize) -> (u32, u32) {
        let clamped = offset.min(self.source.len());
        let mut line = 1u32;
        let mut column = 1u32;
        for ch in self.source[..clamped].chars() {
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        (line, column)
    }

    /// Formats an error message with one line of context.
    #[must_use]
    pub fn format_error(&self, message: &str, line: u32, column: u32) -> String {
        self.format_error_with_context(message, line, column, 1)
    }

    /// Formats an error message with the specified number of context lines.
    #[must_use]
    pub fn format_error_with_context(
        &self,
        message: &str,
        line: u32,
        column: u32,
        context_lines: usize,
    ) -> String {
        let mut result = format!("Error: {message}\n");
        result.push_str(&self.get_context(line, column, context_lines));
        result
    }

    /// Gets the context lines around an error location.
    fn get_context(&self, line: u32, column: u32, context_lines: usize) -> String {
        use std::fmt::Write;

        if self.lines.is_empty() {
            return String::new();
        }

        let error_idx = line.saturating_sub(1) as usize;
        if error_idx >= self.lines.len() {
            return String::new();
        }

        let start_idx = error_idx.saturating_sub(context_lines);
        let end_idx = (error_idx + context_lines + 1).min(self.lines.len());
        let width = end_idx.to_string().len();

        let mut context = String::new();
        for (idx, line_content) in self.lines[start_idx..end_idx].iter().enumerate() {
            let line_num = start_idx + idx + 1;
            let _ = writeln!(context, "{line_num:>width$} | {line_content}");
            if start_idx + idx == error_idx {
                let spaces = " ".repeat(width);
                let caret_offset = (column as usize).saturating_sub(1);
                let caret_spacing = " ".repeat(caret_offset);
                let _ = writeln!(context, "{spaces} | {caret_spacing}^");
            }
        }
        context
    }
}

impl fmt::Display for ErrorFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_present_on_positional_variants() {
        let err = CasError::IllegalChar { offset: 4 };
        assert_eq!(err.offset(), Some(4));
    }

    #[test]
    fn offset_absent_on_non_positional_variants() {
        assert_eq!(CasError::ZeroDenominator.offset(), None);
        assert_eq!(CasError::ReciprocalOfZero.offset(), None);
    }

    #[test]
    fn formats_single_line_with_caret() {
        let formatter = ErrorFormatter::new("1 + @");
        let err = CasError::IllegalChar { offset: 4 };
        let rendered = formatter.format(&err);
        assert!(rendered.contains("illegal character"));
        assert!(rendered.contains("1 | 1 + @"));
        assert!(rendered.contains('^'));
    }

    #[test]
    fn formats_multiline_offset() {
        let formatter = ErrorFormatter::new("1 +\n@ 2");
        let err = CasError::IllegalChar { offset: 4 };
        let rendered = formatter.format(&err);
        assert!(rendered.contains("2 | @ 2"));
    }

    #[test]
    fn non_positional_error_has_no_context() {
        let formatter = ErrorFormatter::new("anything");
        let rendered = formatter.format(&CasError::EmptyInput);
        assert_eq!(rendered, "Error: empty input");
    }

    #[test]
    fn format_error_with_context_multiple_lines() {
        let source = "line1\nline2\nline3\nline4\nline5";
        let formatter = ErrorFormatter::new(source);
        let error = formatter.format_error_with_context("Error here", 3, 2, 1);

        assert!(error.contains("Error: Error here"));
        assert!(error.contains("2 | line2"));
        assert!(error.contains("3 | line3"));
        assert!(error.contains("4 | line4"));
    }

    #[test]
    fn format_error_out_of_bounds_line() {
        let source = "line1\nline2";
        let formatter = ErrorFormatter::new(source);
        let error = formatter.format_error("Out of bounds", 10, 1);

        assert!(error.contains("Error: Out of bounds"));
        assert!(!error.contains("line1"));
    }
}
