// Copyright contributors to the openqasm-translator project
// SPDX-License-Identifier: Apache-2.0

// The translation error taxonomy. The kind enum carries the message; the
// carrier struct owns the source location. Every failure is raised at the
// point of detection and unwinds to the caller: translation aborts on the
// first error, nothing is retried or substituted.

use oq3_ast::Span;
use oq3_classical::ValueError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Clone, Debug, PartialEq)]
pub enum ErrorKind {
    #[error("symbol `{0}` has not been declared before first use")]
    UndefinedSymbol(String),

    #[error("symbol `{name}` has been declared{} but never initialized", declared_note(.declared_at))]
    UninitializedSymbol {
        name: String,
        declared_at: Option<Span>,
    },

    #[error("constant `{name}` value is unknown; known constants are: {}", .known.join(", "))]
    UnknownConstant { name: String, known: Vec<String> },

    #[error("missing expression in '{0}'")]
    MissingExpression(&'static str),

    #[error("range is missing its mandatory `{0}` bound")]
    WrongRange(&'static str),

    #[error("feature '{0}' is currently not supported")]
    UnsupportedFeature(String),

    #[error("expressions of type '{0}' are currently not supported")]
    UnsupportedExpressionType(String),

    #[error("include file {file:?} was not found in search path [{}]", format_paths(.searched))]
    InvalidIncludePath {
        file: String,
        searched: Vec<PathBuf>,
    },

    #[error("gate `{name}` expects {expected} parameter(s), found {actual}")]
    NumGateParams {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("gate `{name}` expects {expected} qubit operand(s), found {actual}")]
    NumGateQubits {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("index {index} is out of range for `{name}` of length {size}")]
    IndexOutOfRange {
        name: String,
        index: i128,
        size: u32,
    },

    #[error("{0}")]
    TypeError(String),

    #[error(transparent)]
    Value(#[from] ValueError),
}

fn declared_note(declared_at: &Option<Span>) -> String {
    match declared_at {
        Some(span) => format!(" at {span}"),
        None => String::new(),
    }
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A translation failure: an [`ErrorKind`] plus the span of the offending
/// node when one is known. Displays as `[line:column] message`.
#[derive(Clone, Debug, PartialEq)]
pub struct TranslationError {
    kind: ErrorKind,
    span: Option<Span>,
}

impl TranslationError {
    pub fn new(kind: ErrorKind, span: Option<Span>) -> TranslationError {
        TranslationError { kind, span }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub(crate) fn from_value(error: ValueError, span: Option<&Span>) -> TranslationError {
        TranslationError::new(ErrorKind::Value(error), span.copied())
    }
}

impl fmt::Display for TranslationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.span {
            Some(span) => write!(f, "{span} {}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for TranslationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

pub type Result<T> = std::result::Result<T, TranslationError>;

/// Shorthand for failing with `kind` at `span`.
pub(crate) fn err<T>(kind: ErrorKind, span: Option<&Span>) -> Result<T> {
    Err(TranslationError::new(kind, span.copied()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_span() {
        let error = TranslationError::new(
            ErrorKind::UndefinedSymbol("q".to_string()),
            Some(Span::new(4, 7, 4, 8)),
        );
        assert_eq!(
            format!("{error}"),
            "[4:7] symbol `q` has not been declared before first use"
        );
    }

    #[test]
    fn test_uninitialized_mentions_definition_site() {
        let kind = ErrorKind::UninitializedSymbol {
            name: "x".to_string(),
            declared_at: Some(Span::new(1, 1, 1, 6)),
        };
        assert_eq!(
            format!("{kind}"),
            "symbol `x` has been declared at [1:1] but never initialized"
        );
    }
}
