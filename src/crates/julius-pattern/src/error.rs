use crate::span::Span;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompileError>;

/// Reasons a pattern fails to match the pattern grammar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected}, found {found} at {span}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("unexpected end of pattern, expected {expected}")]
    UnexpectedEof { expected: String, span: Span },

    #[error("unrecognized input '{text}' at {span}")]
    InvalidToken { text: String, span: Span },

    #[error("repeat range {{{min},{max}}} has a minimum above its maximum at {span}")]
    InvalidRange { min: u32, max: u32, span: Span },

    #[error("pattern continues after a complete expression at {span}")]
    TrailingInput { span: Span },

    #[error("literal {text:?} contains a control character at {span}")]
    InvalidLiteral { text: String, span: Span },

    #[error("repeat count {text} is too large at {span}")]
    InvalidCount { text: String, span: Span },

    #[error("groups nested deeper than {limit} levels at {span}")]
    TooDeep { limit: usize, span: Span },
}

impl ParseError {
    pub fn unexpected_token(expected: impl Into<String>, found: impl Into<String>, span: Span) -> Self {
        ParseError::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
            span,
        }
    }

    pub fn unexpected_eof(expected: impl Into<String>, span: Span) -> Self {
        ParseError::UnexpectedEof {
            expected: expected.into(),
            span,
        }
    }

    pub fn invalid_token(text: impl Into<String>, span: Span) -> Self {
        ParseError::InvalidToken {
            text: text.into(),
            span,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::UnexpectedEof { span, .. }
            | ParseError::InvalidToken { span, .. }
            | ParseError::InvalidRange { span, .. }
            | ParseError::TrailingInput { span }
            | ParseError::InvalidLiteral { span, .. }
            | ParseError::InvalidCount { span, .. }
            | ParseError::TooDeep { span, .. } => *span,
        }
    }
}

/// Failure to turn literal text into phonetic units
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransliterationError {
    #[error("cannot transliterate '{ch}' in '{text}'")]
    UnsupportedCharacter { ch: char, text: String },

    #[error("'{0}' has no pronounceable characters")]
    Empty(String),
}

/// Errors surfaced by [`crate::Session`] and the code generator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("invalid pattern syntax in \"{pattern}\": {source}")]
    InvalidPatternSyntax {
        pattern: String,
        #[source]
        source: ParseError,
    },

    #[error("invalid symbol name \"{0}\" (allowed: A-Z a-z 0-9 _ -)")]
    InvalidSymbolName(String),

    #[error("internal compiler error: {0}")]
    Internal(String),

    #[error(transparent)]
    Transliteration(#[from] TransliterationError),
}

impl CompileError {
    pub fn syntax(pattern: impl Into<String>, source: ParseError) -> Self {
        CompileError::InvalidPatternSyntax {
            pattern: pattern.into(),
            source,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CompileError::Internal(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_messages() {
        let err = ParseError::unexpected_token("')'", "'|'", Span::new(3, 4));
        assert_eq!(err.to_string(), "expected ')', found '|' at 3..4");
        assert_eq!(err.span(), Span::new(3, 4));

        let err = ParseError::InvalidRange {
            min: 3,
            max: 1,
            span: Span::new(3, 8),
        };
        assert_eq!(
            err.to_string(),
            "repeat range {3,1} has a minimum above its maximum at 3..8"
        );
    }

    #[test]
    fn test_compile_error_wraps_parse_error() {
        let err = CompileError::syntax("\"a\" |", ParseError::TrailingInput { span: Span::new(4, 5) });
        assert_eq!(
            err.to_string(),
            "invalid pattern syntax in \"\"a\" |\": pattern continues after a complete expression at 4..5"
        );
    }
}
