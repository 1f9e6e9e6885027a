use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserAttempt {
    pub parser: &'static str,
    pub message: String,
}

impl ParserAttempt {
    pub fn new(parser: &'static str, message: impl Into<String>) -> Self {
        Self {
            parser,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParserAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.parser, self.message)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParserError {
    #[error("{parser} format mismatch: {reason}")]
    FormatMismatch {
        parser: &'static str,
        reason: String,
    },

    #[error("timestamp is empty")]
    Empty,

    #[error("no parser recognized timestamp {raw:?}; attempts: {attempts:?}")]
    NoMatchingParser {
        raw: String,
        attempts: Vec<ParserAttempt>,
    },

    #[error("unknown timezone identifier {0:?}")]
    UnknownTimezone(String),
}

impl ParserError {
    pub(crate) fn mismatch(parser: &'static str, reason: impl Into<String>) -> Self {
        ParserError::FormatMismatch {
            parser,
            reason: reason.into(),
        }
    }
}
