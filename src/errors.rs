//! Error types for record parsing, with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code for documentation lookup:
//!
//! - E001: `MalformedRecord` (Input line does not match `<foods> (contains <allergens>)`)
//! - E002: `NomError` (Low-level nom parser error)
//!
//! `NomError` is what the nom combinators produce internally; the record parser
//! always wraps it into a `MalformedRecord` carrying the offending line before
//! returning, so callers only ever see E001.
//!
//! # Examples
//!
//! ```
//! use allergen_resolver::errors::ParseError;
//! use allergen_resolver::record::Record;
//!
//! match "mxmxvkd kfcds (dairy)".parse::<Record>() {
//!     Err(e) => {
//!         println!("Error: {}", e);
//!         println!("Code: {}", e.code());
//!         if let Some(help) = e.help() {
//!             println!("Help: {}", help);
//!         }
//!         assert!(matches!(*e, ParseError::MalformedRecord { .. }));
//!     }
//!     Ok(_) => unreachable!(),
//! }
//! ```

use nom::error::{ErrorKind, ParseError as NomParseError};

/// Custom error type for parsing operations
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("malformed record on line {line_number}: {reason} (\"{line}\")")]
    MalformedRecord {
        line_number: usize,
        line: String,
        reason: String,
    },

    // nom parser error (lowest level); `remaining` is the unconsumed input
    #[error("nom parser error: {kind:?} at \"{remaining}\"")]
    NomError { kind: ErrorKind, remaining: String },
}

impl<'a> NomParseError<&'a str> for Box<ParseError> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        Box::new(ParseError::NomError { kind, remaining: input.to_string() })
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        // keep the innermost (most specific) position
        other
    }
}

impl ParseError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::MalformedRecord { .. } => "E001",
            ParseError::NomError { .. } => "E002",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            ParseError::MalformedRecord { .. } => "Input line does not match the record pattern",
            ParseError::NomError { .. } => "Low-level nom parser error",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            ParseError::MalformedRecord { .. } => "Every non-blank line must list one or more whitespace-separated foods followed by a parenthesized, comma-separated allergen list introduced by `contains`. Parsing stops at the first line that does not, and no partial result is produced.",
            ParseError::NomError { .. } => "A parser combinator failed at the reported position. This is normally wrapped into a MalformedRecord error that names the offending line.",
        }
    }

    /// Returns a helpful suggestion or example for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            ParseError::MalformedRecord { .. } => Some("Expected format: 'mxmxvkd kfcds sqjhc (contains dairy, fish)'"),
            ParseError::NomError { .. } => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn malformed() -> ParseError {
        ParseError::MalformedRecord {
            line_number: 3,
            line: "sqjhc fvjkl soy".to_string(),
            reason: "expected \"(contains\" at column 13".to_string(),
        }
    }

    #[test]
    fn test_error_codes_and_help() {
        let err = malformed();
        assert_eq!(err.code(), "E001");
        assert!(err.help().is_some());
        let detailed = err.display_detailed();
        assert!(detailed.contains("E001"));
        assert!(detailed.contains("Expected format"));
    }

    #[test]
    fn test_malformed_record_message_names_line() {
        let msg = malformed().to_string();
        assert!(msg.contains("line 3"));
        assert!(msg.contains("sqjhc fvjkl soy"));
        assert!(msg.contains("column 13"));
    }

    #[test]
    fn test_all_error_codes_are_unique() {
        let errors = [
            malformed(),
            ParseError::NomError { kind: ErrorKind::Tag, remaining: "soy".to_string() },
        ];
        let mut codes = std::collections::HashSet::new();
        for err in &errors {
            assert!(err.code().starts_with("E0"), "bad code {}", err.code());
            assert!(codes.insert(err.code()), "Duplicate error code found: {}", err.code());
        }
    }

    #[test]
    fn test_nom_error_has_no_help() {
        let err = ParseError::NomError { kind: ErrorKind::Char, remaining: ")".to_string() };
        assert!(err.help().is_none());
        assert_eq!(err.display_detailed(), format!("{err} (E002)"));
    }

    #[test]
    fn test_from_error_kind_captures_remaining_input() {
        let err = <Box<ParseError> as NomParseError<&str>>::from_error_kind("(soy)", ErrorKind::Tag);
        match *err {
            ParseError::NomError { kind, remaining } => {
                assert_eq!(kind, ErrorKind::Tag);
                assert_eq!(remaining, "(soy)");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
