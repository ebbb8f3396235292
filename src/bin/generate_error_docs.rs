//! Generate error code documentation from the source of truth (error enums).
//!
//! Codes, descriptions, details and help text come straight from the
//! `code()`, `description()`, `details()` and `help()` methods of
//! `ParseError` and `ResolverError`.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use allergen_resolver::candidates::Unsolvable;
use allergen_resolver::errors::ParseError;
use allergen_resolver::resolver::ResolverError;

/// Macro to generate error documentation for any error type
/// with `code()`, `description()`, `details()`, `help()`, and `display_detailed()` methods
macro_rules! generate_error_docs {
    ($errors:expr) => {
        for error in $errors {
            println!("### {}: {}\n", error.code(), error.description());
            println!("**Details:** {}\n", error.details());

            if let Some(help_text) = error.help() {
                println!("**How to fix:**");
                println!("```");
                println!("{}", help_text);
                println!("```\n");
            }

            println!("**Example error message:**");
            println!("```");
            println!("{}", error);
            println!("```\n");

            println!("**Detailed format:**");
            println!("```");
            println!("{}", error.display_detailed());
            println!("```\n");

            println!("---\n");
        }
    };
}

fn sample_malformed_record() -> ParseError {
    ParseError::MalformedRecord {
        line_number: 3,
        line: "sqjhc fvjkl soy".to_string(),
        reason: "expected \"(contains <allergens>)\" at column 12".to_string(),
    }
}

/// One of each `ParseError` variant
fn all_parse_error_variants() -> Vec<ParseError> {
    vec![
        sample_malformed_record(),
        ParseError::NomError { kind: nom::error::ErrorKind::Tag, remaining: "soy".to_string() },
    ]
}

/// One of each `ResolverError` variant (and each `Unsolvable` reason)
fn all_resolver_error_variants() -> Vec<ResolverError> {
    vec![
        ResolverError::MalformedRecord(Box::new(sample_malformed_record())),
        ResolverError::UnsolvableInput {
            reason: Unsolvable::NoCandidates { allergen: "fish".to_string() },
        },
        ResolverError::UnsolvableInput {
            reason: Unsolvable::SharedFood {
                food: "mxmxvkd".to_string(),
                first: "dairy".to_string(),
                second: "fish".to_string(),
            },
        },
        ResolverError::UnsolvableInput {
            reason: Unsolvable::Stalled { unresolved: vec!["fish".to_string(), "soy".to_string()] },
        },
    ]
}

fn main() {
    println!("# Error Code Reference\n");
    println!("**This document is auto-generated from the source code. Do not edit manually.**\n");

    println!("## Table of Contents\n");
    println!("- [Resolver Errors (R001–R002)](#resolver-errors)");
    println!("- [Parse Errors (E001–E002)](#parse-errors)\n");

    println!("## Resolver Errors\n");
    println!("Top-level errors from the resolver. R001 wraps a parse error; R002 covers every way narrowing can fail.\n");
    generate_error_docs!(all_resolver_error_variants());

    println!("## Parse Errors\n");
    println!("Errors that occur when parsing input lines into records.\n");
    generate_error_docs!(all_parse_error_variants());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_parse_code_is_documented_once() {
        let codes: Vec<_> = all_parse_error_variants().iter().map(ParseError::code).collect();
        let unique: HashSet<_> = codes.iter().collect();
        assert_eq!(codes, vec!["E001", "E002"]);
        assert_eq!(unique.len(), codes.len());
    }

    #[test]
    fn test_every_resolver_code_is_documented() {
        let codes: HashSet<_> = all_resolver_error_variants().iter().map(ResolverError::code).collect();
        assert_eq!(codes, HashSet::from(["R001", "R002"]));
    }
}
