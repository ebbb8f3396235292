//! The allergen resolver: safe-food counting and allergen -> food resolution.
//!
//! # Error Handling
//!
//! The resolver uses [`ResolverError`] with two variants:
//!
//! - R001: `MalformedRecord` (An input line failed to parse (wraps [`ParseError`]))
//! - R002: `UnsolvableInput` (Narrowing cannot resolve every allergen to a single food)
//!
//! Each error has a `code()`, optional `help()`, and `display_detailed()` method.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```
//! use allergen_resolver::resolver;
//!
//! let input = "mxmxvkd kfcds sqjhc nhms (contains dairy, fish)
//! trh fvjkl sbzzf mxmxvkd (contains dairy)
//! sqjhc fvjkl (contains soy)
//! sqjhc mxmxvkd sbzzf (contains fish)";
//!
//! let solution = resolver::solve(input)?;
//! assert_eq!(solution.safe_food_count, 5);
//! assert_eq!(solution.canonical_list, "mxmxvkd,sqjhc,fvjkl");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Handling Errors with Detailed Messages
//!
//! ```
//! use allergen_resolver::resolver::{self, ResolverError};
//!
//! match resolver::solve("a b (contains x, y)") {
//!     Ok(solution) => println!("{}", solution.canonical_list),
//!     Err(e) => {
//!         // code R002, with a hint about ambiguous data
//!         eprintln!("{}", e.display_detailed());
//!         assert!(matches!(e, ResolverError::UnsolvableInput { .. }));
//!     }
//! }
//! ```

use crate::candidates::{AllergenMap, CandidateMap, Unsolvable};
use crate::errors::ParseError;
use crate::record::RecordList;
use instant::Instant;
use log::{debug, info};
use std::collections::BTreeSet;
use std::rc::Rc;
use std::time::Duration;

/// Unified error type for the resolver pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    /// An input line did not match `<foods> (contains <allergens>)`.
    #[error("{0}")]
    MalformedRecord(#[from] Box<ParseError>),

    /// Narrowing could not reduce every allergen to exactly one food.
    #[error("unsolvable input: {reason}")]
    UnsolvableInput { reason: Unsolvable },
}

impl From<Unsolvable> for ResolverError {
    fn from(reason: Unsolvable) -> Self {
        ResolverError::UnsolvableInput { reason }
    }
}

impl ResolverError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ResolverError::MalformedRecord(_) => "R001",
            ResolverError::UnsolvableInput { .. } => "R002",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            ResolverError::MalformedRecord(_) => "An input line failed to parse",
            ResolverError::UnsolvableInput { .. } => "Allergens cannot be resolved to a unique food each",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            ResolverError::MalformedRecord(_) => "The input could not be parsed into records. This wraps an underlying ParseError (see Parse Errors section for specific error codes).",
            ResolverError::UnsolvableInput { .. } => "After intersecting the records, some allergen has no candidate food left, two allergens claim the same food, or a narrowing pass made no progress while allergens were still ambiguous. The input does not have a unique allergen-to-food assignment.",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            ResolverError::UnsolvableInput { .. } => Some("Check that every allergen is listed in enough dishes to single out one food, and that no two allergens can only be in the same food"),
            ResolverError::MalformedRecord(_) => None, // ParseError has its own help
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        match self {
            ResolverError::MalformedRecord(pe) => {
                // delegate to ParseError's detailed display
                format!("{}\n  caused by: {}", self.code(), pe.display_detailed())
            }
            ResolverError::UnsolvableInput { .. } => {
                crate::errors::format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
            }
        }
    }
}

/// Both puzzle answers for one input.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Occurrences of foods that cannot carry any allergen.
    pub safe_food_count: usize,
    /// The resolved allergen -> food mapping.
    pub allergen_map: AllergenMap,
    /// `allergen_map`'s foods joined by `,` in allergen-name order.
    pub canonical_list: String,
    /// Wall-clock time spent parsing and resolving.
    pub elapsed: Duration,
}

/// Parsed records plus the operations over them.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    records: RecordList,
}

impl Resolver {
    #[must_use]
    pub fn new(records: RecordList) -> Self {
        Resolver { records }
    }

    /// Parse `input` into a resolver.
    ///
    /// # Errors
    ///
    /// Returns `ResolverError::MalformedRecord` for the first bad line.
    pub fn from_input(input: &str) -> Result<Self, ResolverError> {
        Ok(Resolver::new(RecordList::parse_from_str(input)?))
    }

    #[must_use]
    pub fn records(&self) -> &RecordList {
        &self.records
    }

    /// Candidate sets after intersecting every record (before any locking).
    #[must_use]
    pub fn candidate_map(&self) -> CandidateMap {
        CandidateMap::build(&self.records)
    }

    /// Union of the candidate sets: foods that might carry some allergen.
    #[must_use]
    pub fn possibly_allergenic_foods(&self) -> BTreeSet<Rc<str>> {
        self.candidate_map().possibly_allergenic()
    }

    /// Foods that cannot carry any allergen.
    #[must_use]
    pub fn safe_foods(&self) -> BTreeSet<Rc<str>> {
        let risky = self.possibly_allergenic_foods();
        self.records
            .food_universe()
            .into_iter()
            .filter(|food| !risky.contains(food))
            .collect()
    }

    /// Number of food occurrences, summed over all records, whose food is safe.
    #[must_use]
    pub fn safe_food_count(&self) -> usize {
        let safe = self.safe_foods();
        self.records
            .iter()
            .map(|record| record.foods.iter().filter(|food| safe.contains(*food)).count())
            .sum()
    }

    /// Resolve each allergen to the single food that carries it.
    ///
    /// # Errors
    ///
    /// Returns `ResolverError::UnsolvableInput` when narrowing cannot finish.
    pub fn resolve_allergen_map(&self) -> Result<AllergenMap, ResolverError> {
        Ok(self.candidate_map().resolve()?)
    }

    /// Both answers at once.
    ///
    /// # Errors
    ///
    /// Returns `ResolverError::UnsolvableInput` when narrowing cannot finish.
    pub fn solve(&self) -> Result<Solution, ResolverError> {
        let start = Instant::now();
        let safe_food_count = self.safe_food_count();
        let allergen_map = self.resolve_allergen_map()?;
        let canonical_list = allergen_map.canonical_list();
        Ok(Solution { safe_food_count, allergen_map, canonical_list, elapsed: start.elapsed() })
    }
}

/// Parse `input` and compute both answers.
///
/// # Errors
///
/// Will return `ResolverError` if a line is malformed or the allergens cannot
/// be resolved; no partial result is returned.
pub fn solve(input: &str) -> Result<Solution, ResolverError> {
    let start = Instant::now();
    let resolver = Resolver::from_input(input)?;
    let mut solution = resolver.solve()?;
    solution.elapsed = start.elapsed();

    info!(
        "resolved {} allergen(s) from {} record(s) in {:.3}ms",
        solution.allergen_map.len(),
        resolver.records().len(),
        solution.elapsed.as_secs_f64() * 1000.0
    );
    Ok(solution)
}

/// Part one only: parse `input` and count safe food occurrences.
///
/// # Errors
///
/// Will return `ResolverError::MalformedRecord` if a line is malformed.
pub fn count_safe_foods(input: &str) -> Result<usize, ResolverError> {
    let count = Resolver::from_input(input)?.safe_food_count();
    debug!("safe food occurrences: {count}");
    Ok(count)
}

/// Part two only: parse `input` and return the canonical dangerous-food list.
///
/// # Errors
///
/// Will return `ResolverError` if a line is malformed or resolution fails.
pub fn resolve_dangerous_list(input: &str) -> Result<String, ResolverError> {
    Ok(Resolver::from_input(input)?.resolve_allergen_map()?.canonical_list())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "mxmxvkd kfcds sqjhc nhms (contains dairy, fish)
trh fvjkl sbzzf mxmxvkd (contains dairy)
sqjhc fvjkl (contains soy)
sqjhc mxmxvkd sbzzf (contains fish)";

    fn names(set: &BTreeSet<Rc<str>>) -> Vec<&str> {
        set.iter().map(|s| &**s).collect()
    }

    #[test]
    fn test_sample_part_one() {
        assert_eq!(count_safe_foods(SAMPLE).unwrap(), 5);
    }

    #[test]
    fn test_sample_part_two() {
        assert_eq!(resolve_dangerous_list(SAMPLE).unwrap(), "mxmxvkd,sqjhc,fvjkl");
    }

    #[test]
    fn test_sample_safe_foods() {
        let resolver = Resolver::from_input(SAMPLE).unwrap();
        assert_eq!(names(&resolver.safe_foods()), vec!["kfcds", "nhms", "sbzzf", "trh"]);
        assert_eq!(names(&resolver.possibly_allergenic_foods()), vec!["fvjkl", "mxmxvkd", "sqjhc"]);
    }

    #[test]
    fn test_solve_returns_both_answers() {
        let solution = solve(SAMPLE).unwrap();
        assert_eq!(solution.safe_food_count, 5);
        assert_eq!(solution.canonical_list, "mxmxvkd,sqjhc,fvjkl");
        assert_eq!(solution.allergen_map.food_for("soy"), Some("fvjkl"));
    }

    #[test]
    fn test_empty_input() {
        let solution = solve("").unwrap();
        assert_eq!(solution.safe_food_count, 0);
        assert_eq!(solution.canonical_list, "");
    }

    #[test]
    fn test_part_one_survives_ambiguous_input() {
        // two allergens, two foods, no way to tell them apart; `c` is still safe
        let input = "a b c (contains x, y)\na b (contains x, y)";
        assert_eq!(count_safe_foods(input).unwrap(), 1);
        assert!(matches!(
            resolve_dangerous_list(input),
            Err(ResolverError::UnsolvableInput { reason: Unsolvable::Stalled { .. } })
        ));
        assert!(solve(input).is_err());
    }

    #[test]
    fn test_malformed_record_propagates() {
        let err = solve("a b (contains x)\nbroken line").unwrap_err();
        assert_eq!(err.code(), "R001");
        let detailed = err.display_detailed();
        assert!(detailed.starts_with("R001\n  caused by: "));
        assert!(detailed.contains("line 2"));
        assert!(detailed.contains("(E001)"));
    }

    #[test]
    fn test_unsolvable_detailed_display() {
        let err = solve("a (contains x)\na (contains y)").unwrap_err();
        assert_eq!(err.code(), "R002");
        let detailed = err.display_detailed();
        assert!(detailed.contains("unsolvable input"));
        assert!(detailed.contains("(R002)"));
        assert!(detailed.contains("Check that every allergen"));
    }

    #[test]
    fn test_error_codes_are_unique() {
        let errors = [
            ResolverError::MalformedRecord(Box::new(ParseError::MalformedRecord {
                line_number: 1,
                line: "x".to_string(),
                reason: "expected \"(contains <allergens>)\" at column 2".to_string(),
            })),
            ResolverError::UnsolvableInput { reason: Unsolvable::NoCandidates { allergen: "x".to_string() } },
        ];
        let codes: std::collections::HashSet<_> = errors.iter().map(ResolverError::code).collect();
        assert_eq!(codes.len(), errors.len());
        assert!(errors[0].help().is_none());
        assert!(errors[1].help().is_some());
    }
}
