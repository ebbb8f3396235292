//! `record`: parsing puzzle input lines into food/allergen records.
//!
//! One record per line:
//!
//! ```text
//! mxmxvkd kfcds sqjhc nhms (contains dairy, fish)
//! ```
//!
//! Foods are whitespace-separated, allergens comma-separated inside the
//! `(contains ...)` clause. Names are case-sensitive opaque strings made of any
//! non-whitespace characters other than `(`, `)` and `,`. Blank lines are
//! skipped; every other line must match or the whole parse fails.

use crate::errors::ParseError;
use crate::interner::Interner;
use nom::{
    bytes::complete::{tag, take_while1},
    character::complete::{char, space0, space1},
    multi::separated_list1,
    sequence::{delimited, tuple},
    IResult, Parser,
};
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// Parser result type: input, output, with our custom `ParseError`
pub type PResult<'a, O> = IResult<&'a str, O, Box<ParseError>>;

/// One input line: the foods in a dish and the allergens known to be among them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub foods: BTreeSet<Rc<str>>,
    pub allergens: BTreeSet<Rc<str>>,
}

impl Record {
    /// Build a record from already-split names.
    pub fn new<F, A>(foods: F, allergens: A) -> Self
    where
        F: IntoIterator,
        F::Item: AsRef<str>,
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        Self::new_in(&mut Interner::new(), foods, allergens)
    }

    /// Like [`Record::new`], sharing name allocations through `interner`.
    fn new_in<F, A>(interner: &mut Interner, foods: F, allergens: A) -> Self
    where
        F: IntoIterator,
        F::Item: AsRef<str>,
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        let foods = foods.into_iter().map(|f| interner.intern(f)).collect();
        let allergens = allergens.into_iter().map(|a| interner.intern(a)).collect();
        Record { foods, allergens }
    }

    #[must_use]
    pub fn lists_allergen(&self, allergen: &str) -> bool {
        self.allergens.contains(allergen)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let foods: Vec<&str> = self.foods.iter().map(|s| &**s).collect();
        let allergens: Vec<&str> = self.allergens.iter().map(|s| &**s).collect();
        write!(f, "{} (contains {})", foods.join(" "), allergens.join(", "))
    }
}

impl FromStr for Record {
    type Err = Box<ParseError>;

    /// Parse a single line; errors report it as line 1.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        parse_record(line, 1)
    }
}

/// The parsed puzzle input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordList {
    pub records: Vec<Record>,
}

impl RecordList {
    /// Parse a whole input text, one record per non-blank line.
    ///
    /// Names are interned for the duration of this call only, so records of
    /// one input share allocations and nothing is kept between inputs.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MalformedRecord` for the first line that does not
    /// match `<foods> (contains <allergens>)`.
    pub fn parse_from_str(contents: &str) -> Result<RecordList, Box<ParseError>> {
        let mut interner = Interner::new();
        let records = contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| parse_record_in(&mut interner, line, idx + 1))
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("parsed {} record(s)", records.len());
        Ok(RecordList { records })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Every food mentioned anywhere in the input.
    #[must_use]
    pub fn food_universe(&self) -> BTreeSet<Rc<str>> {
        self.records.iter().flat_map(|r| r.foods.iter().cloned()).collect()
    }

    /// Every allergen mentioned anywhere in the input.
    #[must_use]
    pub fn allergen_universe(&self) -> BTreeSet<Rc<str>> {
        self.records.iter().flat_map(|r| r.allergens.iter().cloned()).collect()
    }

    /// Total number of food occurrences, summed over all records.
    #[must_use]
    pub fn food_occurrences(&self) -> usize {
        self.records.iter().map(|r| r.foods.len()).sum()
    }
}

impl FromStr for RecordList {
    type Err = Box<ParseError>;

    fn from_str(contents: &str) -> Result<Self, Self::Err> {
        RecordList::parse_from_str(contents)
    }
}

impl From<Vec<Record>> for RecordList {
    fn from(records: Vec<Record>) -> Self {
        RecordList { records }
    }
}

impl<'a> IntoIterator for &'a RecordList {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Parse one line into a `Record`. `line_number` is only used for error reporting.
///
/// # Errors
///
/// Returns `ParseError::MalformedRecord` naming the column where parsing stopped.
pub fn parse_record(line: &str, line_number: usize) -> Result<Record, Box<ParseError>> {
    parse_record_in(&mut Interner::new(), line, line_number)
}

fn parse_record_in(
    interner: &mut Interner,
    line: &str,
    line_number: usize,
) -> Result<Record, Box<ParseError>> {
    let trimmed = line.trim();

    let malformed = |rest: &str, expected: &str| {
        let offset = trimmed.len().saturating_sub(rest.len());
        let column = trimmed.get(..offset).map_or(0, |s| s.chars().count()) + 1;
        Box::new(ParseError::MalformedRecord {
            line_number,
            line: trimmed.to_string(),
            reason: format!("{expected} at column {column}"),
        })
    };

    let (rest, foods) = food_list(trimmed)
        .map_err(|e| malformed(failure_point(&e, trimmed), "expected a food name"))?;
    let rest = rest.trim_start();
    let (rest, allergens) = contains_clause(rest)
        .map_err(|e| malformed(failure_point(&e, rest), "expected \"(contains <allergens>)\""))?;
    let rest = rest.trim_start();
    if !rest.is_empty() {
        return Err(malformed(rest, "unexpected input after the allergen list"));
    }

    Ok(Record::new_in(interner, foods, allergens))
}

/// The unconsumed input at which a nom parser gave up.
fn failure_point<'a>(err: &'a nom::Err<Box<ParseError>>, fallback: &'a str) -> &'a str {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => match e.as_ref() {
            ParseError::NomError { remaining, .. } => remaining.as_str(),
            ParseError::MalformedRecord { .. } => fallback,
        },
        nom::Err::Incomplete(_) => fallback,
    }
}

// === Token parsers ===

fn is_name_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '(' | ')' | ',')
}

fn name(input: &str) -> PResult<'_, &str> {
    take_while1(is_name_char).parse(input)
}

// `a b c` (stops before the first token that is not a name, e.g. `(contains`)
fn food_list(input: &str) -> PResult<'_, Vec<&str>> {
    separated_list1(space1, name).parse(input)
}

// `dairy, fish`
fn allergen_list(input: &str) -> PResult<'_, Vec<&str>> {
    separated_list1(tuple((space0, char(','), space0)), name).parse(input)
}

// `(contains dairy, fish)`
fn contains_clause(input: &str) -> PResult<'_, Vec<&str>> {
    delimited(
        tuple((tag("(contains"), space1)),
        allergen_list,
        tuple((space0, char(')'))),
    )
    .parse(input)
}
