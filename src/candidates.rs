//! Candidate sets and the narrowing passes that resolve them.
//!
//! A [`CandidateMap`] maps each allergen to the foods that could still carry
//! it. It starts from the full food universe for every allergen and is
//! intersected with the food set of every record listing that allergen. After
//! that, every allergen's set is a subset of the intersection of the dishes
//! that mention it.
//!
//! Resolution ("locking") then repeatedly takes every allergen whose set has
//! exactly one food and removes that food from all the other sets, until each
//! allergen has exactly one food. A pass that locks nothing new ends the run
//! with [`Unsolvable::Stalled`] instead of looping.

use crate::record::RecordList;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::Rc;

/// Why narrowing could not produce a one-food-per-allergen mapping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Unsolvable {
    /// Some allergen's candidate set became empty.
    #[error("no food can carry allergen '{allergen}'")]
    NoCandidates { allergen: String },

    /// Two allergens locked onto the same food in the same pass.
    #[error("allergens '{first}' and '{second}' both resolve to food '{food}'")]
    SharedFood { food: String, first: String, second: String },

    /// A pass locked nothing while these allergens still had several candidates.
    #[error("narrowing stalled with {} unresolved allergen(s): {}", .unresolved.len(), .unresolved.join(", "))]
    Stalled { unresolved: Vec<String> },
}

/// Allergen -> foods that could still carry it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateMap {
    sets: BTreeMap<Rc<str>, BTreeSet<Rc<str>>>,
}

impl CandidateMap {
    /// Initialize every allergen to the food universe, then intersect with each
    /// record that lists it.
    #[must_use]
    pub fn build(records: &RecordList) -> Self {
        let universe = records.food_universe();
        let mut sets: BTreeMap<Rc<str>, BTreeSet<Rc<str>>> = records
            .allergen_universe()
            .into_iter()
            .map(|allergen| (allergen, universe.clone()))
            .collect();

        for record in records {
            for allergen in &record.allergens {
                if let Some(foods) = sets.get_mut(allergen) {
                    foods.retain(|food| record.foods.contains(food));
                }
            }
        }

        debug!(
            "built candidate map: {} allergen(s) over {} food(s)",
            sets.len(),
            universe.len()
        );
        CandidateMap { sets }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Current candidates for `allergen`, if it appears in the input.
    #[must_use]
    pub fn candidates(&self, allergen: &str) -> Option<&BTreeSet<Rc<str>>> {
        self.sets.get(allergen)
    }

    /// Iterate `(allergen, candidates)` in ascending allergen order.
    pub fn iter(&self) -> impl Iterator<Item = (&Rc<str>, &BTreeSet<Rc<str>>)> {
        self.sets.iter()
    }

    /// Union of all candidate sets.
    #[must_use]
    pub fn possibly_allergenic(&self) -> BTreeSet<Rc<str>> {
        self.sets.values().flatten().cloned().collect()
    }

    /// True once every candidate set holds exactly one food.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.sets.values().all(|foods| foods.len() == 1)
    }

    /// One narrowing pass.
    ///
    /// Locks every allergen not yet in `locked` whose set has exactly one food
    /// (ties in the same pass are all locked together), then removes each newly
    /// locked food from every other allergen's set. Returns how many allergens
    /// were newly locked.
    ///
    /// # Errors
    ///
    /// [`Unsolvable::NoCandidates`] if some set is already empty, and
    /// [`Unsolvable::SharedFood`] if two allergens lock onto the same food.
    pub fn narrow_pass(
        &mut self,
        locked: &mut BTreeMap<Rc<str>, Rc<str>>,
    ) -> Result<usize, Unsolvable> {
        if let Some((allergen, _)) = self.sets.iter().find(|(_, foods)| foods.is_empty()) {
            return Err(Unsolvable::NoCandidates { allergen: allergen.to_string() });
        }

        let newly_locked: Vec<(Rc<str>, Rc<str>)> = self
            .sets
            .iter()
            .filter(|(allergen, _)| !locked.contains_key(*allergen))
            .filter_map(|(allergen, foods)| only_member(foods).map(|food| (Rc::clone(allergen), food)))
            .collect();

        let mut claimed: BTreeMap<&Rc<str>, &Rc<str>> = BTreeMap::new();
        for (allergen, food) in &newly_locked {
            if let Some(first) = claimed.insert(food, allergen) {
                return Err(Unsolvable::SharedFood {
                    food: food.to_string(),
                    first: first.to_string(),
                    second: allergen.to_string(),
                });
            }
        }

        for (allergen, food) in &newly_locked {
            for (other, foods) in &mut self.sets {
                if other != allergen {
                    foods.remove(food);
                }
            }
        }

        let count = newly_locked.len();
        locked.extend(newly_locked);
        Ok(count)
    }

    /// Run narrowing passes until every allergen has exactly one food.
    ///
    /// # Errors
    ///
    /// Returns [`Unsolvable`] if the data is contradictory or ambiguous.
    pub fn resolve(mut self) -> Result<AllergenMap, Unsolvable> {
        let mut locked = BTreeMap::new();
        let mut pass = 0usize;

        while locked.len() < self.sets.len() {
            pass += 1;
            let newly_locked = self.narrow_pass(&mut locked)?;
            debug!(
                "narrowing pass {pass}: locked {newly_locked}, {}/{} resolved",
                locked.len(),
                self.sets.len()
            );

            if newly_locked == 0 {
                let unresolved = self
                    .sets
                    .keys()
                    .filter(|allergen| !locked.contains_key(*allergen))
                    .map(ToString::to_string)
                    .collect();
                return Err(Unsolvable::Stalled { unresolved });
            }
        }

        Ok(AllergenMap { by_allergen: locked })
    }
}

fn only_member(foods: &BTreeSet<Rc<str>>) -> Option<Rc<str>> {
    if foods.len() == 1 {
        foods.iter().next().cloned()
    } else {
        None
    }
}

/// The resolved allergen -> food bijection, ordered by allergen name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllergenMap {
    by_allergen: BTreeMap<Rc<str>, Rc<str>>,
}

impl AllergenMap {
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_allergen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_allergen.is_empty()
    }

    #[must_use]
    pub fn food_for(&self, allergen: &str) -> Option<&str> {
        self.by_allergen.get(allergen).map(|food| &**food)
    }

    /// `(allergen, food)` pairs in ascending allergen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_allergen.iter().map(|(allergen, food)| (&**allergen, &**food))
    }

    /// Foods joined with `,`, ordered by their allergen's name.
    #[must_use]
    pub fn canonical_list(&self) -> String {
        self.by_allergen
            .values()
            .map(|food| &**food)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for AllergenMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (allergen, food) in self.iter() {
            writeln!(f, "{allergen}: {food}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "mxmxvkd kfcds sqjhc nhms (contains dairy, fish)
trh fvjkl sbzzf mxmxvkd (contains dairy)
sqjhc fvjkl (contains soy)
sqjhc mxmxvkd sbzzf (contains fish)";

    fn map_of(input: &str) -> CandidateMap {
        CandidateMap::build(&input.parse().unwrap())
    }

    fn names(set: &BTreeSet<Rc<str>>) -> Vec<&str> {
        set.iter().map(|s| &**s).collect()
    }

    #[test]
    fn test_build_intersects_records() {
        let map = map_of(SAMPLE);
        assert_eq!(map.len(), 3);
        assert_eq!(names(map.candidates("dairy").unwrap()), vec!["mxmxvkd"]);
        assert_eq!(names(map.candidates("fish").unwrap()), vec!["mxmxvkd", "sqjhc"]);
        assert_eq!(names(map.candidates("soy").unwrap()), vec!["fvjkl", "sqjhc"]);
        assert!(map.candidates("gluten").is_none());
    }

    #[test]
    fn test_possibly_allergenic_is_union() {
        let map = map_of(SAMPLE);
        assert_eq!(names(&map.possibly_allergenic()), vec!["fvjkl", "mxmxvkd", "sqjhc"]);
    }

    #[test]
    fn test_narrow_pass_locks_and_eliminates() {
        let mut map = map_of(SAMPLE);
        let mut locked = BTreeMap::new();

        assert_eq!(map.narrow_pass(&mut locked).unwrap(), 1);
        assert_eq!(names(map.candidates("fish").unwrap()), vec!["sqjhc"]);
        assert_eq!(names(map.candidates("dairy").unwrap()), vec!["mxmxvkd"]);

        assert_eq!(map.narrow_pass(&mut locked).unwrap(), 1);
        assert_eq!(names(map.candidates("soy").unwrap()), vec!["fvjkl"]);

        assert_eq!(map.narrow_pass(&mut locked).unwrap(), 1);
        assert!(map.is_resolved());
        assert_eq!(map.narrow_pass(&mut locked).unwrap(), 0);
    }

    #[test]
    fn test_ties_lock_in_same_pass() {
        let mut map = map_of("a (contains x)\nb (contains y)\na b c (contains z)");
        let mut locked = BTreeMap::new();
        assert_eq!(map.narrow_pass(&mut locked).unwrap(), 2);
        assert_eq!(names(map.candidates("z").unwrap()), vec!["c"]);
    }

    #[test]
    fn test_resolve_sample() {
        let resolved = map_of(SAMPLE).resolve().unwrap();
        assert_eq!(resolved.len(), 3);
        assert_eq!(resolved.food_for("dairy"), Some("mxmxvkd"));
        assert_eq!(resolved.food_for("fish"), Some("sqjhc"));
        assert_eq!(resolved.food_for("soy"), Some("fvjkl"));
        assert_eq!(resolved.canonical_list(), "mxmxvkd,sqjhc,fvjkl");
    }

    #[test]
    fn test_single_record_resolves_immediately() {
        let resolved = map_of("abc (contains x)").resolve().unwrap();
        assert_eq!(resolved.canonical_list(), "abc");
    }

    #[test]
    fn test_stalled_input_is_unsolvable() {
        let err = map_of("a b (contains x, y)").resolve().unwrap_err();
        assert_eq!(err, Unsolvable::Stalled { unresolved: vec!["x".to_string(), "y".to_string()] });
        assert!(err.to_string().contains("2 unresolved allergen(s): x, y"));
    }

    #[test]
    fn test_shared_food_is_unsolvable() {
        let err = map_of("a (contains x)\na (contains y)").resolve().unwrap_err();
        assert_eq!(
            err,
            Unsolvable::SharedFood { food: "a".to_string(), first: "x".to_string(), second: "y".to_string() }
        );
    }

    #[test]
    fn test_empty_candidates_is_unsolvable() {
        let err = map_of("a (contains x)\nb (contains x)").resolve().unwrap_err();
        assert_eq!(err, Unsolvable::NoCandidates { allergen: "x".to_string() });
    }

    #[test]
    fn test_no_allergens_resolves_to_empty_map() {
        let resolved = CandidateMap::default().resolve().unwrap();
        assert!(resolved.is_empty());
        assert_eq!(resolved.canonical_list(), "");
    }

    #[test]
    fn test_display_lists_pairs_in_allergen_order() {
        let resolved = map_of(SAMPLE).resolve().unwrap();
        assert_eq!(resolved.to_string(), "dairy: mxmxvkd\nfish: sqjhc\nsoy: fvjkl\n");
    }
}
