//! Seeded generator for puzzle inputs with a known answer.
//!
//! Allergen `i` (in construction order) is carried by dangerous food `d_i`.
//! Two records per allergen list `d_i..d_{n-1}` plus two disjoint random
//! subsets of the inert foods, so that allergen's candidates narrow to exactly
//! `{d_i..d_{n-1}}` and resolution peels the allergens off from the last one.
//! Filler records list every dangerous food, some inert foods and a random
//! subset of allergens; they never narrow anything.
//!
//! Names are shuffled so alphabetical order differs from construction order,
//! and the lines are shuffled too.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, BTreeSet};

/// Shape of a generated puzzle.
#[derive(Debug, Clone, Copy)]
pub struct PuzzleParams {
    pub allergens: usize,
    pub inert_foods: usize,
    pub filler_records: usize,
}

impl Default for PuzzleParams {
    fn default() -> Self {
        PuzzleParams { allergens: 8, inert_foods: 200, filler_records: 30 }
    }
}

/// A generated input together with the answers it must produce.
#[derive(Debug, Clone)]
pub struct SyntheticPuzzle {
    /// Input lines, already shuffled.
    pub lines: Vec<String>,
    /// allergen -> the food that carries it
    pub expected_map: BTreeMap<String, String>,
    pub expected_safe_count: usize,
}

impl SyntheticPuzzle {
    /// Generate a uniquely solvable puzzle; the same seed gives the same puzzle.
    #[must_use]
    pub fn generate(params: &PuzzleParams, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let allergens = shuffled_names(&mut rng, params.allergens, 4);
        let mut foods = shuffled_names(&mut rng, params.allergens + params.inert_foods, 6);
        let inert = foods.split_off(params.allergens);
        let dangerous = foods;

        let mut records: Vec<(Vec<String>, Vec<String>)> = Vec::new();

        for (i, allergen) in allergens.iter().enumerate() {
            // each inert food goes to at most one of the pair
            let mut first = dangerous[i..].to_vec();
            let mut second = dangerous[i..].to_vec();
            for food in &inert {
                match rng.gen_range(0..3) {
                    0 => first.push(food.clone()),
                    1 => second.push(food.clone()),
                    _ => {}
                }
            }
            records.push((first, vec![allergen.clone()]));
            records.push((second, vec![allergen.clone()]));
        }

        if !allergens.is_empty() {
            for _ in 0..params.filler_records {
                let mut dish = dangerous.clone();
                dish.extend(inert.iter().filter(|_| rng.gen_bool(0.5)).cloned());

                let anchor = rng.gen_range(0..allergens.len());
                let listed: Vec<String> = allergens
                    .iter()
                    .enumerate()
                    .filter(|(idx, _)| *idx == anchor || rng.gen_bool(0.3))
                    .map(|(_, allergen)| allergen.clone())
                    .collect();
                records.push((dish, listed));
            }
        }

        let dangerous_set: BTreeSet<&String> = dangerous.iter().collect();
        let expected_safe_count = records
            .iter()
            .map(|(dish, _)| dish.iter().filter(|food| !dangerous_set.contains(food)).count())
            .sum();

        let mut lines: Vec<String> = records
            .into_iter()
            .map(|(mut dish, listed)| {
                dish.shuffle(&mut rng);
                format!("{} (contains {})", dish.join(" "), listed.join(", "))
            })
            .collect();
        lines.shuffle(&mut rng);

        let expected_map = allergens.into_iter().zip(dangerous).collect();

        SyntheticPuzzle { lines, expected_map, expected_safe_count }
    }

    /// The puzzle input, one record per line.
    #[must_use]
    pub fn input(&self) -> String {
        self.lines.join("\n")
    }

    /// The same records with their lines in a different order.
    #[must_use]
    pub fn reordered_input(&self, seed: u64) -> String {
        let mut lines = self.lines.clone();
        lines.shuffle(&mut StdRng::seed_from_u64(seed));
        lines.join("\n")
    }

    /// The expected answer to part two.
    #[must_use]
    pub fn expected_canonical_list(&self) -> String {
        self.expected_map.values().cloned().collect::<Vec<_>>().join(",")
    }
}

// `count` distinct lowercase names of `width` letters, in random order
fn shuffled_names(rng: &mut StdRng, count: usize, width: u32) -> Vec<String> {
    let mut indices: Vec<usize> = (0..count).collect();
    indices.shuffle(rng);
    indices.into_iter().map(|idx| letters(idx, width)).collect()
}

// fixed-width base-26 spelling of `idx`
fn letters(mut idx: usize, width: u32) -> String {
    let mut out = vec![b'a'; width as usize];
    for slot in out.iter_mut().rev() {
        *slot = b'a' + (idx % 26) as u8;
        idx /= 26;
    }
    String::from_utf8_lossy(&out).into_owned()
}
