//! `bench_local.rs`: quick local timing runner (no Criterion)
//!
//! PURPOSE
//! -------
//! - Ad-hoc timing of the resolver on seeded synthetic puzzles of growing size.
//! - Each case is generated once, then solved several times; the median is reported.
//! - Every run is checked against the puzzle's known answer.
//!
//! HOW TO RUN
//! ----------
//! - Optimized build:       `cargo run --bin bench_local --release`
//! - Multiple repeats:      `cargo run --bin bench_local --release -- -r 5`
//! - Different puzzles:     `cargo run --bin bench_local --release -- -s 42`
//! - See all flags:         `cargo run --bin bench_local -- --help`
//!
//! NOTES
//! -----
//! - Not statistically rigorous; use the same machine and `--release` when comparing.
//! - Generation and printing happen outside the timed section.

use allergen_resolver::resolver;
use allergen_resolver::synthetic::{PuzzleParams, SyntheticPuzzle};
use clap::Parser;
use std::hint::black_box;
use std::time::Instant;

/// Local benchmark runner over synthetic allergen puzzles.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of repeats per case (median is reported)
    #[arg(short = 'r', long = "repeats", default_value_t = 3)]
    num_repeats: usize,

    /// Seed for puzzle generation
    #[arg(short = 's', long, default_value_t = 2020)]
    seed: u64,
}

/// Case name plus the shape of the generated puzzle.
struct Case {
    name: &'static str,
    params: PuzzleParams,
}

/// Edit/add cases here.
fn get_cases() -> Vec<Case> {
    vec![
        // roughly the size of a real puzzle input
        Case { name: "puzzle-sized", params: PuzzleParams { allergens: 8, inert_foods: 200, filler_records: 30 } },
        Case { name: "many-allergens", params: PuzzleParams { allergens: 60, inert_foods: 200, filler_records: 30 } },
        Case { name: "many-foods", params: PuzzleParams { allergens: 8, inert_foods: 5_000, filler_records: 30 } },
        Case { name: "many-records", params: PuzzleParams { allergens: 8, inert_foods: 200, filler_records: 2_000 } },
        Case { name: "large", params: PuzzleParams { allergens: 100, inert_foods: 2_000, filler_records: 500 } },
    ]
}

/// Small helper: robust central tendency for small samples.
fn median(mut xs: Vec<f64>) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.sort_by(f64::total_cmp);
    let n = xs.len();
    if n % 2 == 1 {
        xs[n / 2]
    } else {
        0.5 * (xs[n / 2 - 1] + xs[n / 2])
    }
}

fn main() {
    let cli = Cli::parse();
    let mut summary: Vec<(&'static str, usize, f64)> = Vec::new();

    for (idx, case) in get_cases().iter().enumerate() {
        let puzzle = SyntheticPuzzle::generate(&case.params, cli.seed);
        let input = puzzle.input();
        eprintln!("\n[{:02}] {} ({} records, {} bytes)", idx + 1, case.name, puzzle.lines.len(), input.len());

        let mut times = Vec::with_capacity(cli.num_repeats);
        for rep in 0..cli.num_repeats {
            let t_solve = Instant::now();
            let result = resolver::solve(black_box(&input));
            let secs = t_solve.elapsed().as_secs_f64();

            match result {
                Ok(solution) => {
                    let ok = solution.safe_food_count == puzzle.expected_safe_count
                        && solution.canonical_list == puzzle.expected_canonical_list();
                    if !ok {
                        eprintln!("  ✗ run {}/{}: wrong answer", rep + 1, cli.num_repeats);
                        continue;
                    }
                    times.push(secs);
                    eprintln!("  run {:>2}/{:>2}: {:.4}s", rep + 1, cli.num_repeats, secs);
                }
                Err(e) => {
                    eprintln!("  ✗ run {}/{} failed: {}", rep + 1, cli.num_repeats, e.display_detailed());
                }
            }
        }

        let med = median(times);
        eprintln!("  → median {med:.4}s over {} run(s)", cli.num_repeats);
        summary.push((case.name, puzzle.lines.len(), med));
    }

    eprintln!("\n==== Summary ====");
    eprintln!("{:<16} | {:>9} | {:>10}", "case", "# records", "median (s)");
    eprintln!("{:-<16}-+-{:-<9}-+-{:-<10}", "", "", "");
    for (name, records, med) in &summary {
        eprintln!("{name:<16} | {records:>9} | {med:>10.4}");
    }
}
