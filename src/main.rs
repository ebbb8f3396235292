use std::io::Read;
use std::process::ExitCode;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};

use allergen_resolver::resolver::{Resolver, ResolverError};

/// Which puzzle answer(s) to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Part {
    One,
    Two,
    Both,
}

/// Allergen resolver: count safe foods and find which food carries each allergen
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the puzzle input (one `<foods> (contains <allergens>)` record per line; `-` for stdin)
    input: String,

    /// Which answer to compute
    #[arg(short, long, value_enum, default_value_t = Part::Both)]
    part: Part,

    /// Also print the resolved `allergen: food` pairs (needs part two)
    #[arg(short = 'm', long)]
    show_map: bool,
}

impl Cli {
    /// Reject flag combinations clap cannot express on its own.
    fn validate(&self) -> Result<(), clap::Error> {
        if self.show_map && self.part == Part::One {
            return Err(Cli::command().error(
                ErrorKind::ArgumentConflict,
                "--show-map prints the part two allergen map; use it with --part two or --part both",
            ));
        }
        Ok(())
    }
}

/// Entry point of the allergen resolver CLI.
///
/// Delegates to [`try_main`], printing any error (with code and help for
/// resolver errors) before exiting with code 1.
fn main() -> ExitCode {
    let debug_enabled = std::env::var("ALLERGEN_DEBUG").is_ok();
    allergen_resolver::log::init_logger(debug_enabled);

    if let Err(e) = try_main() {
        if let Some(resolver_err) = e.downcast_ref::<ResolverError>() {
            eprintln!("Error: {}", resolver_err.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Core application logic:
/// 1. Parse CLI arguments.
/// 2. Read the input (file or stdin).
/// 3. Parse the records and compute the requested part(s).
/// 4. Print answers on stdout, timings on stderr.
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    if let Err(e) = cli.validate() {
        e.exit();
    }

    let t_load = Instant::now();
    let input = read_input(&cli.input)?;
    let resolver = Resolver::from_input(&input)?;
    let load_secs = t_load.elapsed().as_secs_f64();
    log::debug!("read {} record(s) from {}", resolver.records().len(), cli.input);

    let t_solve = Instant::now();
    match cli.part {
        Part::One => {
            println!("Part one answer: {}", resolver.safe_food_count());
        }
        Part::Two => {
            let allergen_map = resolver.resolve_allergen_map()?;
            println!("Part two answer: {}", allergen_map.canonical_list());
            if cli.show_map {
                print!("{allergen_map}");
            }
        }
        Part::Both => {
            let solution = resolver.solve()?;
            println!("Part one answer: {}", solution.safe_food_count);
            println!("Part two answer: {}", solution.canonical_list);
            if cli.show_map {
                print!("{}", solution.allergen_map);
            }
        }
    }
    let solve_secs = t_solve.elapsed().as_secs_f64();

    eprintln!(
        "Parsed {} records in {:.3}s; solved in {:.3}s.",
        resolver.records().len(),
        load_secs,
        solve_secs
    );

    Ok(())
}

/// Read the whole input from `path`, or from stdin when `path` is `-`.
fn read_input(path: &str) -> std::io::Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }

    std::fs::read_to_string(path).map_err(|e| {
        std::io::Error::new(e.kind(), format!("failed to read input from '{path}': {e}"))
    })
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_map_rejected_with_part_one() {
        let cli = Cli::try_parse_from(["allergens", "input.txt", "--part", "one", "--show-map"]).unwrap();
        let err = cli.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_show_map_allowed_with_part_two_and_both() {
        for part in ["two", "both"] {
            let cli = Cli::try_parse_from(["allergens", "-", "-p", part, "-m"]).unwrap();
            assert!(cli.validate().is_ok(), "--part {part}");
        }
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["allergens", "input.txt"]).unwrap();
        assert_eq!(cli.part, Part::Both);
        assert!(!cli.show_map);
        assert!(cli.validate().is_ok());
    }
}
