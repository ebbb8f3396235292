// Library API, shared by the CLI and the WASM build
pub mod candidates;
pub mod errors;
mod interner;
pub mod log;
pub mod record;
pub mod resolver;
pub mod synthetic;

// Compile the wasm glue only when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use candidates::{AllergenMap, CandidateMap, Unsolvable};
pub use record::{Record, RecordList};
pub use resolver::{solve, Resolver, ResolverError, Solution};
