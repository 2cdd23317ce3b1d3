pub mod cache;
pub mod comparator;
pub mod exhaustive;
pub mod gradient;
pub mod scoring;
mod strategy;

pub use comparator::{overlap_score, MaskComparator, SearchResult};
pub use scoring::{Score, ScoringPolicy};
pub use strategy::{run_search, SearchOutcome, SearchStrategy, SearchTrace};
