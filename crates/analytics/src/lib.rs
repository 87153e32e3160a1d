//! # Razzie Analytics Engine
//!
//! This crate answers the catalog's one analytical question: which producers
//! went the shortest and the longest time between two consecutive
//! "worst picture" wins.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** This crate has no knowledge of storage, files or HTTP. It
//!   depends only on `core-types`.
//! - **Stateless Calculation:** The `IntervalCalculator` takes a slice of
//!   `Movie`s and returns freshly computed results. Nothing is cached between
//!   calls, so it can be shared freely across threads.
//!
//! ## Public API
//!
//! - `IntervalCalculator`: groups wins per producer and derives the intervals.
//! - `IntervalReport`: the tie-inclusive `min`/`max` interval sets.
//! - `ProducerIntervals`: the full per-producer breakdown.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::IntervalCalculator;
pub use report::{IntervalReport, ProducerIntervals};
