//! # Razzie Core Types
//!
//! The validated value types shared by every other crate in the workspace.
//! A value of any of these types upholds its invariants by construction, so
//! downstream code (the interval calculator in particular) never re-checks them.
//!
//! - `Year`: an award year in `1900..=2100`.
//! - `Producer`: a non-blank producer name.
//! - `Movie`: one award record (title, year, studios, producers, winner flag).
//! - `ProducerInterval`: the gap between two consecutive wins of one producer.

pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use structs::{Movie, MovieId, Producer, ProducerInterval, Year};
