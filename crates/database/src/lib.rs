//! # Razzie Database Crate
//!
//! This crate holds the movie catalog the rest of the application reads from.
//! The catalog lives in memory and is rebuilt from the CSV source at startup
//! (and on demand through the data management endpoints).
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All storage details stay behind `MovieRepository`. Callers work
//!   with `core-types` values only.
//! - **Shared & Cheap to Clone:** `MovieRepository` is a handle around shared
//!   state, so it can be cloned into every request handler.
//! - **Snapshot Reads:** Reads return owned copies. No lock is ever held by a
//!   caller, so long computations over the catalog do not block writers.
//!
//! ## Public API
//!
//! - `MovieRepository`: CRUD, winner listing, statistics and wholesale replace.
//! - `CatalogStats`: counts and winning years of the current catalog.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use error::DbError;
pub use repository::{CatalogStats, MovieRepository, YearRange};
