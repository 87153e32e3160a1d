//! # Razzie Movie List Loader
//!
//! Reads the semicolon-separated award list (`year;title;studios;producers;winner`)
//! into validated `Movie` records.
//!
//! ## Public API
//!
//! - `parse_movies`: parses CSV text already held in memory (e.g. an upload).
//! - `load_movies_from_reader`: parses any `Read` source.
//! - `load_movies_from_path` / `load_movies_from_dir`: read one file, or every
//!   `*.csv` file in a directory.
//! - `load_movies`: picks the file or directory variant from the path.
//! - `LoaderError`: the specific error types that can be returned from this crate.

pub mod parser;
pub mod error;

pub use parser::{
    load_movies, load_movies_from_dir, load_movies_from_path, load_movies_from_reader,
    parse_movies,
};
pub use error::LoaderError;
