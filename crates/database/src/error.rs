use core_types::MovieId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DbError {
    #[error("Movie with id {0} was not found.")]
    NotFound(MovieId),

    #[error("A movie titled '{title}' already exists for year {year}.")]
    Duplicate { title: String, year: i32 },
}
