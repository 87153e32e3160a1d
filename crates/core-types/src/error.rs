use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Year must be between {min} and {max}, but was {value}")]
    InvalidYear { value: i32, min: i32, max: i32 },

    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("Producer name must not be empty")]
    EmptyProducerName,

    #[error("A movie must credit at least one producer")]
    NoProducers,

    #[error("Interval of {gap} years does not match wins {previous} -> {following}")]
    IntervalMismatch {
        gap: u32,
        previous: i32,
        following: i32,
    },
}
