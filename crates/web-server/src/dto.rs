use chrono::{DateTime, Utc};
use core_types::{CoreError, Movie, ProducerInterval};
use serde::{Deserialize, Serialize};

/// Request body for creating or replacing a movie.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieInput {
    pub year: i32,
    pub title: String,
    #[serde(default)]
    pub studios: Option<String>,
    pub producers: Vec<String>,
    pub winner: bool,
}

impl MovieInput {
    pub fn into_movie(self) -> Result<Movie, CoreError> {
        Movie::from_raw(
            self.year,
            &self.title,
            self.studios.as_deref(),
            &self.producers,
            self.winner,
        )
    }
}

/// One entry of the per-producer breakdown. The producer is the map key.
#[derive(Debug, Clone, Serialize)]
pub struct IntervalEntry {
    pub interval: u32,
    pub previous_win: i32,
    pub following_win: i32,
}

impl From<&ProducerInterval> for IntervalEntry {
    fn from(interval: &ProducerInterval) -> Self {
        Self {
            interval: interval.gap(),
            previous_win: interval.previous_win().value(),
            following_win: interval.following_win().value(),
        }
    }
}

/// Outcome of replacing the catalog from a CSV source.
#[derive(Debug, Clone, Serialize)]
pub struct LoadSummary {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub total_movies: usize,
    pub winner_movies: usize,
    pub non_winner_movies: usize,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemDetail {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub timestamp: DateTime<Utc>,
}

impl ProblemDetail {
    pub fn new(title: impl Into<String>, status: u16, detail: impl Into<String>) -> Self {
        Self {
            kind: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: detail.into(),
            timestamp: Utc::now(),
        }
    }
}
