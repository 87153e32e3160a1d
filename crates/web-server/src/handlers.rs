use crate::dto::{IntervalEntry, LoadSummary, MovieInput};
use crate::{error::AppError, AppState};
use analytics::IntervalReport;
use axum::{
    extract::{rejection::JsonRejection, Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use core_types::{Movie, MovieId};
use database::{CatalogStats, MovieRepository};
use std::collections::BTreeMap;
use std::sync::Arc;

pub const HEALTH_MESSAGE: &str = "Golden Raspberry Awards API is running";

/// Multipart field carrying the uploaded CSV file.
pub const UPLOAD_FIELD: &str = "file";

/// # GET /api/v1/health
pub async fn health() -> &'static str {
    HEALTH_MESSAGE
}

/// # GET /api/v1/producers/intervals
/// The producers with the shortest and the longest gap between two consecutive wins.
pub async fn get_producer_intervals(State(state): State<Arc<AppState>>) -> Json<IntervalReport> {
    let movies = state.repo.find_all();
    Json(state.calculator.compute_extremal_intervals(&movies))
}

/// # GET /api/v1/producers/intervals/all
/// Every producer with two or more wins and all of their intervals.
pub async fn get_all_producer_intervals(
    State(state): State<Arc<AppState>>,
) -> Json<BTreeMap<String, Vec<IntervalEntry>>> {
    let movies = state.repo.find_all();
    let breakdown = state
        .calculator
        .compute_all_intervals(&movies)
        .into_iter()
        .map(|(producer, intervals)| {
            (producer, intervals.iter().map(IntervalEntry::from).collect())
        })
        .collect();
    Json(breakdown)
}

/// # GET /api/v1/movies
pub async fn list_movies(State(state): State<Arc<AppState>>) -> Json<Vec<Movie>> {
    Json(state.repo.find_all())
}

/// # GET /api/v1/movies/winners
pub async fn list_winner_movies(State(state): State<Arc<AppState>>) -> Json<Vec<Movie>> {
    Json(state.repo.find_winners())
}

/// # GET /api/v1/movies/:id
pub async fn get_movie(
    Path(id): Path<MovieId>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Movie>, AppError> {
    let movie = state.repo.find_by_id(id)?;
    Ok(Json(movie))
}

/// # POST /api/v1/movies
/// Responds 201 with a `Location` header pointing at the new movie.
pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MovieInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let movie = input.into_movie()?;
    let saved = state.repo.save(movie)?;

    let location = saved
        .id()
        .map(|id| format!("/api/v1/movies/{}", id))
        .unwrap_or_default();
    tracing::info!(location = %location, title = saved.title(), "Created movie.");

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(saved)))
}

/// # PUT /api/v1/movies/:id
pub async fn update_movie(
    Path(id): Path<MovieId>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MovieInput>, JsonRejection>,
) -> Result<Json<Movie>, AppError> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let movie = input.into_movie()?;
    let updated = state.repo.update(id, movie)?;
    Ok(Json(updated))
}

/// # DELETE /api/v1/movies/:id
pub async fn delete_movie(
    Path(id): Path<MovieId>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, AppError> {
    state.repo.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// # POST /api/data/reload
/// Reloads the catalog from the configured CSV source.
pub async fn reload_data(State(state): State<Arc<AppState>>) -> Result<Json<LoadSummary>, AppError> {
    tracing::info!(path = %state.csv_path.display(), "Reloading movie catalog.");

    let path = state.csv_path.clone();
    let movies = tokio::task::spawn_blocking(move || loader::load_movies(&path))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    state.repo.replace_all(movies);
    Ok(Json(summarize(&state.repo, "Data reloaded successfully", None)))
}

/// # POST /api/data/upload-csv
/// Replaces the catalog with the CSV file sent as the multipart `file` field.
pub async fn upload_csv(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<LoadSummary>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().map(str::to_string);
        let content = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        upload = Some((filename, content));
        break;
    }

    let Some((filename, content)) = upload else {
        return Err(AppError::BadRequest(format!(
            "Multipart field '{}' is required",
            UPLOAD_FIELD
        )));
    };
    tracing::info!(filename = ?filename, bytes = content.len(), "Received CSV upload.");

    if content.trim().is_empty() {
        return Err(AppError::BadRequest("File must not be empty".to_string()));
    }
    let filename = match filename {
        Some(name) if name.to_lowercase().ends_with(".csv") => name,
        _ => {
            return Err(AppError::BadRequest(
                "File must have a .csv extension".to_string(),
            ))
        }
    };

    let movies = loader::parse_movies(&content, &filename)
        .map_err(|e| AppError::BadRequest(format!("Invalid CSV: {}", e)))?;
    if movies.is_empty() {
        return Err(AppError::BadRequest("No valid movies found in CSV".to_string()));
    }

    state.repo.replace_all(movies);
    Ok(Json(summarize(&state.repo, "CSV loaded successfully", Some(filename))))
}

/// # GET /api/data/stats
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<CatalogStats> {
    Json(state.repo.stats())
}

fn summarize(repo: &MovieRepository, message: &str, filename: Option<String>) -> LoadSummary {
    let stats = repo.stats();
    tracing::info!(
        total = stats.total_movies,
        winners = stats.winner_movies,
        "Catalog loaded."
    );
    LoadSummary {
        success: true,
        message: message.to_string(),
        filename,
        total_movies: stats.total_movies,
        winner_movies: stats.winner_movies,
        non_winner_movies: stats.non_winner_movies,
    }
}
