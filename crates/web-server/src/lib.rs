use analytics::IntervalCalculator;
use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use configuration::Settings;
use database::MovieRepository;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod dto;
pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub repo: MovieRepository,
    pub calculator: IntervalCalculator,
    /// The CSV file or directory `POST /api/data/reload` reads from.
    pub csv_path: PathBuf,
}

impl AppState {
    pub fn new(repo: MovieRepository, csv_path: impl Into<PathBuf>) -> Self {
        Self {
            repo,
            calculator: IntervalCalculator::new(),
            csv_path: csv_path.into(),
        }
    }
}

/// Builds the application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    Router::new()
        .route("/api/v1/health", get(handlers::health))
        .route("/api/v1/producers/intervals", get(handlers::get_producer_intervals))
        .route("/api/v1/producers/intervals/all", get(handlers::get_all_producer_intervals))
        .route("/api/v1/movies", get(handlers::list_movies).post(handlers::create_movie))
        .route("/api/v1/movies/winners", get(handlers::list_winner_movies))
        .route(
            "/api/v1/movies/:id",
            get(handlers::get_movie)
                .put(handlers::update_movie)
                .delete(handlers::delete_movie),
        )
        .route("/api/data/reload", post(handlers::reload_data))
        .route("/api/data/upload-csv", post(handlers::upload_csv))
        .route("/api/data/stats", get(handlers::get_stats))
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024 * 10)) // Set a 10MB body limit for CSV uploads
}

/// Loads the catalog from the configured CSV source and serves the API until Ctrl-C.
///
/// Tracing must already be initialised by the caller.
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let addr = settings.server.socket_addr()?;
    let csv_path = settings.data.csv_path;

    let movies = loader::load_movies(&csv_path)
        .with_context(|| format!("Failed to load initial data from {}", csv_path.display()))?;
    let repo = MovieRepository::with_movies(movies);
    tracing::info!(
        movies = repo.count(),
        winners = repo.count_winners(),
        "Initial data loaded."
    );

    let app_state = Arc::new(AppState::new(repo, csv_path));
    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server started and listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal.");
        std::future::pending::<()>().await;
    }
}
