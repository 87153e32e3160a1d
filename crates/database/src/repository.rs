use crate::DbError;
use core_types::{Movie, MovieId, Year};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// The `MovieRepository` provides a high-level, application-specific interface
/// to the movie catalog. Clones share the same underlying catalog.
#[derive(Debug, Clone, Default)]
pub struct MovieRepository {
    catalog: Arc<RwLock<Catalog>>,
}

#[derive(Debug, Default)]
struct Catalog {
    last_id: MovieId,
    movies: BTreeMap<MovieId, Movie>,
}

impl Catalog {
    fn next_id(&mut self) -> MovieId {
        self.last_id += 1;
        self.last_id
    }

    /// Fails if another movie (not `except`) has the same title and year.
    fn ensure_unique(&self, movie: &Movie, except: Option<MovieId>) -> Result<(), DbError> {
        let clash = self.movies.iter().any(|(id, existing)| {
            Some(*id) != except
                && existing.year() == movie.year()
                && existing.title() == movie.title()
        });
        if clash {
            return Err(DbError::Duplicate {
                title: movie.title().to_string(),
                year: movie.year().value(),
            });
        }
        Ok(())
    }
}

/// The first and last winning years in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

/// Summary counts of the current catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total_movies: usize,
    pub winner_movies: usize,
    pub non_winner_movies: usize,
    /// Distinct winning years, ascending.
    pub winner_years: Vec<i32>,
    pub year_range: Option<YearRange>,
}

impl MovieRepository {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog pre-loaded with `movies`.
    pub fn with_movies(movies: Vec<Movie>) -> Self {
        let repo = Self::new();
        repo.replace_all(movies);
        repo
    }

    /// Stores a new movie and returns it with its assigned id.
    ///
    /// Any id already on `movie` is ignored. Rejects a second movie with the
    /// same title and year.
    pub fn save(&self, movie: Movie) -> Result<Movie, DbError> {
        let mut catalog = self.catalog.write();
        catalog.ensure_unique(&movie, None)?;

        let id = catalog.next_id();
        let movie = movie.with_id(id);
        catalog.movies.insert(id, movie.clone());
        tracing::debug!(id, title = movie.title(), "Saved movie.");
        Ok(movie)
    }

    /// Fetches all movies, ordered by id.
    pub fn find_all(&self) -> Vec<Movie> {
        self.catalog.read().movies.values().cloned().collect()
    }

    /// Fetches a single movie by id.
    pub fn find_by_id(&self, id: MovieId) -> Result<Movie, DbError> {
        self.catalog
            .read()
            .movies
            .get(&id)
            .cloned()
            .ok_or(DbError::NotFound(id))
    }

    /// Fetches only the winning movies, ordered by id.
    pub fn find_winners(&self) -> Vec<Movie> {
        self.catalog
            .read()
            .movies
            .values()
            .filter(|m| m.is_winner())
            .cloned()
            .collect()
    }

    /// Replaces the movie stored under `id`.
    pub fn update(&self, id: MovieId, movie: Movie) -> Result<Movie, DbError> {
        let mut catalog = self.catalog.write();
        if !catalog.movies.contains_key(&id) {
            return Err(DbError::NotFound(id));
        }
        catalog.ensure_unique(&movie, Some(id))?;

        let movie = movie.with_id(id);
        catalog.movies.insert(id, movie.clone());
        tracing::debug!(id, "Updated movie.");
        Ok(movie)
    }

    /// Removes the movie stored under `id`.
    pub fn delete(&self, id: MovieId) -> Result<(), DbError> {
        match self.catalog.write().movies.remove(&id) {
            Some(_) => {
                tracing::debug!(id, "Deleted movie.");
                Ok(())
            }
            None => Err(DbError::NotFound(id)),
        }
    }

    /// Clears the catalog and loads `movies` in its place, returning how many
    /// were stored.
    ///
    /// The source list is authoritative, so no duplicate check is made. Ids
    /// keep counting up from the previous catalog.
    pub fn replace_all(&self, movies: Vec<Movie>) -> usize {
        let mut catalog = self.catalog.write();
        catalog.movies.clear();
        for movie in movies {
            let id = catalog.next_id();
            catalog.movies.insert(id, movie.with_id(id));
        }
        let count = catalog.movies.len();
        tracing::info!(count, "Replaced movie catalog.");
        count
    }

    pub fn count(&self) -> usize {
        self.catalog.read().movies.len()
    }

    pub fn count_winners(&self) -> usize {
        self.catalog
            .read()
            .movies
            .values()
            .filter(|m| m.is_winner())
            .count()
    }

    /// Distinct years with at least one winning movie, ascending.
    pub fn winner_years(&self) -> Vec<Year> {
        let catalog = self.catalog.read();
        let years: BTreeSet<Year> = catalog
            .movies
            .values()
            .filter(|m| m.is_winner())
            .map(Movie::year)
            .collect();
        years.into_iter().collect()
    }

    /// Counts and winning years of the current catalog, taken under one lock.
    pub fn stats(&self) -> CatalogStats {
        let catalog = self.catalog.read();
        let total_movies = catalog.movies.len();

        let mut winner_movies = 0;
        let mut years = BTreeSet::new();
        for movie in catalog.movies.values().filter(|m| m.is_winner()) {
            winner_movies += 1;
            years.insert(movie.year().value());
        }
        let winner_years: Vec<i32> = years.into_iter().collect();

        let year_range = match (winner_years.first(), winner_years.last()) {
            (Some(&min), Some(&max)) => Some(YearRange { min, max }),
            _ => None,
        };

        CatalogStats {
            total_movies,
            winner_movies,
            non_winner_movies: total_movies - winner_movies,
            winner_years,
            year_range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(year: i32, title: &str, winner: bool) -> Movie {
        Movie::from_raw(year, title, Some("Studio"), ["Some Producer"], winner).unwrap()
    }

    #[test]
    fn save_assigns_sequential_ids() {
        let repo = MovieRepository::new();
        let first = repo.save(movie(1980, "A", true)).unwrap();
        let second = repo.save(movie(1981, "B", false)).unwrap();

        assert_eq!(first.id(), Some(1));
        assert_eq!(second.id(), Some(2));
        assert_eq!(repo.count(), 2);
        assert_eq!(repo.find_by_id(2).unwrap().title(), "B");
    }

    #[test]
    fn save_rejects_duplicate_title_and_year() {
        let repo = MovieRepository::new();
        repo.save(movie(1980, "A", true)).unwrap();

        assert_eq!(
            repo.save(movie(1980, "A", false)),
            Err(DbError::Duplicate { title: "A".to_string(), year: 1980 })
        );
        assert!(repo.save(movie(1981, "A", false)).is_ok());
    }

    #[test]
    fn clones_share_the_catalog() {
        let repo = MovieRepository::new();
        let handle = repo.clone();
        handle.save(movie(1980, "A", true)).unwrap();
        assert_eq!(repo.count(), 1);
    }

    #[test]
    fn missing_ids_are_not_found() {
        let repo = MovieRepository::new();
        assert_eq!(repo.find_by_id(7), Err(DbError::NotFound(7)));
        assert_eq!(repo.update(7, movie(1980, "A", true)), Err(DbError::NotFound(7)));
        assert_eq!(repo.delete(7), Err(DbError::NotFound(7)));
    }

    #[test]
    fn update_replaces_and_keeps_id() {
        let repo = MovieRepository::new();
        let saved = repo.save(movie(1980, "A", false)).unwrap();
        let id = saved.id().unwrap();

        let updated = repo.update(id, movie(1980, "A", true)).unwrap();
        assert_eq!(updated.id(), Some(id));
        assert!(repo.find_by_id(id).unwrap().is_winner());
    }

    #[test]
    fn update_rejects_clash_with_other_movie() {
        let repo = MovieRepository::new();
        repo.save(movie(1980, "A", true)).unwrap();
        let b = repo.save(movie(1981, "B", true)).unwrap();

        assert!(matches!(
            repo.update(b.id().unwrap(), movie(1980, "A", false)),
            Err(DbError::Duplicate { .. })
        ));
    }

    #[test]
    fn delete_removes_movie() {
        let repo = MovieRepository::new();
        let saved = repo.save(movie(1980, "A", true)).unwrap();
        repo.delete(saved.id().unwrap()).unwrap();
        assert_eq!(repo.count(), 0);
    }

    #[test]
    fn replace_all_resets_catalog_without_reusing_ids() {
        let repo = MovieRepository::with_movies(vec![movie(1980, "A", true)]);
        assert_eq!(repo.find_all()[0].id(), Some(1));

        let loaded = repo.replace_all(vec![movie(1990, "X", true), movie(1990, "X", true)]);
        assert_eq!(loaded, 2);
        let ids: Vec<_> = repo.find_all().iter().map(Movie::id).collect();
        assert_eq!(ids, vec![Some(2), Some(3)]);
    }

    #[test]
    fn winners_and_stats() {
        let repo = MovieRepository::with_movies(vec![
            movie(1990, "A", true),
            movie(1980, "B", true),
            movie(1980, "C", true),
            movie(1985, "D", false),
        ]);

        assert_eq!(repo.count_winners(), 3);
        assert_eq!(repo.find_winners().len(), 3);
        let years: Vec<i32> = repo.winner_years().into_iter().map(Year::value).collect();
        assert_eq!(years, vec![1980, 1990]);

        let stats = repo.stats();
        assert_eq!(
            stats,
            CatalogStats {
                total_movies: 4,
                winner_movies: 3,
                non_winner_movies: 1,
                winner_years: vec![1980, 1990],
                year_range: Some(YearRange { min: 1980, max: 1990 }),
            }
        );
    }

    #[test]
    fn stats_of_empty_catalog_have_no_range() {
        let stats = MovieRepository::new().stats();
        assert_eq!(stats.total_movies, 0);
        assert!(stats.year_range.is_none());
        assert_eq!(
            serde_json::to_value(&stats).unwrap()["year_range"],
            serde_json::Value::Null
        );
    }
}
