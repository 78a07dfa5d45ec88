use anyhow::Context;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::models::{Movie, MoviePatch, NewMovie};

static BUNDLED_SEED: &str = include_str!("../data/movies.json");

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Movie {0} not found")]
    NotFound(Uuid),
}

/// In-memory movie collection, owned for the life of the process.
///
/// Mutations take the write guard so id uniqueness and insertion order hold
/// under parallel request handling; reads share the read guard.
#[derive(Debug, Default)]
pub struct MovieStore {
    movies: RwLock<Vec<Movie>>,
}

impl MovieStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_movies(movies: Vec<Movie>) -> Self {
        Self {
            movies: RwLock::new(movies),
        }
    }

    /// Builds a store pre-populated from the bundled dataset.
    pub fn from_bundled_seed() -> anyhow::Result<Self> {
        let movies: Vec<Movie> =
            serde_json::from_str(BUNDLED_SEED).context("Failed to parse bundled movie dataset")?;
        info!("Seeded movie store with {} titles", movies.len());
        Ok(Self::with_movies(movies))
    }

    /// All movies in insertion order.
    pub async fn list(&self) -> Vec<Movie> {
        self.movies.read().await.clone()
    }

    /// Movies whose genre sequence contains a case-insensitive match of the
    /// query tag. An unknown tag matches nothing.
    pub async fn list_by_genre(&self, tag: &str) -> Vec<Movie> {
        self.movies
            .read()
            .await
            .iter()
            .filter(|movie| {
                movie
                    .genre
                    .iter()
                    .any(|genre| genre.as_str().eq_ignore_ascii_case(tag))
            })
            .cloned()
            .collect()
    }

    pub async fn get(&self, id: Uuid) -> Option<Movie> {
        self.movies
            .read()
            .await
            .iter()
            .find(|movie| movie.id == id)
            .cloned()
    }

    /// Appends a validated submission under a fresh id and returns the
    /// stored movie. Ids are v4 and never reused within a process lifetime.
    pub async fn insert(&self, new: NewMovie) -> Movie {
        let movie = Movie {
            id: Uuid::new_v4(),
            title: new.title,
            year: new.year,
            director: new.director,
            duration: new.duration,
            genre: new.genre,
            rating: new.rating,
        };

        self.movies.write().await.push(movie.clone());
        movie
    }

    /// Shallow-merges a validated patch over the stored movie. Provided
    /// fields replace the prior value, absent fields are untouched, the id
    /// is never overwritten.
    pub async fn update(&self, id: Uuid, patch: MoviePatch) -> Result<Movie, StoreError> {
        let mut movies = self.movies.write().await;
        let movie = movies
            .iter_mut()
            .find(|movie| movie.id == id)
            .ok_or(StoreError::NotFound(id))?;

        if let Some(title) = patch.title {
            movie.title = title;
        }
        if let Some(year) = patch.year {
            movie.year = year;
        }
        if let Some(director) = patch.director {
            movie.director = director;
        }
        if let Some(duration) = patch.duration {
            movie.duration = duration;
        }
        if let Some(genre) = patch.genre {
            movie.genre = genre;
        }
        if let Some(rating) = patch.rating {
            movie.rating = rating;
        }

        Ok(movie.clone())
    }

    /// Removes the movie with the matching id, preserving the order of the
    /// remaining collection.
    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut movies = self.movies.write().await;
        let index = movies
            .iter()
            .position(|movie| movie.id == id)
            .ok_or(StoreError::NotFound(id))?;

        movies.remove(index);
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.movies.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.movies.read().await.is_empty()
    }
}
