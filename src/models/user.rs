use std::{collections::BTreeMap, fmt::Display};

use crate::error::{AppError, AppResult};

use super::{Genre, MovieId};

/// Identifier of a registered user
pub type UserId = u32;

/// Lowest rating a user may give
pub const MIN_RATING: f64 = 0.0;
/// Highest rating a user may give
pub const MAX_RATING: f64 = 10.0;

/// A registered user with their ratings and genre preferences
///
/// Fields are private so every rating write goes through [`User::add_rating`]
/// and its range check. Accessors hand out shared borrows only.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    name: String,
    password: String,
    ratings: BTreeMap<MovieId, f64>,
    preferred_genres: Vec<Genre>,
}

impl User {
    /// Creates a user with no ratings and no preferences
    pub fn new(id: UserId, name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            password: password.into(),
            ratings: BTreeMap::new(),
            preferred_genres: Vec::new(),
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    /// Movie ID to rating for every movie the user has rated
    pub fn watched_movies(&self) -> &BTreeMap<MovieId, f64> {
        &self.ratings
    }

    pub fn preferred_genres(&self) -> &[Genre] {
        &self.preferred_genres
    }

    /// Plaintext equality check
    pub fn check_password(&self, password: &str) -> bool {
        self.password == password
    }

    pub fn has_watched(&self, movie_id: MovieId) -> bool {
        self.ratings.contains_key(&movie_id)
    }

    /// Records or overwrites a rating
    ///
    /// Ratings outside `[0, 10]` are rejected and any earlier rating for the
    /// same movie is kept.
    pub fn add_rating(&mut self, movie_id: MovieId, rating: f64) -> AppResult<()> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(AppError::InvalidInput(format!(
                "Rating must be between {} and {}, got {}",
                MIN_RATING, MAX_RATING, rating
            )));
        }
        self.ratings.insert(movie_id, rating);
        Ok(())
    }

    /// Replaces the preferred genres, dropping duplicates but keeping order
    pub fn set_preferred_genres(&mut self, genres: Vec<Genre>) {
        let mut deduped = Vec::with_capacity(genres.len());
        for genre in genres {
            if !deduped.contains(&genre) {
                deduped.push(genre);
            }
        }
        self.preferred_genres = deduped;
    }
}

impl Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "User: {} (ID: {})", self.name, self.id)
    }
}
