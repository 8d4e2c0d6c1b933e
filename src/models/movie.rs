use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::Genre;

/// Identifier of a catalog movie
pub type MovieId = u32;

/// A catalog entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub genres: Vec<Genre>,
    pub director: String,
    pub year: i32,
    pub rating: f64,
}

impl Movie {
    pub fn new(
        id: MovieId,
        title: impl Into<String>,
        genres: Vec<Genre>,
        director: impl Into<String>,
        year: i32,
        rating: f64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            genres,
            director: director.into(),
            year,
            rating,
        }
    }

    /// Whether the movie carries any of the given genres
    pub fn shares_genre(&self, genres: &[Genre]) -> bool {
        self.genres.iter().any(|genre| genres.contains(genre))
    }
}

impl Display for Movie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let genres = self
            .genres
            .iter()
            .map(Genre::label)
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "{} ({}) - {}, director: {}, rating: {}",
            self.title, self.year, genres, self.director, self.rating
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let movie = Movie::new(
            1,
            "The Matrix",
            vec![Genre::SciFi, Genre::Action],
            "Lana Wachowski",
            1999,
            8.7,
        );
        assert_eq!(
            movie.to_string(),
            "The Matrix (1999) - Sci-Fi, Action, director: Lana Wachowski, rating: 8.7"
        );
    }

    #[test]
    fn test_shares_genre() {
        let movie = Movie::new(2, "Alien", vec![Genre::Horror, Genre::SciFi], "Ridley Scott", 1979, 8.4);
        assert!(movie.shares_genre(&[Genre::Comedy, Genre::SciFi]));
        assert!(!movie.shares_genre(&[Genre::Comedy]));
        assert!(!movie.shares_genre(&[]));
    }
}
