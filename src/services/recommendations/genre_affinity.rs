use std::sync::Arc;

use crate::{
    db::MovieSource,
    models::{Genre, Movie, User},
};

use super::{rank_by_rating_ascending, RecommendationParams, RecommendationStrategy, StrategyKind};

/// How many genres are inferred from a user's ratings
pub const INFERRED_GENRE_COUNT: usize = 3;

/// Recommends unwatched movies in the user's favorite genres
///
/// Favorites are the user's explicit preferences when set. Otherwise they are
/// inferred from the genres of the movies the user has rated.
///
/// The year threshold is strict (`year > min_year`), unlike the other
/// strategies. Results are ordered by catalog rating, lowest first.
pub struct GenreAffinityStrategy {
    source: Arc<dyn MovieSource>,
}

impl GenreAffinityStrategy {
    pub fn new(source: Arc<dyn MovieSource>) -> Self {
        Self { source }
    }

    /// Genres a candidate must intersect
    pub fn target_genres(&self, user: &User) -> Vec<Genre> {
        if !user.preferred_genres().is_empty() {
            return user.preferred_genres().to_vec();
        }
        self.infer_genres(user)
    }

    /// Top genres across the user's rated movies
    ///
    /// Each rated movie adds one to every genre it carries. Equal counts keep
    /// genre declaration order. Rated IDs missing from the catalog are skipped.
    fn infer_genres(&self, user: &User) -> Vec<Genre> {
        let mut tally = [0usize; Genre::ALL.len()];

        for movie_id in user.watched_movies().keys() {
            let Some(movie) = self.source.movie(*movie_id) else {
                tracing::debug!(movie_id, "Rated movie not in catalog");
                continue;
            };
            for genre in Genre::ALL {
                if movie.genres.contains(&genre) {
                    tally[genre.index()] += 1;
                }
            }
        }

        let mut counted: Vec<(Genre, usize)> = Genre::ALL
            .into_iter()
            .zip(tally)
            .filter(|(_, count)| *count > 0)
            .collect();
        counted.sort_by(|a, b| b.1.cmp(&a.1));

        counted
            .into_iter()
            .take(INFERRED_GENRE_COUNT)
            .map(|(genre, _)| genre)
            .collect()
    }
}

impl RecommendationStrategy for GenreAffinityStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::GenreAffinity
    }

    fn recommend(&self, user: &User, params: &RecommendationParams) -> Vec<Movie> {
        if params.max_results == 0 {
            return Vec::new();
        }

        let targets = self.target_genres(user);
        tracing::debug!(user_id = user.id(), genres = ?targets, "Target genres");
        if targets.is_empty() {
            return Vec::new();
        }

        let mut candidates: Vec<Movie> = self
            .source
            .all_movies()
            .into_iter()
            .filter(|movie| !user.has_watched(movie.id))
            .filter(|movie| movie.rating >= params.min_rating && movie.year > params.min_year)
            .filter(|movie| movie.shares_genre(&targets))
            .collect();

        rank_by_rating_ascending(&mut candidates);
        candidates.truncate(params.max_results);
        candidates
    }
}
