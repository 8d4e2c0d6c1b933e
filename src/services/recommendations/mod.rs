//! Recommendation strategies
//!
//! Every strategy reads the catalog (and, for peer similarity, every user)
//! through a shared [`MovieSource`] and returns a ranked list of movies the
//! requesting user has not rated yet. Strategies never mutate anything and
//! never fail: an empty list is a normal answer.

use std::{fmt::Display, sync::Arc};

use crate::{
    db::MovieSource,
    error::AppError,
    models::{Movie, User},
};

pub mod genre_affinity;
pub mod peer_similarity;
pub mod rating_threshold;

pub use genre_affinity::GenreAffinityStrategy;
pub use peer_similarity::PeerSimilarityStrategy;
pub use rating_threshold::RatingThresholdStrategy;

/// Filters applied to every recommendation request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendationParams {
    /// Lowest catalog rating a movie may have
    pub min_rating: f64,
    /// Release year threshold; strict or inclusive depending on the strategy
    pub min_year: i32,
    /// Upper bound on the number of movies returned
    pub max_results: usize,
}

impl Default for RecommendationParams {
    fn default() -> Self {
        Self {
            min_rating: 0.0,
            min_year: 0,
            max_results: 10,
        }
    }
}

/// Selectable strategies, keyed by the number shown in the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    GenreAffinity = 1,
    RatingThreshold = 2,
    PeerSimilarity = 3,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::GenreAffinity,
        StrategyKind::RatingThreshold,
        StrategyKind::PeerSimilarity,
    ];

    /// Selection key
    pub fn key(&self) -> u8 {
        *self as u8
    }

    pub fn description(&self) -> &'static str {
        match self {
            StrategyKind::GenreAffinity => "Favorite genres",
            StrategyKind::RatingThreshold => "Rating and year filter",
            StrategyKind::PeerSimilarity => "Users with similar taste",
        }
    }
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::GenreAffinity => write!(f, "genre-affinity"),
            StrategyKind::RatingThreshold => write!(f, "rating-threshold"),
            StrategyKind::PeerSimilarity => write!(f, "peer-similarity"),
        }
    }
}

impl TryFrom<u8> for StrategyKind {
    type Error = AppError;

    fn try_from(key: u8) -> Result<Self, Self::Error> {
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.key() == key)
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown strategy: {}", key)))
    }
}

/// Common contract for recommendation algorithms
pub trait RecommendationStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    /// Ranked movies the user has not rated, at most `params.max_results`
    fn recommend(&self, user: &User, params: &RecommendationParams) -> Vec<Movie>;
}

/// Maps selection keys to strategy instances over one shared source
pub struct StrategyRegistry {
    genre_affinity: GenreAffinityStrategy,
    rating_threshold: RatingThresholdStrategy,
    peer_similarity: PeerSimilarityStrategy,
}

impl StrategyRegistry {
    /// Builds one instance of every strategy, all reading from `source`
    pub fn new(source: Arc<dyn MovieSource>) -> Self {
        Self {
            genre_affinity: GenreAffinityStrategy::new(source.clone()),
            rating_threshold: RatingThresholdStrategy::new(source.clone()),
            peer_similarity: PeerSimilarityStrategy::new(source),
        }
    }

    pub fn get(&self, kind: StrategyKind) -> &dyn RecommendationStrategy {
        match kind {
            StrategyKind::GenreAffinity => &self.genre_affinity,
            StrategyKind::RatingThreshold => &self.rating_threshold,
            StrategyKind::PeerSimilarity => &self.peer_similarity,
        }
    }

    /// Runs the selected strategy
    pub fn recommend(
        &self,
        kind: StrategyKind,
        user: &User,
        params: &RecommendationParams,
    ) -> Vec<Movie> {
        let recommendations = self.get(kind).recommend(user, params);
        tracing::info!(
            strategy = %kind,
            user_id = user.id(),
            min_rating = params.min_rating,
            min_year = params.min_year,
            max_results = params.max_results,
            returned = recommendations.len(),
            "Generated recommendations"
        );
        recommendations
    }
}

/// Sorts lowest-rated first, keeping catalog order for equal ratings
fn rank_by_rating_ascending(movies: &mut [Movie]) {
    movies.sort_by(|a, b| a.rating.total_cmp(&b.rating));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DataStore;

    #[test]
    fn test_default_params() {
        let params = RecommendationParams::default();
        assert_eq!(params.min_rating, 0.0);
        assert_eq!(params.min_year, 0);
        assert_eq!(params.max_results, 10);
    }

    #[test]
    fn test_strategy_keys() {
        assert_eq!(StrategyKind::try_from(1).unwrap(), StrategyKind::GenreAffinity);
        assert_eq!(StrategyKind::try_from(2).unwrap(), StrategyKind::RatingThreshold);
        assert_eq!(StrategyKind::try_from(3).unwrap(), StrategyKind::PeerSimilarity);
        assert!(StrategyKind::try_from(0).is_err());
        assert!(StrategyKind::try_from(4).is_err());
    }

    #[test]
    fn test_registry_resolves_every_kind() {
        let registry = StrategyRegistry::new(Arc::new(DataStore::with_seed_catalog()));
        for kind in StrategyKind::ALL {
            assert_eq!(registry.get(kind).kind(), kind);
        }
    }

    #[test]
    fn test_rank_ascending_is_stable() {
        let mut movies = vec![
            Movie::new(1, "B", vec![crate::models::Genre::Drama], "x", 2000, 8.0),
            Movie::new(2, "A", vec![crate::models::Genre::Drama], "x", 2000, 6.0),
            Movie::new(3, "C", vec![crate::models::Genre::Drama], "x", 2000, 8.0),
        ];
        rank_by_rating_ascending(&mut movies);
        let ids: Vec<_> = movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }
}
