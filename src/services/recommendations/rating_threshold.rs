use std::sync::Arc;

use crate::{
    db::MovieSource,
    models::{Movie, User},
};

use super::{rank_by_rating_ascending, RecommendationParams, RecommendationStrategy, StrategyKind};

/// Recommends every unwatched movie passing the rating and year filters
///
/// Both thresholds are inclusive. Results are ordered by catalog rating,
/// lowest first.
pub struct RatingThresholdStrategy {
    source: Arc<dyn MovieSource>,
}

impl RatingThresholdStrategy {
    pub fn new(source: Arc<dyn MovieSource>) -> Self {
        Self { source }
    }
}

impl RecommendationStrategy for RatingThresholdStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::RatingThreshold
    }

    fn recommend(&self, user: &User, params: &RecommendationParams) -> Vec<Movie> {
        if params.max_results == 0 {
            return Vec::new();
        }

        let mut candidates: Vec<Movie> = self
            .source
            .all_movies()
            .into_iter()
            .filter(|movie| !user.has_watched(movie.id))
            .filter(|movie| movie.rating >= params.min_rating && movie.year >= params.min_year)
            .collect();

        tracing::debug!(user_id = user.id(), candidates = candidates.len(), "Rating threshold candidates");

        rank_by_rating_ascending(&mut candidates);
        candidates.truncate(params.max_results);
        candidates
    }
}
