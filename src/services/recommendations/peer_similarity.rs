use std::{collections::BTreeMap, sync::Arc};

use crate::{
    db::MovieSource,
    models::{Movie, MovieId, User, MAX_RATING},
};

use super::{RecommendationParams, RecommendationStrategy, StrategyKind};

/// Peers below this similarity do not contribute at all
pub const SIMILARITY_THRESHOLD: f64 = 0.3;

/// Slack for rounding error when comparing against the threshold
const SIMILARITY_EPSILON: f64 = 1e-9;

/// Taste closeness of two users in `[0, 1]`
///
/// Computed over the movies both have rated as
/// `1 - mean(|a - b|) / 10`, floored at zero. No common movies gives 0.
pub fn similarity(a: &User, b: &User) -> f64 {
    let theirs = b.watched_movies();
    let diffs: Vec<f64> = a
        .watched_movies()
        .iter()
        .filter_map(|(movie_id, rating)| theirs.get(movie_id).map(|other| (rating - other).abs()))
        .collect();

    if diffs.is_empty() {
        return 0.0;
    }

    let mean_diff = diffs.iter().sum::<f64>() / diffs.len() as f64;
    (1.0 - mean_diff / MAX_RATING).max(0.0)
}

/// Recommends what users with similar taste liked
///
/// Every other user at or above [`SIMILARITY_THRESHOLD`] adds
/// `similarity * their_rating` to each movie they rated that the requesting
/// user has not. Movies are ranked by total score, highest first. The rating
/// and year filters are both inclusive and are checked against the catalog
/// entry while walking the ranking.
pub struct PeerSimilarityStrategy {
    source: Arc<dyn MovieSource>,
}

impl PeerSimilarityStrategy {
    pub fn new(source: Arc<dyn MovieSource>) -> Self {
        Self { source }
    }

    /// Accumulated score per unwatched movie
    pub fn peer_scores(&self, user: &User) -> BTreeMap<MovieId, f64> {
        let mut scores: BTreeMap<MovieId, f64> = BTreeMap::new();

        for peer in self.source.all_users() {
            if peer.id() == user.id() {
                continue;
            }

            let similarity = similarity(user, &peer);
            if similarity + SIMILARITY_EPSILON < SIMILARITY_THRESHOLD {
                tracing::trace!(peer_id = peer.id(), similarity, "Peer below threshold");
                continue;
            }
            tracing::debug!(user_id = user.id(), peer_id = peer.id(), similarity, "Similar peer");

            for (movie_id, rating) in peer.watched_movies() {
                if user.has_watched(*movie_id) {
                    continue;
                }
                *scores.entry(*movie_id).or_insert(0.0) += similarity * rating;
            }
        }

        scores
    }
}

impl RecommendationStrategy for PeerSimilarityStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::PeerSimilarity
    }

    fn recommend(&self, user: &User, params: &RecommendationParams) -> Vec<Movie> {
        if params.max_results == 0 {
            return Vec::new();
        }

        // BTreeMap order plus a stable sort breaks score ties by movie ID
        let mut ranked: Vec<(MovieId, f64)> = self.peer_scores(user).into_iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut recommendations = Vec::new();
        for (movie_id, score) in ranked {
            let Some(movie) = self.source.movie(movie_id) else {
                tracing::debug!(movie_id, "Scored movie not in catalog");
                continue;
            };
            if movie.rating < params.min_rating || movie.year < params.min_year {
                continue;
            }
            tracing::trace!(movie_id, score, "Selected");
            recommendations.push(movie);
            if recommendations.len() >= params.max_results {
                break;
            }
        }

        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MockMovieSource;
    use crate::models::{Genre, UserId};

    fn user(id: UserId, ratings: &[(MovieId, f64)]) -> User {
        let mut user = User::new(id, format!("user{}", id), "pw");
        for (movie_id, rating) in ratings {
            user.add_rating(*movie_id, *rating).unwrap();
        }
        user
    }

    fn movie(id: MovieId, year: i32, rating: f64) -> Movie {
        Movie::new(id, format!("Movie {}", id), vec![Genre::Drama], "Someone", year, rating)
    }

    fn source(users: Vec<User>, movies: Vec<Movie>) -> MockMovieSource {
        let mut source = MockMovieSource::new();
        source.expect_all_users().returning(move || users.clone());
        source
            .expect_movie()
            .returning(move |id| movies.iter().find(|m| m.id == id).cloned());
        source
    }

    #[test]
    fn test_identical_ratings_are_fully_similar() {
        let a = user(1, &[(10, 5.0)]);
        let b = user(2, &[(10, 5.0)]);
        assert_eq!(similarity(&a, &b), 1.0);
    }

    #[test]
    fn test_no_overlap_is_zero() {
        let a = user(1, &[(10, 5.0)]);
        let b = user(2, &[(11, 5.0)]);
        assert_eq!(similarity(&a, &b), 0.0);
        assert_eq!(similarity(&a, &user(3, &[])), 0.0);
    }

    #[test]
    fn test_similarity_uses_mean_difference() {
        let a = user(1, &[(1, 10.0), (2, 0.0), (3, 4.0)]);
        let b = user(2, &[(1, 6.0), (2, 2.0), (4, 9.0)]);
        // diffs 4 and 2 over two common movies
        assert!((similarity(&a, &b) - 0.7).abs() < 1e-9);

        let opposite = user(3, &[(1, 0.0), (2, 10.0)]);
        assert_eq!(similarity(&a, &opposite), 0.0);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // mean difference 7 gives similarity 0.3
        let me = user(1, &[(1, 10.0)]);
        let borderline = user(2, &[(1, 3.0), (20, 8.0)]);
        // mean difference 8 gives similarity 0.2
        let distant = user(3, &[(1, 2.0), (21, 8.0)]);

        let strategy = PeerSimilarityStrategy::new(Arc::new(source(
            vec![me.clone(), borderline, distant],
            vec![movie(20, 2000, 7.0), movie(21, 2000, 7.0)],
        )));

        let scores = strategy.peer_scores(&me);
        assert_eq!(scores.keys().copied().collect::<Vec<_>>(), vec![20]);
        assert!((scores[&20] - 2.4).abs() < 1e-9);
    }

    #[test]
    fn test_threshold_tolerates_rounding_below_cutoff() {
        // 8.3 - 1.3 is 7 on paper but the similarity lands just under 0.3
        let me = user(1, &[(1, 1.3)]);
        let peer = user(2, &[(1, 8.3), (2, 9.0)]);
        assert!(similarity(&me, &peer) < SIMILARITY_THRESHOLD);

        let strategy = PeerSimilarityStrategy::new(Arc::new(source(
            vec![me.clone(), peer],
            vec![movie(2, 2000, 7.0)],
        )));

        let result = strategy.recommend(&me, &RecommendationParams::default());
        assert_eq!(result.iter().map(|m| m.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_scores_accumulate_across_peers() {
        let me = user(1, &[(1, 10.0)]);
        // similarity 0.5, rates movie 30 an 8
        let first = user(2, &[(1, 5.0), (30, 8.0)]);
        // similarity 0.4, rates movie 30 a 6
        let second = user(3, &[(1, 4.0), (30, 6.0)]);

        let strategy = PeerSimilarityStrategy::new(Arc::new(source(
            vec![me.clone(), first, second],
            vec![movie(30, 2000, 7.0)],
        )));

        let scores = strategy.peer_scores(&me);
        assert!((scores[&30] - 6.4).abs() < 1e-9);
    }

    #[test]
    fn test_never_compares_user_with_self() {
        let me = user(1, &[(1, 9.0), (2, 9.0)]);
        let strategy = PeerSimilarityStrategy::new(Arc::new(source(
            vec![me.clone()],
            vec![movie(1, 2000, 7.0), movie(2, 2000, 7.0)],
        )));
        assert!(strategy.peer_scores(&me).is_empty());
        assert!(strategy
            .recommend(&me, &RecommendationParams::default())
            .is_empty());
    }

    #[test]
    fn test_ranks_by_score_and_skips_filtered_without_using_slots() {
        let me = user(1, &[(1, 8.0)]);
        let peer = user(2, &[(1, 8.0), (40, 9.0), (41, 7.0), (42, 5.0), (43, 3.0), (99, 10.0)]);

        let strategy = PeerSimilarityStrategy::new(Arc::new(source(
            vec![me.clone(), peer],
            vec![
                movie(40, 1990, 8.0),
                movie(41, 2005, 8.0),
                movie(42, 2010, 6.0),
                movie(43, 2015, 8.0),
            ],
        )));

        let all = strategy.recommend(&me, &RecommendationParams::default());
        let ids: Vec<_> = all.iter().map(|m| m.id).collect();
        // 99 is not in the catalog and is skipped
        assert_eq!(ids, vec![40, 41, 42, 43]);

        let params = RecommendationParams {
            min_rating: 7.0,
            min_year: 2000,
            max_results: 2,
        };
        let filtered = strategy.recommend(&me, &params);
        let ids: Vec<_> = filtered.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![41, 43]);
    }

    #[test]
    fn test_equal_scores_keep_movie_id_order() {
        let me = user(1, &[(1, 5.0)]);
        let peer = user(2, &[(1, 5.0), (52, 6.0), (51, 6.0)]);
        let strategy = PeerSimilarityStrategy::new(Arc::new(source(
            vec![me.clone(), peer],
            vec![movie(51, 2000, 7.0), movie(52, 2000, 7.0)],
        )));

        let ids: Vec<_> = strategy
            .recommend(&me, &RecommendationParams::default())
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![51, 52]);
    }
}
