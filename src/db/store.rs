use std::collections::BTreeMap;

use crate::{
    error::{AppError, AppResult},
    models::{Genre, Movie, MovieId, User, UserId},
};

use super::{catalog::SEED_MOVIES, MovieSource};

/// In-memory catalog and user store
///
/// Owns every movie and user. IDs are handed out sequentially from 1 and are
/// never reused.
#[derive(Debug, Clone)]
pub struct DataStore {
    movies: BTreeMap<MovieId, Movie>,
    users: BTreeMap<UserId, User>,
    next_movie_id: MovieId,
    next_user_id: UserId,
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DataStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self {
            movies: BTreeMap::new(),
            users: BTreeMap::new(),
            next_movie_id: 1,
            next_user_id: 1,
        }
    }

    /// Creates a store holding the built-in catalog and no users
    pub fn with_seed_catalog() -> Self {
        let mut store = Self::new();
        store.load_seed_catalog();
        store
    }

    /// Appends the built-in catalog
    pub fn load_seed_catalog(&mut self) {
        for (title, genres, director, year, rating) in SEED_MOVIES {
            let id = self.allocate_movie_id();
            self.movies.insert(
                id,
                Movie::new(id, *title, genres.to_vec(), *director, *year, *rating),
            );
        }
        tracing::debug!(movie_count = self.movies.len(), "Loaded built-in catalog");
    }

    fn allocate_movie_id(&mut self) -> MovieId {
        let id = self.next_movie_id;
        self.next_movie_id += 1;
        id
    }

    fn allocate_user_id(&mut self) -> AppResult<UserId> {
        let id = self.next_user_id;
        if self.users.contains_key(&id) {
            return Err(AppError::Conflict("No user IDs left".to_string()));
        }
        self.next_user_id = id.saturating_add(1);
        Ok(id)
    }

    /// ID the next registered user will receive
    pub fn next_user_id(&self) -> UserId {
        self.next_user_id
    }

    /// Adds a movie to the catalog and returns its new ID
    pub fn add_movie(
        &mut self,
        title: impl Into<String>,
        genres: Vec<Genre>,
        director: impl Into<String>,
        year: i32,
        rating: f64,
    ) -> AppResult<MovieId> {
        if genres.is_empty() {
            return Err(AppError::InvalidInput(
                "A movie needs at least one genre".to_string(),
            ));
        }
        let id = self.allocate_movie_id();
        self.movies
            .insert(id, Movie::new(id, title, genres, director, year, rating));
        Ok(id)
    }

    /// Registers a new user under a case-insensitively unique name
    pub fn register(&mut self, name: &str, password: &str) -> AppResult<User> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput("Name must not be empty".to_string()));
        }
        if self.get_user_by_name(name).is_some() {
            return Err(AppError::Conflict(format!("User '{}' already exists", name)));
        }

        let user = User::new(self.allocate_user_id()?, name, password);
        tracing::info!(user_id = user.id(), name = %user.name(), "Registered user");
        self.users.insert(user.id(), user.clone());
        Ok(user)
    }

    /// Restores a previously registered user, keeping its ID
    pub fn insert_user(&mut self, user: User) -> AppResult<()> {
        if self.users.contains_key(&user.id()) {
            return Err(AppError::Conflict(format!("User ID {} already exists", user.id())));
        }
        if self.get_user_by_name(user.name()).is_some() {
            return Err(AppError::Conflict(format!(
                "User '{}' already exists",
                user.name()
            )));
        }
        self.next_user_id = self.next_user_id.max(user.id().saturating_add(1));
        self.users.insert(user.id(), user);
        Ok(())
    }

    /// Raises the ID counter so IDs used before a restart are not reused
    pub fn reserve_user_ids(&mut self, next_user_id: UserId) {
        self.next_user_id = self.next_user_id.max(next_user_id);
    }

    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    pub fn get_user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    /// Looks a user up by name, ignoring case
    pub fn get_user_by_name(&self, name: &str) -> Option<&User> {
        let needle = name.trim().to_lowercase();
        self.users
            .values()
            .find(|user| user.name().to_lowercase() == needle)
    }

    /// Returns the user if the name exists and the password matches
    pub fn authenticate(&self, name: &str, password: &str) -> Option<&User> {
        self.get_user_by_name(name)
            .filter(|user| user.check_password(password))
    }

    pub fn movies(&self) -> impl Iterator<Item = &Movie> {
        self.movies.values()
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Records a rating for a catalog movie
    ///
    /// Unknown users or movies and out-of-range ratings leave the store
    /// untouched.
    pub fn rate_movie(&mut self, user_id: UserId, movie_id: MovieId, rating: f64) -> AppResult<()> {
        if !self.movies.contains_key(&movie_id) {
            return Err(AppError::NotFound(format!("Movie {}", movie_id)));
        }
        let user = self
            .users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound(format!("User {}", user_id)))?;

        user.add_rating(movie_id, rating)
            .inspect_err(|_| tracing::warn!(user_id, movie_id, rating, "Rejected rating"))?;

        tracing::info!(user_id, movie_id, rating, "Recorded rating");
        Ok(())
    }

    /// Replaces a user's preferred genres
    pub fn set_preferred_genres(&mut self, user_id: UserId, genres: Vec<Genre>) -> AppResult<()> {
        let user = self
            .users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound(format!("User {}", user_id)))?;
        user.set_preferred_genres(genres);
        tracing::info!(user_id, genres = ?user.preferred_genres(), "Updated preferred genres");
        Ok(())
    }
}

impl MovieSource for DataStore {
    fn all_movies(&self) -> Vec<Movie> {
        self.movies.values().cloned().collect()
    }

    fn movie(&self, id: MovieId) -> Option<Movie> {
        self.movies.get(&id).cloned()
    }

    fn all_users(&self) -> Vec<User> {
        self.users.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_catalog_ids_are_sequential() {
        let store = DataStore::with_seed_catalog();
        let ids: Vec<MovieId> = store.movies().map(|m| m.id).collect();
        assert_eq!(ids, (1..=25).collect::<Vec<_>>());
        assert_eq!(store.get_movie(1).unwrap().title, "The Matrix");
        assert_eq!(store.get_movie(25).unwrap().title, "Barbie");
        assert!(store.get_movie(26).is_none());
    }

    #[test]
    fn test_add_movie_requires_genre() {
        let mut store = DataStore::new();
        let err = store.add_movie("Untitled", vec![], "Nobody", 2000, 5.0);
        assert!(matches!(err, Err(AppError::InvalidInput(_))));

        let id = store
            .add_movie("Heat", vec![Genre::Thriller], "Michael Mann", 1995, 8.3)
            .unwrap();
        assert_eq!(id, 1);
    }

    #[test]
    fn test_register_assigns_sequential_ids() {
        let mut store = DataStore::new();
        let alice = store.register("alice", "a").unwrap();
        let bob = store.register("bob", "b").unwrap();
        assert_eq!(alice.id(), 1);
        assert_eq!(bob.id(), 2);
        assert_eq!(store.next_user_id(), 3);
    }

    #[test]
    fn test_register_rejects_case_insensitive_duplicate() {
        let mut store = DataStore::new();
        store.register("Alice", "a").unwrap();
        let err = store.register("aLiCe", "other").unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(store.users().count(), 1);
    }

    #[test]
    fn test_register_rejects_blank_name() {
        let mut store = DataStore::new();
        assert!(matches!(
            store.register("   ", "pw"),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_authenticate() {
        let mut store = DataStore::new();
        store.register("alice", "secret").unwrap();

        assert_eq!(store.authenticate("ALICE", "secret").map(User::id), Some(1));
        assert!(store.authenticate("alice", "wrong").is_none());
        assert!(store.authenticate("carol", "secret").is_none());
    }

    #[test]
    fn test_rate_movie_validates_movie_and_range() {
        let mut store = DataStore::with_seed_catalog();
        let user = store.register("alice", "a").unwrap();

        store.rate_movie(user.id(), 1, 9.0).unwrap();
        assert!(matches!(
            store.rate_movie(user.id(), 999, 5.0),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            store.rate_movie(user.id(), 1, 12.0),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(store.rate_movie(42, 1, 5.0), Err(AppError::NotFound(_))));

        let ratings = store.get_user(user.id()).unwrap().watched_movies();
        assert_eq!(ratings.len(), 1);
        assert_eq!(ratings[&1], 9.0);
    }

    #[test]
    fn test_insert_user_advances_id_counter() {
        let mut store = DataStore::new();
        store.insert_user(User::new(7, "restored", "pw")).unwrap();
        assert_eq!(store.next_user_id(), 8);

        let err = store.insert_user(User::new(7, "other", "pw")).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let fresh = store.register("fresh", "pw").unwrap();
        assert_eq!(fresh.id(), 8);
    }

    #[test]
    fn test_insert_user_with_max_id_does_not_overflow() {
        let mut store = DataStore::new();
        store.insert_user(User::new(u32::MAX, "last", "pw")).unwrap();
        assert_eq!(store.next_user_id(), u32::MAX);
        assert_eq!(store.get_user(u32::MAX).map(User::name), Some("last"));

        let err = store.register("late", "pw").unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(store.users().count(), 1);
    }

    #[test]
    fn test_source_returns_copies() {
        let mut store = DataStore::with_seed_catalog();
        let user = store.register("alice", "a").unwrap();

        let snapshot = store.all_users();
        store.rate_movie(user.id(), 3, 8.0).unwrap();

        assert!(snapshot[0].watched_movies().is_empty());
        assert_eq!(store.all_users()[0].watched_movies().len(), 1);
        assert_eq!(store.all_movies().len(), 25);
        assert_eq!(store.movie(2).map(|m| m.year), Some(1972));
    }
}
