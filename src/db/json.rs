use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{
    error::AppResult,
    models::{Genre, MovieId, User, UserId},
};

use super::DataStore;

/// On-disk document. Only users are persisted; the catalog is rebuilt from
/// the built-in list on every load.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredData {
    #[serde(default)]
    next_user_id: UserId,
    #[serde(default)]
    users: BTreeMap<UserId, StoredUser>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredUser {
    name: String,
    password: String,
    #[serde(default)]
    ratings: BTreeMap<MovieId, f64>,
    #[serde(default)]
    preferred_genres: Vec<Genre>,
}

impl From<&User> for StoredUser {
    fn from(user: &User) -> Self {
        Self {
            name: user.name().to_string(),
            password: user.password().to_string(),
            ratings: user.watched_movies().clone(),
            preferred_genres: user.preferred_genres().to_vec(),
        }
    }
}

/// JSON file holding every registered user
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Builds a store from the built-in catalog plus the users on disk
    ///
    /// A missing file yields a store with no users. Ratings that reference
    /// movies no longer in the catalog, or that fall outside the allowed
    /// range, are dropped.
    pub fn load(&self) -> AppResult<DataStore> {
        let mut store = DataStore::with_seed_catalog();

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "No data file yet, starting fresh");
                return Ok(store);
            }
            Err(e) => return Err(e.into()),
        };

        let data: StoredData = serde_json::from_str(&contents)?;

        for (id, stored) in data.users {
            let mut user = User::new(id, stored.name, stored.password);
            for (movie_id, rating) in stored.ratings {
                if store.get_movie(movie_id).is_none() {
                    tracing::warn!(user_id = id, movie_id, "Dropping rating for unknown movie");
                    continue;
                }
                if let Err(e) = user.add_rating(movie_id, rating) {
                    tracing::warn!(user_id = id, movie_id, error = %e, "Dropping stored rating");
                }
            }
            user.set_preferred_genres(stored.preferred_genres);
            store.insert_user(user)?;
        }
        store.reserve_user_ids(data.next_user_id);

        tracing::info!(
            path = %self.path.display(),
            user_count = store.users().count(),
            "Loaded user data"
        );

        Ok(store)
    }

    /// Writes every user to disk, replacing the previous file
    pub fn save(&self, store: &DataStore) -> AppResult<()> {
        let data = StoredData {
            next_user_id: store.next_user_id(),
            users: store.users().map(|u| (u.id(), StoredUser::from(u))).collect(),
        };
        let json = serde_json::to_string_pretty(&data)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), user_count = data.users.len(), "Saved user data");
        Ok(())
    }
}
