use crate::{
    db::{json::JsonFile, DataStore, SharedStore},
    error::AppResult,
    services::RecommendationParams,
};

/// State shared by every console session
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    persistence: Option<JsonFile>,
    pub default_max_results: usize,
}

impl AppState {
    /// State backed by a JSON file, saved after every change
    pub fn new(store: DataStore, persistence: JsonFile, default_max_results: usize) -> Self {
        Self {
            store: SharedStore::new(store),
            persistence: Some(persistence),
            default_max_results,
        }
    }

    /// State that is never written to disk
    pub fn in_memory(store: DataStore) -> Self {
        Self {
            store: SharedStore::new(store),
            persistence: None,
            default_max_results: RecommendationParams::default().max_results,
        }
    }

    /// Writes the current users to disk, if a file is configured
    pub fn persist(&self) -> AppResult<()> {
        match &self.persistence {
            Some(file) => file.save(&self.store.read()),
            None => Ok(()),
        }
    }
}
