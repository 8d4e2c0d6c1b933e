//! Catalog and user storage
//!
//! Strategies only ever see the store through [`MovieSource`], a read-only
//! view that hands out owned copies so callers cannot reach internal state.

use crate::models::{Movie, MovieId, User};

pub mod catalog;
pub mod json;
pub mod shared;
pub mod store;

pub use shared::SharedStore;
pub use store::DataStore;

/// Read access to the catalog and the user store
#[cfg_attr(test, mockall::automock)]
pub trait MovieSource: Send + Sync {
    /// Every catalog movie, ordered by ID
    fn all_movies(&self) -> Vec<Movie>;

    /// A single movie, or `None` if the ID is not in the catalog
    fn movie(&self, id: MovieId) -> Option<Movie>;

    /// Every registered user, ordered by ID
    fn all_users(&self) -> Vec<User>;
}
