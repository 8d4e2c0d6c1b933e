pub mod genre;
pub mod movie;
pub mod user;

pub use genre::Genre;
pub use movie::{Movie, MovieId};
pub use user::{User, UserId, MAX_RATING, MIN_RATING};
