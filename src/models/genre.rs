use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use crate::error::AppError;

/// Category label attached to every movie
///
/// Declaration order is significant: it is the tie-break order used when
/// inferring a user's favorite genres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Comedy,
    Drama,
    Horror,
    SciFi,
    Romance,
    Thriller,
    Fantasy,
    Adventure,
    Animation,
}

impl Genre {
    /// Every genre in declaration order
    pub const ALL: [Genre; 10] = [
        Genre::Action,
        Genre::Comedy,
        Genre::Drama,
        Genre::Horror,
        Genre::SciFi,
        Genre::Romance,
        Genre::Thriller,
        Genre::Fantasy,
        Genre::Adventure,
        Genre::Animation,
    ];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Comedy => "Comedy",
            Genre::Drama => "Drama",
            Genre::Horror => "Horror",
            Genre::SciFi => "Sci-Fi",
            Genre::Romance => "Romance",
            Genre::Thriller => "Thriller",
            Genre::Fantasy => "Fantasy",
            Genre::Adventure => "Adventure",
            Genre::Animation => "Animation",
        }
    }

    /// Position in declaration order
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Genre {
    type Err = AppError;

    /// Accepts the variant name or the label, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Genre::ALL
            .into_iter()
            .find(|genre| {
                needle.eq_ignore_ascii_case(genre.label())
                    || needle.eq_ignore_ascii_case(&format!("{:?}", genre))
            })
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown genre: {}", needle)))
    }
}
