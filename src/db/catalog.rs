use crate::models::Genre;

/// Title, genres, director, year, rating
pub type CatalogEntry = (&'static str, &'static [Genre], &'static str, i32, f64);

/// Built-in catalog. Regenerated on every start and never persisted; entries
/// receive IDs 1.. in this order.
pub const SEED_MOVIES: &[CatalogEntry] = &[
    ("The Matrix", &[Genre::SciFi, Genre::Action], "Lana Wachowski", 1999, 8.7),
    ("The Godfather", &[Genre::Drama, Genre::Thriller], "Francis Ford Coppola", 1972, 9.2),
    ("The Dark Knight", &[Genre::Action, Genre::Drama], "Christopher Nolan", 2008, 9.0),
    ("The Shawshank Redemption", &[Genre::Drama], "Frank Darabont", 1994, 9.3),
    ("Forrest Gump", &[Genre::Drama, Genre::Comedy], "Robert Zemeckis", 1994, 8.8),
    ("Inception", &[Genre::SciFi, Genre::Thriller], "Christopher Nolan", 2010, 8.8),
    ("Interstellar", &[Genre::SciFi, Genre::Drama], "Christopher Nolan", 2014, 8.6),
    ("Fight Club", &[Genre::Drama, Genre::Thriller], "David Fincher", 1999, 8.8),
    ("The Green Mile", &[Genre::Drama, Genre::Fantasy], "Frank Darabont", 1999, 8.6),
    (
        "The Lord of the Rings: The Return of the King",
        &[Genre::Fantasy, Genre::Adventure],
        "Peter Jackson",
        2003,
        8.9,
    ),
    (
        "Pirates of the Caribbean",
        &[Genre::Adventure, Genre::Comedy],
        "Gore Verbinski",
        2003,
        8.0,
    ),
    (
        "Harry Potter and the Philosopher's Stone",
        &[Genre::Fantasy, Genre::Adventure],
        "Chris Columbus",
        2001,
        7.6,
    ),
    ("Titanic", &[Genre::Romance, Genre::Drama], "James Cameron", 1997, 7.8),
    ("Avatar", &[Genre::SciFi, Genre::Adventure], "James Cameron", 2009, 7.8),
    ("The Lion King", &[Genre::Animation, Genre::Drama], "Roger Allers", 1994, 8.5),
    ("The Shining", &[Genre::Horror, Genre::Thriller], "Stanley Kubrick", 1980, 8.4),
    ("Alien", &[Genre::Horror, Genre::SciFi], "Ridley Scott", 1979, 8.4),
    ("Terminator 2", &[Genre::Action, Genre::SciFi], "James Cameron", 1991, 8.5),
    ("The Avengers", &[Genre::Action, Genre::SciFi], "Joss Whedon", 2012, 8.0),
    ("Joker", &[Genre::Drama, Genre::Thriller], "Todd Phillips", 2019, 8.4),
    ("Parasite", &[Genre::Drama, Genre::Thriller], "Bong Joon Ho", 2019, 8.5),
    (
        "Once Upon a Time in Hollywood",
        &[Genre::Comedy, Genre::Drama],
        "Quentin Tarantino",
        2019,
        7.6,
    ),
    ("Dune", &[Genre::SciFi, Genre::Adventure], "Denis Villeneuve", 2021, 8.0),
    ("Oppenheimer", &[Genre::Drama, Genre::Thriller], "Christopher Nolan", 2023, 8.3),
    ("Barbie", &[Genre::Comedy, Genre::Romance], "Greta Gerwig", 2023, 6.9),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_entries_are_well_formed() {
        assert_eq!(SEED_MOVIES.len(), 25);
        for (title, genres, director, _year, rating) in SEED_MOVIES {
            assert!(!title.is_empty());
            assert!(!genres.is_empty(), "{} has no genres", title);
            assert!(!director.is_empty());
            assert!((0.0..=10.0).contains(rating));
        }
    }
}
