use std::{
    io::{BufRead, Write},
    str::FromStr,
};

use crate::{
    db::MovieSource,
    error::{AppError, AppResult},
    models::{Genre, UserId},
    services::{RecommendationParams, StrategyKind, StrategyRegistry},
};

use super::{console::Console, AppState};

/// Registers a user and returns its ID
pub fn register<R: BufRead, W: Write>(
    state: &AppState,
    console: &mut Console<R, W>,
) -> AppResult<UserId> {
    let name = console.prompt("Name")?;
    let password = console.prompt("Password")?;

    let user = state.store.write().register(&name, &password)?;
    state.persist()?;

    console.say(format!("Registered {}", user))?;
    Ok(user.id())
}

/// Checks credentials and returns the user's ID
pub fn login<R: BufRead, W: Write>(
    state: &AppState,
    console: &mut Console<R, W>,
) -> AppResult<UserId> {
    let name = console.prompt("Name")?;
    let password = console.prompt("Password")?;

    let store = state.store.read();
    let user = store.authenticate(&name, &password).ok_or_else(|| {
        tracing::warn!(name = %name, "Failed login");
        AppError::Unauthorized("Invalid name or password".to_string())
    })?;

    console.say(format!("Welcome, {}!", user.name()))?;
    Ok(user.id())
}

/// Prints the whole catalog
pub fn list_movies<R: BufRead, W: Write>(
    state: &AppState,
    console: &mut Console<R, W>,
) -> AppResult<()> {
    for movie in state.store.snapshot().all_movies() {
        console.say(format!("[{}] {}", movie.id, movie))?;
    }
    Ok(())
}

pub fn rate_movie<R: BufRead, W: Write>(
    state: &AppState,
    console: &mut Console<R, W>,
    user_id: UserId,
) -> AppResult<()> {
    let movie_id: u32 = console.prompt_parsed("Movie ID", None)?;
    let rating: f64 = console.prompt_parsed("Rating (0-10)", None)?;

    let title = {
        let mut store = state.store.write();
        store.rate_movie(user_id, movie_id, rating)?;
        store
            .get_movie(movie_id)
            .map(|movie| movie.title.clone())
            .unwrap_or_default()
    };
    state.persist()?;

    console.say(format!("Rated {} with {}", title, rating))?;
    Ok(())
}

/// Parses a comma separated list of genre names or 1-based menu numbers
pub fn parse_genres(line: &str) -> AppResult<Vec<Genre>> {
    line.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| match token.parse::<usize>() {
            Ok(n) if (1..=Genre::ALL.len()).contains(&n) => Ok(Genre::ALL[n - 1]),
            Ok(n) => Err(AppError::InvalidInput(format!("Unknown genre number: {}", n))),
            Err(_) => Genre::from_str(token),
        })
        .collect()
}

pub fn set_preferred_genres<R: BufRead, W: Write>(
    state: &AppState,
    console: &mut Console<R, W>,
    user_id: UserId,
) -> AppResult<()> {
    for (i, genre) in Genre::ALL.iter().enumerate() {
        console.say(format!("{}. {}", i + 1, genre))?;
    }
    let line = console.prompt("Genres (comma separated, blank to clear)")?;
    let genres = parse_genres(&line)?;

    state
        .store
        .write()
        .set_preferred_genres(user_id, genres.clone())?;
    state.persist()?;

    if genres.is_empty() {
        console.say("Preferred genres cleared; they will be inferred from your ratings.")?;
    } else {
        let labels: Vec<&str> = genres.iter().map(Genre::label).collect();
        console.say(format!("Preferred genres: {}", labels.join(", ")))?;
    }
    Ok(())
}

pub fn show_ratings<R: BufRead, W: Write>(
    state: &AppState,
    console: &mut Console<R, W>,
    user_id: UserId,
) -> AppResult<()> {
    let snapshot = state.store.snapshot();
    let user = snapshot
        .get_user(user_id)
        .ok_or_else(|| AppError::NotFound(format!("User {}", user_id)))?;

    if user.watched_movies().is_empty() {
        console.say("You have not rated any movies yet.")?;
        return Ok(());
    }
    for (movie_id, rating) in user.watched_movies() {
        match snapshot.get_movie(*movie_id) {
            Some(movie) => console.say(format!("[{}] {}: {}", movie_id, movie.title, rating))?,
            None => console.say(format!("[{}] (no longer in catalog): {}", movie_id, rating))?,
        }
    }
    Ok(())
}

fn prompt_strategy<R: BufRead, W: Write>(console: &mut Console<R, W>) -> AppResult<StrategyKind> {
    for kind in StrategyKind::ALL {
        console.say(format!("{}. {}", kind.key(), kind.description()))?;
    }
    loop {
        let key: u8 = console.prompt_parsed("Strategy", None)?;
        match StrategyKind::try_from(key) {
            Ok(kind) => return Ok(kind),
            Err(e) => console.say(e)?,
        }
    }
}

/// Asks for a strategy and filters, then prints the ranked movies
pub fn recommend<R: BufRead, W: Write>(
    state: &AppState,
    console: &mut Console<R, W>,
    user_id: UserId,
) -> AppResult<()> {
    let kind = prompt_strategy(console)?;
    let defaults = RecommendationParams::default();
    let params = RecommendationParams {
        min_rating: console.prompt_parsed("Minimum rating", Some(defaults.min_rating))?,
        min_year: console.prompt_parsed("Minimum year", Some(defaults.min_year))?,
        max_results: console.prompt_parsed("Max results", Some(state.default_max_results))?,
    };

    let snapshot = state.store.snapshot();
    let user = snapshot
        .get_user(user_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("User {}", user_id)))?;

    let registry = StrategyRegistry::new(snapshot);
    let movies = registry.recommend(kind, &user, &params);

    if movies.is_empty() {
        console.say("No recommendations found.")?;
        return Ok(());
    }
    console.say("Recommended for you:")?;
    for (i, movie) in movies.iter().enumerate() {
        console.say(format!("{}. {}", i + 1, movie))?;
    }
    Ok(())
}
