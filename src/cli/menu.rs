use std::io::{BufRead, Write};

use crate::{
    error::{AppError, AppResult},
    models::UserId,
};

use super::{
    console::{is_end_of_input, Console},
    handlers, AppState,
};

/// One interactive session; holds the logged-in user, if any
pub struct Session<R, W> {
    state: AppState,
    console: Console<R, W>,
    current_user: Option<UserId>,
}

/// What the main loop does after a menu action
enum Flow {
    Continue,
    Exit,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(state: AppState, input: R, output: W) -> Self {
        Self {
            state,
            console: Console::new(input, output),
            current_user: None,
        }
    }

    /// Runs menus until the user exits or the input ends
    pub fn run(&mut self) -> AppResult<()> {
        self.console.say("=== Movie Recommendations ===")?;
        loop {
            let step = match self.current_user {
                None => self.main_menu(),
                Some(user_id) => self.user_menu(user_id),
            };

            match step {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) if is_end_of_input(&e) => break,
                Err(e) if is_recoverable(&e) => self.console.say(e)?,
                Err(e) => return Err(e),
            }
        }
        self.console.say("Goodbye!")?;
        Ok(())
    }

    fn main_menu(&mut self) -> AppResult<Flow> {
        self.console.say("")?;
        self.console.say("1. Register")?;
        self.console.say("2. Log in")?;
        self.console.say("0. Exit")?;

        match self.console.prompt("Choice")?.as_str() {
            "1" => {
                self.current_user = Some(handlers::register(&self.state, &mut self.console)?);
            }
            "2" => {
                self.current_user = Some(handlers::login(&self.state, &mut self.console)?);
            }
            "0" => return Ok(Flow::Exit),
            other => self.console.say(format!("Unknown option: {}", other))?,
        }
        Ok(Flow::Continue)
    }

    fn user_menu(&mut self, user_id: UserId) -> AppResult<Flow> {
        self.console.say("")?;
        self.console.say("1. List movies")?;
        self.console.say("2. Rate a movie")?;
        self.console.say("3. Set preferred genres")?;
        self.console.say("4. Show my ratings")?;
        self.console.say("5. Get recommendations")?;
        self.console.say("0. Log out")?;

        let state = &self.state;
        let console = &mut self.console;
        match console.prompt("Choice")?.as_str() {
            "1" => handlers::list_movies(state, console)?,
            "2" => handlers::rate_movie(state, console, user_id)?,
            "3" => handlers::set_preferred_genres(state, console, user_id)?,
            "4" => handlers::show_ratings(state, console, user_id)?,
            "5" => handlers::recommend(state, console, user_id)?,
            "0" => {
                tracing::debug!(user_id, "Logged out");
                self.current_user = None;
            }
            other => console.say(format!("Unknown option: {}", other))?,
        }
        Ok(Flow::Continue)
    }

    pub fn into_output(self) -> W {
        self.console.into_output()
    }
}

/// Errors caused by user input; the session reports them and carries on
fn is_recoverable(err: &AppError) -> bool {
    matches!(
        err,
        AppError::NotFound(_)
            | AppError::InvalidInput(_)
            | AppError::Conflict(_)
            | AppError::Unauthorized(_)
    )
}
