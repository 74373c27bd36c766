//! Menu dialogue driving the game catalog
//!
//! Every menu is re-displayed in place after an invalid choice, and every
//! finished action (add, remove, search) returns to the main menu.

use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::{debug, info};

use mygamedb_config::MessageConfig;
use mygamedb_library::{CatalogStore, Game, GameField, Platform, Rating};

const NOT_IN_DATABASE: &str = "That game is not in your database";

/// Menus the dialogue can be sitting in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Menu {
    Main,
    AddOrRemove,
    Search,
}

/// What to do after handling a menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Goto(Menu),
    /// User chose exit, or input ended
    Quit,
}

/// One interactive session over a catalog
pub struct Session<R, W> {
    store: CatalogStore,
    messages: MessageConfig,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(store: CatalogStore, messages: MessageConfig, input: R, output: W) -> Self {
        Self {
            store,
            messages,
            input,
            output,
        }
    }

    /// Run menus until the user exits or input ends
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Greetings")?;
        writeln!(self.output)?;

        let mut menu = Menu::Main;
        loop {
            debug!(?menu, "Showing menu");

            let step = match menu {
                Menu::Main => self.main_menu()?,
                Menu::AddOrRemove => self.add_or_remove_menu()?,
                Menu::Search => self.search_menu()?,
            };

            match step {
                Step::Goto(next) => menu = next,
                Step::Quit => break,
            }
        }

        Ok(())
    }

    /// Commit the catalog and release it
    pub fn finish(mut self) -> Result<()> {
        self.output.flush()?;
        self.store.close()?;
        Ok(())
    }

    fn main_menu(&mut self) -> Result<Step> {
        let Some(response) = self.menu(
            "Choose one of the following:",
            &[
                "add/remove game(s)",
                "search your game database",
                "exit myGameDatabase",
            ],
        )?
        else {
            return Ok(Step::Quit);
        };

        match response.as_str() {
            "1" => Ok(Step::Goto(Menu::AddOrRemove)),
            "2" => Ok(Step::Goto(Menu::Search)),
            "3" => {
                writeln!(self.output, "Goodbye")?;
                Ok(Step::Quit)
            }
            _ => {
                self.invalid_response()?;
                Ok(Step::Goto(Menu::Main))
            }
        }
    }

    fn add_or_remove_menu(&mut self) -> Result<Step> {
        let Some(response) = self.menu(
            "Would you like to:",
            &[
                "add a game to your collection",
                "remove a game from your collection",
                "return to the main menu",
            ],
        )?
        else {
            return Ok(Step::Quit);
        };

        match response.as_str() {
            "1" => self.add_game(),
            "2" => self.remove_game(),
            "3" => Ok(Step::Goto(Menu::Main)),
            _ => {
                self.invalid_response()?;
                Ok(Step::Goto(Menu::AddOrRemove))
            }
        }
    }

    fn add_game(&mut self) -> Result<Step> {
        let Some(name) = self.ask("What is the name of the game you'd like to add?")? else {
            return Ok(Step::Quit);
        };

        if self.store.exists(&name)? {
            writeln!(self.output, "That game is already in your database")?;
            return Ok(Step::Goto(Menu::Main));
        }

        let platforms = Platform::ALL.map(|p| (p, p.display_name().to_string()));
        let Some(platform) = self.pick(&format!("What platform is {name} on?"), &platforms)? else {
            return Ok(Step::Quit);
        };

        let ratings = Rating::ALL.map(|r| (r, format!("{} for {}", r, r.description())));
        let Some(rating) = self.pick(&format!("What is the ESRB rating of {name}?"), &ratings)?
        else {
            return Ok(Step::Quit);
        };

        let id = self
            .store
            .insert(&name, platform.as_str(), rating.as_str())?;
        info!(id, %platform, %rating, "Added {}", name);

        writeln!(self.output, "{name} has been added to your database")?;
        Ok(Step::Goto(Menu::Main))
    }

    fn remove_game(&mut self) -> Result<Step> {
        let Some(name) = self.ask("What game would you like to remove?")? else {
            return Ok(Step::Quit);
        };

        if self.store.exists(&name)? {
            let removed = self.store.delete(&name)?;
            info!(removed, "Removed {}", name);
            writeln!(self.output, "{name} has been successfully removed")?;
        } else {
            writeln!(self.output, "{NOT_IN_DATABASE}")?;
        }

        Ok(Step::Goto(Menu::Main))
    }

    fn search_menu(&mut self) -> Result<Step> {
        let Some(response) = self.menu(
            "How would you like to search?",
            &[
                "by name",
                "by platform",
                "by ESRB rating",
                "return to main menu",
            ],
        )?
        else {
            return Ok(Step::Quit);
        };

        match response.as_str() {
            "1" => self.search_by_name(),
            "2" => {
                let platforms = [Platform::Ps4, Platform::Xone, Platform::WiiU]
                    .map(|p| (p.as_str(), p.display_name().to_string()));
                self.search_by_field(
                    GameField::Platform,
                    "Do you want to see games on the platform",
                    &platforms,
                )
            }
            "3" => {
                let ratings = Rating::ALL.map(|r| (r.as_str(), r.as_str().to_string()));
                self.search_by_field(
                    GameField::Rating,
                    "Do you want to see games with an ESRB rating of:",
                    &ratings,
                )
            }
            "4" => Ok(Step::Goto(Menu::Main)),
            _ => {
                self.invalid_response()?;
                Ok(Step::Goto(Menu::Search))
            }
        }
    }

    /// Single game, series (name prefix) or the whole catalog by name
    fn search_by_name(&mut self) -> Result<Step> {
        loop {
            let Some(response) = self.menu(
                "Do you want to search for:",
                &[
                    "a single game",
                    "a series of games",
                    "all your games organized alphabetically",
                ],
            )?
            else {
                return Ok(Step::Quit);
            };

            match response.as_str() {
                "1" => {
                    let Some(name) = self.ask("What is the name of the game?")? else {
                        return Ok(Step::Quit);
                    };

                    if self.store.exists(&name)? {
                        let games = self.store.find_by_exact_name(&name)?;
                        self.print_results(&games)?;
                    } else {
                        writeln!(self.output, "{NOT_IN_DATABASE}")?;
                    }
                }
                "2" => {
                    let Some(prefix) = self.ask("What is the name of the series?")? else {
                        return Ok(Step::Quit);
                    };

                    let games = self.store.find_by_name_prefix(&prefix)?;
                    self.print_results(&games)?;
                }
                "3" => {
                    let games = self.store.find_all_sorted_by_name()?;
                    self.print_results(&games)?;
                }
                _ => {
                    self.invalid_response()?;
                    continue;
                }
            }

            return Ok(Step::Goto(Menu::Main));
        }
    }

    fn search_by_field(
        &mut self,
        field: GameField,
        header: &str,
        choices: &[(&'static str, String)],
    ) -> Result<Step> {
        let labels: Vec<&str> = choices.iter().map(|(_, label)| label.as_str()).collect();

        loop {
            let Some(response) = self.menu(header, &labels)? else {
                return Ok(Step::Quit);
            };

            if let Some(index) = choice_index(&response, choices.len()) {
                let value = choices[index].0;
                debug!(field = field.column(), value, "Searching by field");

                let games = self.store.find_by_field(field, value)?;
                self.print_results(&games)?;
                return Ok(Step::Goto(Menu::Main));
            }

            self.invalid_response()?;
        }
    }

    /// Re-ask `question` until one of the numbered choices is given
    fn pick<T: Copy>(&mut self, question: &str, choices: &[(T, String)]) -> Result<Option<T>> {
        let listing = choices
            .iter()
            .enumerate()
            .map(|(i, (_, label))| format!("{} - {}", i + 1, label))
            .collect::<Vec<_>>()
            .join(", ");

        writeln!(self.output, "{question}")?;
        loop {
            writeln!(self.output, "{listing}")?;

            let Some(response) = self.read_line()? else {
                return Ok(None);
            };

            if let Some(index) = choice_index(&response, choices.len()) {
                return Ok(Some(choices[index].0));
            }

            self.invalid_response()?;
            writeln!(self.output, "{question}")?;
        }
    }

    /// Show a numbered menu and read the selection
    fn menu(&mut self, header: &str, options: &[&str]) -> Result<Option<String>> {
        writeln!(self.output, "{header}")?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "{} - {}", i + 1, option)?;
        }
        writeln!(self.output)?;

        writeln!(self.output, "Your Selection:")?;
        self.read_line()
    }

    fn ask(&mut self, question: &str) -> Result<Option<String>> {
        writeln!(self.output, "{question}")?;
        self.read_line()
    }

    fn invalid_response(&mut self) -> Result<()> {
        writeln!(self.output, "{}", self.messages.invalid_response)?;
        Ok(())
    }

    fn print_results(&mut self, games: &[Game]) -> Result<()> {
        writeln!(self.output)?;
        for game in games {
            writeln!(self.output, "{game}")?;
        }
        writeln!(self.output)?;
        Ok(())
    }

    /// Next input line without its terminator, or `None` at end of input.
    ///
    /// Bytes that are not UTF-8 are replaced rather than failing the read, so
    /// they never match a menu choice and get the invalid response.
    fn read_line(&mut self) -> Result<Option<String>> {
        self.output.flush()?;

        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            debug!("Input closed");
            return Ok(None);
        }

        if raw.ends_with(b"\n") {
            raw.pop();
            if raw.ends_with(b"\r") {
                raw.pop();
            }
        }

        Ok(Some(String::from_utf8_lossy(&raw).into_owned()))
    }

    #[cfg(test)]
    fn into_store(self) -> CatalogStore {
        self.store
    }
}

/// Zero-based index for a 1-based menu answer, accepting only the bare digits
fn choice_index(response: &str, len: usize) -> Option<usize> {
    (1..=len)
        .find(|n| response == n.to_string())
        .map(|n| n - 1)
}
