//! Interactive category selection
//!
//! Drives a [`TraversalState`] from console input until the user selects a
//! category or closes the input.

use tracing::{debug, instrument};

use crate::application::command::NavCommand;
use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{CategoryTreeView, Descent, SelectedCategory, TraversalState};
use crate::infrastructure::traits::Console;

pub const INSTRUCTIONS: &str = "Select a category for your activity. To drill down into the \
sub-categories, enter the name of the category you want to explore further (case-sensitive). \
When you have decided on one of the categories displayed, enter \"Select [category_name]\". \
You can select any of the categories or sub-categories listed.";

/// Service running one category selection per call.
#[derive(Debug, Clone)]
pub struct PickerService {
    back_keyword: String,
}

impl PickerService {
    pub fn new(back_keyword: impl Into<String>) -> Self {
        Self {
            back_keyword: back_keyword.into(),
        }
    }

    pub fn back_keyword(&self) -> &str {
        &self.back_keyword
    }

    /// Run a selection session on `view`.
    ///
    /// Returns None when the input ends before a selection. Navigation
    /// errors are reported on the console and never end the session.
    #[instrument(level = "debug", skip(self, view, console))]
    pub fn pick(
        &self,
        view: &CategoryTreeView,
        console: &mut dyn Console,
    ) -> ApplicationResult<Option<SelectedCategory>> {
        let mut state = TraversalState::new(view);
        let prompt = format!(
            "Enter a category, use \"Select [category]\" to select, or use \"{}\" to go back up one category:",
            self.back_keyword
        );

        say(console, INSTRUCTIONS)?;
        show_level(console, &state, view)?;

        loop {
            let Some(input) = console.read_line(&prompt).with_context("read input")? else {
                debug!("input closed before selection");
                return Ok(None);
            };

            match NavCommand::parse(&input, &self.back_keyword) {
                NavCommand::Back => match state.ascend() {
                    Ok(_) => show_level(console, &state, view)?,
                    Err(_) => say(console, "You cannot go back any further.")?,
                },
                NavCommand::Descend(title) => match state.descend(view, &title) {
                    Ok(Descent::Entered(_)) => show_level(console, &state, view)?,
                    Ok(Descent::NoSubcategories) => say(
                        console,
                        &format!("There are no more sub-categories under {}", title),
                    )?,
                    Err(_) => say(console, INVALID_INPUT)?,
                },
                NavCommand::Select(title) => match state.select(view, &title) {
                    Ok(selected) => {
                        debug!("selected '{}' ({})", selected.title, selected.alias);
                        return Ok(Some(selected));
                    }
                    Err(_) => say(console, INVALID_INPUT)?,
                },
            }
        }
    }
}

const INVALID_INPUT: &str = "You did not enter a valid category or command (case-sensitive).";

pub(crate) fn say(console: &mut dyn Console, line: &str) -> ApplicationResult<()> {
    console.write_line(line).with_context("write output")
}

fn show_level(
    console: &mut dyn Console,
    state: &TraversalState,
    view: &CategoryTreeView,
) -> ApplicationResult<()> {
    for title in state.list(view) {
        say(console, title)?;
    }
    Ok(())
}
