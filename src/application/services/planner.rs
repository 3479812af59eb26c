//! Interactive activity planning
//!
//! Menu loop over an [`ActivityList`]; each new activity gets its category
//! from a [`PickerService`] session on the shared view.

use tracing::{info, instrument};

use crate::application::services::picker::{say, PickerService};
use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{Activity, ActivityList, CategoryTreeView};
use crate::infrastructure::traits::Console;

pub const MENU: &str = "What would you like to do? Select one of the following options [1-5]:
1. Add an activity to your current list
2. Remove an activity from your current list
3. Change the priority of an activity
4. View your current activity list
5. Done";

/// Service running the planning menu.
pub struct PlannerService {
    picker: PickerService,
    capacity: usize,
}

impl PlannerService {
    pub fn new(picker: PickerService, capacity: usize) -> Self {
        Self { picker, capacity }
    }

    /// Run the menu until the user is done or the input ends.
    #[instrument(level = "debug", skip(self, view, console))]
    pub fn run(
        &self,
        view: &CategoryTreeView,
        console: &mut dyn Console,
    ) -> ApplicationResult<ActivityList> {
        let mut list = ActivityList::new(self.capacity);

        loop {
            let Some(option) = console.read_line(MENU).with_context("read input")? else {
                return Ok(list);
            };
            let finished = match option.trim() {
                "1" => self.add(&mut list, view, console)?,
                "2" => remove(&mut list, console)?,
                "3" => change_priority(&mut list, console)?,
                "4" => {
                    show_list(&list, console)?;
                    false
                }
                "5" => true,
                _ => {
                    say(console, "Please enter a valid option [1-5].")?;
                    false
                }
            };
            if finished {
                info!("planned {} activities", list.len());
                return Ok(list);
            }
        }
    }

    // Each step returns true when the input ended mid-step.
    fn add(
        &self,
        list: &mut ActivityList,
        view: &CategoryTreeView,
        console: &mut dyn Console,
    ) -> ApplicationResult<bool> {
        if list.is_full() {
            say(
                console,
                &format!(
                    "Your list is full (max size of {}). Remove an activity before adding another.",
                    list.capacity()
                ),
            )?;
            return Ok(false);
        }

        let Some(name) = console
            .read_line("What activity will you be doing?")
            .with_context("read input")?
        else {
            return Ok(true);
        };
        let Some(category) = self.picker.pick(view, console)? else {
            return Ok(true);
        };

        let priority = if list.is_empty() {
            1
        } else {
            let max = list.len() + 1;
            match read_priority(
                console,
                &format!("Assign a priority to this activity [1-{}]:", max),
                max,
            )? {
                Some(priority) => priority,
                None => return Ok(true),
            }
        };

        list.add(Activity::new(name.trim(), category), priority)?;
        show_list(list, console)?;
        Ok(false)
    }
}

fn remove(list: &mut ActivityList, console: &mut dyn Console) -> ApplicationResult<bool> {
    if list.is_empty() {
        say(console, EMPTY_LIST)?;
        return Ok(false);
    }
    show_list(list, console)?;

    let max = list.len();
    let Some(priority) = read_priority(
        console,
        &format!("Which activity would you like to remove [1-{}]?", max),
        max,
    )?
    else {
        return Ok(true);
    };
    list.remove(priority)?;
    show_list(list, console)?;
    Ok(false)
}

fn change_priority(list: &mut ActivityList, console: &mut dyn Console) -> ApplicationResult<bool> {
    if list.is_empty() {
        say(console, EMPTY_LIST)?;
        return Ok(false);
    }
    if list.len() < 2 {
        say(
            console,
            "Your list only has one activity. Priority cannot be changed.",
        )?;
        return Ok(false);
    }
    show_list(list, console)?;

    let max = list.len();
    let Some(from) = read_priority(
        console,
        &format!("Which activity priority would you like to change [1-{}]?", max),
        max,
    )?
    else {
        return Ok(true);
    };
    let name = list.get(from).map(|a| a.name.clone()).unwrap_or_default();
    let Some(to) = read_priority(
        console,
        &format!("What should be the new priority for \"{}\" [1-{}]?", name, max),
        max,
    )?
    else {
        return Ok(true);
    };

    if list.reprioritize(from, to)? {
        show_list(list, console)?;
    } else {
        say(
            console,
            &format!("\"{}\" already has priority {}. No changes made.", name, to),
        )?;
    }
    Ok(false)
}

const EMPTY_LIST: &str = "Your list is empty. Please add an activity first.";

/// Ask until a number in `1..=max` is entered; None at end of input.
fn read_priority(
    console: &mut dyn Console,
    prompt: &str,
    max: usize,
) -> ApplicationResult<Option<usize>> {
    loop {
        let Some(input) = console.read_line(prompt).with_context("read input")? else {
            return Ok(None);
        };
        match input.trim().parse::<usize>() {
            Ok(n) if (1..=max).contains(&n) => return Ok(Some(n)),
            _ => say(
                console,
                &format!("Please enter a number between 1 and {}.", max),
            )?,
        }
    }
}

fn show_list(list: &ActivityList, console: &mut dyn Console) -> ApplicationResult<()> {
    if list.is_empty() {
        return say(console, "Your list is empty.");
    }
    for line in list.to_string().lines() {
        say(console, line)?;
    }
    Ok(())
}
