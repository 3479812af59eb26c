//! Prioritized activity list.

use std::fmt;

use itertools::Itertools;

use crate::domain::entities::Activity;
use crate::domain::error::{DomainError, DomainResult};

/// Activities ordered by priority; priority `n` is position `n - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityList {
    activities: Vec<Activity>,
    capacity: usize,
}

impl ActivityList {
    pub fn new(capacity: usize) -> Self {
        Self {
            activities: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.activities.len() >= self.capacity
    }

    pub fn get(&self, priority: usize) -> Option<&Activity> {
        priority
            .checked_sub(1)
            .and_then(|idx| self.activities.get(idx))
    }

    /// Activities with their priority, highest first.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Activity)> {
        self.activities.iter().enumerate().map(|(i, a)| (i + 1, a))
    }

    /// Insert at `priority` (1..=len+1), pushing lower priorities down.
    pub fn add(&mut self, activity: Activity, priority: usize) -> DomainResult<()> {
        if self.is_full() {
            return Err(DomainError::ActivityListFull(self.capacity));
        }
        self.check_priority(priority, self.activities.len() + 1)?;
        self.activities.insert(priority - 1, activity);
        Ok(())
    }

    /// Remove the activity at `priority`, moving lower priorities up.
    pub fn remove(&mut self, priority: usize) -> DomainResult<Activity> {
        self.check_priority(priority, self.activities.len())?;
        Ok(self.activities.remove(priority - 1))
    }

    /// Move an activity to a new priority.
    ///
    /// Returns `false` when `from == to` and nothing changed.
    pub fn reprioritize(&mut self, from: usize, to: usize) -> DomainResult<bool> {
        let max = self.activities.len();
        self.check_priority(from, max)?;
        self.check_priority(to, max)?;
        if from == to {
            return Ok(false);
        }
        let activity = self.activities.remove(from - 1);
        self.activities.insert(to - 1, activity);
        Ok(true)
    }

    /// Distinct category aliases in priority order, one search per category.
    pub fn search_categories(&self) -> Vec<&str> {
        self.activities
            .iter()
            .map(|a| a.category.alias.as_str())
            .unique()
            .collect()
    }

    fn check_priority(&self, priority: usize, max: usize) -> DomainResult<()> {
        if priority == 0 || priority > max {
            return Err(DomainError::PriorityOutOfRange { priority, max });
        }
        Ok(())
    }
}

impl fmt::Display for ActivityList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current list:")?;
        for (priority, activity) in self.iter() {
            writeln!(
                f,
                "{}. {} [{}]",
                priority, activity.name, activity.category.title
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SelectedCategory;
    use rstest::rstest;

    fn activity(name: &str, alias: &str) -> Activity {
        Activity::new(
            name,
            SelectedCategory {
                alias: alias.into(),
                title: alias.to_uppercase(),
            },
        )
    }

    fn names(list: &ActivityList) -> Vec<&str> {
        list.iter().map(|(_, a)| a.name.as_str()).collect()
    }

    fn filled(count: usize) -> ActivityList {
        let mut list = ActivityList::new(10);
        for i in 0..count {
            list.add(activity(&format!("a{}", i + 1), "food"), i + 1)
                .unwrap();
        }
        list
    }

    #[test]
    fn given_list_when_adding_at_top_then_shifts_others_down() {
        let mut list = filled(2);

        list.add(activity("first", "bars"), 1).unwrap();

        assert_eq!(names(&list), vec!["first", "a1", "a2"]);
        assert_eq!(list.get(1).unwrap().name, "first");
    }

    #[rstest]
    #[case(0)]
    #[case(4)]
    fn given_invalid_priority_when_adding_then_errors(#[case] priority: usize) {
        let mut list = filled(2);

        let result = list.add(activity("x", "bars"), priority);

        assert_eq!(
            result,
            Err(DomainError::PriorityOutOfRange { priority, max: 3 })
        );
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn given_full_list_when_adding_then_errors() {
        let mut list = ActivityList::new(1);
        list.add(activity("a", "food"), 1).unwrap();

        assert_eq!(
            list.add(activity("b", "food"), 1),
            Err(DomainError::ActivityListFull(1))
        );
    }

    #[test]
    fn given_list_when_removing_then_moves_others_up() {
        let mut list = filled(3);

        let removed = list.remove(2).unwrap();

        assert_eq!(removed.name, "a2");
        assert_eq!(names(&list), vec!["a1", "a3"]);
    }

    #[test]
    fn given_empty_list_when_removing_then_errors() {
        let mut list = ActivityList::new(10);

        assert!(list.remove(1).is_err());
    }

    #[rstest]
    #[case(1, 3, vec!["a2", "a3", "a1"])]
    #[case(3, 1, vec!["a3", "a1", "a2"])]
    #[case(2, 3, vec!["a1", "a3", "a2"])]
    fn given_list_when_reprioritizing_then_reorders(
        #[case] from: usize,
        #[case] to: usize,
        #[case] expected: Vec<&str>,
    ) {
        let mut list = filled(3);

        assert_eq!(list.reprioritize(from, to), Ok(true));
        assert_eq!(names(&list), expected);
    }

    #[test]
    fn given_same_priority_when_reprioritizing_then_no_change() {
        let mut list = filled(2);

        assert_eq!(list.reprioritize(2, 2), Ok(false));
        assert_eq!(names(&list), vec!["a1", "a2"]);
    }

    #[test]
    fn given_duplicate_categories_when_collecting_search_categories_then_distinct() {
        let mut list = ActivityList::new(10);
        list.add(activity("lunch", "food"), 1).unwrap();
        list.add(activity("drinks", "bars"), 2).unwrap();
        list.add(activity("dinner", "food"), 3).unwrap();

        assert_eq!(list.search_categories(), vec!["food", "bars"]);
    }

    #[test]
    fn given_list_when_displaying_then_numbered_with_category() {
        let mut list = ActivityList::new(10);
        list.add(activity("lunch", "food"), 1).unwrap();

        assert_eq!(list.to_string(), "Current list:\n1. lunch [FOOD]\n");
    }
}
