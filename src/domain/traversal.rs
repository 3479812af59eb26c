//! Navigation state for drilling into a [`CategoryTreeView`].

use tracing::debug;

use crate::domain::entities::SelectedCategory;
use crate::domain::error::NavigationError;
use crate::domain::view::{CategoryTreeView, Expansion, LevelId};

/// Outcome of a successful descend request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descent {
    /// Moved one level down
    Entered(LevelId),
    /// Category found but has no sub-categories; state unchanged
    NoSubcategories,
}

/// Current level plus the stack of previously displayed levels.
///
/// Owned by a single session. The view it navigates is never mutated, so any
/// number of states can share one view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalState {
    current: LevelId,
    history: Vec<LevelId>,
}

impl TraversalState {
    /// Start at the merged top level with empty history.
    pub fn new(view: &CategoryTreeView) -> Self {
        Self {
            current: view.top_level(),
            history: Vec::new(),
        }
    }

    pub fn current_level(&self) -> LevelId {
        self.current
    }

    /// Number of levels below the top.
    pub fn depth(&self) -> usize {
        self.history.len()
    }

    pub fn is_at_top(&self) -> bool {
        self.history.is_empty()
    }

    /// Sorted titles of the current level.
    pub fn list<'v>(&self, view: &'v CategoryTreeView) -> Vec<&'v str> {
        view.titles(self.current)
    }

    pub fn descend(
        &mut self,
        view: &CategoryTreeView,
        title: &str,
    ) -> Result<Descent, NavigationError> {
        let (entry, _) = view
            .lookup(self.current, title)
            .ok_or_else(|| NavigationError::NotFound(title.to_string()))?;

        match entry.expansion {
            Expansion::Leaf => Ok(Descent::NoSubcategories),
            Expansion::Level(next) => {
                debug!("descend into '{}'", title);
                self.history.push(self.current);
                self.current = next;
                Ok(Descent::Entered(next))
            }
        }
    }

    pub fn ascend(&mut self) -> Result<LevelId, NavigationError> {
        let previous = self.history.pop().ok_or(NavigationError::AtRoot)?;
        self.current = previous;
        Ok(previous)
    }

    /// Resolve a title at the current level to the chosen category.
    ///
    /// Success ends the traversal; the caller drops the state.
    pub fn select(
        &self,
        view: &CategoryTreeView,
        title: &str,
    ) -> Result<SelectedCategory, NavigationError> {
        view.lookup(self.current, title)
            .map(|(_, node)| node.to_selected())
            .ok_or_else(|| NavigationError::NotFound(title.to_string()))
    }
}
