//! Domain entities: core data structures

use std::cmp::Ordering;
use std::fmt;

use generational_arena::Index;
use serde::{Deserialize, Serialize};

/// Handle of a category node inside a [`CategoryRegistry`](crate::domain::CategoryRegistry).
pub type CategoryId = Index;

/// A category entry as delivered by the catalog, before linking.
///
/// Unknown catalog fields (`country_whitelist`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// Unique stable identifier
    pub alias: String,
    /// Display name, not unique
    pub title: String,
    /// Aliases of parent categories; empty for roots
    #[serde(default, rename = "parents")]
    pub parent_aliases: Vec<String>,
}

impl CategoryRecord {
    pub fn new(alias: impl Into<String>, title: impl Into<String>, parents: &[&str]) -> Self {
        Self {
            alias: alias.into(),
            title: title.into(),
            parent_aliases: parents.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Category node in the arena-based taxonomy.
///
/// A node may be listed as a child of several parents; children are arena
/// handles, never owned values.
#[derive(Debug, Clone)]
pub struct CategoryNode {
    pub alias: String,
    pub title: String,
    pub parent_aliases: Vec<String>,
    /// Filled once by the linking pass
    pub children: Vec<CategoryId>,
}

impl CategoryNode {
    pub fn from_record(record: CategoryRecord) -> Self {
        Self {
            alias: record.alias,
            title: record.title,
            parent_aliases: record.parent_aliases,
            children: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_aliases.is_empty()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// No children and at least one parent.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty() && !self.parent_aliases.is_empty()
    }

    /// Display ordering. Not an identity comparison.
    pub fn cmp_by_title(&self, other: &Self) -> Ordering {
        self.title.cmp(&other.title)
    }

    pub fn to_selected(&self) -> SelectedCategory {
        SelectedCategory {
            alias: self.alias.clone(),
            title: self.title.clone(),
        }
    }
}

impl fmt::Display for CategoryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// The category handed back to the caller once a traversal ends with a selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectedCategory {
    pub alias: String,
    pub title: String,
}

impl fmt::Display for SelectedCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Something the user plans to do, tied to a business category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub name: String,
    pub category: SelectedCategory,
}

impl Activity {
    pub fn new(name: impl Into<String>, category: SelectedCategory) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}
