//! Materialized display index over a linked category registry.
//!
//! Each level is an immutable list of entries; an entry either marks a leaf
//! or points at the level holding its children. Traversal only reads levels
//! and keeps its own navigation stack, so one view serves any number of
//! independent sessions.

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument};

use crate::domain::entities::{CategoryId, CategoryNode};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::registry::CategoryRegistry;

/// Handle of a level inside a [`CategoryTreeView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LevelId(usize);

/// What lies below an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    /// No sub-categories, cannot descend
    Leaf,
    Level(LevelId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelEntry {
    pub category: CategoryId,
    pub expansion: Expansion,
}

/// One displayable set of sibling categories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Level {
    entries: Vec<LevelEntry>,
}

impl Level {
    pub fn entries(&self) -> &[LevelEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read-only nested view of the whole taxonomy, one merged top level holding
/// every root.
///
/// A category with several parents is reachable under each of them and shows
/// the same sub-level on every path.
#[derive(Debug)]
pub struct CategoryTreeView {
    registry: CategoryRegistry,
    levels: Vec<Level>,
}

const TOP_LEVEL: LevelId = LevelId(0);

impl CategoryTreeView {
    /// Expand every root into nested levels and merge them into the top level.
    ///
    /// Fails with `DuplicateRoot` when two roots share a title and with
    /// `CycleDetected` when a category is its own ancestor.
    #[instrument(level = "debug", skip(registry), fields(categories = registry.len()))]
    pub fn materialize(mut registry: CategoryRegistry) -> DomainResult<Self> {
        registry.link_children()?;

        let levels = {
            let mut builder = LevelBuilder::new(&registry);
            let mut titles: HashMap<&str, &str> = HashMap::new();

            for root in registry.root_nodes() {
                let node = builder.node(root)?;
                if let Some(first) = titles.insert(node.title.as_str(), node.alias.as_str()) {
                    return Err(DomainError::DuplicateRoot {
                        title: node.title.clone(),
                        first: first.to_string(),
                        second: node.alias.clone(),
                    });
                }
                let expansion = builder.expand(root)?;
                builder.levels[TOP_LEVEL.0].entries.push(LevelEntry {
                    category: root,
                    expansion,
                });
            }
            builder.levels
        };

        debug!("materialized {} levels", levels.len());
        Ok(Self { registry, levels })
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    pub fn top_level(&self) -> LevelId {
        TOP_LEVEL
    }

    pub fn level(&self, id: LevelId) -> Option<&Level> {
        self.levels.get(id.0)
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Titles at a level, sorted lexicographically.
    pub fn titles(&self, id: LevelId) -> Vec<&str> {
        let mut titles: Vec<&str> = self
            .level(id)
            .map(Level::entries)
            .unwrap_or_default()
            .iter()
            .filter_map(|entry| self.registry.get(entry.category))
            .map(|node| node.title.as_str())
            .collect();
        titles.sort_unstable();
        titles
    }

    /// First entry whose category title matches exactly (case-sensitive).
    ///
    /// Titles are not unique; with duplicates at one level the earliest
    /// entry wins.
    pub fn lookup(&self, id: LevelId, title: &str) -> Option<(&LevelEntry, &CategoryNode)> {
        self.level(id)?.entries.iter().find_map(|entry| {
            self.registry
                .get(entry.category)
                .filter(|node| node.title == title)
                .map(|node| (entry, node))
        })
    }
}

/// Depth-first expansion with one shared level per internal node.
struct LevelBuilder<'a> {
    registry: &'a CategoryRegistry,
    levels: Vec<Level>,
    expanded: HashMap<CategoryId, LevelId>,
    in_progress: HashSet<CategoryId>,
}

impl<'a> LevelBuilder<'a> {
    fn new(registry: &'a CategoryRegistry) -> Self {
        Self {
            registry,
            levels: vec![Level::default()],
            expanded: HashMap::new(),
            in_progress: HashSet::new(),
        }
    }

    fn node(&self, idx: CategoryId) -> DomainResult<&'a CategoryNode> {
        self.registry
            .get(idx)
            .ok_or_else(|| DomainError::Internal("stale category handle".into()))
    }

    fn expand(&mut self, idx: CategoryId) -> DomainResult<Expansion> {
        let node = self.node(idx)?;
        if !node.has_children() {
            return Ok(Expansion::Leaf);
        }
        if let Some(&level) = self.expanded.get(&idx) {
            return Ok(Expansion::Level(level));
        }
        if !self.in_progress.insert(idx) {
            return Err(DomainError::CycleDetected(node.alias.clone()));
        }

        let level = LevelId(self.levels.len());
        self.levels.push(Level::default());
        for &child in &node.children {
            let expansion = self.expand(child)?;
            self.levels[level.0].entries.push(LevelEntry {
                category: child,
                expansion,
            });
        }

        self.in_progress.remove(&idx);
        self.expanded.insert(idx, level);
        Ok(Expansion::Level(level))
    }
}
