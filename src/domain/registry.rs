//! Category registry: arena of all category nodes keyed by alias.

use std::collections::HashMap;

use generational_arena::Arena;
use tracing::{debug, instrument};

use crate::domain::entities::{CategoryId, CategoryNode, CategoryRecord};
use crate::domain::error::{DomainError, DomainResult};

/// Arena-backed store of every category in the taxonomy.
///
/// Construction is two-pass: all nodes are instantiated first, then parent
/// aliases are resolved into parent -> child edges. Catalog order does not
/// guarantee parents are listed before their children.
#[derive(Debug, Default)]
pub struct CategoryRegistry {
    arena: Arena<CategoryNode>,
    by_alias: HashMap<String, CategoryId>,
    /// Catalog order
    order: Vec<CategoryId>,
    linked: bool,
}

impl CategoryRegistry {
    /// Load records and link children.
    #[instrument(level = "debug", skip(records))]
    pub fn build(records: impl IntoIterator<Item = CategoryRecord>) -> DomainResult<Self> {
        let mut registry = Self::load(records)?;
        registry.link_children()?;
        Ok(registry)
    }

    /// Instantiate every node without linking.
    ///
    /// Fails on duplicate aliases. Parent references are checked once all
    /// nodes exist, so forward references are fine.
    pub fn load(records: impl IntoIterator<Item = CategoryRecord>) -> DomainResult<Self> {
        let mut registry = Self::default();

        for record in records {
            if registry.by_alias.contains_key(&record.alias) {
                return Err(DomainError::DuplicateAlias(record.alias));
            }
            let alias = record.alias.clone();
            let idx = registry.arena.insert(CategoryNode::from_record(record));
            registry.by_alias.insert(alias, idx);
            registry.order.push(idx);
        }

        for &idx in &registry.order {
            if let Some(node) = registry.arena.get(idx) {
                if let Some(parent) = node
                    .parent_aliases
                    .iter()
                    .find(|p| !registry.by_alias.contains_key(p.as_str()))
                {
                    return Err(DomainError::DanglingParent {
                        alias: node.alias.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }

        debug!("loaded {} categories", registry.order.len());
        Ok(registry)
    }

    /// Append every node to the children of each of its parents.
    ///
    /// Runs once; later calls are no-ops. A parent listed twice by the same
    /// node still yields a single edge.
    #[instrument(level = "debug", skip(self))]
    pub fn link_children(&mut self) -> DomainResult<()> {
        if self.linked {
            debug!("children already linked");
            return Ok(());
        }

        let mut edges = Vec::new();
        for &child_idx in &self.order {
            let node = self
                .arena
                .get(child_idx)
                .ok_or_else(|| DomainError::Internal("stale category handle".into()))?;
            for parent in &node.parent_aliases {
                let parent_idx =
                    self.by_alias
                        .get(parent)
                        .copied()
                        .ok_or_else(|| DomainError::DanglingParent {
                            alias: node.alias.clone(),
                            parent: parent.clone(),
                        })?;
                edges.push((parent_idx, child_idx));
            }
        }

        for (parent_idx, child_idx) in edges {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                if !parent.children.contains(&child_idx) {
                    parent.children.push(child_idx);
                }
            }
        }

        self.linked = true;
        Ok(())
    }

    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// All nodes without parents, in catalog order.
    pub fn root_nodes(&self) -> Vec<CategoryId> {
        self.order
            .iter()
            .copied()
            .filter(|&idx| self.arena.get(idx).is_some_and(CategoryNode::is_root))
            .collect()
    }

    pub fn get(&self, idx: CategoryId) -> Option<&CategoryNode> {
        self.arena.get(idx)
    }

    pub fn find(&self, alias: &str) -> Option<CategoryId> {
        self.by_alias.get(alias).copied()
    }

    pub fn by_alias(&self, alias: &str) -> Option<&CategoryNode> {
        self.find(alias).and_then(|idx| self.arena.get(idx))
    }

    /// Nodes in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (CategoryId, &CategoryNode)> + '_ {
        self.order
            .iter()
            .filter_map(move |&idx| self.arena.get(idx).map(|node| (idx, node)))
    }

    pub fn children(&self, idx: CategoryId) -> impl Iterator<Item = (CategoryId, &CategoryNode)> + '_ {
        self.arena
            .get(idx)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(move |&child| self.arena.get(child).map(|node| (child, node)))
    }

    /// Sort handles by node title for display.
    pub fn sorted_by_title(&self, ids: &[CategoryId]) -> Vec<CategoryId> {
        let mut sorted = ids.to_vec();
        sorted.sort_by(|a, b| match (self.arena.get(*a), self.arena.get(*b)) {
            (Some(x), Some(y)) => x.cmp_by_title(y),
            _ => a.cmp(b),
        });
        sorted
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    fn records() -> Vec<CategoryRecord> {
        vec![
            CategoryRecord::new("d", "D", &["b"]),
            CategoryRecord::new("a", "A", &[]),
            CategoryRecord::new("b", "B", &["a"]),
            CategoryRecord::new("c", "C", &["a"]),
        ]
    }

    fn child_aliases(registry: &CategoryRegistry, alias: &str) -> HashSet<String> {
        let idx = registry.find(alias).unwrap();
        registry
            .children(idx)
            .map(|(_, node)| node.alias.clone())
            .collect()
    }

    #[test]
    fn given_child_listed_before_parent_when_building_then_links_all_edges() {
        let registry = CategoryRegistry::build(records()).unwrap();

        assert_eq!(registry.len(), 4);
        assert!(registry.is_linked());
        assert_eq!(
            child_aliases(&registry, "a"),
            HashSet::from(["b".to_string(), "c".to_string()])
        );
        assert_eq!(child_aliases(&registry, "b"), HashSet::from(["d".to_string()]));
        assert!(child_aliases(&registry, "d").is_empty());
    }

    #[test]
    fn given_loaded_registry_when_not_linked_then_no_children() {
        let registry = CategoryRegistry::load(records()).unwrap();

        assert!(!registry.is_linked());
        assert!(registry.iter().all(|(_, node)| node.children.is_empty()));
    }

    #[test]
    fn given_linked_registry_when_linking_again_then_children_unchanged() {
        let mut registry = CategoryRegistry::build(records()).unwrap();

        registry.link_children().unwrap();

        assert_eq!(registry.by_alias("a").unwrap().children.len(), 2);
    }

    #[test]
    fn given_duplicate_alias_when_building_then_errors() {
        let result = CategoryRegistry::build(vec![
            CategoryRecord::new("a", "A", &[]),
            CategoryRecord::new("a", "Another A", &[]),
        ]);

        assert_eq!(result.unwrap_err(), DomainError::DuplicateAlias("a".into()));
    }

    #[test]
    fn given_missing_parent_when_building_then_errors() {
        let result = CategoryRegistry::build(vec![
            CategoryRecord::new("a", "A", &[]),
            CategoryRecord::new("x", "X", &["missing"]),
        ]);

        assert_eq!(
            result.unwrap_err(),
            DomainError::DanglingParent {
                alias: "x".into(),
                parent: "missing".into()
            }
        );
    }

    #[test]
    fn given_multi_parent_node_when_linking_then_shared_by_both_parents() {
        let registry = CategoryRegistry::build(vec![
            CategoryRecord::new("food", "Food", &[]),
            CategoryRecord::new("shopping", "Shopping", &[]),
            CategoryRecord::new("bakeries", "Bakeries", &["food", "shopping"]),
        ])
        .unwrap();

        let bakeries = registry.find("bakeries").unwrap();
        assert_eq!(registry.by_alias("food").unwrap().children, vec![bakeries]);
        assert_eq!(registry.by_alias("shopping").unwrap().children, vec![bakeries]);
    }

    #[test]
    fn given_parent_listed_twice_when_linking_then_single_edge() {
        let registry = CategoryRegistry::build(vec![
            CategoryRecord::new("a", "A", &[]),
            CategoryRecord::new("b", "B", &["a", "a"]),
        ])
        .unwrap();

        assert_eq!(registry.by_alias("a").unwrap().children.len(), 1);
    }

    #[rstest]
    #[case(vec![], vec![])]
    #[case(vec![CategoryRecord::new("a", "A", &[])], vec!["a"])]
    #[case(records(), vec!["a"])]
    #[case(
        vec![
            CategoryRecord::new("z", "Z", &[]),
            CategoryRecord::new("y", "Y", &["z"]),
            CategoryRecord::new("x", "X", &[]),
        ],
        vec!["z", "x"]
    )]
    fn given_records_when_listing_roots_then_returns_parentless_nodes(
        #[case] input: Vec<CategoryRecord>,
        #[case] expected: Vec<&str>,
    ) {
        let registry = CategoryRegistry::build(input).unwrap();

        let roots: Vec<_> = registry
            .root_nodes()
            .into_iter()
            .map(|idx| registry.get(idx).unwrap().alias.as_str())
            .collect();

        assert_eq!(roots, expected);
    }

    #[test]
    fn given_node_kinds_when_classifying_then_root_internal_leaf() {
        let registry = CategoryRegistry::build(records()).unwrap();

        let a = registry.by_alias("a").unwrap();
        let b = registry.by_alias("b").unwrap();
        let d = registry.by_alias("d").unwrap();
        assert!(a.is_root() && a.has_children() && !a.is_leaf());
        assert!(!b.is_root() && b.has_children() && !b.is_leaf());
        assert!(!d.is_root() && !d.has_children() && d.is_leaf());
    }

    #[test]
    fn given_ids_when_sorting_by_title_then_lexicographic() {
        let registry = CategoryRegistry::build(records()).unwrap();
        let ids: Vec<_> = registry.iter().map(|(idx, _)| idx).collect();

        let titles: Vec<_> = registry
            .sorted_by_title(&ids)
            .into_iter()
            .map(|idx| registry.get(idx).unwrap().title.clone())
            .collect();

        assert_eq!(titles, vec!["A", "B", "C", "D"]);
    }
}
