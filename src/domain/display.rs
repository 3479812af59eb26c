//! `termtree` rendering of the category taxonomy.

use std::collections::HashSet;

use termtree::Tree;

use crate::domain::entities::CategoryId;
use crate::domain::registry::CategoryRegistry;

pub trait ToTree {
    /// Subtree below one category, children sorted by title.
    fn to_tree(&self, root: CategoryId) -> Tree<String>;

    /// Every root under a single synthetic label.
    fn to_forest(&self, label: &str) -> Tree<String>;
}

impl ToTree for CategoryRegistry {
    fn to_tree(&self, root: CategoryId) -> Tree<String> {
        let mut path = HashSet::new();
        build_tree(self, root, &mut path)
    }

    fn to_forest(&self, label: &str) -> Tree<String> {
        let roots = self.sorted_by_title(&self.root_nodes());
        let leaves: Vec<_> = roots.into_iter().map(|root| self.to_tree(root)).collect();
        Tree::new(label.to_string()).with_leaves(leaves)
    }
}

fn label(registry: &CategoryRegistry, idx: CategoryId) -> String {
    registry
        .get(idx)
        .map(|node| format!("{} ({})", node.title, node.alias))
        .unwrap_or_default()
}

// `path` holds the ancestors of `idx`; a repeat would loop forever.
fn build_tree(
    registry: &CategoryRegistry,
    idx: CategoryId,
    path: &mut HashSet<CategoryId>,
) -> Tree<String> {
    let mut tree = Tree::new(label(registry, idx));
    if !path.insert(idx) {
        return tree;
    }

    let children: Vec<_> = registry.children(idx).map(|(child, _)| child).collect();
    for child in registry.sorted_by_title(&children) {
        tree.push(build_tree(registry, child, path));
    }

    path.remove(&idx);
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::CategoryRecord;

    #[test]
    fn given_registry_when_rendering_forest_then_sorted_nested_output() {
        let registry = CategoryRegistry::build(vec![
            CategoryRecord::new("shopping", "Shopping", &[]),
            CategoryRecord::new("food", "Food", &[]),
            CategoryRecord::new("donuts", "Donuts", &["food"]),
            CategoryRecord::new("bagels", "Bagels", &["food"]),
        ])
        .unwrap();

        let rendered = registry.to_forest("categories").to_string();

        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "categories");
        assert!(lines[1].ends_with("Food (food)"));
        assert!(lines[2].ends_with("Bagels (bagels)"));
        assert!(lines[3].ends_with("Donuts (donuts)"));
        assert!(lines[4].ends_with("Shopping (shopping)"));
    }

    #[test]
    fn given_cycle_when_rendering_then_terminates() {
        let registry = CategoryRegistry::build(vec![
            CategoryRecord::new("x", "X", &["y"]),
            CategoryRecord::new("y", "Y", &["x"]),
        ])
        .unwrap();

        let rendered = registry.to_tree(registry.find("x").unwrap()).to_string();

        assert_eq!(rendered.lines().count(), 3);
    }
}
