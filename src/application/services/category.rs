//! Category catalog service
//!
//! Loads the catalog into a materialized view and answers lookups on it.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::application::catalog::CatalogReader;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{CategoryRegistry, CategoryTreeView, SelectedCategory, ToTree};
use crate::infrastructure::traits::FileSystem;

/// Parents and children of one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDetails {
    pub category: SelectedCategory,
    pub parents: Vec<SelectedCategory>,
    /// Sorted by title
    pub children: Vec<SelectedCategory>,
}

/// Service for loading and inspecting the category taxonomy.
pub struct CategoryService {
    catalog: CatalogReader,
}

impl CategoryService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            catalog: CatalogReader::new(fs),
        }
    }

    /// Read the catalog, build the registry and materialize the view.
    ///
    /// Any build error aborts; no partial tree is returned.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<CategoryTreeView> {
        let records = self.catalog.read(path)?;
        let registry = CategoryRegistry::build(records)?;
        let view = CategoryTreeView::materialize(registry)?;
        info!(
            "loaded {} categories, {} roots",
            view.registry().len(),
            view.registry().root_nodes().len()
        );
        Ok(view)
    }

    /// Root titles sorted for display.
    pub fn root_titles(&self, view: &CategoryTreeView) -> Vec<String> {
        view.titles(view.top_level())
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Render the whole forest, or the subtree below `alias`.
    pub fn render_tree(
        &self,
        view: &CategoryTreeView,
        alias: Option<&str>,
    ) -> ApplicationResult<String> {
        let registry = view.registry();
        let tree = match alias {
            Some(alias) => {
                let idx = registry
                    .find(alias)
                    .ok_or_else(|| ApplicationError::UnknownCategory(alias.to_string()))?;
                registry.to_tree(idx)
            }
            None => registry.to_forest("categories"),
        };
        Ok(tree.to_string())
    }

    pub fn describe(&self, view: &CategoryTreeView, alias: &str) -> ApplicationResult<CategoryDetails> {
        let registry = view.registry();
        let idx = registry
            .find(alias)
            .ok_or_else(|| ApplicationError::UnknownCategory(alias.to_string()))?;
        let node = registry
            .get(idx)
            .ok_or_else(|| ApplicationError::UnknownCategory(alias.to_string()))?;

        let parents = node
            .parent_aliases
            .iter()
            .filter_map(|p| registry.by_alias(p))
            .map(|p| p.to_selected())
            .collect();
        let children = registry
            .sorted_by_title(&node.children)
            .into_iter()
            .filter_map(|c| registry.get(c))
            .map(|c| c.to_selected())
            .collect();

        Ok(CategoryDetails {
            category: node.to_selected(),
            parents,
            children,
        })
    }
}
