//! Tests for CategoryService: catalog loading, tree rendering and lookups

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use yelist::application::services::CategoryService;
use yelist::application::ApplicationError;
use yelist::domain::DomainError;
use yelist::infrastructure::traits::RealFileSystem;
use yelist::util::testing;

const CATALOG: &str = "tests/resources/categories.json";

fn service() -> CategoryService {
    testing::init_test_setup();
    CategoryService::new(Arc::new(RealFileSystem))
}

#[test]
fn given_catalog_when_loading_then_builds_view() {
    // Arrange
    let service = service();

    // Act
    let view = service.load(Path::new(CATALOG)).unwrap();

    // Assert
    assert_eq!(view.registry().len(), 14);
    assert_eq!(
        service.root_titles(&view),
        vec!["Active Life", "Food", "Restaurants"]
    );
}

#[test]
fn given_missing_catalog_when_loading_then_catalog_error() {
    let result = service().load(Path::new("tests/resources/nope.json"));

    assert!(matches!(result, Err(ApplicationError::Catalog { .. })));
}

#[test]
fn given_malformed_catalog_when_loading_then_catalog_error() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("categories.json");
    std::fs::write(&path, "{ not json").unwrap();

    // Act
    let result = service().load(&path);

    // Assert
    match result {
        Err(ApplicationError::Catalog { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected catalog error, got {:?}", other),
    }
}

#[test]
fn given_dangling_parent_when_loading_then_aborts() {
    let result = service().load(Path::new("tests/resources/invalid/dangling.json"));

    match result {
        Err(ApplicationError::Domain(DomainError::DanglingParent { alias, parent })) => {
            assert_eq!(alias, "bagels");
            assert_eq!(parent, "missing");
        }
        other => panic!("expected dangling parent, got {:?}", other),
    }
}

#[test]
fn given_duplicate_alias_when_loading_then_aborts() {
    let result = service().load(Path::new("tests/resources/invalid/duplicate_alias.json"));

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::DuplicateAlias(a))) if a == "food"
    ));
}

#[test]
fn given_duplicate_root_title_when_loading_then_aborts() {
    let result = service().load(Path::new("tests/resources/invalid/duplicate_root.json"));

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::DuplicateRoot { .. }))
    ));
}

#[test]
fn given_alias_when_rendering_tree_then_only_subtree() {
    // Arrange
    let service = service();
    let view = service.load(Path::new(CATALOG)).unwrap();

    // Act
    let rendered = service.render_tree(&view, Some("parks")).unwrap();

    // Assert
    let lines: Vec<_> = rendered.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Parks (parks)");
    assert!(lines[1].ends_with("Dog Parks (dog_parks)"));
    assert!(lines[2].ends_with("Skate Parks (skate_parks)"));
}

#[test]
fn given_shared_category_when_rendering_forest_then_listed_under_each_parent() {
    let service = service();
    let view = service.load(Path::new(CATALOG)).unwrap();

    let rendered = service.render_tree(&view, None).unwrap();

    assert_eq!(rendered.matches("Donuts (donuts)").count(), 2);
}

#[test]
fn given_unknown_alias_when_rendering_then_errors() {
    let service = service();
    let view = service.load(Path::new(CATALOG)).unwrap();

    let result = service.render_tree(&view, Some("nope"));

    assert!(matches!(result, Err(ApplicationError::UnknownCategory(a)) if a == "nope"));
}

#[test]
fn given_multi_parent_category_when_describing_then_lists_both_parents() {
    // Arrange
    let service = service();
    let view = service.load(Path::new(CATALOG)).unwrap();

    // Act
    let details = service.describe(&view, "donuts").unwrap();

    // Assert
    assert_eq!(details.category.title, "Donuts");
    let parents: Vec<_> = details.parents.iter().map(|p| p.alias.as_str()).collect();
    assert_eq!(parents, vec!["food", "breakfast_brunch"]);
    assert!(details.children.is_empty());
}

#[test]
fn given_internal_category_when_describing_then_children_sorted() {
    let service = service();
    let view = service.load(Path::new(CATALOG)).unwrap();

    let details = service.describe(&view, "food").unwrap();

    let children: Vec<_> = details.children.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(children, vec!["Bagels", "Coffee & Tea", "Donuts"]);
    assert!(details.parents.is_empty());
}
