//! Behavior every `ItemRepository` backend must share.

use marketplace_core::db::open_db_in_memory;
use marketplace_core::{
    ErrorKind, Item, ItemId, ItemRepository, JsonItemRepository, RepoError, SqliteItemRepository,
};
use std::collections::HashSet;
use tempfile::TempDir;

fn sqlite_repo() -> SqliteItemRepository {
    let repo = SqliteItemRepository::new(open_db_in_memory().unwrap());
    for category in ["phone", "fashion", "kitchen"] {
        repo.add_category(category).unwrap();
    }
    repo
}

fn json_repo() -> (TempDir, JsonItemRepository) {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonItemRepository::open(dir.path().join("items.json")).unwrap();
    (dir, repo)
}

fn insert(repo: &dyn ItemRepository, name: &str, category: &str) -> Item {
    let mut item = Item::new(name, category);
    repo.insert_item(&mut item).unwrap();
    item
}

fn assigns_unique_ids(repo: &dyn ItemRepository) {
    let mut seen = HashSet::new();
    for name in ["a", "b", "c", "d"] {
        let item = insert(repo, name, "phone");
        assert!(item.id.is_assigned());
        assert!(seen.insert(item.id), "id {} reused", item.id);
    }
}

fn list_returns_inserted_in_storage_order(repo: &dyn ItemRepository) {
    let first = insert(repo, "jacket", "fashion");
    let second = insert(repo, "used iPhone 16e", "phone");

    let items = repo.list_items().unwrap();
    assert_eq!(items, vec![first, second]);
}

fn get_finds_item_or_reports_not_found(repo: &dyn ItemRepository) {
    let item = insert(repo, "frying pan", "kitchen");

    assert_eq!(repo.get_item(item.id).unwrap(), item);

    let missing = ItemId::new(9_999);
    let err = repo.get_item(missing).unwrap_err();
    assert!(matches!(err, RepoError::ItemNotFound(id) if id == missing));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

fn search_is_case_sensitive_substring(repo: &dyn ItemRepository) {
    insert(repo, "used iPhone 16e", "phone");
    insert(repo, "iphone case", "phone");
    insert(repo, "iPhone 15 Pro", "phone");
    insert(repo, "jacket", "fashion");

    let hits = repo.search_items("iPhone").unwrap();
    let names: Vec<&str> = hits.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, vec!["used iPhone 16e", "iPhone 15 Pro"]);
    assert!(hits.iter().all(|item| item.name.contains("iPhone")));

    assert!(repo.search_items("Android").unwrap().is_empty());
}

fn search_rejects_empty_keyword(repo: &dyn ItemRepository) {
    let err = repo.search_items("").unwrap_err();
    assert!(matches!(err, RepoError::InvalidInput(_)));
    assert_eq!(err.kind(), ErrorKind::Validation);
}

fn insert_rejects_invalid_items_without_writing(repo: &dyn ItemRepository) {
    let mut blank = Item::new("", "phone");
    let err = repo.insert_item(&mut blank).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(blank.id, ItemId::UNASSIGNED);

    let mut already_stored = insert(repo, "jacket", "fashion");
    let original_id = already_stored.id;
    let err = repo.insert_item(&mut already_stored).unwrap_err();
    assert!(matches!(err, RepoError::InvalidInput(_)));
    assert_eq!(already_stored.id, original_id);

    assert_eq!(repo.list_items().unwrap().len(), 1);
}

macro_rules! contract_tests {
    ($($name:ident),* $(,)?) => {
        mod sqlite {
            $(
                #[test]
                fn $name() {
                    let repo = super::sqlite_repo();
                    super::$name(&repo);
                }
            )*
        }

        mod json {
            $(
                #[test]
                fn $name() {
                    let (_dir, repo) = super::json_repo();
                    super::$name(&repo);
                }
            )*
        }
    };
}

contract_tests!(
    assigns_unique_ids,
    list_returns_inserted_in_storage_order,
    get_finds_item_or_reports_not_found,
    search_is_case_sensitive_substring,
    search_rejects_empty_keyword,
    insert_rejects_invalid_items_without_writing,
);
