use marketplace_core::{ErrorKind, Item, ItemId, ItemRepository, JsonItemRepository, RepoError};

#[test]
fn open_creates_parent_dirs_and_empty_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("items.json");

    let repo = JsonItemRepository::open(&path).unwrap();
    assert_eq!(repo.path(), path.as_path());

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw, serde_json::json!({ "items": [] }));
}

#[test]
fn open_keeps_existing_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.json");
    std::fs::write(
        &path,
        r#"{"items":[{"id":4,"name":"jacket","category":"fashion","image_name":"default.jpg"}]}"#,
    )
    .unwrap();

    let repo = JsonItemRepository::open(&path).unwrap();
    let items = repo.list_items().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, ItemId::new(4));
}

#[test]
fn ids_continue_after_highest_existing_id() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.json");
    std::fs::write(
        &path,
        r#"{"items":[
            {"id":7,"name":"a","category":"c","image_name":"default.jpg"},
            {"id":2,"name":"b","category":"c","image_name":"default.jpg"}
        ]}"#,
    )
    .unwrap();

    let repo = JsonItemRepository::open(&path).unwrap();
    let mut item = Item::new("c", "c");
    repo.insert_item(&mut item).unwrap();
    assert_eq!(item.id, ItemId::new(8));
}

#[test]
fn items_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.json");

    let repo = JsonItemRepository::open(&path).unwrap();
    let mut first = Item::new("used iPhone 16e", "phone");
    repo.insert_item(&mut first).unwrap();
    drop(repo);

    let repo = JsonItemRepository::open(&path).unwrap();
    let mut second = Item::new("jacket", "fashion");
    repo.insert_item(&mut second).unwrap();

    assert_eq!(first.id, ItemId::new(1));
    assert_eq!(second.id, ItemId::new(2));
    assert_eq!(repo.get_item(first.id).unwrap(), first);
}

#[test]
fn json_store_accepts_any_category_name() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonItemRepository::open(dir.path().join("items.json")).unwrap();

    let mut item = Item::new("mystery box", "uncategorized-anything");
    repo.insert_item(&mut item).unwrap();
    assert_eq!(
        repo.get_item(item.id).unwrap().category,
        "uncategorized-anything"
    );
}

#[test]
fn exhausted_id_space_is_invalid_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.json");
    std::fs::write(
        &path,
        r#"{"items":[{"id":9223372036854775807,"name":"a","category":"c","image_name":"default.jpg"}]}"#,
    )
    .unwrap();
    let repo = JsonItemRepository::open(&path).unwrap();

    let mut item = Item::new("b", "c");
    let err = repo.insert_item(&mut item).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
    assert_eq!(err.kind(), ErrorKind::Storage);
    assert_eq!(item.id, ItemId::UNASSIGNED);
    assert_eq!(repo.list_items().unwrap().len(), 1);
}

#[test]
fn non_positive_stored_ids_are_invalid_data() {
    let dir = tempfile::tempdir().unwrap();

    for id in ["0", "-3"] {
        let path = dir.path().join(format!("items{id}.json"));
        std::fs::write(
            &path,
            format!(r#"{{"items":[{{"id":{id},"name":"a","category":"c","image_name":"default.jpg"}}]}}"#),
        )
        .unwrap();
        let repo = JsonItemRepository::open(&path).unwrap();

        let err = repo.list_items().unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(_)), "id {id}: {err}");

        let mut item = Item::new("b", "c");
        assert!(matches!(
            repo.insert_item(&mut item).unwrap_err(),
            RepoError::InvalidData(_)
        ));
    }
}
