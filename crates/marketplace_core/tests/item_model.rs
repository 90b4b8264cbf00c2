use marketplace_core::{Item, ItemId, ItemValidationError, DEFAULT_IMAGE_NAME};

#[test]
fn new_item_is_unassigned_with_default_image() {
    let item = Item::new("used iPhone 16e", "phone");
    assert_eq!(item.id, ItemId::UNASSIGNED);
    assert!(!item.id.is_assigned());
    assert_eq!(item.image_name, DEFAULT_IMAGE_NAME);
    item.validate().unwrap();
}

#[test]
fn validate_reports_first_blank_field() {
    let err = Item::new("  ", "").validate().unwrap_err();
    assert_eq!(err, ItemValidationError::EmptyName);

    let err = Item::new("jacket", " ").validate().unwrap_err();
    assert_eq!(err, ItemValidationError::EmptyCategory);

    let err = Item::new("jacket", "fashion")
        .with_image_name("")
        .validate()
        .unwrap_err();
    assert_eq!(err, ItemValidationError::EmptyImageName);
}

#[test]
fn item_id_parses_positive_integers_only() {
    assert_eq!("12".parse::<ItemId>().unwrap(), ItemId::new(12));
    assert_eq!(" 7 ".parse::<ItemId>().unwrap().get(), 7);
    assert!("0".parse::<ItemId>().is_err());
    assert!("-3".parse::<ItemId>().is_err());
    assert!("abc".parse::<ItemId>().is_err());
    assert!("".parse::<ItemId>().is_err());
}

#[test]
fn item_serializes_with_flat_integer_id() {
    let mut item = Item::new("jacket", "fashion").with_image_name("abc.jpg");
    item.id = ItemId::new(3);

    let value = serde_json::to_value(&item).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "id": 3,
            "name": "jacket",
            "category": "fashion",
            "image_name": "abc.jpg"
        })
    );

    let decoded: Item = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, item);
}

#[test]
fn checked_next_stops_at_max_id() {
    assert_eq!(ItemId::UNASSIGNED.checked_next(), Some(ItemId::new(1)));
    assert_eq!(ItemId::new(i64::MAX).checked_next(), None);
}
