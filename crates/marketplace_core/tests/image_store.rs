use marketplace_core::{validate_upload, ErrorKind, ImageError, ImageStore};

#[test]
fn storing_same_bytes_twice_reuses_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let store = ImageStore::new(dir.path().join("images"));

    let first = store.store(b"jpeg bytes").unwrap().file_name;
    let second = store.store(b"jpeg bytes").unwrap().file_name;
    assert_eq!(first, second);
    assert!(first.ends_with(".jpg"));
    assert_eq!(first.len(), 64 + ".jpg".len());

    let files = std::fs::read_dir(store.dir()).unwrap().count();
    assert_eq!(files, 1);

    let other = store.store(b"other jpeg bytes").unwrap().file_name;
    assert_ne!(other, first);
}

#[test]
fn store_rejects_empty_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let store = ImageStore::new(dir.path());
    let err = store.store(&[]).unwrap_err();
    assert!(matches!(err, ImageError::EmptyImage));
}

#[test]
fn stored_file_contains_uploaded_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let store = ImageStore::new(dir.path());

    let name = store.store(b"\xff\xd8\xff payload").unwrap().file_name;
    let path = store.resolve(&name).unwrap();
    assert_eq!(std::fs::read(path).unwrap(), b"\xff\xd8\xff payload");
}

#[test]
fn resolve_rejects_path_traversal() {
    let dir = tempfile::tempdir().unwrap();
    let store = ImageStore::new(dir.path().join("images"));
    std::fs::write(dir.path().join("secret.jpg"), b"secret").unwrap();

    for name in ["../secret.jpg", "/etc/passwd", "nested/photo.jpg", ""] {
        let err = store.resolve(name).unwrap_err();
        assert!(
            matches!(err, ImageError::InvalidPath(_)),
            "`{name}` should be rejected, got {err}"
        );
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}

#[test]
fn resolve_rejects_non_jpg_names() {
    let dir = tempfile::tempdir().unwrap();
    let store = ImageStore::new(dir.path());
    std::fs::write(dir.path().join("photo.png"), b"png").unwrap();

    let err = store.resolve("photo.png").unwrap_err();
    assert!(matches!(err, ImageError::InvalidExtension(_)));
}

#[test]
fn resolve_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = ImageStore::new(dir.path());

    let err = store.resolve("missing.jpg").unwrap_err();
    assert!(matches!(err, ImageError::NotFound(_)));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn default_image_path_lives_in_image_dir() {
    let store = ImageStore::new("/srv/images");
    assert_eq!(
        store.default_image_path(),
        std::path::Path::new("/srv/images/default.jpg")
    );
}

#[test]
fn validate_upload_checks_extension_and_payload() {
    validate_upload("photo.jpg", b"x").unwrap();
    validate_upload("PHOTO.JPG", b"x").unwrap();

    assert!(matches!(
        validate_upload("photo.png", b"x"),
        Err(ImageError::InvalidExtension(_))
    ));
    assert!(matches!(
        validate_upload("photo.jpg", b""),
        Err(ImageError::EmptyImage)
    ));
}

#[test]
fn discard_removes_only_newly_written_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = ImageStore::new(dir.path().join("images"));

    let first = store.store(b"jpeg bytes").unwrap();
    assert!(first.created);
    let again = store.store(b"jpeg bytes").unwrap();
    assert!(!again.created);

    store.discard(&again).unwrap();
    assert!(store.resolve(&first.file_name).is_ok());

    store.discard(&first).unwrap();
    let err = store.resolve(&first.file_name).unwrap_err();
    assert!(matches!(err, ImageError::NotFound(_)));

    // Already gone.
    store.discard(&first).unwrap();
}
