use super::{Directory, JsonDirectory, User};
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

fn user(id: &str, name: &str, is_admin: bool, system_generated: bool, local_only: bool) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        is_admin,
        system_generated,
        local_only,
    }
}

#[test]
fn test_only_local_non_admin_humans_are_candidates() {
    let directory = JsonDirectory::new(vec![
        user("a1", "Owner", true, false, true),
        user("s1", "Supervisor", false, true, true),
        user("r1", "Remote", false, false, false),
        user("g1", "Guest", false, false, true),
        user("g2", "Kitchen Tablet", false, false, true),
    ]);

    let candidates = directory.list_candidates();

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates["g1"], "Guest");
    assert_eq!(candidates["g2"], "Kitchen Tablet");
}

#[test]
fn test_empty_directory_has_no_candidates() {
    assert!(JsonDirectory::default().list_candidates().is_empty());
}

#[test]
fn test_load_from_json_with_missing_flags() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"id": "g1", "name": "Guest", "local_only": true}}, {{"id": "o1", "name": "Owner", "is_admin": true}}]"#
    )
    .unwrap();

    let directory = JsonDirectory::load(file.path()).unwrap();

    assert_eq!(directory.users().len(), 2);
    assert_eq!(
        directory.list_candidates().into_iter().collect::<Vec<_>>(),
        vec![("g1".to_string(), "Guest".to_string())]
    );
}

#[test]
fn test_load_rejects_malformed_json() {
    let file = NamedTempFile::new().unwrap();
    fs::write(file.path(), "{not json").unwrap();

    let err = JsonDirectory::load(file.path()).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}
