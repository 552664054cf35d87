use super::{FormStep, SelectionForm, FIELD_USER_ID};
use crate::apply::backup_path;
use crate::config::Config;
use crate::directory::{JsonDirectory, User};
use crate::error::{FlowError, RewriteError};
use crate::registry::{Entry, EntryRegistry, ENTRY_TITLE};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn guest(id: &str, name: &str) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        is_admin: false,
        system_generated: false,
        local_only: true,
    }
}

fn owner() -> User {
    User {
        id: "owner".to_string(),
        name: "Owner".to_string(),
        is_admin: true,
        system_generated: false,
        local_only: false,
    }
}

fn config_for(path: &Path) -> Config {
    Config {
        config_path: path.to_string_lossy().to_string(),
        ..Config::default()
    }
}

fn form(path: &Path, users: Vec<User>) -> SelectionForm<JsonDirectory> {
    SelectionForm::new(JsonDirectory::new(users), &config_for(path))
}

#[test]
fn test_show_lists_candidates() {
    let form = form(Path::new("unused.yaml"), vec![owner(), guest("g1", "Guest")]);

    assert_eq!(
        form.show(),
        FormStep::Form {
            choices: BTreeMap::from([("g1".to_string(), "Guest".to_string())]),
            errors: BTreeMap::new(),
        }
    );
}

#[test]
fn test_show_reports_no_candidates() {
    let form = form(Path::new("unused.yaml"), vec![owner()]);

    let FormStep::Form { choices, errors } = form.show() else {
        panic!("Expected a form");
    };
    assert!(choices.is_empty());
    assert_eq!(errors["base"], "no_candidates");
}

#[tokio::test]
async fn test_submit_rewrites_and_creates_entry() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("configuration.yaml");
    fs::write(&path, "auth_header:\n  old: 1\nhttp:\n  port: 8123\n").unwrap();
    let form = form(&path, vec![guest("g1", "Guest")]);

    let entry = form.submit("g1").await.unwrap();

    assert_eq!(entry.title, ENTRY_TITLE);
    assert_eq!(entry.user_id(), Some("g1"));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "auth_header:\n  # old: 1\n  target_token: Cqibo6hvnPb5vwkL\n  target_guest_user_id: g1\nhttp:\n  port: 8123\n"
    );
    assert!(backup_path(&path).exists());

    let mut registry = EntryRegistry::new();
    registry.setup(entry.clone());
    assert_eq!(registry.get(&entry.entry_id), Some(&entry));
}

#[tokio::test]
async fn test_submit_unknown_user_is_rejected_without_io() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("configuration.yaml");
    fs::write(&path, "auth_header:\n").unwrap();
    let form = form(&path, vec![guest("g1", "Guest"), owner()]);

    let err = form.submit("owner").await.unwrap_err();

    assert!(matches!(err, FlowError::UnknownCandidate(ref id) if id == "owner"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "auth_header:\n");
    assert!(!backup_path(&path).exists());
}

#[tokio::test]
async fn test_step_without_input_shows_form() {
    let form = form(Path::new("unused.yaml"), vec![guest("g1", "Guest")]);

    let step = form.step(None).await.unwrap();

    assert!(matches!(step, FormStep::Form { ref errors, .. } if errors.is_empty()));
}

#[tokio::test]
async fn test_step_with_no_candidates_returns_form_error() {
    let form = form(Path::new("unused.yaml"), Vec::new());

    let step = form.step(Some("anyone")).await.unwrap();

    let FormStep::Form { errors, .. } = step else {
        panic!("Expected the form again");
    };
    assert_eq!(errors["base"], "no_candidates");
}

#[tokio::test]
async fn test_step_with_unknown_user_flags_field() {
    let form = form(Path::new("unused.yaml"), vec![guest("g1", "Guest")]);

    let step = form.step(Some("g2")).await.unwrap();

    let FormStep::Form { errors, .. } = step else {
        panic!("Expected the form again");
    };
    assert_eq!(errors[FIELD_USER_ID], "unknown_candidate");
}

#[tokio::test]
async fn test_failed_rewrite_still_creates_entry_by_default() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.yaml");
    let form = form(&missing, vec![guest("g1", "Guest")]);

    let step = form.step(Some("g1")).await.unwrap();

    let FormStep::CreateEntry(Entry { data, .. }) = step else {
        panic!("Expected an entry");
    };
    assert_eq!(data["user_id"], "g1");
    assert!(!missing.exists());
}

#[tokio::test]
async fn test_failed_rewrite_aborts_when_configured() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.yaml");
    let config = Config {
        abort_on_rewrite_failure: true,
        ..config_for(&missing)
    };
    let form = SelectionForm::new(JsonDirectory::new(vec![guest("g1", "Guest")]), &config);

    let err = form.submit("g1").await.unwrap_err();

    assert!(matches!(err, FlowError::Rewrite(RewriteError::Read { .. })));
    assert_eq!(err.form_key(), "rewrite_failed");
}

#[tokio::test]
async fn test_document_without_anchor_still_creates_entry() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("configuration.yaml");
    fs::write(&path, "http:\n  port: 8123\n").unwrap();
    let form = form(&path, vec![guest("g1", "Guest")]);

    form.submit("g1").await.unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "http:\n  port: 8123\n");
    assert!(!backup_path(&path).exists());
}
