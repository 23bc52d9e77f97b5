//! Integration tests for the JSON data store.
//!
//! Exercises the store traits and repositories against a temporary data
//! directory:
//! - Directory bootstrap and health check
//! - Durability across re-open
//! - Topic engine running on the file-backed stores
//! - User email uniqueness
//! - Resource filters

use std::sync::Arc;

use assert_matches::assert_matches;
use kb_core::error::CoreError;
use kb_core::hierarchy::TopicHierarchy;
use kb_core::resource::{CreateResource, ResourceType, UpdateResource};
use kb_core::roles::Role;
use kb_core::store::{TopicStore, TopicVersionStore};
use kb_core::topic::{CreateTopic, UpdateTopic};
use kb_core::user::{CreateUser, UpdateUser};
use kb_db::repositories::{ResourceRepo, UserRepo};
use kb_db::{DataStore, DbError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn open(dir: &tempfile::TempDir) -> Arc<DataStore> {
    Arc::new(kb_db::open_store(dir.path()).await.unwrap())
}

fn engine(store: &Arc<DataStore>) -> TopicHierarchy {
    TopicHierarchy::new(store.clone(), store.clone())
}

fn new_topic(name: &str, parent: Option<&str>) -> CreateTopic {
    CreateTopic {
        name: name.to_string(),
        content: format!("About {name}"),
        parent_topic_id: parent.map(str::to_string),
    }
}

fn new_user(name: &str, email: &str, role: Role) -> CreateUser {
    CreateUser {
        name: name.to_string(),
        email: email.to_string(),
        role,
    }
}

fn new_resource(topic_id: &str, resource_type: ResourceType) -> CreateResource {
    CreateResource {
        topic_id: topic_id.to_string(),
        url: "https://example.com/material".to_string(),
        description: "Reading material".to_string(),
        resource_type,
    }
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

#[tokio::test]
async fn open_creates_all_record_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir).await;

    for file in [
        kb_db::TOPICS_FILE,
        kb_db::TOPIC_VERSIONS_FILE,
        kb_db::USERS_FILE,
        kb_db::RESOURCES_FILE,
    ] {
        let raw = std::fs::read_to_string(dir.path().join(file)).unwrap();
        assert_eq!(raw.trim(), "[]", "{file} should start empty");
    }
    kb_db::health_check(&store).await.unwrap();
}

#[tokio::test]
async fn open_creates_nested_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let store = kb_db::open_store(&nested).await.unwrap();
    assert!(nested.join(kb_db::TOPICS_FILE).exists());
    kb_db::health_check(&store).await.unwrap();
}

#[tokio::test]
async fn health_check_fails_when_directory_removed() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data");
    let store = kb_db::open_store(&data).await.unwrap();
    std::fs::remove_dir_all(&data).unwrap();
    assert_matches!(kb_db::health_check(&store).await, Err(DbError::Io { .. }));
}

// ---------------------------------------------------------------------------
// Topics and versions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn topics_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let (root_id, child_id) = {
        let store = open(&dir).await;
        let engine = engine(&store);
        let root = engine.create_topic(new_topic("Root", None)).await.unwrap();
        let child = engine
            .create_topic(new_topic("Child", Some(&root.id)))
            .await
            .unwrap();
        engine
            .update_topic(
                &child.id,
                UpdateTopic {
                    name: Some("Child v2".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        (root.id, child.id)
    };

    let store = open(&dir).await;
    let engine = engine(&store);
    let child = engine.get_topic(&child_id).await.unwrap();
    assert_eq!(child.name, "Child v2");
    assert_eq!(child.version, 2);
    assert_eq!(child.parent_topic_id.as_deref(), Some(root_id.as_str()));

    let versions = engine.get_topic_versions(&child_id).await.unwrap();
    let numbers: Vec<i32> = versions.iter().map(|v| v.version).collect();
    assert_eq!(numbers, vec![2, 1]);
    assert_eq!(versions[1].name, "Child");

    let tree = engine.get_topic_tree(&root_id).await.unwrap();
    assert_eq!(tree.total_topics(), 2);
}

#[tokio::test]
async fn delete_topic_removes_its_versions_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir).await;
    let engine = engine(&store);
    let a = engine.create_topic(new_topic("A", None)).await.unwrap();
    let b = engine.create_topic(new_topic("B", None)).await.unwrap();

    engine.delete_topic(&a.id).await.unwrap();

    assert!(store.list_by_topic(&a.id).await.unwrap().is_empty());
    assert_eq!(store.list_by_topic(&b.id).await.unwrap().len(), 1);
    let remaining = store.load_all().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, b.id);
}

#[tokio::test]
async fn malformed_topics_file_is_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir).await;
    std::fs::write(dir.path().join(kb_db::TOPICS_FILE), "[{").unwrap();
    assert_matches!(store.load_all().await, Err(CoreError::Storage(_)));
}

#[tokio::test]
async fn topic_file_uses_snake_case_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir).await;
    let engine = engine(&store);
    let root = engine.create_topic(new_topic("Root", None)).await.unwrap();
    engine
        .create_topic(new_topic("Child", Some(&root.id)))
        .await
        .unwrap();

    let raw = std::fs::read_to_string(dir.path().join(kb_db::TOPICS_FILE)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json[1]["parent_topic_id"], root.id.as_str());
    assert_eq!(json[0]["version"], 1);
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[tokio::test]
async fn duplicate_email_conflicts() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir).await;
    UserRepo::create(&store, &new_user("Ada", "ada@example.com", Role::Admin))
        .await
        .unwrap();

    let err = UserRepo::create(&store, &new_user("Other", "ADA@example.com", Role::Viewer))
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Conflict(msg) if msg == "Email already exists");
    assert_eq!(UserRepo::list(&store).await.unwrap().len(), 1);
}

#[tokio::test]
async fn user_update_and_delete() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir).await;
    let ada = UserRepo::create(&store, &new_user("Ada", "ada@example.com", Role::Viewer))
        .await
        .unwrap();
    let bob = UserRepo::create(&store, &new_user("Bob", "bob@example.com", Role::Viewer))
        .await
        .unwrap();

    let promoted = UserRepo::update(
        &store,
        &ada.id,
        &UpdateUser {
            role: Some(Role::Editor),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(promoted.role, Role::Editor);
    assert_eq!(promoted.email, "ada@example.com");

    let clash = UserRepo::update(
        &store,
        &bob.id,
        &UpdateUser {
            email: Some("ada@example.com".into()),
            ..Default::default()
        },
    )
    .await;
    assert_matches!(clash, Err(DbError::Conflict(_)));

    let found = UserRepo::find_by_email(&store, "bob@example.com").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(bob.id.clone()));

    assert!(UserRepo::delete(&store, &bob.id).await.unwrap());
    assert!(!UserRepo::delete(&store, &bob.id).await.unwrap());
    assert!(UserRepo::find_by_id(&store, &bob.id).await.unwrap().is_none());
}

#[tokio::test]
async fn update_missing_user_returns_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir).await;
    let result = UserRepo::update(
        &store,
        "ghost",
        &UpdateUser {
            name: Some("Ghost".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

#[tokio::test]
async fn resources_filter_by_topic_and_type() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir).await;
    ResourceRepo::create(&store, &new_resource("t1", ResourceType::Video))
        .await
        .unwrap();
    ResourceRepo::create(&store, &new_resource("t1", ResourceType::Pdf))
        .await
        .unwrap();
    ResourceRepo::create(&store, &new_resource("t2", ResourceType::Video))
        .await
        .unwrap();

    assert_eq!(ResourceRepo::list(&store).await.unwrap().len(), 3);
    assert_eq!(ResourceRepo::list_by_topic(&store, "t1").await.unwrap().len(), 2);
    let videos = ResourceRepo::list_by_type(&store, ResourceType::Video)
        .await
        .unwrap();
    assert_eq!(videos.len(), 2);
    assert!(ResourceRepo::list_by_type(&store, ResourceType::Link)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn resource_update_and_delete() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir).await;
    let created = ResourceRepo::create(&store, &new_resource("t1", ResourceType::Article))
        .await
        .unwrap();

    let updated = ResourceRepo::update(
        &store,
        &created.id,
        &UpdateResource {
            description: Some("Updated description".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.description, "Updated description");
    assert_eq!(updated.resource_type, ResourceType::Article);
    assert_eq!(updated.created_at, created.created_at);

    assert!(ResourceRepo::delete(&store, &created.id).await.unwrap());
    assert!(ResourceRepo::find_by_id(&store, &created.id)
        .await
        .unwrap()
        .is_none());
}
