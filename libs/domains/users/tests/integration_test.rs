//! Integration tests for the Users domain against PostgreSQL.
//!
//! Run with `cargo test -p domain_users -- --ignored` (requires Docker).

use domain_users::*;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_get_user() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let data = TestDataBuilder::from_test_name("create_and_get_user");

    let created = repo
        .create(CreateUser {
            name: data.name("user", "ann"),
            email: data.email("ann"),
        })
        .await
        .unwrap();

    let fetched = assert_some(repo.get_by_id(created.id).await.unwrap(), "user");
    assert_eq!(fetched, created);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unique_email_constraint() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let data = TestDataBuilder::from_test_name("unique_email");

    let input = CreateUser {
        name: data.name("user", "ann"),
        email: data.email("ann"),
    };
    repo.create(input.clone()).await.unwrap();

    let result = repo.create(input).await;
    assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_and_delete() {
    let db = TestDatabase::new().await;
    let service = UserService::new(PgUserRepository::new(db.connection()));
    let data = TestDataBuilder::from_test_name("update_and_delete");

    let user = service
        .create_user(CreateUser {
            name: data.name("user", "bob"),
            email: data.email("bob"),
        })
        .await
        .unwrap();

    let updated = service
        .update_user(
            user.id,
            UpdateUser {
                name: Some("Robert".to_string()),
                email: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Robert");

    service.delete_user(user.id).await.unwrap();
    assert!(matches!(
        service.get_user(user.id).await,
        Err(UserError::NotFound(_))
    ));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_list_is_ordered_by_id() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let data = TestDataBuilder::from_test_name("list_ordered");

    let mut ids = Vec::new();
    for who in ["c", "a", "b"] {
        let user = repo
            .create(CreateUser {
                name: data.name("user", who),
                email: data.email(who),
            })
            .await
            .unwrap();
        ids.push(user.id);
    }

    let listed = repo.list().await.unwrap();
    assert_ids(listed.iter().map(|u| u.id), &ids, "users");
}
