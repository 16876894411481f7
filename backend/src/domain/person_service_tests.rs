//! Tests for the person service.

use std::sync::Arc;

use chrono::NaiveDate;
use mockall::predicate::eq;
use serde_json::json;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockPersonRepository;

fn stored_person() -> Person {
    Person {
        id: 42,
        first_name: Some("John".to_owned()),
        last_name: Some("Doe".to_owned()),
        birth_date: NaiveDate::from_ymd_opt(1990, 1, 1),
    }
}

fn repo_returning(person: Person) -> MockPersonRepository {
    let mut repo = MockPersonRepository::new();
    repo.expect_find_by_id()
        .with(eq(person.id))
        .return_once(move |_| Ok(Some(person)));
    repo
}

#[tokio::test]
async fn get_maps_missing_person_to_not_found() {
    let mut repo = MockPersonRepository::new();
    repo.expect_find_by_id().return_once(|_| Ok(None));

    let service = PersonService::new(Arc::new(repo));
    let error = service.get(99).await.expect_err("person is missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert!(error.message.contains("99"));
}

#[tokio::test]
async fn get_maps_connection_error_to_service_unavailable() {
    let mut repo = MockPersonRepository::new();
    repo.expect_find_by_id()
        .return_once(|_| Err(PersonRepositoryError::connection("refused")));

    let service = PersonService::new(Arc::new(repo));
    let error = service.get(1).await.expect_err("repository down");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn get_maps_query_error_to_internal() {
    let mut repo = MockPersonRepository::new();
    repo.expect_find_by_id()
        .return_once(|_| Err(PersonRepositoryError::query("broken sql")));

    let service = PersonService::new(Arc::new(repo));
    let error = service.get(1).await.expect_err("query failed");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn merge_patch_overwrites_removes_and_keeps_untouched_fields() {
    let mut repo = repo_returning(stored_person());
    repo.expect_save()
        .times(1)
        .withf(|person: &Person| {
            person.first_name.as_deref() == Some("Jane")
                && person.last_name.is_none()
                && person.birth_date == NaiveDate::from_ymd_opt(1990, 1, 1)
        })
        .return_once(|person| Ok(person.clone()));

    let service = PersonService::new(Arc::new(repo));
    let patch = json!({ "firstName": "Jane", "lastName": null });
    let patched = service
        .merge_patch(42, patch)
        .await
        .expect("merge patch applies");

    assert_eq!(patched.id, 42);
}

#[tokio::test]
async fn merge_patch_cannot_alter_the_id() {
    let mut repo = repo_returning(stored_person());
    repo.expect_save()
        .times(1)
        .withf(|person: &Person| person.id == 42)
        .return_once(|person| Ok(person.clone()));

    let service = PersonService::new(Arc::new(repo));
    let patch = json!({ "id": 7, "firstName": "Jane" });
    let patched = service
        .merge_patch(42, patch)
        .await
        .expect("merge patch applies");

    assert_eq!(patched.id, 42);
}

#[tokio::test]
async fn merge_patch_removing_the_id_key_keeps_the_id() {
    let mut repo = repo_returning(stored_person());
    repo.expect_save()
        .times(1)
        .withf(|person: &Person| person.id == 42)
        .return_once(|person| Ok(person.clone()));

    let service = PersonService::new(Arc::new(repo));
    let patched = service
        .merge_patch(42, json!({ "id": null }))
        .await
        .expect("merge patch applies");

    assert_eq!(patched.id, 42);
}

#[tokio::test]
async fn non_object_merge_patch_is_rejected_before_save() {
    let mut repo = repo_returning(stored_person());
    repo.expect_save().times(0);

    let service = PersonService::new(Arc::new(repo));
    let error = service
        .merge_patch(42, json!("not an object"))
        .await
        .expect_err("wholesale replacement by a scalar is not a person");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        error.details.as_ref().and_then(|d| d.get("code")),
        Some(&json!("malformed_patch"))
    );
}

#[tokio::test]
async fn operations_apply_in_order() {
    let mut repo = repo_returning(stored_person());
    repo.expect_save()
        .times(1)
        .withf(|person: &Person| {
            person.first_name.as_deref() == Some("B") && person.last_name.is_none()
        })
        .return_once(|person| Ok(person.clone()));

    let service = PersonService::new(Arc::new(repo));
    let operations = vec![
        PatchOperation {
            op: "replace".to_owned(),
            path: "/firstName".to_owned(),
            value: Some(json!("A")),
            from: None,
        },
        PatchOperation {
            op: "replace".to_owned(),
            path: "/firstName".to_owned(),
            value: Some(json!("B")),
            from: None,
        },
        PatchOperation {
            op: "remove".to_owned(),
            path: "/lastName".to_owned(),
            value: None,
            from: None,
        },
    ];

    let patched = service
        .apply_operations(42, operations)
        .await
        .expect("operations apply");
    assert_eq!(patched.id, 42);
}

#[tokio::test]
async fn failing_operation_aborts_the_whole_list() {
    let mut repo = repo_returning(stored_person());
    repo.expect_save().times(0);

    let service = PersonService::new(Arc::new(repo));
    let operations = vec![
        PatchOperation {
            op: "replace".to_owned(),
            path: "/firstName".to_owned(),
            value: Some(json!("Jane")),
            from: None,
        },
        PatchOperation {
            op: "test".to_owned(),
            path: "/firstName".to_owned(),
            value: Some(json!("Jane")),
            from: None,
        },
    ];

    let error = service
        .apply_operations(42, operations)
        .await
        .expect_err("unsupported op aborts");

    assert_eq!(error.code(), ErrorCode::UnsupportedOperation);
}

#[tokio::test]
async fn overlay_skips_null_fields_and_saves_the_rest() {
    let mut repo = repo_returning(stored_person());
    repo.expect_save()
        .times(1)
        .withf(|person: &Person| {
            person.first_name.as_deref() == Some("John")
                && person.last_name.as_deref() == Some("Smith")
        })
        .return_once(|person| Ok(person.clone()));

    let service = PersonService::new(Arc::new(repo));
    let overlay = PersonFieldOverlay {
        first_name: None,
        last_name: Some("Smith".to_owned()),
        birth_date: None,
    };

    let patched = service.overlay(42, overlay).await.expect("overlay applies");
    assert_eq!(patched.id, 42);
}

#[tokio::test]
async fn update_requires_an_existing_person() {
    let mut repo = MockPersonRepository::new();
    repo.expect_find_by_id().return_once(|_| Ok(None));
    repo.expect_save().times(0);

    let service = PersonService::new(Arc::new(repo));
    let error = service
        .update(5, PersonDraft::default())
        .await
        .expect_err("person is missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn delete_checks_existence_first() {
    let mut repo = MockPersonRepository::new();
    repo.expect_exists_by_id().with(eq(8)).return_once(|_| Ok(false));
    repo.expect_delete_by_id().times(0);

    let service = PersonService::new(Arc::new(repo));
    let error = service.delete(8).await.expect_err("person is missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn delete_removes_an_existing_person() {
    let mut repo = MockPersonRepository::new();
    repo.expect_exists_by_id().return_once(|_| Ok(true));
    repo.expect_delete_by_id()
        .with(eq(8))
        .times(1)
        .return_once(|_| Ok(()));

    let service = PersonService::new(Arc::new(repo));
    service.delete(8).await.expect("delete succeeds");
}
