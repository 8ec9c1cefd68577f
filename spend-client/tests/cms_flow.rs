mod common;

use common::signed_in;
use http::{Method, StatusCode};
use shared::models::Platform;
use spend_client::cms::{CmsForm, RemoveRequest, RowId, VersionField};
use spend_client::{ClientError, ScriptedReply};

const CMS_GRANTS: &[(i64, &str, &str)] = &[
    (50, "cms", "view"),
    (51, "cms", "edit"),
    (52, "cms", "delete"),
];

fn release_page() -> serde_json::Value {
    serde_json::json!({
        "id": 4,
        "title": "Release notes",
        "slug": "release-notes",
        "is_release": true,
        "description": null,
        "versions": [
            {"id": 11, "version": "1.0.0", "platform": "ios", "description": "Launch", "force_update": "0"},
            {"id": 12, "version": "1.1.0", "platform": "android", "description": "Fixes", "force_update": "1"}
        ]
    })
}

async fn load_form(h: &common::Harness) -> CmsForm {
    h.transport
        .on(Method::GET, "cms/4", ScriptedReply::ok(release_page()));
    let page = h.console.cms().fetch_one(4).await.unwrap();
    CmsForm::from_page(&page)
}

#[tokio::test]
async fn test_fresh_row_removed_without_delete_call() {
    let h = signed_in(CMS_GRANTS);
    let mut form = load_form(&h).await;

    let id = form.versions.add_row();
    form.versions
        .edit_row(id, VersionField::Version("2.0.0".to_string()));
    assert_eq!(form.versions.request_remove(id), Some(RemoveRequest::Removed));

    assert_eq!(form.versions.len(), 2);
    assert!(
        h.transport
            .requests()
            .iter()
            .all(|r| r.method != Method::DELETE)
    );
}

#[tokio::test]
async fn test_persisted_row_needs_confirmation() {
    let h = signed_in(CMS_GRANTS);
    let mut form = load_form(&h).await;
    h.transport.on(
        Method::DELETE,
        "cms/4/versions/11",
        ScriptedReply::json(StatusCode::OK, &serde_json::json!({"status": 200})),
    );

    let Some(RemoveRequest::ConfirmationRequired(pending)) =
        form.versions.request_remove(RowId::Persisted(11))
    else {
        panic!("persisted rows must ask for confirmation");
    };
    form.versions.cancel_remove(pending);
    let row = form.versions.row(RowId::Persisted(11)).unwrap();
    assert!(!row.is_deleted);
    assert!(h.transport.requests_to(&Method::DELETE, "cms/4/versions/11").is_empty());

    let Some(RemoveRequest::ConfirmationRequired(pending)) =
        form.versions.request_remove(RowId::Persisted(11))
    else {
        panic!("persisted rows must ask for confirmation");
    };
    let deleter = h.console.cms().version_deleter(4);
    form.versions.confirm_remove(pending, &deleter).await.unwrap();

    assert_eq!(h.transport.requests_to(&Method::DELETE, "cms/4/versions/11").len(), 1);
    assert!(form.versions.row(RowId::Persisted(11)).is_none());
    assert!(form.payload().versions.iter().all(|v| v.id != Some(11)));
    assert_eq!(h.notifier.successes(), vec!["Version deleted successfully"]);
}

#[tokio::test]
async fn test_failed_version_delete_keeps_row() {
    let h = signed_in(CMS_GRANTS);
    let mut form = load_form(&h).await;
    h.transport.on(
        Method::DELETE,
        "cms/4/versions/12",
        ScriptedReply::failure(500, "Could not delete version"),
    );

    let Some(RemoveRequest::ConfirmationRequired(pending)) =
        form.versions.request_remove(RowId::Persisted(12))
    else {
        panic!("persisted rows must ask for confirmation");
    };
    let deleter = h.console.cms().version_deleter(4);
    assert!(form.versions.confirm_remove(pending, &deleter).await.is_err());

    let row = form.versions.row(RowId::Persisted(12)).unwrap();
    assert!(!row.is_deleted);
    assert_eq!(h.notifier.errors(), vec!["Could not delete version"]);
}

#[tokio::test]
async fn test_missing_platform_blocks_save() {
    let h = signed_in(CMS_GRANTS);
    let mut form = load_form(&h).await;

    let id = form.versions.add_row();
    form.versions
        .edit_row(id, VersionField::Version("2.0.0".to_string()));
    form.versions
        .edit_row(id, VersionField::Description("Widgets".to_string()));

    let err = h.console.cms().save(Some(4), &form).await.unwrap_err();
    let ClientError::Validation(errors) = err else {
        panic!("expected validation error");
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors.get(&format!("versions.{}.platform", id)),
        Some("Please select a platform")
    );
    assert!(h.transport.requests_to(&Method::PUT, "cms/4").is_empty());
}

#[tokio::test]
async fn test_save_sends_row_flags() {
    let h = signed_in(CMS_GRANTS);
    let mut form = load_form(&h).await;
    h.transport
        .on(Method::PUT, "cms/4", ScriptedReply::ok(release_page()));

    form.versions.edit_row(
        RowId::Persisted(11),
        VersionField::Description("Launch day".to_string()),
    );
    let id = form.versions.add_row();
    form.versions
        .edit_row(id, VersionField::Version("2.0.0".to_string()));
    form.versions
        .edit_row(id, VersionField::Platform(Some(Platform::Ios)));
    form.versions
        .edit_row(id, VersionField::Description("Widgets".to_string()));

    h.console.cms().save(Some(4), &form).await.unwrap();

    let sent = &h.transport.requests_to(&Method::PUT, "cms/4")[0];
    let versions = sent.body.as_ref().unwrap()["versions"].as_array().unwrap().clone();
    assert_eq!(versions.len(), 3);
    assert_eq!(versions[0]["id"], 11);
    assert_eq!(versions[0]["is_updated"], 1);
    assert_eq!(versions[1]["is_updated"], 0);
    assert_eq!(versions[1]["force_update"], "1");
    assert!(versions[2].get("id").is_none());
    assert_eq!(versions[2]["is_created"], 1);
    assert_eq!(h.notifier.successes(), vec!["Page updated successfully"]);
}
