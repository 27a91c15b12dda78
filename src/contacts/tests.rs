//! Contact Module Tests
//!
//! Covers validation, payload parsing, on-disk record shape, and the
//! submission handler end to end (with mail disabled).

#[cfg(test)]
mod tests {
    use crate::contacts::handlers::handle_submit_contact;
    use crate::contacts::types::{ContactRecord, ContactSubmission};
    use crate::logging::errlog::ErrorLog;
    use crate::state::AppState;
    use crate::storage::attachments::AttachmentStore;
    use crate::storage::records::RecordStore;
    use axum::Json;
    use axum::extract::Extension;
    use axum::http::StatusCode;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn filled_submission() -> ContactSubmission {
        ContactSubmission {
            name: Some("Asha".to_string()),
            email: Some("a@x.com".to_string()),
            phone: Some("555".to_string()),
            message: Some("Starter Plan".to_string()),
            selected_plan: None,
        }
    }

    fn test_state(data: &TempDir) -> Arc<AppState> {
        let errlog = ErrorLog::new(data.path().join("error.log"), 1024 * 1024);
        let stories_dir = data.path().join("stories");
        let contacts_dir = data.path().join("contacts");
        let uploads_dir = data.path().join("uploads");
        for dir in [&stories_dir, &contacts_dir, &uploads_dir] {
            std::fs::create_dir_all(dir).unwrap();
        }

        Arc::new(AppState {
            stories: RecordStore::new(stories_dir, "", errlog.clone()),
            contacts: RecordStore::new(contacts_dir, "contact-", errlog.clone()),
            attachments: AttachmentStore::new(uploads_dir, errlog),
            mailer: None,
        })
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    // ============================================================
    // VALIDATION TESTS
    // ============================================================

    #[test]
    fn test_complete_submission_passes_validation() {
        assert!(filled_submission().missing_fields().is_empty());
    }

    #[test]
    fn test_all_four_fields_are_mandatory() {
        let submission = ContactSubmission::default();
        assert_eq!(
            submission.missing_fields(),
            vec!["name", "email", "phone", "message"]
        );
    }

    #[test]
    fn test_blank_phone_counts_as_missing() {
        let mut submission = filled_submission();
        submission.phone = Some("  ".to_string());
        assert_eq!(submission.missing_fields(), vec!["phone"]);
    }

    #[test]
    fn test_selected_plan_is_optional() {
        assert!(filled_submission().missing_fields().is_empty());

        let mut submission = filled_submission();
        submission.selected_plan = Some("Gold".to_string());
        assert!(submission.missing_fields().is_empty());
    }

    // ============================================================
    // PAYLOAD PARSING TESTS
    // ============================================================

    #[test]
    fn test_submission_parses_camel_case_plan_key() {
        let submission: ContactSubmission = serde_json::from_str(
            r#"{"name":"Asha","email":"a@x.com","phone":"555","message":"hi","selectedPlan":"Gold"}"#,
        )
        .unwrap();
        assert_eq!(submission.selected_plan.as_deref(), Some("Gold"));
    }

    #[test]
    fn test_submission_parses_with_fields_absent() {
        let submission: ContactSubmission = serde_json::from_str(r#"{"name":"Asha"}"#).unwrap();
        assert_eq!(submission.missing_fields(), vec!["email", "phone", "message"]);
    }

    #[test]
    fn test_record_serializes_plan_under_wire_key() {
        let mut submission = filled_submission();
        submission.selected_plan = Some("Gold".to_string());
        let record = submission.into_record();

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"selectedPlan\":\"Gold\""));
        assert!(!json.contains("selected_plan"));
    }

    #[test]
    fn test_record_serde_roundtrip() {
        let record = filled_submission().into_record();
        let json = serde_json::to_string_pretty(&record).unwrap();
        let back: ContactRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    // ============================================================
    // SUBMISSION HANDLER TESTS
    // ============================================================

    #[tokio::test]
    async fn test_valid_submission_writes_one_record() {
        let data = TempDir::new().unwrap();
        let state = test_state(&data);
        let contacts_dir = state.contacts.dir().to_path_buf();

        let response =
            handle_submit_contact(Extension(state), Json(filled_submission())).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"{\"success\":true}");

        let files: Vec<_> = std::fs::read_dir(&contacts_dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(files.len(), 1);
        assert!(files[0].starts_with("contact-"));
        assert!(files[0].contains("-Asha-"));
        assert!(files[0].ends_with(".json"));

        let record: ContactRecord =
            serde_json::from_str(&std::fs::read_to_string(contacts_dir.join(&files[0])).unwrap())
                .unwrap();
        assert_eq!(record.name, "Asha");
        assert_eq!(record.email, "a@x.com");
        assert_eq!(record.phone, "555");
        assert_eq!(record.message, "Starter Plan");
    }

    #[tokio::test]
    async fn test_invalid_submission_writes_nothing() {
        let data = TempDir::new().unwrap();
        let state = test_state(&data);
        let contacts_dir = state.contacts.dir().to_path_buf();

        let mut submission = filled_submission();
        submission.email = None;
        let response = handle_submit_contact(Extension(state), Json(submission)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(body.contains("Missing required fields: email"));

        assert_eq!(std::fs::read_dir(&contacts_dir).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_write_failure_is_a_server_error() {
        let data = TempDir::new().unwrap();
        let state = test_state(&data);
        std::fs::remove_dir(state.contacts.dir()).unwrap();

        let response =
            handle_submit_contact(Extension(state), Json(filled_submission())).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
