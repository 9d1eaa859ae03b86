// Web host tests through rocket's local client with an in-process backend

use job_board::config::{AppConfig, SearchMode};
use job_board::controller::JobBoard;
use job_board::core::service_client::JobBackend;
use job_board::core::store::LocalStore;
use job_board::error::ClientError;
use job_board::types::response::{ApplyStatus, PhotoUploaded};
use job_board::types::{Job, PhotoUpload, Profile, ProfileUpdate, SearchCriteria};
use job_board::web::{build_rocket, WebState};
use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use serde_json::json;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct FakeBackend {
    searches: Mutex<Vec<SearchCriteria>>,
    uploads: Mutex<Vec<String>>,
    applied: Mutex<Vec<(String, Option<String>)>>,
    fail_search: bool,
}

#[rocket::async_trait]
impl JobBackend for FakeBackend {
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Job>, ClientError> {
        self.searches.lock().unwrap().push(criteria.clone());
        if self.fail_search {
            return Err(ClientError::Status {
                status: 500,
                message: Some("index offline".to_string()),
            });
        }
        Ok(vec![
            Job::from(json!({"id": 1, "title": "Rust Dev", "company": "Acme"})),
            Job::from(json!({"id": 2, "title": "<script>x</script>", "company": "Initech"})),
        ])
    }

    async fn get_profile(&self) -> Result<Profile, ClientError> {
        Ok(Profile {
            name: Some("Ada".to_string()),
            info: Some("Engineer".to_string()),
            soft_skills: None,
            photo_path: Some("uploads/ada.png".to_string()),
        })
    }

    async fn save_profile(&self, update: &ProfileUpdate) -> Result<Profile, ClientError> {
        Ok(Profile {
            name: Some(update.name.clone()),
            ..Profile::default()
        })
    }

    async fn upload_photo(&self, photo: &PhotoUpload) -> Result<PhotoUploaded, ClientError> {
        self.uploads.lock().unwrap().push(photo.file_name.clone());
        Ok(PhotoUploaded {
            photo_path: Some(format!("uploads/{}", photo.file_name)),
        })
    }

    async fn mark_applied(
        &self,
        job_id: &str,
        notes: Option<&str>,
    ) -> Result<ApplyStatus, ClientError> {
        self.applied
            .lock()
            .unwrap()
            .push((job_id.to_string(), notes.map(str::to_string)));
        Ok(ApplyStatus { applied: true })
    }

    async fn unmark_applied(&self, _job_id: &str) -> Result<ApplyStatus, ClientError> {
        Err(ClientError::Network("connection reset".to_string()))
    }
}

async fn client_with(backend: Arc<FakeBackend>) -> Client {
    let config = AppConfig::default();
    let board = JobBoard::from_config(&config, LocalStore::in_memory());
    let state = WebState::new(board, backend, SearchMode::Form);
    Client::tracked(build_rocket(state, 0)).await.unwrap()
}

async fn page(client: &Client) -> String {
    client.get("/").dispatch().await.into_string().await.unwrap()
}

async fn post_form(client: &Client, path: &str, body: &str) -> Status {
    client
        .post(path)
        .header(ContentType::Form)
        .body(body.to_string())
        .dispatch()
        .await
        .status()
}

#[rocket::async_test]
async fn test_initial_page_shows_placeholders() {
    let client = client_with(Arc::new(FakeBackend::default())).await;
    let html = page(&client).await;
    assert!(html.contains("No jobs to display."));
    assert!(html.contains("No saved jobs yet."));
    assert!(html.contains(r#"id="savedList""#));
}

#[rocket::async_test]
async fn test_search_renders_escaped_results() {
    let backend = Arc::new(FakeBackend::default());
    let client = client_with(backend.clone()).await;

    assert_eq!(post_form(&client, "/search", "skills=rust").await, Status::SeeOther);
    let html = page(&client).await;
    assert!(html.contains("Rust Dev"));
    assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
    assert!(!html.contains("<script>x</script>"));
    assert!(html.contains(r#"value="rust""#));

    assert_eq!(
        *backend.searches.lock().unwrap(),
        vec![SearchCriteria::Skills("rust".to_string())]
    );
}

#[rocket::async_test]
async fn test_empty_search_never_reaches_backend() {
    let backend = Arc::new(FakeBackend::default());
    let client = client_with(backend.clone()).await;

    post_form(&client, "/search", "skills=++").await;
    let html = page(&client).await;
    assert!(html.contains("Please enter at least one skill."));
    assert!(backend.searches.lock().unwrap().is_empty());
}

#[rocket::async_test]
async fn test_failed_search_shows_alert() {
    let backend = Arc::new(FakeBackend {
        fail_search: true,
        ..FakeBackend::default()
    });
    let client = client_with(backend).await;

    post_form(&client, "/search", "skills=rust").await;
    let html = page(&client).await;
    assert!(html.contains("alert-danger"));
    assert!(html.contains("index offline (500)"));
    assert!(html.contains("No jobs to display."));
}

#[rocket::async_test]
async fn test_save_then_unsave_through_actions() {
    let client = client_with(Arc::new(FakeBackend::default())).await;
    post_form(&client, "/search", "skills=rust").await;

    assert_eq!(
        post_form(&client, "/actions", "action=save&id=1").await,
        Status::SeeOther
    );
    let html = page(&client).await;
    assert!(html.contains("saved-job"));
    assert!(!html.contains("No saved jobs yet."));

    assert_eq!(
        post_form(&client, "/actions", "action=unsave&id=1").await,
        Status::SeeOther
    );
    assert!(page(&client).await.contains("No saved jobs yet."));
}

#[rocket::async_test]
async fn test_hide_removes_card() {
    let client = client_with(Arc::new(FakeBackend::default())).await;
    post_form(&client, "/search", "skills=rust").await;

    post_form(&client, "/actions", "action=hide&id=1").await;
    let html = page(&client).await;
    assert!(!html.contains("Rust Dev"));

    post_form(&client, "/actions", "action=toggle-hidden").await;
    assert!(page(&client).await.contains("Rust Dev"));
}

#[rocket::async_test]
async fn test_unbound_and_unknown_actions_are_rejected() {
    let client = client_with(Arc::new(FakeBackend::default())).await;

    assert_eq!(
        post_form(&client, "/actions", "action=unsave&id=99").await,
        Status::Conflict
    );
    assert_eq!(
        post_form(&client, "/actions", "action=launch").await,
        Status::BadRequest
    );
}

#[rocket::async_test]
async fn test_apply_records_notes_and_failures() {
    let backend = Arc::new(FakeBackend::default());
    let client = client_with(backend.clone()).await;
    post_form(&client, "/search", "skills=rust").await;

    assert_eq!(
        post_form(&client, "/jobs/1/apply", "notes=sent+CV").await,
        Status::SeeOther
    );
    assert!(page(&client).await.contains("Marked as applied."));
    assert_eq!(
        *backend.applied.lock().unwrap(),
        vec![("1".to_string(), Some("sent CV".to_string()))]
    );

    client.post("/jobs/1/unapply").dispatch().await;
    assert!(page(&client)
        .await
        .contains("Network error while removing applied mark."));
}

#[rocket::async_test]
async fn test_apply_requires_card_on_page() {
    let backend = Arc::new(FakeBackend::default());
    let client = client_with(backend.clone()).await;

    assert_eq!(
        post_form(&client, "/jobs/1/apply", "notes=").await,
        Status::Conflict
    );

    post_form(&client, "/search", "skills=rust").await;
    post_form(&client, "/actions", "action=hide&id=1").await;
    assert_eq!(
        post_form(&client, "/jobs/1/apply", "notes=").await,
        Status::Conflict
    );
    assert_eq!(
        client.post("/jobs/7/unapply").dispatch().await.status(),
        Status::Conflict
    );
    assert!(backend.applied.lock().unwrap().is_empty());
}

#[rocket::async_test]
async fn test_profile_page_loads_backend_values() {
    let client = client_with(Arc::new(FakeBackend::default())).await;
    let html = client
        .get("/profile")
        .dispatch()
        .await
        .into_string()
        .await
        .unwrap();
    assert!(html.contains(r#"value="Ada""#));
    assert!(html.contains(r#"src="/static/uploads/ada.png""#));
}

#[rocket::async_test]
async fn test_profile_save_keeps_submitted_values() {
    let client = client_with(Arc::new(FakeBackend::default())).await;
    let html = client
        .post("/profile")
        .header(ContentType::Form)
        .body("name=+Grace+&info=Admiral&soft_skills=calm")
        .dispatch()
        .await
        .into_string()
        .await
        .unwrap();
    assert!(html.contains("Profile saved."));
    assert!(html.contains(r#"value="Grace""#));
    assert!(html.contains("Admiral"));
}

#[rocket::async_test]
async fn test_photo_upload_without_file_warns() {
    let backend = Arc::new(FakeBackend::default());
    let client = client_with(backend.clone()).await;
    let html = client
        .post("/profile/photo")
        .header(ContentType::Form)
        .body("")
        .dispatch()
        .await
        .into_string()
        .await
        .unwrap();
    assert!(html.contains("Please select a photo first."));
    assert!(backend.uploads.lock().unwrap().is_empty());
}

#[rocket::async_test]
async fn test_photo_upload_forwards_png() {
    let backend = Arc::new(FakeBackend::default());
    let client = client_with(backend.clone()).await;

    let mut body = Vec::new();
    body.extend_from_slice(
        b"--BOUNDARY\r\nContent-Disposition: form-data; name=\"photo\"; filename=\"me.png\"\r\nContent-Type: image/png\r\n\r\n",
    );
    body.extend_from_slice(b"\x89PNG\r\n\x1a\n0123456789");
    body.extend_from_slice(b"\r\n--BOUNDARY--\r\n");

    let content_type = ContentType::new("multipart", "form-data").with_params(("boundary", "BOUNDARY"));
    let html = client
        .post("/profile/photo")
        .header(content_type)
        .body(body)
        .dispatch()
        .await
        .into_string()
        .await
        .unwrap();

    assert!(html.contains("Photo uploaded."));
    assert_eq!(*backend.uploads.lock().unwrap(), vec!["me.png".to_string()]);
    assert!(html.contains(r#"src="/static/uploads/me.png""#));
}

#[rocket::async_test]
async fn test_health() {
    let client = client_with(Arc::new(FakeBackend::default())).await;
    let response = client.get("/health").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.into_json::<serde_json::Value>().await,
        Some(json!({"status": "ok"}))
    );
}
