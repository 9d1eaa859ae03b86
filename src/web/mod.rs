// src/web/mod.rs
//! Web host for the rendered job board and profile pages

pub mod types;

pub use types::*;

use anyhow::Result;
use rocket::data::{Limits, ToByteUnit};
use rocket::form::Form;
use rocket::fs::TempFile;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::response::Redirect;
use rocket::serde::json::{json, Json, Value};
use rocket::{catchers, get, post, routes, Build, Rocket, State};
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::controller::JobBoard;
use crate::core::service_client::ServiceClient;
use crate::core::store::{JsonFileStore, LocalStore};
use crate::types::{Action, PhotoUpload, SearchCriteria};
use crate::view::page::{board_document, profile_document};
use crate::view::{has_control, is_bound};

// ===== Board Routes =====

#[get("/")]
pub async fn index(state: &State<WebState>) -> RawHtml<String> {
    let board = state.board.lock().await;
    RawHtml(board_document(&board.page()))
}

#[post("/search", data = "<form>")]
pub async fn search(form: Form<SearchForm>, state: &State<WebState>) -> Redirect {
    let criteria = SearchCriteria::from_input(
        state.search_mode,
        &form.skills,
        form.soft_skills.as_deref(),
    );

    let ticket = state.board.lock().await.begin_search(criteria);
    if let Some(ticket) = ticket {
        let outcome = state.backend.search(&ticket.criteria).await;
        state.board.lock().await.complete_search(ticket, outcome);
    }

    Redirect::to("/")
}

/// Dispatches a posted control, provided the current page actually shows it.
#[post("/actions", data = "<form>")]
pub async fn action(form: Form<ActionForm>, state: &State<WebState>) -> Result<Redirect, Status> {
    let Some(action) = Action::parse(&form.action, form.id.as_deref()) else {
        warn!("Unknown action posted: {}", form.action);
        return Err(Status::BadRequest);
    };

    let mut board = state.board.lock().await;
    if !is_bound(&board.page().controls_markup(), &action) {
        warn!("Action {:?} is not bound on the current page", action);
        return Err(Status::Conflict);
    }

    board.dispatch(action);
    Ok(Redirect::to("/"))
}

/// Marks a job as applied, provided its card is on the current page.
#[post("/jobs/<id>/apply", data = "<form>")]
pub async fn apply(
    id: String,
    form: Form<ApplyForm>,
    state: &State<WebState>,
) -> Result<Redirect, Status> {
    ensure_control(state, "apply", &id).await?;

    let notes = form.notes.as_deref().filter(|n| !n.trim().is_empty());
    let outcome = state.backend.mark_applied(&id, notes).await;
    state.board.lock().await.record_apply(true, outcome);
    Ok(Redirect::to("/"))
}

#[post("/jobs/<id>/unapply")]
pub async fn unapply(id: String, state: &State<WebState>) -> Result<Redirect, Status> {
    ensure_control(state, "unapply", &id).await?;

    let outcome = state.backend.unmark_applied(&id).await;
    state.board.lock().await.record_apply(false, outcome);
    Ok(Redirect::to("/"))
}

async fn ensure_control(state: &WebState, action: &str, id: &str) -> Result<(), Status> {
    let markup = state.board.lock().await.page().controls_markup();
    if has_control(&markup, action, id) {
        Ok(())
    } else {
        warn!("No {} control for job {} on the current page", action, id);
        Err(Status::Conflict)
    }
}

// ===== Profile Routes =====

#[get("/profile")]
pub async fn profile_page(state: &State<WebState>) -> RawHtml<String> {
    let outcome = state.backend.get_profile().await;
    let mut form = state.profile.lock().await;
    form.record_load(outcome);
    render_profile(state, &form)
}

#[post("/profile", data = "<data>")]
pub async fn save_profile(data: Form<ProfileFormData>, state: &State<WebState>) -> RawHtml<String> {
    let update = state
        .profile
        .lock()
        .await
        .begin_save(&data.name, &data.info, &data.soft_skills);

    let outcome = state.backend.save_profile(&update).await;

    let mut form = state.profile.lock().await;
    form.record_save(outcome);
    render_profile(state, &form)
}

#[post("/profile/photo", data = "<data>")]
pub async fn upload_photo(data: Form<PhotoForm<'_>>, state: &State<WebState>) -> RawHtml<String> {
    let picked = match data.photo.as_ref().filter(|f| f.len() > 0) {
        Some(file) => match read_temp_file(file).await {
            Ok(bytes) => Some(PhotoUpload::new(upload_file_name(file), bytes)),
            Err(e) => {
                warn!("Could not read uploaded photo: {}", e);
                None
            }
        },
        None => None,
    };

    let photo = state.profile.lock().await.begin_upload(picked);
    if let Some(photo) = photo {
        let outcome = state.backend.upload_photo(&photo).await;
        state.profile.lock().await.record_upload(outcome);
    }

    let form = state.profile.lock().await;
    render_profile(state, &form)
}

#[get("/health")]
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn render_profile(state: &WebState, form: &crate::controller::ProfileForm) -> RawHtml<String> {
    RawHtml(profile_document(
        &state.renderer.render_alert(form.alert()),
        &state.renderer.render_profile(form.values()),
    ))
}

async fn read_temp_file(file: &TempFile<'_>) -> std::io::Result<Vec<u8>> {
    let reader = file.open().await?;
    tokio::pin!(reader);
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).await?;
    Ok(bytes)
}

fn upload_file_name(file: &TempFile<'_>) -> String {
    let stem = file.name().unwrap_or("photo");
    match file.content_type().and_then(|ct| ct.extension()) {
        Some(ext) => format!("{}.{}", stem, ext.as_str().to_lowercase()),
        None => stem.to_string(),
    }
}

// ===== Catchers =====

#[rocket::catch(400)]
pub fn bad_request() -> RawHtml<&'static str> {
    RawHtml(r#"<p>Invalid request. <a href="/">Back to jobs</a></p>"#)
}

#[rocket::catch(409)]
pub fn stale_action() -> RawHtml<&'static str> {
    RawHtml(r#"<p>That control is no longer on the page. <a href="/">Reload</a></p>"#)
}

#[rocket::catch(404)]
pub fn not_found() -> RawHtml<&'static str> {
    RawHtml(r#"<p>Not found. <a href="/">Back to jobs</a></p>"#)
}

// ===== Server =====

pub fn build_rocket(state: WebState, port: u16) -> Rocket<Build> {
    let limits = Limits::default()
        .limit("file", 12.mebibytes())
        .limit("data-form", 12.mebibytes());
    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("limits", limits));
    rocket::custom(figment)
        .manage(state)
        .register("/", catchers![bad_request, stale_action, not_found])
        .mount(
            "/",
            routes![
                index,
                search,
                action,
                apply,
                unapply,
                profile_page,
                save_profile,
                upload_photo,
                health,
            ],
        )
}

pub async fn start_web_server(config: AppConfig) -> Result<()> {
    let store = LocalStore::new(JsonFileStore::open(&config.store_path));
    let board = JobBoard::from_config(&config, store);
    let backend = Arc::new(ServiceClient::new(config.clone())?);
    let state = WebState::new(board, backend, config.search_mode);

    info!("Starting job board on port {}", config.port);
    info!("Backend: {}", config.backend_url);
    info!("Local store: {}", config.store_path.display());

    build_rocket(state, config.port)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Web server failed: {}", e))?;

    Ok(())
}
