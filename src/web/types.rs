// src/web/types.rs
use rocket::form::FromForm;
use rocket::fs::TempFile;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::SearchMode;
use crate::controller::{JobBoard, ProfileForm};
use crate::core::service_client::JobBackend;
use crate::view::Renderer;

/// Shared by every route. The locks are never held across a backend call.
pub struct WebState {
    pub board: Mutex<JobBoard>,
    pub profile: Mutex<ProfileForm>,
    pub backend: Arc<dyn JobBackend>,
    pub renderer: Renderer,
    pub search_mode: SearchMode,
}

impl WebState {
    pub fn new(board: JobBoard, backend: Arc<dyn JobBackend>, search_mode: SearchMode) -> Self {
        let renderer = board.renderer().clone();
        Self {
            board: Mutex::new(board),
            profile: Mutex::new(ProfileForm::new()),
            backend,
            renderer,
            search_mode,
        }
    }
}

#[derive(FromForm)]
pub struct SearchForm {
    pub skills: String,
    pub soft_skills: Option<String>,
}

#[derive(FromForm)]
pub struct ActionForm {
    pub action: String,
    pub id: Option<String>,
}

#[derive(FromForm)]
pub struct ApplyForm {
    pub notes: Option<String>,
}

#[derive(FromForm)]
pub struct ProfileFormData {
    pub name: String,
    pub info: String,
    pub soft_skills: String,
}

#[derive(FromForm)]
pub struct PhotoForm<'f> {
    pub photo: Option<TempFile<'f>>,
}
