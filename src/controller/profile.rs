// src/controller/profile.rs
//! Profile form state: the transient copy of the backend profile plus the
//! status banner shown above it.

use tracing::{error, info, warn};

use crate::core::photo::validate_photo;
use crate::core::service_client::JobBackend;
use crate::error::ClientError;
use crate::types::response::PhotoUploaded;
use crate::types::{Alert, PhotoUpload, Profile, ProfileUpdate};

pub const NO_PHOTO_SELECTED_MESSAGE: &str = "Please select a photo first.";

#[derive(Debug, Default)]
pub struct ProfileForm {
    values: Profile,
    alert: Option<Alert>,
}

impl ProfileForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &Profile {
        &self.values
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    // ===== Load =====

    pub fn record_load(&mut self, outcome: Result<Profile, ClientError>) {
        match outcome {
            Ok(profile) => {
                self.values = profile;
                self.alert = None;
            }
            Err(err) => {
                error!("Loading profile failed: {}", err);
                self.alert = Some(failure_alert(&err, "loading profile"));
            }
        }
    }

    pub async fn load(&mut self, backend: &dyn JobBackend) {
        self.alert = None;
        let outcome = backend.get_profile().await;
        self.record_load(outcome);
    }

    // ===== Save =====

    /// Takes the submitted fields into the form and returns the trimmed
    /// payload to send.
    pub fn begin_save(&mut self, name: &str, info: &str, soft_skills: &str) -> ProfileUpdate {
        self.alert = None;
        let update = ProfileUpdate::new(name, info, soft_skills);
        self.values.name = Some(update.name.clone());
        self.values.info = Some(update.info.clone());
        self.values.soft_skills = Some(update.soft_skills.clone());
        update
    }

    /// The response body is never copied into the form.
    pub fn record_save(&mut self, outcome: Result<Profile, ClientError>) {
        self.alert = Some(match outcome {
            Ok(_) => {
                info!("Profile saved");
                Alert::success("Profile saved.")
            }
            Err(err) => {
                error!("Saving profile failed: {}", err);
                failure_alert(&err, "saving profile")
            }
        });
    }

    pub async fn save(
        &mut self,
        backend: &dyn JobBackend,
        name: &str,
        info: &str,
        soft_skills: &str,
    ) {
        let update = self.begin_save(name, info, soft_skills);
        let outcome = backend.save_profile(&update).await;
        self.record_save(outcome);
    }

    // ===== Photo =====

    /// Returns the photo to upload, or `None` with a warning when nothing
    /// usable was picked.
    pub fn begin_upload(&mut self, photo: Option<PhotoUpload>) -> Option<PhotoUpload> {
        self.alert = None;
        let Some(photo) = photo.filter(|p| !p.file_name.is_empty()) else {
            self.alert = Some(Alert::warning(NO_PHOTO_SELECTED_MESSAGE));
            return None;
        };

        if let Err(e) = validate_photo(&photo) {
            warn!("Rejected photo {}: {}", photo.file_name, e);
            self.alert = Some(Alert::warning(e.message));
            return None;
        }

        Some(photo)
    }

    pub fn record_upload(&mut self, outcome: Result<PhotoUploaded, ClientError>) {
        match outcome {
            Ok(uploaded) => {
                if let Some(path) = uploaded.photo_path.filter(|p| !p.is_empty()) {
                    self.values.photo_path = Some(path);
                }
                self.alert = Some(Alert::success("Photo uploaded."));
            }
            Err(err) => {
                error!("Uploading photo failed: {}", err);
                self.alert = Some(match err.status() {
                    Some(status) => Alert::danger(format!("Error uploading photo ({}).", status)),
                    None => failure_alert(&err, "uploading photo"),
                });
            }
        }
    }

    pub async fn upload(&mut self, backend: &dyn JobBackend, photo: Option<PhotoUpload>) {
        let Some(photo) = self.begin_upload(photo) else {
            return;
        };
        let outcome = backend.upload_photo(&photo).await;
        self.record_upload(outcome);
    }
}

fn failure_alert(err: &ClientError, doing: &str) -> Alert {
    match err {
        ClientError::Status { status, .. } => {
            Alert::danger(format!("Error {} ({})", doing, status))
        }
        ClientError::Network(_) => Alert::danger(format!("Network error while {}.", doing)),
        ClientError::Malformed(_) => Alert::danger(format!("Unexpected response while {}.", doing)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_load_keeps_values() {
        let mut form = ProfileForm::new();
        form.record_load(Ok(Profile {
            name: Some("Ada".to_string()),
            ..Profile::default()
        }));
        form.record_load(Err(ClientError::Status {
            status: 500,
            message: None,
        }));
        assert_eq!(form.values().name.as_deref(), Some("Ada"));
        assert_eq!(form.alert().unwrap().message, "Error loading profile (500)");
    }

    #[test]
    fn test_save_trims_and_ignores_response_body() {
        let mut form = ProfileForm::new();
        let update = form.begin_save("  Ada ", "info", " calm ");
        assert_eq!(update.name, "Ada");
        assert_eq!(update.soft_skills, "calm");

        form.record_save(Ok(Profile {
            name: Some("Server Name".to_string()),
            ..Profile::default()
        }));
        assert_eq!(form.values().name.as_deref(), Some("Ada"));
        assert_eq!(form.alert().unwrap().message, "Profile saved.");
    }

    #[test]
    fn test_upload_requires_a_file() {
        let mut form = ProfileForm::new();
        assert!(form.begin_upload(None).is_none());
        assert_eq!(form.alert().unwrap().message, NO_PHOTO_SELECTED_MESSAGE);
    }

    #[test]
    fn test_upload_failure_is_status_coded() {
        let mut form = ProfileForm::new();
        form.record_upload(Err(ClientError::Status {
            status: 413,
            message: None,
        }));
        assert_eq!(form.alert().unwrap().message, "Error uploading photo (413).");
        form.record_upload(Err(ClientError::Network("refused".to_string())));
        assert_eq!(
            form.alert().unwrap().message,
            "Network error while uploading photo."
        );
    }
}
