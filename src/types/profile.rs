// src/types/profile.rs
use serde::{Deserialize, Serialize};

/// Profile as the backend returns it. Any field may be missing or null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: Option<String>,
    pub info: Option<String>,
    pub soft_skills: Option<String>,
    pub photo_path: Option<String>,
}

/// Text fields sent on save. Values are trimmed before they leave the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub info: String,
    pub soft_skills: String,
}

impl ProfileUpdate {
    pub fn new(name: &str, info: &str, soft_skills: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            info: info.trim().to_string(),
            soft_skills: soft_skills.trim().to_string(),
        }
    }
}

/// A photo picked for upload.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn content_type(&self) -> &'static str {
        let lower = self.file_name.to_lowercase();
        if lower.ends_with(".png") {
            "image/png"
        } else if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
            "image/jpeg"
        } else {
            "application/octet-stream"
        }
    }
}
