// src/core/service_client.rs
//! HTTP client for the job search and profile backend

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use crate::config::AppConfig;
use crate::error::ClientError;
use crate::types::response::{
    ApplyRequest, ApplyStatus, ErrorBody, PhotoUploaded, SearchResponse, StructuredSearchRequest,
};
use crate::types::{Job, PhotoUpload, Profile, ProfileUpdate, SearchCriteria};

const PHOTO_FIELD: &str = "photo";
const USER_ID_HEADER: &str = "X-User-Id";

/// Everything the UI needs from the backend.
#[rocket::async_trait]
pub trait JobBackend: Send + Sync {
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Job>, ClientError>;
    async fn get_profile(&self) -> Result<Profile, ClientError>;
    async fn save_profile(&self, update: &ProfileUpdate) -> Result<Profile, ClientError>;
    async fn upload_photo(&self, photo: &PhotoUpload) -> Result<PhotoUploaded, ClientError>;
    async fn mark_applied(&self, job_id: &str, notes: Option<&str>)
        -> Result<ApplyStatus, ClientError>;
    async fn unmark_applied(&self, job_id: &str) -> Result<ApplyStatus, ClientError>;
}

pub struct ServiceClient {
    client: reqwest::Client,
    config: AppConfig,
}

impl ServiceClient {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    fn user_id(&self) -> &str {
        self.config.user_id.as_deref().unwrap_or_default()
    }
}

#[rocket::async_trait]
impl JobBackend for ServiceClient {
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Job>, ClientError> {
        let request = match criteria {
            SearchCriteria::Skills(text) => {
                let url = self.config.endpoint_url(&self.config.endpoints.get_jobs);
                info!("Searching jobs: {}", url);
                self.client.post(url).form(&[("skills", text.as_str())])
            }
            SearchCriteria::Structured { hard, soft } => {
                let url = self.config.endpoint_url(&self.config.endpoints.search);
                info!("Searching jobs: {}", url);
                self.client.post(url).json(&StructuredSearchRequest {
                    hard_skills: hard,
                    soft_skills: soft,
                })
            }
        };

        let response = request.send().await.map_err(network_error)?;
        let jobs = read_json::<SearchResponse>(response).await?.into_jobs();
        info!("Search returned {} jobs", jobs.len());
        Ok(jobs)
    }

    async fn get_profile(&self) -> Result<Profile, ClientError> {
        let url = self.config.endpoint_url(&self.config.endpoints.profile);
        debug!("Loading profile: {}", url);
        let response = self.client.get(url).send().await.map_err(network_error)?;
        read_json(response).await
    }

    async fn save_profile(&self, update: &ProfileUpdate) -> Result<Profile, ClientError> {
        let url = self.config.endpoint_url(&self.config.endpoints.profile);
        debug!("Saving profile: {}", url);
        let response = self
            .client
            .post(url)
            .json(update)
            .send()
            .await
            .map_err(network_error)?;
        read_json(response).await
    }

    async fn upload_photo(&self, photo: &PhotoUpload) -> Result<PhotoUploaded, ClientError> {
        let url = self.config.endpoint_url(&self.config.endpoints.profile_photo);

        let part = Part::bytes(photo.bytes.clone())
            .file_name(photo.file_name.clone())
            .mime_str(photo.content_type())
            .map_err(|e| ClientError::Network(format!("Failed to create multipart: {}", e)))?;
        let form = Form::new().part(PHOTO_FIELD, part);

        info!("Uploading photo {} to {}", photo.file_name, url);
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(network_error)?;
        read_json(response).await
    }

    async fn mark_applied(
        &self,
        job_id: &str,
        notes: Option<&str>,
    ) -> Result<ApplyStatus, ClientError> {
        let url = self.config.apply_url(job_id);
        debug!("Marking job {} as applied", job_id);
        let response = self
            .client
            .post(url)
            .header(USER_ID_HEADER, self.user_id())
            .json(&ApplyRequest { notes })
            .send()
            .await
            .map_err(network_error)?;
        read_json(response).await
    }

    async fn unmark_applied(&self, job_id: &str) -> Result<ApplyStatus, ClientError> {
        let url = self.config.apply_url(job_id);
        debug!("Removing applied mark for job {}", job_id);
        let response = self
            .client
            .delete(url)
            .header(USER_ID_HEADER, self.user_id())
            .send()
            .await
            .map_err(network_error)?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(ApplyStatus { applied: false });
        }
        read_json(response).await
    }
}

fn network_error(err: reqwest::Error) -> ClientError {
    error!("Request failed: {}", err);
    ClientError::Network(err.to_string())
}

/// Success bodies parse into `R`; failures carry the status and the body's
/// `error` field when there is one.
async fn read_json<R: DeserializeOwned>(response: Response) -> Result<R, ClientError> {
    let status = response.status();
    let text = response.text().await.map_err(network_error)?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.error);
        error!("Backend returned {}: {}", status, text);
        return Err(ClientError::Status {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&text).map_err(|e| {
        error!("Malformed backend response: {}", e);
        ClientError::Malformed(e.to_string())
    })
}
