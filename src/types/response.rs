// src/types/response.rs
use serde::{Deserialize, Serialize};

use crate::types::job::Job;

// ===== Backend Response Types =====

/// Search responses come in three shapes; all of them reduce to a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SearchResponse {
    Bare(Vec<Job>),
    Jobs { jobs: Vec<Job> },
    Results { results: Vec<Job> },
}

impl SearchResponse {
    pub fn into_jobs(self) -> Vec<Job> {
        match self {
            Self::Bare(jobs) | Self::Jobs { jobs } | Self::Results { results: jobs } => jobs,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoUploaded {
    pub photo_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyStatus {
    #[serde(default)]
    pub applied: bool,
}

/// Error body some endpoints send alongside a failing status.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}

// ===== Request Payloads =====

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredSearchRequest<'a> {
    pub hard_skills: &'a [String],
    pub soft_skills: &'a [String],
}

#[derive(Debug, Serialize)]
pub struct ApplyRequest<'a> {
    pub notes: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Option<Vec<Job>> {
        serde_json::from_str::<SearchResponse>(body)
            .ok()
            .map(SearchResponse::into_jobs)
    }

    #[test]
    fn test_search_response_shapes() {
        assert_eq!(parse(r#"[{"title":"A"}]"#).map(|j| j.len()), Some(1));
        assert_eq!(parse(r#"{"jobs":[{"title":"A"},{}]}"#).map(|j| j.len()), Some(2));
        assert_eq!(parse(r#"{"results":[]}"#).map(|j| j.len()), Some(0));
    }

    #[test]
    fn test_search_response_rejects_other_shapes() {
        assert!(parse(r#"{"message":"Received skills: rust"}"#).is_none());
        assert!(parse(r#"{"jobs":"nope"}"#).is_none());
        assert!(parse("not json").is_none());
    }

    #[test]
    fn test_structured_request_uses_camel_case() {
        let hard = vec!["rust".to_string()];
        let soft = vec![];
        let body = serde_json::to_value(StructuredSearchRequest {
            hard_skills: &hard,
            soft_skills: &soft,
        })
        .unwrap();
        assert_eq!(body["hardSkills"][0], "rust");
        assert!(body["softSkills"].as_array().unwrap().is_empty());
    }
}
