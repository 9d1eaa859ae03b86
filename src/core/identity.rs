// src/core/identity.rs
//! Stable job identities for records that may or may not carry an id

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::types::{FieldAliases, Job, JobId};

const DERIVED_ID_LEN: usize = 24;

#[derive(Debug, Clone, Default)]
pub struct IdentityResolver {
    aliases: FieldAliases,
}

impl IdentityResolver {
    pub fn new(aliases: FieldAliases) -> Self {
        Self { aliases }
    }

    pub fn aliases(&self) -> &FieldAliases {
        &self.aliases
    }

    /// Server id when present, otherwise a token derived from
    /// title|company|url. Jobs sharing those three values collide.
    pub fn resolve(&self, job: &Job) -> JobId {
        if let Some(id) = job.raw_id() {
            return JobId::new(id);
        }

        let raw = format!(
            "{}|{}|{}",
            job.title(&self.aliases),
            job.company().unwrap_or_default(),
            job.url().unwrap_or_default()
        );
        let mut token = STANDARD.encode(raw.as_bytes());
        token.truncate(DERIVED_ID_LEN);
        JobId::new(token)
    }

    pub fn title(&self, job: &Job) -> String {
        job.title(&self.aliases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prefers_server_id() {
        let resolver = IdentityResolver::default();
        let job = Job::from(json!({"id": 17, "title": "Dev"}));
        assert_eq!(resolver.resolve(&job).as_str(), "17");
    }

    #[test]
    fn test_derived_id_is_deterministic() {
        let resolver = IdentityResolver::default();
        let job = Job::from(json!({"title": "Dev", "company": "Acme", "url": "https://a.b/1"}));
        assert_eq!(resolver.resolve(&job), resolver.resolve(&job));
        assert_eq!(resolver.resolve(&job).as_str().len(), DERIVED_ID_LEN);
    }

    #[test]
    fn test_derived_id_matches_base64_prefix() {
        let resolver = IdentityResolver::default();
        let job = Job::from(json!({"title": "Dev", "company": "Acme"}));
        // base64("Dev|Acme|") = "RGV2fEFjbWV8"
        assert_eq!(resolver.resolve(&job).as_str(), "RGV2fEFjbWV8");
    }

    #[test]
    fn test_non_ascii_text_is_encoded() {
        let resolver = IdentityResolver::default();
        let job = Job::from(json!({"title": "Développeur 日本", "company": "Zürich AG"}));
        let id = resolver.resolve(&job);
        assert_eq!(id.as_str().len(), DERIVED_ID_LEN);
        assert!(id.as_str().is_ascii());
    }

    #[test]
    fn test_identical_jobs_collide() {
        let resolver = IdentityResolver::default();
        let a = Job::from(json!({"title": "Dev", "company": "Acme", "location": "Oslo"}));
        let b = Job::from(json!({"title": "Dev", "company": "Acme", "location": "Rome"}));
        assert_eq!(resolver.resolve(&a), resolver.resolve(&b));
        assert_eq!(
            resolver.resolve(&Job::default()),
            resolver.resolve(&Job::from(json!({"description": "x"})))
        );
    }
}
