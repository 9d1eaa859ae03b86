// src/types/mod.rs
pub mod action;
pub mod alert;
pub mod job;
pub mod profile;
pub mod response;
pub mod search;

pub use action::Action;
pub use alert::{Alert, AlertKind};
pub use job::{FieldAliases, Job, JobId};
pub use profile::{PhotoUpload, Profile, ProfileUpdate};
pub use search::SearchCriteria;
