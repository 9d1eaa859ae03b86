// src/lib.rs
//! Job search front end: local saved/hidden state, identity resolution,
//! markup rendering and the backend client, plus a small web host.

pub mod cli;
pub mod config;
pub mod controller;
pub mod core;
pub mod error;
pub mod types;
pub mod view;
pub mod web;

pub use config::{AppConfig, SearchMode};
pub use controller::{Frame, JobBoard, ProfileForm};
pub use core::{IdentityResolver, JobBackend, LocalStore, ServiceClient};
pub use error::ClientError;
pub use types::{Action, Alert, Job, JobId};
pub use web::start_web_server;
