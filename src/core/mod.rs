// src/core/mod.rs
//! Storage, identity and backend access shared by the controllers

pub mod identity;
pub mod photo;
pub mod service_client;
pub mod store;

pub use identity::IdentityResolver;
pub use service_client::{JobBackend, ServiceClient};
pub use store::{JsonFileStore, KeyValueStore, LocalStore, MemoryStore};
