// src/controller/mod.rs
pub mod board;
pub mod profile;

pub use board::{BoardPage, BoardState, Frame, JobBoard, SearchTicket};
pub use profile::ProfileForm;
