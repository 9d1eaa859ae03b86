// src/view/mod.rs
//! View layer: pure render functions plus the binding pass over their output

pub mod bindings;
pub mod escape;
pub mod page;
pub mod render;

pub use bindings::{collect_bindings, collect_controls, has_control, is_bound, Control};
pub use escape::{escape_attr, escape_html};
pub use render::Renderer;
