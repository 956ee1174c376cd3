//! Data models.

pub mod text_surface;

pub use text_surface::TextSurface;
