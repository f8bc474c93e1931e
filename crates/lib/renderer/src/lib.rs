//! OpenGL ES 3.0 "hello triangle" renderer.
//!
//! [`TriangleRenderer`] is written against the [`Backend`] trait, so the same
//! code drives a live context through [`GlBackend`] or records calls through
//! [`TraceBackend`]. A [`SurfaceView`] owns the renderer and sequences its
//! lifecycle callbacks.

pub mod backend;
pub mod config;
pub mod resources;
pub mod surface;
pub mod triangle;
pub mod vertex;

pub use backend::{Backend, BackendError, Color, GlBackend, TraceBackend, Viewport};
pub use config::{Config, ConfigError, RendererConfig, WindowConfig};
pub use surface::{RenderError, RenderMode, SurfaceRenderer, SurfaceView};
pub use triangle::TriangleRenderer;
