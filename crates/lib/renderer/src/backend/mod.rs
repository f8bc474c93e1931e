pub mod gl;
pub mod trace;

use crate::{resources::shader::ShaderStage, vertex::NativeFloatBuffer};
use serde::Deserialize;
use std::fmt::Debug;
use thiserror::Error;

pub use gl::GlBackend;
pub use trace::{Call, TraceBackend, TraceProgram, TraceShader};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("could not create {kind}: {message}")]
    ObjectCreation { kind: &'static str, message: String },
}

impl BackendError {
    pub(crate) fn creation(kind: &'static str, message: impl Into<String>) -> Self {
        Self::ObjectCreation {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "[f32; 4]")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<[f32; 4]> for Color {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn from_size(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    Triangles,
    TriangleStrip,
    Lines,
    Points,
}

/// How a float attribute is read out of the bound vertex data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttribLayout {
    pub components: u32,
    pub normalized: bool,
    pub stride: u32,
}

impl AttribLayout {
    pub fn tightly_packed(components: u32) -> Self {
        Self {
            components,
            normalized: false,
            stride: 0,
        }
    }
}

/// Compile or link outcome, as reported by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectStatus {
    pub success: bool,
    pub info_log: String,
}

/// The OpenGL ES call surface a renderer is written against.
///
/// Calls mirror GL semantics: nothing here reports GL errors, and compile or
/// link results are only visible through [`Backend::shader_status`] and
/// [`Backend::program_status`].
pub trait Backend {
    type Shader: Copy + Debug + PartialEq;
    type Program: Copy + Debug + PartialEq;

    fn set_clear_color(&mut self, color: Color);
    fn clear(&mut self);
    fn set_viewport(&mut self, viewport: Viewport);

    fn create_shader(&mut self, stage: ShaderStage) -> Result<Self::Shader, BackendError>;
    fn shader_source(&mut self, shader: Self::Shader, source: &str);
    fn compile_shader(&mut self, shader: Self::Shader);
    fn shader_status(&self, shader: Self::Shader) -> ObjectStatus;
    fn delete_shader(&mut self, shader: Self::Shader);

    fn create_program(&mut self) -> Result<Self::Program, BackendError>;
    fn attach_shader(&mut self, program: Self::Program, shader: Self::Shader);
    fn link_program(&mut self, program: Self::Program);
    fn program_status(&self, program: Self::Program) -> ObjectStatus;
    fn delete_program(&mut self, program: Self::Program);
    fn use_program(&mut self, program: Option<Self::Program>);

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;
    fn enable_vertex_attrib_array(&mut self, index: u32);
    fn disable_vertex_attrib_array(&mut self, index: u32);
    fn vertex_attrib_pointer(&mut self, index: u32, layout: AttribLayout, data: &NativeFloatBuffer);

    fn draw_arrays(&mut self, topology: Topology, first: u32, count: u32);
}
