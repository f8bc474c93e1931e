use super::{AttribLayout, Backend, BackendError, Color, ObjectStatus, Topology, Viewport};
use crate::{resources::shader::ShaderStage, vertex::NativeFloatBuffer};
use glow::HasContext;
use std::ffi::{c_void, CStr};

impl From<ShaderStage> for u32 {
    fn from(stage: ShaderStage) -> Self {
        match stage {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl From<Topology> for u32 {
    fn from(topology: Topology) -> Self {
        match topology {
            Topology::Triangles => glow::TRIANGLES,
            Topology::TriangleStrip => glow::TRIANGLE_STRIP,
            Topology::Lines => glow::LINES,
            Topology::Points => glow::POINTS,
        }
    }
}

/// [`Backend`] over a live OpenGL ES 3.0 context.
///
/// glow has no client-side vertex arrays, so per-frame vertex data is streamed
/// through a single `ARRAY_BUFFER` that is re-specified on every upload.
pub struct GlBackend {
    gl: glow::Context,
    vertex_array: glow::VertexArray,
    stream_buffer: glow::Buffer,
}

impl GlBackend {
    /// # Safety
    ///
    /// The context `loader` resolves symbols for must be current on this
    /// thread, and must stay current for every later call on the backend,
    /// including its `Drop`.
    pub unsafe fn from_loader<F>(loader: F) -> Result<Self, BackendError>
    where
        F: FnMut(&CStr) -> *const c_void,
    {
        let gl = glow::Context::from_loader_function_cstr(loader);
        Self::new(gl)
    }

    /// # Safety
    ///
    /// `gl` must be current on this thread for the lifetime of the backend.
    pub unsafe fn new(gl: glow::Context) -> Result<Self, BackendError> {
        let vertex_array = gl
            .create_vertex_array()
            .map_err(|err| BackendError::creation("vertex array", err))?;
        let stream_buffer = match gl.create_buffer() {
            Ok(buffer) => buffer,
            Err(err) => {
                gl.delete_vertex_array(vertex_array);
                return Err(BackendError::creation("stream buffer", err));
            }
        };
        gl.bind_vertex_array(Some(vertex_array));

        tracing::info!(
            version = %gl.get_parameter_string(glow::VERSION),
            renderer = %gl.get_parameter_string(glow::RENDERER),
            "created GL backend"
        );

        Ok(Self {
            gl,
            vertex_array,
            stream_buffer,
        })
    }

    pub fn raw(&self) -> &glow::Context {
        &self.gl
    }
}

impl Backend for GlBackend {
    type Shader = glow::Shader;
    type Program = glow::Program;

    fn set_clear_color(&mut self, color: Color) {
        unsafe { self.gl.clear_color(color.r, color.g, color.b, color.a) }
    }

    fn clear(&mut self) {
        unsafe { self.gl.clear(glow::COLOR_BUFFER_BIT) }
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        unsafe {
            self.gl.viewport(
                viewport.x,
                viewport.y,
                viewport.width as i32,
                viewport.height as i32,
            );
        }
    }

    fn create_shader(&mut self, stage: ShaderStage) -> Result<Self::Shader, BackendError> {
        unsafe { self.gl.create_shader(stage.into()) }
            .map_err(|err| BackendError::creation("shader", err))
    }

    fn shader_source(&mut self, shader: Self::Shader, source: &str) {
        unsafe { self.gl.shader_source(shader, source) }
    }

    fn compile_shader(&mut self, shader: Self::Shader) {
        unsafe { self.gl.compile_shader(shader) }
    }

    fn shader_status(&self, shader: Self::Shader) -> ObjectStatus {
        unsafe {
            ObjectStatus {
                success: self.gl.get_shader_compile_status(shader),
                info_log: self.gl.get_shader_info_log(shader),
            }
        }
    }

    fn delete_shader(&mut self, shader: Self::Shader) {
        unsafe { self.gl.delete_shader(shader) }
    }

    fn create_program(&mut self) -> Result<Self::Program, BackendError> {
        unsafe { self.gl.create_program() }.map_err(|err| BackendError::creation("program", err))
    }

    fn attach_shader(&mut self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.gl.attach_shader(program, shader) }
    }

    fn link_program(&mut self, program: Self::Program) {
        unsafe { self.gl.link_program(program) }
    }

    fn program_status(&self, program: Self::Program) -> ObjectStatus {
        unsafe {
            ObjectStatus {
                success: self.gl.get_program_link_status(program),
                info_log: self.gl.get_program_info_log(program),
            }
        }
    }

    fn delete_program(&mut self, program: Self::Program) {
        unsafe { self.gl.delete_program(program) }
    }

    fn use_program(&mut self, program: Option<Self::Program>) {
        unsafe { self.gl.use_program(program) }
    }

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        unsafe { self.gl.get_attrib_location(program, name) }
    }

    fn enable_vertex_attrib_array(&mut self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) }
    }

    fn disable_vertex_attrib_array(&mut self, index: u32) {
        unsafe { self.gl.disable_vertex_attrib_array(index) }
    }

    fn vertex_attrib_pointer(&mut self, index: u32, layout: AttribLayout, data: &NativeFloatBuffer) {
        unsafe {
            self.gl
                .bind_buffer(glow::ARRAY_BUFFER, Some(self.stream_buffer));
            self.gl
                .buffer_data_u8_slice(glow::ARRAY_BUFFER, data.as_bytes(), glow::STREAM_DRAW);
            self.gl.vertex_attrib_pointer_f32(
                index,
                layout.components as i32,
                glow::FLOAT,
                layout.normalized,
                layout.stride as i32,
                0,
            );
        }
    }

    fn draw_arrays(&mut self, topology: Topology, first: u32, count: u32) {
        unsafe { self.gl.draw_arrays(topology.into(), first as i32, count as i32) }
    }
}

impl Drop for GlBackend {
    fn drop(&mut self) {
        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
            self.gl.delete_buffer(self.stream_buffer);
            self.gl.bind_vertex_array(None);
            self.gl.delete_vertex_array(self.vertex_array);
        }
    }
}
