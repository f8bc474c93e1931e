use crate::{
    backend::{AttribLayout, Backend, Topology, Viewport},
    config::RendererConfig,
    resources::{program::Program, shader::Shader},
    surface::{RenderError, SurfaceRenderer},
    vertex::{
        NativeFloatBuffer, COMPONENTS_PER_VERTEX, POSITION_ATTRIBUTE, TRIANGLE_FRAGMENT_SHADER,
        TRIANGLE_VERTEX_SHADER, TRIANGLE_VERTICES, VERTEX_COUNT,
    },
};

/// Draws one static red triangle, re-uploading its vertices every frame.
pub struct TriangleRenderer<B: Backend> {
    config: RendererConfig,
    program: Option<Program<B>>,
    missing_attribute_logged: bool,
}

impl<B: Backend> TriangleRenderer<B> {
    pub fn new(config: RendererConfig) -> Self {
        Self {
            config,
            program: None,
            missing_attribute_logged: false,
        }
    }

    pub fn program(&self) -> Option<B::Program> {
        self.program.as_ref().map(Program::raw)
    }
}

impl<B: Backend> SurfaceRenderer<B> for TriangleRenderer<B> {
    fn on_surface_created(&mut self, backend: &mut B) -> Result<(), RenderError> {
        backend.set_clear_color(self.config.clear_color);

        let validate = self.config.validate_shaders;
        let vertex = Shader::create(backend, TRIANGLE_VERTEX_SHADER, validate)?;
        let fragment = Shader::create(backend, TRIANGLE_FRAGMENT_SHADER, validate)?;
        let program = Program::link(
            backend,
            vertex,
            fragment,
            validate,
            self.config.delete_shaders_after_link,
        )?;

        // A previous context's objects died with it.
        self.program = Some(program);
        self.missing_attribute_logged = false;
        Ok(())
    }

    fn on_surface_changed(&mut self, backend: &mut B, width: u32, height: u32) {
        backend.set_viewport(Viewport::from_size(width, height));
    }

    fn on_draw_frame(&mut self, backend: &mut B) {
        backend.clear();

        let Some(program) = self.program() else {
            return;
        };
        backend.use_program(Some(program));

        let position = backend.attrib_location(program, POSITION_ATTRIBUTE);
        if let Some(position) = position {
            backend.enable_vertex_attrib_array(position);
            let vertices = NativeFloatBuffer::from_slice(&TRIANGLE_VERTICES);
            backend.vertex_attrib_pointer(
                position,
                AttribLayout::tightly_packed(COMPONENTS_PER_VERTEX),
                &vertices,
            );
        } else if !self.missing_attribute_logged {
            tracing::debug!(attribute = POSITION_ATTRIBUTE, "attribute not found in program");
            self.missing_attribute_logged = true;
        }

        backend.draw_arrays(Topology::Triangles, 0, VERTEX_COUNT);

        if let Some(position) = position {
            backend.disable_vertex_attrib_array(position);
        }
    }

    fn on_surface_destroyed(&mut self, backend: &mut B) {
        if let Some(program) = self.program.take() {
            program.destroy(backend);
        }
    }
}
