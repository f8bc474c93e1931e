use super::{AttribLayout, Backend, BackendError, Color, ObjectStatus, Topology, Viewport};
use crate::{resources::shader::ShaderStage, vertex::NativeFloatBuffer};
use std::{cell::RefCell, collections::HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceShader(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceProgram(pub u32);

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetClearColor(Color),
    Clear,
    SetViewport(Viewport),
    CreateShader {
        shader: TraceShader,
        stage: ShaderStage,
    },
    ShaderSource {
        shader: TraceShader,
        source: String,
    },
    CompileShader(TraceShader),
    ShaderStatus(TraceShader),
    DeleteShader(TraceShader),
    CreateProgram(TraceProgram),
    AttachShader {
        program: TraceProgram,
        shader: TraceShader,
    },
    LinkProgram(TraceProgram),
    ProgramStatus(TraceProgram),
    DeleteProgram(TraceProgram),
    UseProgram(Option<TraceProgram>),
    AttribLocation {
        program: TraceProgram,
        name: String,
    },
    EnableVertexAttribArray(u32),
    DisableVertexAttribArray(u32),
    VertexAttribPointer {
        index: u32,
        layout: AttribLayout,
        floats: Vec<f32>,
    },
    DrawArrays {
        topology: Topology,
        first: u32,
        count: u32,
    },
}

/// [`Backend`] that performs no GPU work and records every call it receives.
#[derive(Debug)]
pub struct TraceBackend {
    calls: RefCell<Vec<Call>>,
    next_object: u32,
    attributes: HashMap<String, u32>,
    compile_succeeds: bool,
    link_succeeds: bool,
}

impl Default for TraceBackend {
    fn default() -> Self {
        Self {
            calls: Default::default(),
            next_object: 1,
            attributes: HashMap::from([(crate::vertex::POSITION_ATTRIBUTE.to_owned(), 0)]),
            compile_succeeds: true,
            link_succeeds: true,
        }
    }
}

impl TraceBackend {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_attributes<'a>(mut self, attributes: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        self.attributes = attributes
            .into_iter()
            .map(|(name, location)| (name.to_owned(), location))
            .collect();
        self
    }

    pub fn failing_compile(mut self) -> Self {
        self.compile_succeeds = false;
        self
    }

    pub fn failing_link(mut self) -> Self {
        self.link_succeeds = false;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(self.calls.get_mut())
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn next_object(&mut self) -> u32 {
        let id = self.next_object;
        self.next_object += 1;
        id
    }

    fn status(success: bool, what: &str) -> ObjectStatus {
        ObjectStatus {
            success,
            info_log: if success {
                String::new()
            } else {
                format!("traced {what} failure")
            },
        }
    }
}

impl Backend for TraceBackend {
    type Shader = TraceShader;
    type Program = TraceProgram;

    fn set_clear_color(&mut self, color: Color) {
        self.record(Call::SetClearColor(color));
    }

    fn clear(&mut self) {
        self.record(Call::Clear);
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.record(Call::SetViewport(viewport));
    }

    fn create_shader(&mut self, stage: ShaderStage) -> Result<Self::Shader, BackendError> {
        let shader = TraceShader(self.next_object());
        self.record(Call::CreateShader { shader, stage });
        Ok(shader)
    }

    fn shader_source(&mut self, shader: Self::Shader, source: &str) {
        self.record(Call::ShaderSource {
            shader,
            source: source.to_owned(),
        });
    }

    fn compile_shader(&mut self, shader: Self::Shader) {
        self.record(Call::CompileShader(shader));
    }

    fn shader_status(&self, shader: Self::Shader) -> ObjectStatus {
        self.record(Call::ShaderStatus(shader));
        Self::status(self.compile_succeeds, "compile")
    }

    fn delete_shader(&mut self, shader: Self::Shader) {
        self.record(Call::DeleteShader(shader));
    }

    fn create_program(&mut self) -> Result<Self::Program, BackendError> {
        let program = TraceProgram(self.next_object());
        self.record(Call::CreateProgram(program));
        Ok(program)
    }

    fn attach_shader(&mut self, program: Self::Program, shader: Self::Shader) {
        self.record(Call::AttachShader { program, shader });
    }

    fn link_program(&mut self, program: Self::Program) {
        self.record(Call::LinkProgram(program));
    }

    fn program_status(&self, program: Self::Program) -> ObjectStatus {
        self.record(Call::ProgramStatus(program));
        Self::status(self.link_succeeds, "link")
    }

    fn delete_program(&mut self, program: Self::Program) {
        self.record(Call::DeleteProgram(program));
    }

    fn use_program(&mut self, program: Option<Self::Program>) {
        self.record(Call::UseProgram(program));
    }

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        self.record(Call::AttribLocation {
            program,
            name: name.to_owned(),
        });
        self.attributes.get(name).copied()
    }

    fn enable_vertex_attrib_array(&mut self, index: u32) {
        self.record(Call::EnableVertexAttribArray(index));
    }

    fn disable_vertex_attrib_array(&mut self, index: u32) {
        self.record(Call::DisableVertexAttribArray(index));
    }

    fn vertex_attrib_pointer(&mut self, index: u32, layout: AttribLayout, data: &NativeFloatBuffer) {
        self.record(Call::VertexAttribPointer {
            index,
            layout,
            floats: data.floats().collect(),
        });
    }

    fn draw_arrays(&mut self, topology: Topology, first: u32, count: u32) {
        self.record(Call::DrawArrays {
            topology,
            first,
            count,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn objects_get_distinct_handles() {
        let mut backend = TraceBackend::new();
        let vertex = backend.create_shader(ShaderStage::Vertex).unwrap();
        let fragment = backend.create_shader(ShaderStage::Fragment).unwrap();
        let program = backend.create_program().unwrap();
        assert_ne!(vertex, fragment, "shader handles must differ");
        assert_ne!(program.0, vertex.0, "program and shader share a namespace");
    }

    #[test]
    fn unknown_attribute_has_no_location() {
        let mut backend = TraceBackend::new().with_attributes([("aPos", 3)]);
        let program = backend.create_program().unwrap();
        assert_eq!(backend.attrib_location(program, "aPos"), Some(3));
        assert_eq!(backend.attrib_location(program, "vPosition"), None);
    }

    #[test]
    fn failing_compile_reports_a_log() {
        let mut backend = TraceBackend::new().failing_compile();
        let shader = backend.create_shader(ShaderStage::Vertex).unwrap();
        let status = backend.shader_status(shader);
        assert!(!status.success);
        assert!(!status.info_log.is_empty(), "failed compile should carry a log");
        assert_eq!(backend.take_calls().last(), Some(&Call::ShaderStatus(shader)));
        assert!(backend.calls().is_empty());
    }
}
