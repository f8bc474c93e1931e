use super::shader::{Shader, ShaderStage};
use crate::backend::{Backend, BackendError};

pub struct Program<B: Backend> {
    raw: B::Program,
    shaders: Vec<Shader<B>>,
}

impl<B: Backend> Program<B> {
    /// Attaches `vertex` then `fragment` to a fresh program and links it.
    ///
    /// The shaders are kept alive alongside the program unless
    /// `delete_shaders` is set, in which case they are deleted right after
    /// linking.
    pub fn link(
        backend: &mut B,
        vertex: Shader<B>,
        fragment: Shader<B>,
        validate: bool,
        delete_shaders: bool,
    ) -> Result<Self, BackendError> {
        debug_assert_eq!(vertex.stage(), ShaderStage::Vertex);
        debug_assert_eq!(fragment.stage(), ShaderStage::Fragment);

        let raw = backend.create_program()?;
        backend.attach_shader(raw, vertex.raw());
        backend.attach_shader(raw, fragment.raw());
        backend.link_program(raw);

        if validate {
            let status = backend.program_status(raw);
            if !status.success {
                tracing::warn!(log = %status.info_log.trim_end(), "program failed to link");
            }
        }

        let shaders = if delete_shaders {
            vertex.destroy(backend);
            fragment.destroy(backend);
            Vec::new()
        } else {
            vec![vertex, fragment]
        };

        Ok(Self { raw, shaders })
    }

    pub fn raw(&self) -> B::Program {
        self.raw
    }

    pub fn destroy(self, backend: &mut B) {
        backend.delete_program(self.raw);
        for shader in self.shaders {
            shader.destroy(backend);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        backend::{Call, TraceBackend, TraceProgram, TraceShader},
        resources::shader::ShaderDesc,
    };

    fn shaders(backend: &mut TraceBackend) -> (Shader<TraceBackend>, Shader<TraceBackend>) {
        let vertex = Shader::create(backend, ShaderDesc::vertex("v"), false).unwrap();
        let fragment = Shader::create(backend, ShaderDesc::fragment("f"), false).unwrap();
        backend.take_calls();
        (vertex, fragment)
    }

    #[test]
    fn attaches_vertex_before_fragment_then_links() {
        let mut backend = TraceBackend::new();
        let (vertex, fragment) = shaders(&mut backend);
        let program = Program::link(&mut backend, vertex, fragment, false, false).unwrap();
        assert_eq!(program.raw(), TraceProgram(3));
        assert_eq!(
            backend.take_calls(),
            vec![
                Call::CreateProgram(TraceProgram(3)),
                Call::AttachShader {
                    program: TraceProgram(3),
                    shader: TraceShader(1)
                },
                Call::AttachShader {
                    program: TraceProgram(3),
                    shader: TraceShader(2)
                },
                Call::LinkProgram(TraceProgram(3)),
            ]
        );

        program.destroy(&mut backend);
        assert_eq!(
            backend.take_calls(),
            vec![
                Call::DeleteProgram(TraceProgram(3)),
                Call::DeleteShader(TraceShader(1)),
                Call::DeleteShader(TraceShader(2)),
            ]
        );
    }

    #[test]
    fn can_release_shaders_after_link() {
        let mut backend = TraceBackend::new().failing_link();
        let (vertex, fragment) = shaders(&mut backend);
        let program = Program::link(&mut backend, vertex, fragment, true, true).unwrap();
        let calls = backend.take_calls();
        assert_eq!(
            &calls[4..],
            &[
                Call::ProgramStatus(TraceProgram(3)),
                Call::DeleteShader(TraceShader(1)),
                Call::DeleteShader(TraceShader(2)),
            ]
        );

        program.destroy(&mut backend);
        assert_eq!(backend.take_calls(), vec![Call::DeleteProgram(TraceProgram(3))]);
    }
}
