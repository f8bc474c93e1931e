use crate::backend::{Backend, BackendError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

#[derive(Debug, Clone, Copy)]
pub struct ShaderDesc {
    pub stage: ShaderStage,
    pub source: &'static str,
    pub name: Option<&'static str>,
}

impl ShaderDesc {
    pub const fn vertex(source: &'static str) -> Self {
        Self {
            stage: ShaderStage::Vertex,
            source,
            name: None,
        }
    }

    pub const fn fragment(source: &'static str) -> Self {
        Self {
            stage: ShaderStage::Fragment,
            source,
            name: None,
        }
    }

    pub const fn with_name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }
}

pub struct Shader<B: Backend> {
    pub(crate) raw: B::Shader,
    pub desc: ShaderDesc,
}

impl<B: Backend> Shader<B> {
    /// Creates and compiles a shader. The compile status is only queried, and
    /// a failure only logged, when `validate` is set.
    pub fn create(backend: &mut B, desc: ShaderDesc, validate: bool) -> Result<Self, BackendError> {
        let raw = backend.create_shader(desc.stage)?;
        backend.shader_source(raw, desc.source);
        backend.compile_shader(raw);

        if validate {
            let status = backend.shader_status(raw);
            if !status.success {
                tracing::warn!(
                    stage = ?desc.stage,
                    name = desc.name.unwrap_or("<unnamed>"),
                    log = %status.info_log.trim_end(),
                    "shader failed to compile"
                );
            }
        }

        Ok(Self { raw, desc })
    }

    pub fn stage(&self) -> ShaderStage {
        self.desc.stage
    }

    pub fn raw(&self) -> B::Shader {
        self.raw
    }

    pub fn destroy(self, backend: &mut B) {
        backend.delete_shader(self.raw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Call, TraceBackend, TraceShader};

    const SOURCE: &str = "void main() {}";

    #[test]
    fn compiles_without_querying_status() {
        let mut backend = TraceBackend::new();
        let shader = Shader::create(&mut backend, ShaderDesc::vertex(SOURCE), false).unwrap();
        assert_eq!(shader.stage(), ShaderStage::Vertex);
        assert_eq!(
            backend.calls(),
            vec![
                Call::CreateShader {
                    shader: TraceShader(1),
                    stage: ShaderStage::Vertex
                },
                Call::ShaderSource {
                    shader: TraceShader(1),
                    source: SOURCE.to_owned()
                },
                Call::CompileShader(TraceShader(1)),
            ]
        );
    }

    #[test]
    fn validation_tolerates_compile_failure() {
        let mut backend = TraceBackend::new().failing_compile();
        let shader = Shader::create(
            &mut backend,
            ShaderDesc::fragment(SOURCE).with_name("broken"),
            true,
        );
        assert!(shader.is_ok(), "compile failures are logged, not returned");
        assert_eq!(backend.calls().last(), Some(&Call::ShaderStatus(TraceShader(1))));
    }
}
