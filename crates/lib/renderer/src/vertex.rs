use crate::resources::shader::ShaderDesc;

pub const POSITION_ATTRIBUTE: &str = "vPosition";
pub const COMPONENTS_PER_VERTEX: u32 = 3;
pub const VERTEX_COUNT: u32 = 3;

/// Triangle corners in normalized device coordinates: top, bottom-left,
/// bottom-right.
#[rustfmt::skip]
pub const TRIANGLE_VERTICES: [f32; (COMPONENTS_PER_VERTEX * VERTEX_COUNT) as usize] = [
     0.0,  0.5, 0.0,
    -0.5, -0.5, 0.0,
     0.5, -0.5, 0.0,
];

pub const TRIANGLE_VERTEX_SHADER: ShaderDesc = ShaderDesc::vertex(
    "#version 300 es\n\
     layout(location = 0) in vec4 vPosition;\n\
     void main() {\n\
     \x20 gl_Position = vPosition;\n\
     }\n",
)
.with_name("triangle.vert");

pub const TRIANGLE_FRAGMENT_SHADER: ShaderDesc = ShaderDesc::fragment(
    "#version 300 es\n\
     precision mediump float;\n\
     out vec4 fragColor;\n\
     void main() {\n\
     \x20 fragColor = vec4(1.0, 0.0, 0.0, 1.0);\n\
     }\n",
)
.with_name("triangle.frag");

/// Float data copied into a freshly allocated buffer in native byte order,
/// ready to hand to the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeFloatBuffer {
    bytes: Vec<u8>,
}

impl NativeFloatBuffer {
    pub fn from_slice(floats: &[f32]) -> Self {
        Self {
            bytes: util::to_native_bytes(floats),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len() / std::mem::size_of::<f32>()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn floats(&self) -> impl Iterator<Item = f32> + '_ {
        self.bytes
            .chunks_exact(std::mem::size_of::<f32>())
            .map(|chunk| f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_has_nine_floats() {
        assert_eq!(TRIANGLE_VERTICES.len(), 9);
        assert!(TRIANGLE_VERTICES.iter().all(|c| (-1.0..=1.0).contains(c)));
    }

    #[test]
    fn buffer_holds_a_copy_of_the_vertices() {
        let buffer = NativeFloatBuffer::from_slice(&TRIANGLE_VERTICES);
        assert_eq!(buffer.len(), 9);
        assert_eq!(buffer.as_bytes().len() as u64, util::size_of_slice(&TRIANGLE_VERTICES));
        assert_eq!(buffer.floats().collect::<Vec<_>>(), TRIANGLE_VERTICES);
    }

    #[test]
    fn shaders_declare_the_position_attribute() {
        assert!(TRIANGLE_VERTEX_SHADER.source.starts_with("#version 300 es\n"));
        assert!(TRIANGLE_VERTEX_SHADER
            .source
            .contains(&format!("in vec4 {POSITION_ATTRIBUTE};")));
        assert!(TRIANGLE_FRAGMENT_SHADER
            .source
            .contains("vec4(1.0, 0.0, 0.0, 1.0)"));
    }
}
