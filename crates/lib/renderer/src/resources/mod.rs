pub mod program;
pub mod shader;
