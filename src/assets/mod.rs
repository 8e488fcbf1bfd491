pub mod shaders;

pub use shaders::ShaderSource;
