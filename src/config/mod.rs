pub mod shaders;

pub use shaders::ShaderConfig;
