pub mod error;

pub use error::ShaderError;
