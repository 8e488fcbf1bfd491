pub mod assets;
pub mod config;
pub mod render;
pub mod utils;

// Re-export commonly used types
pub use assets::shaders::ShaderSource;
pub use config::shaders::{load_shader_pair, ShaderConfig};
pub use render::binding::{BindingKind, BindingRole, ShaderStage};
pub use render::shaders::{default_shaders, Binding, ShaderPair, ShaderPairBuilder};
pub use render::validation::{MatchMode, ValidationError};
pub use utils::error::ShaderError;
