pub mod binding;
pub mod shaders;
pub mod validation;

pub use binding::{BindingKind, BindingNames, BindingRole, ShaderStage, UnknownRole};
pub use shaders::{ShaderPair, ShaderPairBuilder};
pub use validation::{MatchMode, ValidationError};
