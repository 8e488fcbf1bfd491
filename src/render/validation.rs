// validation.rs - Textual consistency checks between binding names and shader source

use crate::render::binding::{BindingRole, ShaderStage, ROLE_COUNT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Could not validate shader: the {role} name was not found in the {stage} source")]
    MissingBinding {
        role: BindingRole,
        stage: ShaderStage,
    },
    #[error("Could not validate shader: the {role} name is empty")]
    EmptyName { role: BindingRole },
}

impl ValidationError {
    pub fn role(&self) -> BindingRole {
        match self {
            ValidationError::MissingBinding { role, .. } | ValidationError::EmptyName { role } => {
                *role
            }
        }
    }
}

/// How a binding name is located inside shader source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Any case-sensitive occurrence counts, even inside a longer identifier.
    #[default]
    Substring,
    /// The occurrence must not be adjacent to other identifier characters.
    Identifier,
}

impl MatchMode {
    pub fn contains(self, source: &str, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        match self {
            MatchMode::Substring => source.contains(name),
            MatchMode::Identifier => source.match_indices(name).any(|(start, _)| {
                let before = source[..start].chars().next_back();
                let after = source[start + name.len()..].chars().next();
                !before.is_some_and(is_ident_char) && !after.is_some_and(is_ident_char)
            }),
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Fixed check order: vertex-stage roles first, then the fragment roles.
pub const CHECK_ORDER: [BindingRole; ROLE_COUNT] = [
    BindingRole::Position,
    BindingRole::Normal,
    BindingRole::Color,
    BindingRole::PerspectiveUniform,
    BindingRole::ViewUniform,
    BindingRole::ObjectTransformUniform,
    BindingRole::UseObjectColorUniform,
    BindingRole::ObjectColorUniform,
    BindingRole::ObjectOpacityUniform,
    BindingRole::NormalUniform,
    BindingRole::Lighting,
    BindingRole::TexturePos,
    BindingRole::TextureSamplerUniform,
    BindingRole::UseTextureUniform,
];

/// Checks a single role's name against the source of its stage.
pub fn check_binding(
    role: BindingRole,
    name: &str,
    source: &str,
    mode: MatchMode,
) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName { role });
    }
    if !mode.contains(source, name) {
        return Err(ValidationError::MissingBinding {
            role,
            stage: role.stage(),
        });
    }
    Ok(())
}
