use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Pipeline stage whose source must declare a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingKind {
    /// Per-vertex input.
    Attribute,
    /// Per-draw constant.
    Uniform,
}

/// Semantic purpose a renderer binds data to.
///
/// Serialized by its snake_case key (see [`BindingRole::key`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum BindingRole {
    Position,
    Normal,
    Color,
    TexturePos,
    Lighting,
    ViewUniform,
    PerspectiveUniform,
    ObjectTransformUniform,
    UseObjectColorUniform,
    ObjectColorUniform,
    ObjectOpacityUniform,
    NormalUniform,
    UseTextureUniform,
    TextureSamplerUniform,
}

/// Number of binding roles in the registry.
pub const ROLE_COUNT: usize = 14;

impl BindingRole {
    /// All roles in registry order.
    pub const ALL: [BindingRole; ROLE_COUNT] = [
        BindingRole::Position,
        BindingRole::Normal,
        BindingRole::Color,
        BindingRole::TexturePos,
        BindingRole::Lighting,
        BindingRole::ViewUniform,
        BindingRole::PerspectiveUniform,
        BindingRole::ObjectTransformUniform,
        BindingRole::UseObjectColorUniform,
        BindingRole::ObjectColorUniform,
        BindingRole::ObjectOpacityUniform,
        BindingRole::NormalUniform,
        BindingRole::UseTextureUniform,
        BindingRole::TextureSamplerUniform,
    ];

    pub fn stage(self) -> ShaderStage {
        match self {
            BindingRole::UseTextureUniform | BindingRole::TextureSamplerUniform => {
                ShaderStage::Fragment
            }
            _ => ShaderStage::Vertex,
        }
    }

    pub fn kind(self) -> BindingKind {
        match self {
            BindingRole::Position
            | BindingRole::Normal
            | BindingRole::Color
            | BindingRole::TexturePos => BindingKind::Attribute,
            _ => BindingKind::Uniform,
        }
    }

    pub fn default_name(self) -> &'static str {
        match self {
            BindingRole::Position => "vertexPosition",
            BindingRole::Normal => "vertexNormal",
            BindingRole::Color => "vertexColor",
            BindingRole::TexturePos => "vertexTexturePos",
            BindingRole::Lighting => "lighting",
            BindingRole::ViewUniform => "view",
            BindingRole::PerspectiveUniform => "perspective",
            BindingRole::ObjectTransformUniform => "objectTransform",
            BindingRole::UseObjectColorUniform => "useObjectColor",
            BindingRole::ObjectColorUniform => "objectColor",
            BindingRole::ObjectOpacityUniform => "objectOpacity",
            BindingRole::NormalUniform => "normal",
            BindingRole::UseTextureUniform => "useTexture",
            BindingRole::TextureSamplerUniform => "textureSampler",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            BindingRole::Position => "position",
            BindingRole::Normal => "normal",
            BindingRole::Color => "color",
            BindingRole::TexturePos => "texture_pos",
            BindingRole::Lighting => "lighting",
            BindingRole::ViewUniform => "view_uniform",
            BindingRole::PerspectiveUniform => "perspective_uniform",
            BindingRole::ObjectTransformUniform => "object_transform_uniform",
            BindingRole::UseObjectColorUniform => "use_object_color_uniform",
            BindingRole::ObjectColorUniform => "object_color_uniform",
            BindingRole::ObjectOpacityUniform => "object_opacity_uniform",
            BindingRole::NormalUniform => "normal_uniform",
            BindingRole::UseTextureUniform => "use_texture_uniform",
            BindingRole::TextureSamplerUniform => "texture_sampler_uniform",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown binding role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for BindingRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BindingRole::ALL
            .into_iter()
            .find(|role| role.key() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

impl TryFrom<String> for BindingRole {
    type Error = UnknownRole;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<BindingRole> for &'static str {
    fn from(role: BindingRole) -> Self {
        role.key()
    }
}

impl fmt::Display for BindingRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BindingRole::Position => "position attribute",
            BindingRole::Normal => "normal attribute",
            BindingRole::Color => "color attribute",
            BindingRole::TexturePos => "texture position attribute",
            BindingRole::Lighting => "lighting",
            BindingRole::ViewUniform => "view uniform",
            BindingRole::PerspectiveUniform => "perspective uniform",
            BindingRole::ObjectTransformUniform => "object transform uniform",
            BindingRole::UseObjectColorUniform => "use object color uniform",
            BindingRole::ObjectColorUniform => "object color uniform",
            BindingRole::ObjectOpacityUniform => "object opacity uniform",
            BindingRole::NormalUniform => "normal uniform",
            BindingRole::UseTextureUniform => "use texture uniform",
            BindingRole::TextureSamplerUniform => "texture sampler uniform",
        };
        f.write_str(label)
    }
}

/// Registry of identifier names, one per [`BindingRole`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingNames {
    names: [String; ROLE_COUNT],
}

impl BindingNames {
    pub fn get(&self, role: BindingRole) -> &str {
        &self.names[role.index()]
    }

    /// Replaces the name for `role`, returning the previous one.
    pub fn set(&mut self, role: BindingRole, name: impl Into<String>) -> String {
        std::mem::replace(&mut self.names[role.index()], name.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = (BindingRole, &str)> + '_ {
        BindingRole::ALL
            .iter()
            .map(move |&role| (role, self.get(role)))
    }
}

impl Default for BindingNames {
    fn default() -> Self {
        Self {
            names: BindingRole::ALL.map(|role| role.default_name().to_string()),
        }
    }
}
