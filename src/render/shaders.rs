// shaders.rs - Vertex/fragment shader pair with its binding name registry

use crate::render::binding::{BindingKind, BindingNames, BindingRole, ShaderStage};
use crate::render::validation::{self, MatchMode, ValidationError, CHECK_ORDER};
use log::{debug, warn};
use std::borrow::Cow;

/// Predefined shader sources
pub mod default_shaders {
    /// Vertex shader with per-vertex or per-object colour and a fixed diffuse term
    pub const VERTEX_SRC: &str = r#"attribute vec3 vertexPosition;
attribute vec3 vertexNormal;
attribute vec3 vertexColor;
attribute vec2 vertexTexturePos;

uniform mat4 view;
uniform mat4 perspective;
uniform mat4 objectTransform;
uniform bool useObjectColor;
uniform vec3 objectColor;
uniform float objectOpacity;
uniform mat3 normal;

varying lowp vec4 fragmentColor;
varying vec2 fragmentTexturePos;

void main(void) {
  vec3 lightingWeighting = vec3(0.0, 0.0, 1.0);
  vec3 transformedNormal = normal * vertexNormal;
  float dLW = max(dot(transformedNormal, lightingWeighting ), 0.0);
  gl_Position = perspective * view * objectTransform * vec4(vertexPosition, 1.0);
  fragmentTexturePos = vertexTexturePos;
  if (useObjectColor) {
    fragmentColor = vec4(objectColor*dLW,objectOpacity);
  } else {
    fragmentColor = vec4(vertexColor*dLW,objectOpacity);
  }
}
"#;

    /// Fragment shader sampling a texture or passing the interpolated colour through
    pub const FRAGMENT_SRC: &str = r#"#ifdef GL_ES
precision highp float;
#endif

varying lowp vec4 fragmentColor;
varying vec2 fragmentTexturePos;
uniform bool useTexture;
uniform sampler2D textureSampler;

void main(void) {
 if (useTexture) {
   gl_FragColor = texture2D(textureSampler,   vec2(fragmentTexturePos.s,fragmentTexturePos.t));
 } else {
   gl_FragColor = fragmentColor;
 }
}
"#;
}

/// One entry of [`ShaderPair::bindings`], what a backend needs to look up a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding<'a> {
    pub role: BindingRole,
    pub name: &'a str,
    pub stage: ShaderStage,
    pub kind: BindingKind,
}

/// A vertex shader and a fragment shader used together, plus the identifiers
/// a renderer binds attribute and uniform locations to.
///
/// The pair is a plain value: build it once, then share it read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderPair {
    vertex_source: Cow<'static, str>,
    fragment_source: Cow<'static, str>,
    names: BindingNames,
    match_mode: MatchMode,
}

impl Default for ShaderPair {
    fn default() -> Self {
        Self {
            vertex_source: Cow::Borrowed(default_shaders::VERTEX_SRC),
            fragment_source: Cow::Borrowed(default_shaders::FRAGMENT_SRC),
            names: BindingNames::default(),
            match_mode: MatchMode::default(),
        }
    }
}

impl ShaderPair {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ShaderPairBuilder {
        ShaderPairBuilder::default()
    }

    pub fn vertex(&self) -> &str {
        &self.vertex_source
    }

    pub fn fragment(&self) -> &str {
        &self.fragment_source
    }

    pub fn source(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => self.vertex(),
            ShaderStage::Fragment => self.fragment(),
        }
    }

    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    pub fn names(&self) -> &BindingNames {
        &self.names
    }

    pub fn name(&self, role: BindingRole) -> &str {
        self.names.get(role)
    }

    pub fn position(&self) -> &str {
        self.name(BindingRole::Position)
    }

    pub fn normal(&self) -> &str {
        self.name(BindingRole::Normal)
    }

    pub fn color(&self) -> &str {
        self.name(BindingRole::Color)
    }

    pub fn texture_pos(&self) -> &str {
        self.name(BindingRole::TexturePos)
    }

    pub fn lighting(&self) -> &str {
        self.name(BindingRole::Lighting)
    }

    pub fn view(&self) -> &str {
        self.name(BindingRole::ViewUniform)
    }

    pub fn perspective(&self) -> &str {
        self.name(BindingRole::PerspectiveUniform)
    }

    pub fn object_transform(&self) -> &str {
        self.name(BindingRole::ObjectTransformUniform)
    }

    pub fn use_object_color(&self) -> &str {
        self.name(BindingRole::UseObjectColorUniform)
    }

    pub fn object_color(&self) -> &str {
        self.name(BindingRole::ObjectColorUniform)
    }

    pub fn object_opacity(&self) -> &str {
        self.name(BindingRole::ObjectOpacityUniform)
    }

    /// Name of the normal matrix uniform, not the normal attribute.
    pub fn normal_uniform(&self) -> &str {
        self.name(BindingRole::NormalUniform)
    }

    pub fn use_texture(&self) -> &str {
        self.name(BindingRole::UseTextureUniform)
    }

    pub fn texture_sampler(&self) -> &str {
        self.name(BindingRole::TextureSamplerUniform)
    }

    /// Every binding in registry order, with the stage and kind a backend
    /// needs to query the linked program.
    pub fn bindings(&self) -> impl Iterator<Item = Binding<'_>> + '_ {
        self.names.iter().map(|(role, name)| Binding {
            role,
            name,
            stage: role.stage(),
            kind: role.kind(),
        })
    }

    /// Checks that every registered name appears in the source of its stage.
    ///
    /// Stops at the first failing role.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_with(|_| {})
    }

    /// Like [`validate`](Self::validate), calling `observer` with each role
    /// right before it is checked.
    pub fn validate_with<F>(&self, mut observer: F) -> Result<(), ValidationError>
    where
        F: FnMut(BindingRole),
    {
        for role in CHECK_ORDER {
            observer(role);
            let source = self.source(role.stage());
            if let Err(e) = validation::check_binding(role, self.name(role), source, self.match_mode) {
                warn!("Shader pair failed validation: {}", e);
                return Err(e);
            }
        }

        debug!("Shader pair validated ({} bindings)", CHECK_ORDER.len());
        Ok(())
    }
}

/// Collects overrides before a [`ShaderPair`] is frozen.
///
/// Anything left unset falls back to the defaults.
#[derive(Debug, Clone, Default)]
pub struct ShaderPairBuilder {
    vertex_source: Option<Cow<'static, str>>,
    fragment_source: Option<Cow<'static, str>>,
    names: BindingNames,
    match_mode: MatchMode,
}

impl ShaderPairBuilder {
    pub fn vertex_source(mut self, source: impl Into<Cow<'static, str>>) -> Self {
        self.vertex_source = Some(source.into());
        self
    }

    pub fn fragment_source(mut self, source: impl Into<Cow<'static, str>>) -> Self {
        self.fragment_source = Some(source.into());
        self
    }

    pub fn name(mut self, role: BindingRole, name: impl Into<String>) -> Self {
        self.names.set(role, name);
        self
    }

    pub fn match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    pub fn build(self) -> ShaderPair {
        ShaderPair {
            vertex_source: self
                .vertex_source
                .unwrap_or(Cow::Borrowed(default_shaders::VERTEX_SRC)),
            fragment_source: self
                .fragment_source
                .unwrap_or(Cow::Borrowed(default_shaders::FRAGMENT_SRC)),
            names: self.names,
            match_mode: self.match_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::validation::ValidationError::{EmptyName, MissingBinding};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_default_pair_validates() {
        assert_eq!(ShaderPair::default().validate(), Ok(()));
    }

    #[test]
    fn test_default_accessors() {
        let pair = ShaderPair::new();
        assert_eq!(pair.position(), "vertexPosition");
        assert_eq!(pair.normal(), "vertexNormal");
        assert_eq!(pair.color(), "vertexColor");
        assert_eq!(pair.texture_pos(), "vertexTexturePos");
        assert_eq!(pair.lighting(), "lighting");
        assert_eq!(pair.view(), "view");
        assert_eq!(pair.perspective(), "perspective");
        assert_eq!(pair.object_transform(), "objectTransform");
        assert_eq!(pair.use_object_color(), "useObjectColor");
        assert_eq!(pair.object_color(), "objectColor");
        assert_eq!(pair.object_opacity(), "objectOpacity");
        assert_eq!(pair.normal_uniform(), "normal");
        assert_eq!(pair.use_texture(), "useTexture");
        assert_eq!(pair.texture_sampler(), "textureSampler");
    }

    #[test]
    fn test_sources_are_stable_across_calls() {
        let pair = ShaderPair::new();
        let before = pair.clone();
        assert_eq!(pair.vertex(), pair.vertex());
        assert_eq!(pair.fragment(), pair.fragment());
        assert_eq!(pair, before);
    }

    #[test]
    fn test_override_round_trips_through_accessor() {
        for role in BindingRole::ALL {
            let pair = ShaderPair::builder().name(role, "customName").build();
            assert_eq!(pair.name(role), "customName");
        }
    }

    #[test]
    fn test_every_role_fails_when_renamed_and_stops_there() {
        for (idx, role) in CHECK_ORDER.iter().copied().enumerate() {
            let pair = ShaderPair::builder().name(role, "doesNotExist").build();
            let mut checked = Vec::new();
            let result = pair.validate_with(|r| checked.push(r));

            assert_eq!(
                result,
                Err(MissingBinding {
                    role,
                    stage: role.stage()
                })
            );
            assert_eq!(checked, CHECK_ORDER[..=idx].to_vec());
        }
    }

    #[test]
    fn test_truncated_position_in_source_fails() {
        let vertex = default_shaders::VERTEX_SRC.replace("vertexPosition", "vertexPos");
        let pair = ShaderPair::builder().vertex_source(vertex).build();
        let err = pair.validate().unwrap_err();
        assert_eq!(err.role(), BindingRole::Position);
    }

    #[test]
    fn test_missing_sampler_fails_after_vertex_checks() {
        let fragment = default_shaders::FRAGMENT_SRC.replace("textureSampler", "tex0");
        let pair = ShaderPair::builder().fragment_source(fragment).build();

        let mut checked = Vec::new();
        let err = pair.validate_with(|r| checked.push(r)).unwrap_err();

        assert_eq!(err.role(), BindingRole::TextureSamplerUniform);
        let vertex_checks = CHECK_ORDER
            .iter()
            .filter(|r| r.stage() == ShaderStage::Vertex)
            .count();
        assert_eq!(checked.len(), vertex_checks + 1);
    }

    #[test]
    fn test_empty_name_fails_for_every_role() {
        for role in BindingRole::ALL {
            let pair = ShaderPair::builder().name(role, "").build();
            assert_eq!(pair.validate(), Err(EmptyName { role }));
        }
    }

    #[test]
    fn test_identifier_mode_rejects_default_lighting() {
        // "lighting" only occurs inside "lightingWeighting" in the default source
        let pair = ShaderPair::builder()
            .match_mode(MatchMode::Identifier)
            .build();
        assert_eq!(
            pair.validate(),
            Err(MissingBinding {
                role: BindingRole::Lighting,
                stage: ShaderStage::Vertex
            })
        );

        let pair = ShaderPair::builder()
            .match_mode(MatchMode::Identifier)
            .name(BindingRole::Lighting, "lightingWeighting")
            .build();
        assert_eq!(pair.validate(), Ok(()));
    }

    #[test]
    fn test_bindings_follow_registry_order() {
        let pair = ShaderPair::new();
        let roles: Vec<_> = pair.bindings().map(|b| b.role).collect();
        assert_eq!(roles, BindingRole::ALL.to_vec());

        let sampler = pair
            .bindings()
            .find(|b| b.role == BindingRole::TextureSamplerUniform)
            .unwrap();
        assert_eq!(sampler.name, "textureSampler");
        assert_eq!(sampler.stage, ShaderStage::Fragment);
        assert_eq!(sampler.kind, BindingKind::Uniform);
    }

    #[test]
    fn test_pair_is_shareable_across_threads() {
        let pair = Arc::new(ShaderPair::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let pair = Arc::clone(&pair);
                thread::spawn(move || pair.validate())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok(()));
        }
    }
}
