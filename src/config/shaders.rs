use crate::assets::shaders::load_source;
use crate::render::binding::BindingRole;
use crate::render::shaders::ShaderPair;
use crate::render::validation::MatchMode;
use crate::utils::error::{Result, ShaderError};
use anyhow::Context;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Overrides for a [`ShaderPair`], as stored in a TOML file.
///
/// ```toml
/// vertex_path = "basic.vert"
/// match_mode = "identifier"
///
/// [bindings]
/// position = "aPos"
/// texture_sampler_uniform = "tex0"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShaderConfig {
    pub vertex_path: Option<PathBuf>,
    pub fragment_path: Option<PathBuf>,
    // Inline text wins over the matching path.
    pub vertex_source: Option<String>,
    pub fragment_source: Option<String>,
    pub match_mode: MatchMode,
    pub bindings: BTreeMap<BindingRole, String>,
}

impl ShaderConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ShaderError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ShaderError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read shader config {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse shader config {}", path.display()))?;
        info!("Loaded shader config from {}", path.display());
        Ok(config)
    }

    /// Builds the pair, resolving source paths against `base_dir`.
    pub fn build_pair(&self, base_dir: &Path) -> Result<ShaderPair> {
        let mut builder = ShaderPair::builder().match_mode(self.match_mode);

        if let Some(source) = stage_source(&self.vertex_source, &self.vertex_path, base_dir)? {
            builder = builder.vertex_source(source);
        }
        if let Some(source) = stage_source(&self.fragment_source, &self.fragment_path, base_dir)? {
            builder = builder.fragment_source(source);
        }

        for (&role, name) in &self.bindings {
            if name.is_empty() {
                warn!("Shader config sets an empty name for the {}", role);
            }
            builder = builder.name(role, name.clone());
        }

        Ok(builder.build())
    }
}

fn stage_source(
    inline: &Option<String>,
    path: &Option<PathBuf>,
    base_dir: &Path,
) -> Result<Option<String>> {
    match (inline, path) {
        (Some(source), _) => Ok(Some(source.clone())),
        (None, Some(path)) => load_source(&base_dir.join(path)).map(Some),
        (None, None) => Ok(None),
    }
}

impl ShaderPair {
    pub fn from_config(config: &ShaderConfig, base_dir: impl AsRef<Path>) -> Result<Self> {
        config.build_pair(base_dir.as_ref())
    }
}

/// Loads a config file, builds its pair and validates it.
pub fn load_shader_pair(path: impl AsRef<Path>) -> anyhow::Result<ShaderPair> {
    let path = path.as_ref();
    let config = ShaderConfig::load(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    let pair = ShaderPair::from_config(&config, base_dir)
        .with_context(|| format!("Failed to build shader pair from {}", path.display()))?;
    pair.validate()
        .with_context(|| format!("Shader pair from {} is inconsistent", path.display()))?;
    Ok(pair)
}
