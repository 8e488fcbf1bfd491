use crate::render::shaders::{ShaderPair, ShaderPairBuilder};
use crate::utils::error::Result;
use log::debug;
use std::fs;
use std::path::Path;

/// Raw vertex and fragment source text, usually read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex_source: String,
    pub fragment_source: String,
}

impl ShaderSource {
    pub fn new(vertex: &str, fragment: &str) -> Self {
        Self {
            vertex_source: vertex.to_string(),
            fragment_source: fragment.to_string(),
        }
    }

    pub fn from_files(vertex_path: impl AsRef<Path>, fragment_path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            vertex_source: load_source(vertex_path.as_ref())?,
            fragment_source: load_source(fragment_path.as_ref())?,
        })
    }

    /// Starts a builder with both sources set, names left at their defaults.
    pub fn into_builder(self) -> ShaderPairBuilder {
        ShaderPair::builder()
            .vertex_source(self.vertex_source)
            .fragment_source(self.fragment_source)
    }
}

pub fn load_source(path: &Path) -> Result<String> {
    let source = fs::read_to_string(path)?;
    debug!("Loaded shader source {} ({} bytes)", path.display(), source.len());
    Ok(source)
}
