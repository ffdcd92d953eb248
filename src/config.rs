//! Registry configuration.
//!
//! Server-defined types (domains, extension types) often share a built-in
//! type's wire grammar. A TOML file maps their oids onto a built-in base:
//!
//! ```toml
//! [[types]]
//! oid = 16401
//! name = "positive_int"
//! like = "int4"
//! format = "text"   # optional, defaults to the base type's preferred format
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::{RegistryError, TypeRegistry, builtins};
use crate::protocol::{Oid, WireFormat, name_to_oid};

/// Errors raised while loading or applying a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("type '{name}' (oid {oid}): unknown base type '{like}'")]
    UnknownBaseType { oid: Oid, name: String, like: String },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Extra types layered on top of the built-ins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub types: Vec<TypeAlias>,
}

/// One server type reusing a built-in codec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAlias {
    pub oid: Oid,
    pub name: String,
    /// Built-in type name (or SQL alias such as `integer`).
    pub like: String,
    #[serde(default)]
    pub format: Option<WireFormat>,
}

impl RegistryConfig {
    /// Parse from a TOML string.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        tracing::info!(path = %path.display(), types = config.types.len(), "Loaded type config");
        Ok(config)
    }

    /// `<config_dir>/pgtc/types.toml`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pgtc").join("types.toml"))
    }

    /// Load the default file if it exists; empty config otherwise.
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

impl TypeRegistry {
    /// Built-ins plus every alias in `config`. Later aliases replace
    /// earlier ones (and built-ins) with the same oid.
    pub fn from_config(config: &RegistryConfig) -> Result<Self, ConfigError> {
        let mut registry = Self::with_builtins();
        for alias in &config.types {
            let base = name_to_oid(&alias.like).ok_or_else(|| unknown(alias))?;
            let transcoder = match alias.format {
                Some(format) => builtins::transcoder_with_format(base, format),
                None => builtins::transcoder(base),
            }
            .ok_or_else(|| unknown(alias))?
            .renamed(alias.name.clone());

            tracing::debug!(oid = alias.oid, name = %alias.name, like = %alias.like, "Registering type alias");
            registry.register(alias.oid, transcoder)?;
        }
        Ok(registry)
    }
}

fn unknown(alias: &TypeAlias) -> ConfigError {
    ConfigError::UnknownBaseType {
        oid: alias.oid,
        name: alias.name.clone(),
        like: alias.like.clone(),
    }
}
