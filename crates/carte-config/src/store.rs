use crate::error::{ConfigError, Result};
use crate::model::MenuConfig;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Decode a stored blob. Blank input counts as "nothing stored".
pub fn decode_config(raw: &str) -> Result<MenuConfig> {
    if raw.trim().is_empty() {
        return Err(ConfigError::Missing);
    }
    let config: MenuConfig = serde_json::from_str(raw)?;
    config.validate()?;
    Ok(config)
}

pub fn encode_config(config: &MenuConfig) -> Result<String> {
    Ok(serde_json::to_string_pretty(config)?)
}

/// Where configurations live between menu presentations.
///
/// The engine only ever calls [`ConfigStore::load`], once per transform, so
/// edits made through `save` show up on the next menu without any cache
/// invalidation.
pub trait ConfigStore {
    /// Read the stored configuration, reporting why it is unusable.
    fn try_load(&self) -> Result<MenuConfig>;

    fn save(&self, config: &MenuConfig) -> Result<()>;

    /// Read the stored configuration, falling back to [`MenuConfig::builtin`].
    fn load(&self) -> MenuConfig {
        match self.try_load() {
            Ok(config) => config,
            Err(ConfigError::Missing) => {
                log::debug!("No stored menu configuration, using built-in default");
                MenuConfig::builtin()
            }
            Err(err) => {
                log::warn!("Stored menu configuration unusable ({err}), using built-in default");
                MenuConfig::builtin()
            }
        }
    }
}

impl<S: ConfigStore + ?Sized> ConfigStore for &S {
    fn try_load(&self) -> Result<MenuConfig> {
        (**self).try_load()
    }

    fn save(&self, config: &MenuConfig) -> Result<()> {
        (**self).save(config)
    }
}

/// Keeps the serialized blob in memory, the way a preferences key would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already-serialized blob (possibly corrupt).
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
        }
    }

    pub fn blob(&self) -> Option<String> {
        self.blob
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl ConfigStore for MemoryStore {
    fn try_load(&self) -> Result<MenuConfig> {
        match self.blob() {
            Some(raw) => decode_config(&raw),
            None => Err(ConfigError::Missing),
        }
    }

    fn save(&self, config: &MenuConfig) -> Result<()> {
        let raw = encode_config(config)?;
        *self
            .blob
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(raw);
        Ok(())
    }
}

/// A JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for JsonFileStore {
    fn try_load(&self) -> Result<MenuConfig> {
        if !self.path.exists() {
            return Err(ConfigError::Missing);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        decode_config(&raw)
    }

    fn save(&self, config: &MenuConfig) -> Result<()> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let raw = encode_config(config)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, raw)?;
        std::fs::rename(&tmp, &self.path)?;
        log::debug!("Saved menu configuration to {}", self.path.display());
        Ok(())
    }
}
