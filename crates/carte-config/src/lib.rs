//! # Carte Config
//!
//! The user-authored description of how a context menu should look.
//!
//! ## Shape
//!
//! ```text
//! MenuConfig
//!     ├─ items        ordered ItemRule list (display order, first match wins)
//!     ├─ hiddenItems  titles that are always suppressed
//!     └─ isDebug      gates trace emission in the engine
//! ```
//!
//! Configurations are persisted as JSON by a [`ConfigStore`]. Loading never
//! fails from the caller's point of view: a missing, blank or corrupt blob
//! yields [`MenuConfig::builtin`].
//!
//! ## Example
//!
//! ```
//! use carte_config::{ConfigStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let config = store.load();
//! assert!(config.is_hidden("Define"));
//! ```

mod defaults;
mod error;
mod model;
mod store;

pub use error::{ConfigError, Result};
pub use model::{ItemRule, MenuConfig};
pub use store::{decode_config, encode_config, ConfigStore, JsonFileStore, MemoryStore};
