//! # Carte Engine
//!
//! Rewrites a host application's context menu on every presentation:
//! entries are hidden, renamed, reordered and given fallback icons according
//! to a [`carte_config::MenuConfig`].
//!
//! ## Pipeline
//!
//! ```text
//! host menu event
//!     │
//!     ├──> InvocationContext::try_enter   (nested calls are no-ops)
//!     │
//!     ├──> ConfigStore::load              (re-read every call, default on failure)
//!     │
//!     ├──> EntrySnapshot::capture_all     (engine-owned copies)
//!     │
//!     ├──> transform
//!     │      ├─ match_snapshot   package-scoped rule, then unscoped rule
//!     │      ├─ stable sort      configured order, then original order
//!     │      ├─ filter           hidden titles, disabled rules
//!     │      ├─ rename           custom label
//!     │      └─ IconResolver     snapshot → app icon → glyph table → none
//!     │
//!     └──> write back             clear + add, per-attribute failures skipped
//! ```
//!
//! Matching is by display title, the only key the host exposes. A host that
//! localizes or renames an entry escapes its rule.
//!
//! Nothing here returns an error to the host: [`MenuCustomizer::customize`]
//! reports an [`Outcome`] and leaves the menu untouched when planning fails.

mod callback;
mod customizer;
mod error;
mod guard;
mod host;
mod icon;
mod matcher;
mod memory_menu;
mod snapshot;
mod trace;
mod transform;

pub use callback::{intercept, CustomizingCallback, Intercepted, MenuCallback, ModeKind, Rect};
pub use customizer::{MenuCustomizer, Outcome, SkipReason};
pub use error::{EngineError, Result};
pub use guard::{GuardState, GuardToken, InvocationContext};
pub use host::{
    Component, Destination, DisplayHint, EntryWriter, Glyph, Icon, LiveEntry, MenuSurface,
};
pub use icon::{fallback_glyph, IconProvider, IconResolver, InstalledApps, NoApplicationIcons};
pub use matcher::{match_rule, match_snapshot, RuleMatch};
pub use memory_menu::{MemoryEntry, MemoryMenu};
pub use snapshot::EntrySnapshot;
pub use trace::{
    FanoutTraceSink, LogTraceSink, MemoryTraceSink, NullTraceSink, TraceSink, TRACE_TARGET,
};
pub use transform::{plan, transform, RankedEntry, RenderedEntry};
