use crate::error::{EngineError, Result};
use crate::host::{Glyph, Icon};
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Well-known host labels (English and Chinese builds) and their glyph.
static FALLBACK_GLYPHS: Lazy<HashMap<&'static str, Glyph>> = Lazy::new(|| {
    HashMap::from([
        ("Copy", Glyph::Save),
        ("复制", Glyph::Save),
        ("Share", Glyph::Share),
        ("分享", Glyph::Share),
        ("Select all", Glyph::Agenda),
        ("全选", Glyph::Agenda),
        ("Web search", Glyph::Search),
        ("搜索", Glyph::Search),
    ])
});

/// Glyph for a host label, keyed by the entry's original title.
pub fn fallback_glyph(title: &str) -> Option<Glyph> {
    FALLBACK_GLYPHS.get(title).copied()
}

/// Platform icon lookups.
pub trait IconProvider {
    /// Launcher icon of an installed package; fails for unknown packages.
    fn application_icon(&self, package: &str) -> Result<Icon>;

    fn glyph(&self, glyph: Glyph) -> Option<Icon> {
        Some(Icon::Glyph(glyph))
    }
}

impl<P: IconProvider + ?Sized> IconProvider for &P {
    fn application_icon(&self, package: &str) -> Result<Icon> {
        (**self).application_icon(package)
    }

    fn glyph(&self, glyph: Glyph) -> Option<Icon> {
        (**self).glyph(glyph)
    }
}

/// Provider for hosts without a package manager.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoApplicationIcons;

impl IconProvider for NoApplicationIcons {
    fn application_icon(&self, package: &str) -> Result<Icon> {
        Err(EngineError::IconLookup {
            package: package.to_string(),
            reason: "application icons unavailable".to_string(),
        })
    }
}

/// Provider backed by a fixed set of installed packages.
#[derive(Debug, Clone, Default)]
pub struct InstalledApps {
    packages: HashSet<String>,
}

impl InstalledApps {
    pub fn new<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            packages: packages.into_iter().map(Into::into).collect(),
        }
    }
}

impl IconProvider for InstalledApps {
    fn application_icon(&self, package: &str) -> Result<Icon> {
        if self.packages.contains(package) {
            Ok(Icon::Application(package.to_string()))
        } else {
            Err(EngineError::IconLookup {
                package: package.to_string(),
                reason: "package not installed".to_string(),
            })
        }
    }
}

/// Picks an icon for each rendered entry. Never fails: every step that
/// cannot produce an icon hands over to the next one.
#[derive(Debug, Clone, Default)]
pub struct IconResolver<P> {
    provider: P,
}

impl<P: IconProvider> IconResolver<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Snapshot icon, then application icon, then the glyph table (by
    /// `original_title`), then nothing.
    pub fn resolve(
        &self,
        original_title: &str,
        snapshot_icon: Option<&Icon>,
        package: Option<&str>,
    ) -> Option<Icon> {
        if let Some(icon) = snapshot_icon {
            return Some(icon.clone());
        }

        if let Some(package) = package {
            match self.application_icon(package) {
                Ok(icon) => return Some(icon),
                Err(err) => log::debug!("'{original_title}': {err}"),
            }
        }

        fallback_glyph(original_title).and_then(|glyph| self.glyph(original_title, glyph))
    }

    // Host lookups may panic on some platforms; treat that like a miss.
    fn application_icon(&self, package: &str) -> Result<Icon> {
        catch_unwind(AssertUnwindSafe(|| self.provider.application_icon(package))).unwrap_or_else(
            |_| {
                Err(EngineError::IconLookup {
                    package: package.to_string(),
                    reason: "provider panicked".to_string(),
                })
            },
        )
    }

    fn glyph(&self, original_title: &str, glyph: Glyph) -> Option<Icon> {
        catch_unwind(AssertUnwindSafe(|| self.provider.glyph(glyph))).unwrap_or_else(|_| {
            log::debug!("'{original_title}': glyph {} lookup panicked", glyph.resource_name());
            None
        })
    }
}
