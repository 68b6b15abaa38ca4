//! Seams to the host application's menu.
//!
//! The host owns the live entries; the engine only reads them through
//! [`LiveEntry`], then rebuilds the collection through [`MenuSurface`].
//! Optional attributes are capability queries returning `Result`, because
//! not every host version exposes them.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Built-in platform glyphs used when nothing better is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Glyph {
    Save,
    Share,
    Agenda,
    Search,
}

impl Glyph {
    /// Platform resource name of the glyph.
    pub fn resource_name(self) -> &'static str {
        match self {
            Glyph::Save => "ic_menu_save",
            Glyph::Share => "ic_menu_share",
            Glyph::Agenda => "ic_menu_agenda",
            Glyph::Search => "ic_menu_search",
        }
    }
}

/// Image attached to an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Icon {
    /// Opaque handle supplied by the host; passed back untouched.
    Handle(String),
    /// Registered launcher icon of an installed package.
    Application(String),
    Glyph(Glyph),
}

/// Explicit target of a destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub package: String,
    pub class: String,
}

/// What selecting an entry launches. Opaque to the engine apart from the
/// package it resolves to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub component: Option<Component>,
    #[serde(default)]
    pub data: Option<String>,
}

impl Destination {
    pub fn for_component(package: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            component: Some(Component {
                package: package.into(),
                class: class.into(),
            }),
            ..Self::default()
        }
    }

    pub fn for_action(action: impl Into<String>) -> Self {
        Self {
            action: Some(action.into()),
            ..Self::default()
        }
    }

    pub fn package_name(&self) -> Option<&str> {
        self.component.as_ref().map(|c| c.package.as_str())
    }
}

/// How the host renders an entry in its action bar. Echoed back verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayHint(pub i32);

impl DisplayHint {
    pub const NEVER: Self = Self(0);
    pub const IF_ROOM: Self = Self(1);
    pub const ALWAYS: Self = Self(2);
    pub const WITH_TEXT: Self = Self(4);
    pub const COLLAPSE_ACTION_VIEW: Self = Self(8);
}

impl Default for DisplayHint {
    fn default() -> Self {
        Self::IF_ROOM
    }
}

/// Read access to one live host entry.
pub trait LiveEntry {
    fn group_id(&self) -> i32;
    fn item_id(&self) -> i32;
    fn order(&self) -> i32;
    fn title(&self) -> Option<String>;
    fn icon(&self) -> Result<Option<Icon>>;
    fn destination(&self) -> Result<Option<Destination>>;
    fn is_visible(&self) -> bool;
    fn is_enabled(&self) -> bool;
    fn is_checkable(&self) -> bool;
    fn is_checked(&self) -> bool;
    fn display_hint(&self) -> Result<DisplayHint>;
}

/// Write access to a freshly added host entry. Each write may be refused
/// independently of the others.
pub trait EntryWriter {
    fn set_icon(&mut self, icon: Icon) -> Result<()>;
    fn set_destination(&mut self, destination: Destination) -> Result<()>;
    fn set_visible(&mut self, visible: bool) -> Result<()>;
    fn set_enabled(&mut self, enabled: bool) -> Result<()>;
    fn set_checkable(&mut self, checkable: bool) -> Result<()>;
    fn set_checked(&mut self, checked: bool) -> Result<()>;
    fn set_display_hint(&mut self, hint: DisplayHint) -> Result<()>;
}

/// The ordered, mutable entry collection of one menu.
pub trait MenuSurface {
    type Entry: LiveEntry + EntryWriter;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry(&self, index: usize) -> Option<&Self::Entry>;

    fn clear(&mut self);

    /// Append an entry at display `position` and hand it back for attribute
    /// writes.
    fn add(
        &mut self,
        group_id: i32,
        item_id: i32,
        position: i32,
        title: &str,
    ) -> Result<&mut Self::Entry>;
}
