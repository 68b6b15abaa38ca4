//! In-memory [`MenuSurface`] used by the `carte` simulated host and tests.

use crate::error::{EngineError, Result};
use crate::host::{Destination, DisplayHint, EntryWriter, Icon, LiveEntry, MenuSurface};
use serde::{Deserialize, Serialize};

fn yes() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryEntry {
    #[serde(default)]
    pub group_id: i32,
    #[serde(default)]
    pub item_id: i32,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub icon: Option<Icon>,
    #[serde(default)]
    pub destination: Option<Destination>,
    #[serde(default = "yes")]
    pub visible: bool,
    #[serde(default = "yes")]
    pub enabled: bool,
    #[serde(default)]
    pub checkable: bool,
    #[serde(default)]
    pub checked: bool,
    /// `None` models a host that does not expose the hint.
    #[serde(default)]
    pub display_hint: Option<DisplayHint>,

    #[serde(skip)]
    unsupported_hints: Vec<DisplayHint>,
}

impl MemoryEntry {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            group_id: 0,
            item_id: 0,
            order: 0,
            title: Some(title.into()),
            icon: None,
            destination: None,
            visible: true,
            enabled: true,
            checkable: false,
            checked: false,
            display_hint: Some(DisplayHint::IF_ROOM),
            unsupported_hints: Vec::new(),
        }
    }

    pub fn with_ids(mut self, group_id: i32, item_id: i32, order: i32) -> Self {
        self.group_id = group_id;
        self.item_id = item_id;
        self.order = order;
        self
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_destination(mut self, destination: Destination) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn with_display_hint(mut self, hint: Option<DisplayHint>) -> Self {
        self.display_hint = hint;
        self
    }

    pub fn title_str(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}

impl LiveEntry for MemoryEntry {
    fn group_id(&self) -> i32 {
        self.group_id
    }

    fn item_id(&self) -> i32 {
        self.item_id
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn title(&self) -> Option<String> {
        self.title.clone()
    }

    fn icon(&self) -> Result<Option<Icon>> {
        Ok(self.icon.clone())
    }

    fn destination(&self) -> Result<Option<Destination>> {
        Ok(self.destination.clone())
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn is_checkable(&self) -> bool {
        self.checkable
    }

    fn is_checked(&self) -> bool {
        self.checked
    }

    fn display_hint(&self) -> Result<DisplayHint> {
        self.display_hint
            .ok_or_else(|| EngineError::AttributeUnreadable {
                attribute: "display_hint",
                reason: "not exposed by this host".to_string(),
            })
    }
}

impl EntryWriter for MemoryEntry {
    fn set_icon(&mut self, icon: Icon) -> Result<()> {
        self.icon = Some(icon);
        Ok(())
    }

    fn set_destination(&mut self, destination: Destination) -> Result<()> {
        self.destination = Some(destination);
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) -> Result<()> {
        self.visible = visible;
        Ok(())
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        self.enabled = enabled;
        Ok(())
    }

    fn set_checkable(&mut self, checkable: bool) -> Result<()> {
        self.checkable = checkable;
        Ok(())
    }

    fn set_checked(&mut self, checked: bool) -> Result<()> {
        self.checked = checked;
        Ok(())
    }

    fn set_display_hint(&mut self, hint: DisplayHint) -> Result<()> {
        if self.unsupported_hints.contains(&hint) {
            return Err(EngineError::RenderWrite {
                attribute: "display_hint",
                title: self.title_str().to_string(),
                reason: format!("hint {} unsupported", hint.0),
            });
        }
        self.display_hint = Some(hint);
        Ok(())
    }
}

/// Menu fixture: `{"entries": [...], "unsupportedHints": [..]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryMenu {
    #[serde(default)]
    pub entries: Vec<MemoryEntry>,

    /// Hints the host refuses on write.
    #[serde(default)]
    pub unsupported_hints: Vec<DisplayHint>,
}

impl MemoryMenu {
    pub fn new(entries: Vec<MemoryEntry>) -> Self {
        Self {
            entries,
            unsupported_hints: Vec::new(),
        }
    }

    /// One plain entry per title, ids and order following the slice.
    pub fn from_titles(titles: &[&str]) -> Self {
        let entries = titles
            .iter()
            .enumerate()
            .map(|(idx, title)| {
                let idx = idx as i32;
                MemoryEntry::new(*title).with_ids(0, idx + 1, idx)
            })
            .collect();
        Self::new(entries)
    }

    pub fn titles(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.title_str().to_string())
            .collect()
    }

    pub fn find(&self, title: &str) -> Option<&MemoryEntry> {
        self.entries.iter().find(|entry| entry.title_str() == title)
    }
}

impl MenuSurface for MemoryMenu {
    type Entry = MemoryEntry;

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn entry(&self, index: usize) -> Option<&MemoryEntry> {
        self.entries.get(index)
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn add(
        &mut self,
        group_id: i32,
        item_id: i32,
        position: i32,
        title: &str,
    ) -> Result<&mut MemoryEntry> {
        let mut entry = MemoryEntry::new(title).with_ids(group_id, item_id, position);
        entry.unsupported_hints = self.unsupported_hints.clone();
        self.entries.push(entry);
        self.entries
            .last_mut()
            .ok_or_else(|| EngineError::Other("entry vanished after insert".to_string()))
    }
}
