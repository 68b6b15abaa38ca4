use crate::host::{Destination, DisplayHint, Icon, LiveEntry, MenuSurface};

/// Engine-owned copy of one live entry, taken at interception time.
///
/// Never aliases the host entry, so the host clearing or mutating its menu
/// mid-transform cannot change what the engine sees.
#[derive(Debug, Clone, PartialEq)]
pub struct EntrySnapshot {
    pub group_id: i32,
    pub item_id: i32,
    pub original_order: i32,
    pub title: String,
    pub icon: Option<Icon>,
    pub destination: Option<Destination>,
    pub package_name: Option<String>,
    pub visible: bool,
    pub enabled: bool,
    pub checkable: bool,
    pub checked: bool,
    pub display_hint: DisplayHint,
}

impl EntrySnapshot {
    /// Read every attribute; optional ones that the host cannot provide take
    /// their typed default.
    pub fn capture<E: LiveEntry + ?Sized>(entry: &E) -> Self {
        let title = entry.title().unwrap_or_default();

        let icon = entry.icon().unwrap_or_else(|err| {
            log::debug!("Snapshot of '{title}': {err}; no icon");
            None
        });
        let destination = entry.destination().unwrap_or_else(|err| {
            log::debug!("Snapshot of '{title}': {err}; no destination");
            None
        });
        let display_hint = entry.display_hint().unwrap_or_else(|err| {
            log::debug!("Snapshot of '{title}': {err}; assuming show-if-room");
            DisplayHint::IF_ROOM
        });
        let package_name = destination
            .as_ref()
            .and_then(Destination::package_name)
            .map(str::to_string);

        Self {
            group_id: entry.group_id(),
            item_id: entry.item_id(),
            original_order: entry.order(),
            title,
            icon,
            destination,
            package_name,
            visible: entry.is_visible(),
            enabled: entry.is_enabled(),
            checkable: entry.is_checkable(),
            checked: entry.is_checked(),
            display_hint,
        }
    }

    /// Snapshot the whole menu in its current order.
    pub fn capture_all<M: MenuSurface + ?Sized>(menu: &M) -> Vec<Self> {
        (0..menu.len())
            .filter_map(|idx| menu.entry(idx))
            .map(|entry| Self::capture(entry))
            .collect()
    }

    /// Package name, or `internal` for entries handled by the host itself.
    pub fn origin(&self) -> &str {
        self.package_name.as_deref().unwrap_or("internal")
    }
}
