//! Ordering, filtering, renaming and icon assignment.
//!
//! ```text
//! snapshots ── rank (matcher) ── stable sort ── filter ── rename + icon ── RenderedEntry[]
//! ```

use crate::host::{Destination, DisplayHint, Icon};
use crate::icon::{IconProvider, IconResolver};
use crate::matcher::{match_snapshot, RuleMatch};
use crate::snapshot::EntrySnapshot;
use carte_config::MenuConfig;
use serde::Serialize;
use std::cmp::Ordering;

/// A snapshot paired with the rule that governs it, if any.
#[derive(Debug, Clone)]
pub struct RankedEntry<'a> {
    pub snapshot: EntrySnapshot,
    pub matched: Option<RuleMatch<'a>>,
}

impl RankedEntry<'_> {
    pub fn rank(&self) -> Option<usize> {
        self.matched.map(|m| m.rank)
    }

    /// Custom label of the matched rule, else the original title.
    pub fn display_title(&self) -> &str {
        self.matched
            .map(|m| m.rule.custom_label.as_str())
            .unwrap_or(&self.snapshot.title)
    }

    fn is_suppressed(&self, config: &MenuConfig) -> bool {
        config.is_hidden(&self.snapshot.title) || self.matched.is_some_and(|m| !m.rule.enabled)
    }
}

/// One entry of the final menu, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedEntry {
    pub group_id: i32,
    pub item_id: i32,
    /// 0-based index in the final menu.
    pub position: i32,
    pub title: String,
    pub original_title: String,
    pub icon: Option<Icon>,
    pub destination: Option<Destination>,
    pub package_name: Option<String>,
    pub visible: bool,
    pub enabled: bool,
    pub checkable: bool,
    pub checked: bool,
    pub display_hint: DisplayHint,
}

/// Configured entries first in rule order, then the rest in their original
/// order.
fn display_order(a: &RankedEntry<'_>, b: &RankedEntry<'_>) -> Ordering {
    match (a.rank(), b.rank()) {
        (Some(a_rank), Some(b_rank)) => a_rank.cmp(&b_rank),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.snapshot.original_order.cmp(&b.snapshot.original_order),
    }
}

/// Rank, sort and filter. Sorting is stable: entries that compare equal
/// keep their input order.
pub fn plan(snapshots: Vec<EntrySnapshot>, config: &MenuConfig) -> Vec<RankedEntry<'_>> {
    let mut ranked: Vec<RankedEntry<'_>> = snapshots
        .into_iter()
        .map(|snapshot| {
            let matched = match_snapshot(&snapshot, config);
            RankedEntry { snapshot, matched }
        })
        .collect();

    ranked.sort_by(display_order);
    ranked.retain(|entry| !entry.is_suppressed(config));
    ranked
}

/// Full transform: [`plan`], then rename, resolve icons and number the
/// survivors.
pub fn transform<P: IconProvider>(
    snapshots: Vec<EntrySnapshot>,
    config: &MenuConfig,
    icons: &IconResolver<P>,
) -> Vec<RenderedEntry> {
    plan(snapshots, config)
        .into_iter()
        .enumerate()
        .map(|(position, entry)| {
            let title = entry.display_title().to_string();
            let snapshot = entry.snapshot;
            let icon = icons.resolve(
                &snapshot.title,
                snapshot.icon.as_ref(),
                snapshot.package_name.as_deref(),
            );

            RenderedEntry {
                group_id: snapshot.group_id,
                item_id: snapshot.item_id,
                position: position as i32,
                title,
                original_title: snapshot.title,
                icon,
                destination: snapshot.destination,
                package_name: snapshot.package_name,
                visible: snapshot.visible,
                enabled: snapshot.enabled,
                checkable: snapshot.checkable,
                checked: snapshot.checked,
                display_hint: snapshot.display_hint,
            }
        })
        .collect()
}
