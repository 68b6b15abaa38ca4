//! Simulated host: feed a menu fixture through the engine.

use anyhow::{Context, Result};
use carte_config::JsonFileStore;
use carte_engine::{
    Icon, InstalledApps, InvocationContext, LogTraceSink, MemoryMenu, MenuCustomizer, Outcome,
    SkipReason,
};
use clap::Args;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct ApplyArgs {
    /// Menu fixture (JSON: {"entries": [...]})
    #[arg(long)]
    pub menu: PathBuf,

    /// Package treated as installed for application icons (repeatable)
    #[arg(long = "installed", value_name = "PACKAGE")]
    pub installed: Vec<String>,

    /// Print the resulting menu as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ApplyOutput<'a> {
    outcome: &'static str,
    menu: &'a MemoryMenu,
}

fn outcome_label(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Applied { .. } => "applied",
        Outcome::Skipped(SkipReason::EmptyMenu) => "empty",
        Outcome::Skipped(SkipReason::Reentrant) => "reentrant",
        Outcome::Aborted(_) => "aborted",
    }
}

fn icon_label(icon: &Icon) -> String {
    match icon {
        Icon::Handle(handle) => format!("host:{handle}"),
        Icon::Application(package) => format!("app:{package}"),
        Icon::Glyph(glyph) => glyph.resource_name().to_string(),
    }
}

fn read_menu(path: &Path) -> Result<MemoryMenu> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read menu fixture {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Menu fixture {} is malformed", path.display()))
}

pub fn run(config_path: &Path, args: ApplyArgs) -> Result<()> {
    let mut menu = read_menu(&args.menu)?;

    let customizer = MenuCustomizer::new(
        JsonFileStore::new(config_path),
        InstalledApps::new(args.installed),
        LogTraceSink,
    );
    let outcome = customizer.customize(&InvocationContext::new(), &mut menu);

    match &outcome {
        Outcome::Applied {
            kept,
            dropped,
            failed_writes,
        } => log::info!("Kept {kept} entries, dropped {dropped}, {failed_writes} refused writes"),
        Outcome::Skipped(reason) => log::info!("Menu left as is ({reason:?})"),
        Outcome::Aborted(err) => log::warn!("Menu left as is: {err}"),
    }

    if args.json {
        let output = ApplyOutput {
            outcome: outcome_label(&outcome),
            menu: &menu,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for (idx, entry) in menu.entries.iter().enumerate() {
        let icon = entry
            .icon
            .as_ref()
            .map(|icon| format!("  [{}]", icon_label(icon)))
            .unwrap_or_default();
        println!("{idx}. {}{icon}", entry.title_str());
    }
    Ok(())
}
