//! Settings editor: read-modify-write of the stored configuration.

use anyhow::{Context, Result};
use carte_config::{
    decode_config, encode_config, ConfigError, ConfigStore, ItemRule, JsonFileStore, MenuConfig,
};
use std::fs;
use std::path::Path;

pub fn print_default() -> Result<()> {
    println!("{}", encode_config(&MenuConfig::builtin())?);
    Ok(())
}

pub fn validate(file: &Path) -> Result<()> {
    let raw = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let config = decode_config(&raw)
        .with_context(|| format!("{} is not a usable menu configuration", file.display()))?;

    println!(
        "{}: {} rules, {} hidden items, debug {}",
        file.display(),
        config.items.len(),
        config.hidden_items.len(),
        if config.debug { "on" } else { "off" }
    );
    Ok(())
}

pub fn show(path: &Path) -> Result<()> {
    let config = JsonFileStore::new(path).load();
    println!("{}", encode_config(&config)?);
    Ok(())
}

/// Stored configuration to edit. A missing file starts from the built-in
/// default; a corrupt one is an error rather than being overwritten.
fn load_for_edit(store: &JsonFileStore) -> Result<MenuConfig> {
    match store.try_load() {
        Ok(config) => Ok(config),
        Err(ConfigError::Missing) => Ok(MenuConfig::builtin()),
        Err(err) => Err(err).with_context(|| {
            format!(
                "Refusing to edit {}; fix or remove it first",
                store.path().display()
            )
        }),
    }
}

fn edit(path: &Path, change: impl FnOnce(&mut MenuConfig) -> String) -> Result<()> {
    let store = JsonFileStore::new(path);
    let mut config = load_for_edit(&store)?;
    let summary = change(&mut config);
    store
        .save(&config)
        .with_context(|| format!("Failed to save {}", path.display()))?;
    log::info!("{summary}");
    Ok(())
}

pub fn hide(path: &Path, title: &str) -> Result<()> {
    edit(path, |config| {
        if config.hide(title) {
            format!("Hiding '{title}'")
        } else {
            format!("'{title}' was already hidden")
        }
    })
}

pub fn unhide(path: &Path, title: &str) -> Result<()> {
    edit(path, |config| {
        if config.unhide(title) {
            format!("No longer hiding '{title}'")
        } else {
            format!("'{title}' was not hidden")
        }
    })
}

pub fn add_rule(
    path: &Path,
    key: String,
    label: String,
    package: Option<String>,
    disabled: bool,
) -> Result<()> {
    let mut rule = ItemRule::new(key, label);
    rule.package_name = package;
    rule.enabled = !disabled;

    edit(path, |config| {
        let summary = format!(
            "Rule '{}' -> '{}'{}",
            rule.key,
            rule.custom_label,
            rule.package_name
                .as_deref()
                .map(|p| format!(" in {p}"))
                .unwrap_or_default()
        );
        config.upsert_rule(rule);
        summary
    })
}

pub fn remove_rule(path: &Path, key: &str, package: Option<&str>) -> Result<()> {
    edit(path, |config| {
        let removed = config.remove_rule(key, package);
        format!("Removed {removed} rule(s) for '{key}'")
    })
}

pub fn set_debug(path: &Path, on: bool) -> Result<()> {
    edit(path, |config| {
        config.debug = on;
        format!("Trace output {}", if on { "on" } else { "off" })
    })
}
