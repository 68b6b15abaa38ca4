use crate::error::EngineError;
use crate::guard::InvocationContext;
use crate::host::{EntryWriter, LiveEntry, MenuSurface};
use crate::icon::{IconProvider, IconResolver};
use crate::snapshot::EntrySnapshot;
use crate::trace::{TraceSink, Tracer};
use crate::transform::{transform, RenderedEntry};
use carte_config::{ConfigStore, MenuConfig};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Why a call left the menu alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Another call is already running on this context.
    Reentrant,
    EmptyMenu,
}

/// Result of one [`MenuCustomizer::customize`] call. Never an error: the host
/// keeps a working menu whatever happens.
#[derive(Debug)]
pub enum Outcome {
    Applied {
        /// Entries written back.
        kept: usize,
        /// Entries hidden or disabled by the configuration.
        dropped: usize,
        /// Entries or attributes the host refused.
        failed_writes: usize,
    },
    Skipped(SkipReason),
    /// Planning failed; the menu was not touched (or was restored).
    Aborted(EngineError),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied { .. })
    }
}

/// The menu-transformation engine.
///
/// Holds only read-only collaborators, so one customizer can serve every
/// host thread; each thread passes its own [`InvocationContext`].
pub struct MenuCustomizer<S, P, T> {
    store: S,
    icons: IconResolver<P>,
    trace: T,
}

impl<S, P, T> MenuCustomizer<S, P, T>
where
    S: ConfigStore,
    P: IconProvider,
    T: TraceSink,
{
    pub fn new(store: S, icons: P, trace: T) -> Self {
        Self {
            store,
            icons: IconResolver::new(icons),
            trace,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn trace_sink(&self) -> &T {
        &self.trace
    }

    /// Emit a trace line if the current configuration has debug enabled.
    pub fn trace(&self, message: impl FnOnce() -> String) {
        let debug = self.load_config().debug;
        Tracer::new(&self.trace, debug).emit(message);
    }

    fn load_config(&self) -> MenuConfig {
        catch_unwind(AssertUnwindSafe(|| self.store.load())).unwrap_or_else(|payload| {
            log::warn!(
                "Configuration store panicked ({}), using built-in default",
                panic_message(payload.as_ref())
            );
            MenuConfig::builtin()
        })
    }

    /// Rewrite `menu` according to the stored configuration.
    pub fn customize<M: MenuSurface>(&self, ctx: &InvocationContext, menu: &mut M) -> Outcome {
        let Some(_token) = ctx.try_enter() else {
            log::debug!("Menu customization already in progress, skipping nested call");
            return Outcome::Skipped(SkipReason::Reentrant);
        };

        if menu.is_empty() {
            return Outcome::Skipped(SkipReason::EmptyMenu);
        }

        let config = self.load_config();
        let tracer = Tracer::new(&self.trace, config.debug);

        let planned = catch_unwind(AssertUnwindSafe(|| {
            let snapshots = EntrySnapshot::capture_all(&*menu);
            tracer.emit(|| {
                let lines: Vec<String> = snapshots
                    .iter()
                    .map(|s| format!("- {} [{}]", s.title, s.origin()))
                    .collect();
                format!("Before:\n{}", lines.join("\n"))
            });
            let rendered = transform(snapshots.clone(), &config, &self.icons);
            (snapshots, rendered)
        }));

        let (snapshots, rendered) = match planned {
            Ok(planned) => planned,
            Err(payload) => {
                let err = EngineError::TransformFault(panic_message(payload.as_ref()));
                log::warn!("Menu left untouched: {err}");
                tracer.emit(|| format!("Error: {err}"));
                return Outcome::Aborted(err);
            }
        };

        let written = catch_unwind(AssertUnwindSafe(|| write_back(menu, &rendered, &tracer)));
        match written {
            Ok(failed_writes) => {
                tracer.emit(|| format!("After: [{}]", current_titles(&*menu).join(", ")));
                Outcome::Applied {
                    kept: rendered.len(),
                    dropped: snapshots.len() - rendered.len(),
                    failed_writes,
                }
            }
            Err(payload) => {
                let err = EngineError::TransformFault(panic_message(payload.as_ref()));
                log::warn!("Write-back failed ({err}), restoring original menu");
                tracer.emit(|| format!("Error: {err}"));
                restore(menu, &snapshots);
                Outcome::Aborted(err)
            }
        }
    }
}

/// Clear `menu` and repopulate it. Returns how many writes the host refused.
fn write_back<M: MenuSurface + ?Sized>(
    menu: &mut M,
    rendered: &[RenderedEntry],
    tracer: &Tracer<'_>,
) -> usize {
    menu.clear();

    let mut failed = 0;
    for entry in rendered {
        match menu.add(entry.group_id, entry.item_id, entry.position, &entry.title) {
            Ok(live) => failed += apply_attributes(live, entry, tracer),
            Err(err) => {
                log::warn!("Host refused entry '{}': {err}", entry.title);
                tracer.emit(|| format!("Skipped '{}': {err}", entry.title));
                failed += 1;
            }
        }
    }
    failed
}

fn apply_attributes<E: EntryWriter + ?Sized>(
    live: &mut E,
    entry: &RenderedEntry,
    tracer: &Tracer<'_>,
) -> usize {
    let mut results = Vec::with_capacity(7);
    if let Some(icon) = &entry.icon {
        results.push(live.set_icon(icon.clone()));
    }
    if let Some(destination) = &entry.destination {
        results.push(live.set_destination(destination.clone()));
    }
    results.push(live.set_visible(entry.visible));
    results.push(live.set_enabled(entry.enabled));
    results.push(live.set_checkable(entry.checkable));
    results.push(live.set_checked(entry.checked));
    results.push(live.set_display_hint(entry.display_hint));

    let mut failed = 0;
    for err in results.into_iter().filter_map(Result::err) {
        log::debug!("{err}");
        tracer.emit(|| err.to_string());
        failed += 1;
    }
    failed
}

/// Best effort: put the captured entries back as they were.
fn restore<M: MenuSurface + ?Sized>(menu: &mut M, snapshots: &[EntrySnapshot]) {
    let restored = catch_unwind(AssertUnwindSafe(|| {
        menu.clear();
        for snapshot in snapshots {
            let live = match menu.add(
                snapshot.group_id,
                snapshot.item_id,
                snapshot.original_order,
                &snapshot.title,
            ) {
                Ok(live) => live,
                Err(err) => {
                    log::debug!("Restore: host refused '{}': {err}", snapshot.title);
                    continue;
                }
            };
            let mut results = Vec::with_capacity(7);
            if let Some(icon) = &snapshot.icon {
                results.push(live.set_icon(icon.clone()));
            }
            if let Some(destination) = &snapshot.destination {
                results.push(live.set_destination(destination.clone()));
            }
            results.push(live.set_visible(snapshot.visible));
            results.push(live.set_enabled(snapshot.enabled));
            results.push(live.set_checkable(snapshot.checkable));
            results.push(live.set_checked(snapshot.checked));
            results.push(live.set_display_hint(snapshot.display_hint));

            for err in results.into_iter().filter_map(Result::err) {
                log::debug!("Restore: {err}");
            }
        }
    }));
    if restored.is_err() {
        log::warn!("Could not restore original menu");
    }
}

fn current_titles<M: MenuSurface + ?Sized>(menu: &M) -> Vec<String> {
    (0..menu.len())
        .filter_map(|idx| menu.entry(idx))
        .map(|entry| entry.title().unwrap_or_default())
        .collect()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::NoApplicationIcons;
    use crate::memory_menu::MemoryMenu;
    use crate::trace::MemoryTraceSink;
    use carte_config::{ItemRule, MemoryStore};

    fn customizer(
        config: &MenuConfig,
    ) -> MenuCustomizer<MemoryStore, NoApplicationIcons, MemoryTraceSink> {
        let store = MemoryStore::new();
        store.save(config).unwrap();
        MenuCustomizer::new(store, NoApplicationIcons, MemoryTraceSink::new())
    }

    #[test]
    fn empty_menu_is_skipped() {
        let engine = customizer(&MenuConfig::builtin());
        let mut menu = MemoryMenu::default();
        let outcome = engine.customize(&InvocationContext::new(), &mut menu);
        assert!(matches!(outcome, Outcome::Skipped(SkipReason::EmptyMenu)));
    }

    #[test]
    fn traces_before_and_after_when_debug() {
        let config = MenuConfig::new(vec![ItemRule::new("Copy", "复制")], vec![]).with_debug(true);
        let engine = customizer(&config);
        let mut menu = MemoryMenu::from_titles(&["Paste", "Copy"]);

        engine.customize(&InvocationContext::new(), &mut menu);

        let lines = engine.trace.lines();
        assert_eq!(lines[0], "Before:\n- Paste [internal]\n- Copy [internal]");
        assert_eq!(lines[1], "After: [复制, Paste]");
    }

    #[test]
    fn silent_without_debug() {
        let config = MenuConfig::new(vec![ItemRule::new("Copy", "复制")], vec![]);
        let engine = customizer(&config);
        let mut menu = MemoryMenu::from_titles(&["Paste", "Copy"]);

        engine.customize(&InvocationContext::new(), &mut menu);
        assert!(engine.trace.lines().is_empty());
    }

    struct UnreachableStore;

    impl ConfigStore for UnreachableStore {
        fn try_load(&self) -> carte_config::Result<MenuConfig> {
            panic!("preferences provider died");
        }

        fn save(&self, _config: &MenuConfig) -> carte_config::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn click_trace_survives_store_panic() {
        let engine =
            MenuCustomizer::new(UnreachableStore, NoApplicationIcons, MemoryTraceSink::new());
        engine.trace(|| "Clicked: 'Copy'".to_string());
        // The built-in default has tracing on.
        assert_eq!(engine.trace.lines(), vec!["Clicked: 'Copy'".to_string()]);
    }

    #[test]
    fn panic_message_reads_both_payload_kinds() {
        let static_payload: Box<dyn Any + Send> = Box::new("static");
        let owned_payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(static_payload.as_ref()), "static");
        assert_eq!(panic_message(owned_payload.as_ref()), "owned");
    }
}
