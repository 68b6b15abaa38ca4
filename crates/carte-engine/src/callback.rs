//! Decorator over the host's menu-event handler.
//!
//! The host drives a [`MenuCallback`] through the life of an action mode.
//! [`CustomizingCallback`] implements the same trait around the original
//! handler: create/prepare run the original first and then customize the
//! menu, clicks are traced, everything else is forwarded untouched.

use crate::customizer::MenuCustomizer;
use crate::guard::InvocationContext;
use crate::host::{LiveEntry, MenuSurface};
use crate::icon::IconProvider;
use crate::trace::TraceSink;
use carte_config::ConfigStore;

/// Kind of action mode the host is starting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    /// Action bar at the top of the window.
    Primary,
    /// Floating toolbar over a text selection.
    Floating,
}

/// Screen rectangle in host pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// Handler of the host's menu events.
pub trait MenuCallback<M: MenuSurface> {
    fn on_create(&mut self, menu: &mut M) -> bool;

    fn on_prepare(&mut self, menu: &mut M) -> bool;

    fn on_item_clicked(&mut self, item: &M::Entry) -> bool;

    fn on_destroy(&mut self);

    /// Where the floating toolbar should anchor. The default leaves the
    /// host's rectangle as is.
    fn on_content_rect(&mut self, _out: &mut Rect) {}
}

pub struct CustomizingCallback<'a, C, S, P, T> {
    inner: C,
    customizer: &'a MenuCustomizer<S, P, T>,
    context: &'a InvocationContext,
}

impl<'a, C, S, P, T> CustomizingCallback<'a, C, S, P, T> {
    pub fn new(
        inner: C,
        customizer: &'a MenuCustomizer<S, P, T>,
        context: &'a InvocationContext,
    ) -> Self {
        Self {
            inner,
            customizer,
            context,
        }
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<M, C, S, P, T> MenuCallback<M> for CustomizingCallback<'_, C, S, P, T>
where
    M: MenuSurface,
    C: MenuCallback<M>,
    S: ConfigStore,
    P: IconProvider,
    T: TraceSink,
{
    fn on_create(&mut self, menu: &mut M) -> bool {
        let shown = self.inner.on_create(menu);
        self.customizer.customize(self.context, menu);
        shown
    }

    fn on_prepare(&mut self, menu: &mut M) -> bool {
        let updated = self.inner.on_prepare(menu);
        self.customizer.customize(self.context, menu);
        updated
    }

    fn on_item_clicked(&mut self, item: &M::Entry) -> bool {
        self.customizer
            .trace(|| format!("Clicked: '{}'", item.title().unwrap_or_default()));
        self.inner.on_item_clicked(item)
    }

    fn on_destroy(&mut self) {
        self.inner.on_destroy();
    }

    fn on_content_rect(&mut self, out: &mut Rect) {
        self.inner.on_content_rect(out);
    }
}

/// Handler actually given to the host for an action mode.
pub enum Intercepted<'a, C, S, P, T> {
    Passthrough(C),
    Customizing(CustomizingCallback<'a, C, S, P, T>),
}

/// Wrap `callback` when `kind` is a floating text-selection toolbar; other
/// modes keep the original handler.
pub fn intercept<'a, C, S, P, T>(
    callback: C,
    kind: ModeKind,
    customizer: &'a MenuCustomizer<S, P, T>,
    context: &'a InvocationContext,
) -> Intercepted<'a, C, S, P, T>
where
    S: ConfigStore,
    P: IconProvider,
    T: TraceSink,
{
    match kind {
        ModeKind::Floating => {
            customizer.trace(|| "Intercepting floating action mode".to_string());
            Intercepted::Customizing(CustomizingCallback::new(callback, customizer, context))
        }
        ModeKind::Primary => Intercepted::Passthrough(callback),
    }
}

impl<M, C, S, P, T> MenuCallback<M> for Intercepted<'_, C, S, P, T>
where
    M: MenuSurface,
    C: MenuCallback<M>,
    S: ConfigStore,
    P: IconProvider,
    T: TraceSink,
{
    fn on_create(&mut self, menu: &mut M) -> bool {
        match self {
            Intercepted::Passthrough(inner) => inner.on_create(menu),
            Intercepted::Customizing(wrapped) => wrapped.on_create(menu),
        }
    }

    fn on_prepare(&mut self, menu: &mut M) -> bool {
        match self {
            Intercepted::Passthrough(inner) => inner.on_prepare(menu),
            Intercepted::Customizing(wrapped) => wrapped.on_prepare(menu),
        }
    }

    fn on_item_clicked(&mut self, item: &M::Entry) -> bool {
        match self {
            Intercepted::Passthrough(inner) => inner.on_item_clicked(item),
            Intercepted::Customizing(wrapped) => wrapped.on_item_clicked(item),
        }
    }

    fn on_destroy(&mut self) {
        match self {
            Intercepted::Passthrough(inner) => inner.on_destroy(),
            Intercepted::Customizing(wrapped) => wrapped.on_destroy(),
        }
    }

    fn on_content_rect(&mut self, out: &mut Rect) {
        match self {
            Intercepted::Passthrough(inner) => inner.on_content_rect(out),
            Intercepted::Customizing(wrapped) => wrapped.on_content_rect(out),
        }
    }
}
