use std::cell::Cell;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GuardState {
    #[default]
    Idle,
    InProgress,
}

/// Per-thread (or per-window) invocation state handed to every customize
/// call.
///
/// Writing the transformed entries back into the host menu can make the host
/// fire the same menu event again; the guard turns that nested call into a
/// no-op. The context is `!Sync`, so two threads can never share one.
#[derive(Debug, Default)]
pub struct InvocationContext {
    state: Cell<GuardState>,
}

impl InvocationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GuardState {
        self.state.get()
    }

    /// Move to `InProgress`, or `None` if a call is already running.
    ///
    /// Dropping the token returns the context to `Idle`, on every exit path
    /// including unwinding.
    pub fn try_enter(&self) -> Option<GuardToken<'_>> {
        match self.state.get() {
            GuardState::InProgress => None,
            GuardState::Idle => {
                self.state.set(GuardState::InProgress);
                Some(GuardToken { context: self })
            }
        }
    }
}

#[derive(Debug)]
#[must_use = "the guard is released as soon as the token is dropped"]
pub struct GuardToken<'a> {
    context: &'a InvocationContext,
}

impl Drop for GuardToken<'_> {
    fn drop(&mut self) {
        self.context.state.set(GuardState::Idle);
    }
}
