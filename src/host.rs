//! Host application surface consumed by the plugin.
//!
//! The host owns the command palette, the notification toasts, and the
//! editor buffers. The plugin only ever reaches it through this trait, so
//! embedders (and tests) can supply their own implementation.

/// Callback flavor for a host-visible action.
pub enum ActionCallback {
    /// Plain action: invoked with no arguments, no observable return value.
    Invoke(Box<dyn Fn() + Send + Sync>),
    /// Context-gated action. The host first calls with `dry_run = true` to
    /// probe availability; a `false` return hides the action from the
    /// palette. A `dry_run = false` call performs the action.
    CheckedInvoke(Box<dyn Fn(bool) -> bool + Send + Sync>),
}

/// A host-visible action binding.
///
/// The host is expected to deduplicate by `id`: registering the same id
/// again replaces the prior binding instead of adding a second palette row.
pub struct ActionSpec {
    /// Stable identifier, unique within the host's palette.
    pub id: String,
    /// Display name shown in the palette.
    pub name: String,
    pub callback: ActionCallback,
}

/// The host application, as seen from the plugin.
pub trait Host: Send + Sync {
    /// Announce an action to the host's command palette.
    fn register_action(&self, action: ActionSpec);

    /// Fire-and-forget user-visible toast.
    fn notify(&self, message: &str);

    /// Whether an editor view is currently active (used by checked actions).
    fn has_active_view(&self) -> bool;

    /// Replace the current selection in the active editor buffer.
    fn replace_selection(&self, text: &str);
}
