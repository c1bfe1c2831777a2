//! Scrawl - user-scripted commands and snippet entries for host applications
//!
//! Scrawl lets an end user of a host application define named actions
//! backed by user-authored source text and keep an open-ended, persisted
//! list of (label, code) entries that back further dynamically created
//! actions. The host is reached only through narrow traits: action
//! registration, notifications, and a settings store.
//!
//! ## Moving parts
//!
//! 1. **[`script::ScriptRunner`]**: turns a source string into an invocable
//!    unit and runs it, catching every failure at that boundary.
//! 2. **[`registry::CommandRegistry`]**: binds stable ids to invocations
//!    and announces them to the host palette; sources are re-read at invoke
//!    time, so edits apply without re-registration.
//! 3. **[`entries::EntryList`]**: the ordered (label, source) collection,
//!    persisted on every mutation.
//! 4. **[`panel::SettingsPanel`]**: projects current state into control
//!    descriptors and feeds change events back into mutations.

pub mod config;
pub mod entries;
pub mod host;
pub mod panel;
pub mod plugin;
pub mod registry;
pub mod script;

pub use config::{FileSettingsStore, MemorySettingsStore, OptionChoice, Settings, SettingsStore};
pub use entries::{Entry, EntryError, EntryList};
pub use host::{ActionCallback, ActionSpec, Host};
pub use panel::{
    ControlId, ControlKind, ControlSpec, ControlValue, PanelChange, RenderOutcome, SettingsPanel,
};
pub use plugin::Plugin;
pub use registry::{CommandRegistry, PRIMARY_COMMAND_ID, PRIMARY_COMMAND_NAME};
pub use script::{ScriptRunner, ScriptUnit};
