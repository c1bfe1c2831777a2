//! Command registry adapter
//!
//! Binds stable identifiers and display names to script invocations and
//! announces them to the host palette. Bindings read their source through a
//! provider at invoke time, so edits to the stored source take effect
//! without re-registration.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use tracing::debug;

use crate::config::Settings;
use crate::entries::EntryList;
use crate::host::{ActionCallback, ActionSpec, Host};
use crate::script::ScriptRunner;

/// Fixed identifier of the primary user command.
pub const PRIMARY_COMMAND_ID: &str = "user-custom-command";

/// Display name of the primary user command.
pub const PRIMARY_COMMAND_NAME: &str = "User custom command";

/// Produces the source text for a binding at invoke time.
pub type SourceProvider = Arc<dyn Fn() -> String + Send + Sync>;

/// The mapping from stable command identifiers to invocable bindings.
///
/// Registration is idempotent per id: the host deduplicates by id, and the
/// registry's own map replaces the prior binding's name, so re-registering
/// never yields a second palette row.
pub struct CommandRegistry {
    host: Arc<dyn Host>,
    runner: Arc<ScriptRunner>,
    settings: Arc<RwLock<Settings>>,
    entries: EntryList,
    registered: Mutex<HashMap<String, String>>,
}

impl CommandRegistry {
    pub fn new(
        host: Arc<dyn Host>,
        runner: Arc<ScriptRunner>,
        settings: Arc<RwLock<Settings>>,
        entries: EntryList,
    ) -> Self {
        Self {
            host,
            runner,
            settings,
            entries,
            registered: Mutex::new(HashMap::new()),
        }
    }

    /// Bind `id`/`name` so that triggering the action compiles and runs
    /// whatever `provider` returns at that moment. Cannot fail; only the
    /// later invocation can, and that failure stays inside the executor.
    pub fn register(&self, id: &str, name: &str, provider: SourceProvider) {
        let runner = Arc::clone(&self.runner);
        let callback = ActionCallback::Invoke(Box::new(move || {
            let source = provider();
            runner.run_source(&source);
        }));

        self.host.register_action(ActionSpec {
            id: id.to_string(),
            name: name.to_string(),
            callback,
        });

        let replaced = self
            .registered
            .lock()
            .expect("registry lock poisoned")
            .insert(id.to_string(), name.to_string())
            .is_some();
        debug!(id, replaced, "registered script command");
    }

    /// (Re)register the primary user command from the current settings
    /// record, under the fixed well-known id. Invoked once at startup and
    /// once per explicit user "register" action.
    pub fn register_primary_command(&self) {
        let settings = Arc::clone(&self.settings);
        self.register(
            PRIMARY_COMMAND_ID,
            PRIMARY_COMMAND_NAME,
            Arc::new(move || {
                settings
                    .read()
                    .expect("settings lock poisoned")
                    .primary_command_source
                    .clone()
            }),
        );

        self.host.notify("Custom command registered successfully.");
    }

    /// Register one action per entry. Each action reads its entry's source
    /// at invoke time; blank labels fall back to a positional name.
    pub fn register_entry_commands(&self) {
        for index in 0..self.entries.len() {
            let label = self
                .entries
                .get(index)
                .map(|entry| entry.label)
                .unwrap_or_default();
            let name = if label.trim().is_empty() {
                format!("Entry #{}", index + 1)
            } else {
                label
            };

            let entries = self.entries.clone();
            self.register(
                &format!("user-entry-command-{index}"),
                &name,
                Arc::new(move || entries.source_at(index).unwrap_or_default()),
            );
        }
    }

    /// Number of distinct ids this registry has bound.
    pub fn command_count(&self) -> usize {
        self.registered.lock().expect("registry lock poisoned").len()
    }

    /// Ids bound so far, in no particular order.
    pub fn registered_ids(&self) -> Vec<String> {
        self.registered
            .lock()
            .expect("registry lock poisoned")
            .keys()
            .cloned()
            .collect()
    }
}
