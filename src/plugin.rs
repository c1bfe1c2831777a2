//! Plugin lifecycle
//!
//! Wires the settings record, entry list, script runner, and command
//! registry together and drives the load/unload hooks the host calls.

use std::sync::{Arc, RwLock};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::{Settings, SettingsStore};
use crate::entries::EntryList;
use crate::host::{ActionCallback, ActionSpec, Host};
use crate::panel::SettingsPanel;
use crate::registry::CommandRegistry;
use crate::script::ScriptRunner;

/// The host-embedded extension.
///
/// Owns the in-memory settings record for the process lifetime; every
/// mutation goes through the entry list or the panel and is persisted
/// before the next event is handled.
pub struct Plugin {
    settings: Arc<RwLock<Settings>>,
    store: Arc<dyn SettingsStore>,
    host: Arc<dyn Host>,
    registry: Arc<CommandRegistry>,
    entries: EntryList,
}

impl Plugin {
    /// Load hook: read the persisted record (a partial record merges with
    /// defaults, an absent one yields pure defaults), then register the
    /// primary command, the per-entry commands, and the built-ins.
    pub async fn load(host: Arc<dyn Host>, store: Arc<dyn SettingsStore>) -> Result<Self> {
        let loaded = store
            .load()
            .await
            .context("Failed to load plugin settings")?;
        let settings = Arc::new(RwLock::new(loaded.unwrap_or_default()));

        let runner = Arc::new(ScriptRunner::new(Arc::clone(&host)));
        let entries = EntryList::new(Arc::clone(&settings), Arc::clone(&store));
        let registry = Arc::new(CommandRegistry::new(
            Arc::clone(&host),
            runner,
            Arc::clone(&settings),
            entries.clone(),
        ));

        let plugin = Self {
            settings,
            store,
            host,
            registry,
            entries,
        };

        plugin.registry.register_primary_command();
        plugin.registry.register_entry_commands();
        plugin.register_builtin_commands();

        info!("plugin loaded ({} entries)", plugin.entries.len());
        Ok(plugin)
    }

    /// Unload hook. The host discards registered actions itself; an
    /// in-flight save may still land after this returns.
    pub fn unload(&self) {
        info!("plugin unloaded");
    }

    /// Explicit user "register" action: (re)register the primary command
    /// from the current record.
    pub fn register_user_command(&self) {
        self.registry.register_primary_command();
    }

    /// Controller for the host's settings surface.
    pub fn panel(&self) -> SettingsPanel {
        SettingsPanel::new(
            Arc::clone(&self.settings),
            Arc::clone(&self.store),
            self.entries.clone(),
            Arc::clone(&self.registry),
        )
    }

    pub fn entries(&self) -> &EntryList {
        &self.entries
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Copy of the current in-memory record.
    pub fn settings_snapshot(&self) -> Settings {
        self.settings
            .read()
            .expect("settings lock poisoned")
            .clone()
    }

    /// Persist the current record.
    pub async fn save_settings(&self) -> Result<()> {
        let snapshot = self.settings_snapshot();
        self.store.save(&snapshot).await
    }

    /// Fixed commands that ship with the plugin.
    fn register_builtin_commands(&self) {
        // Second binding over the primary user source, kept separate from
        // the well-known id so users can re-register one without the other.
        let settings = Arc::clone(&self.settings);
        self.registry.register(
            "run-primary-source",
            "Run primary source",
            Arc::new(move || {
                settings
                    .read()
                    .expect("settings lock poisoned")
                    .primary_command_source
                    .clone()
            }),
        );

        self.host.register_action(ActionSpec {
            id: "log-greeting".to_string(),
            name: "Log greeting".to_string(),
            callback: ActionCallback::Invoke(Box::new(|| {
                info!("Hey, you!");
            })),
        });

        let host = Arc::clone(&self.host);
        self.host.register_action(ActionSpec {
            id: "show-welcome".to_string(),
            name: "Show welcome".to_string(),
            callback: ActionCallback::Invoke(Box::new(move || {
                host.notify("Woah!");
            })),
        });

        let host = Arc::clone(&self.host);
        self.host.register_action(ActionSpec {
            id: "insert-sample-text".to_string(),
            name: "Insert sample text".to_string(),
            callback: ActionCallback::Invoke(Box::new(move || {
                host.replace_selection("Sample editor command");
            })),
        });

        // Only available while an editor view is active; dry-run calls
        // probe availability without performing the action.
        let host = Arc::clone(&self.host);
        self.host.register_action(ActionSpec {
            id: "show-welcome-when-editing".to_string(),
            name: "Show welcome (editing only)".to_string(),
            callback: ActionCallback::CheckedInvoke(Box::new(move |dry_run| {
                if !host.has_active_view() {
                    return false;
                }
                if !dry_run {
                    host.notify("Woah!");
                }
                true
            })),
        });

        debug!("registered built-in commands");
    }
}
