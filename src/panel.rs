//! Settings panel controller
//!
//! The panel is a pure projection: `render()` turns the current settings
//! and entry list into a flat sequence of control descriptors, and
//! `apply()` wires a control's change event back into a mutation + persist
//! cycle. There is no incremental diffing; structural changes ask the host
//! to re-render the whole surface.

use std::sync::{Arc, RwLock};

use anyhow::Result;
use tracing::debug;

use crate::config::{OptionChoice, Settings, SettingsStore};
use crate::entries::EntryList;
use crate::registry::CommandRegistry;

/// Stable identity of a rendered control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlId {
    PrimaryText,
    FeatureEnabled,
    SelectedOption,
    PrimarySource,
    RegisterPrimary,
    EntryLabel(usize),
    EntrySource(usize),
    RemoveEntry(usize),
    AddEntry,
}

/// Widget family the host should render for a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlKind {
    Text { placeholder: String },
    Toggle,
    Dropdown { options: Vec<(String, String)> },
    TextArea { placeholder: String },
    Button { text: String },
}

/// Current value carried by a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlValue {
    Text(String),
    Flag(bool),
    Choice(String),
    None,
}

/// One interactive control in the rendered sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlSpec {
    pub id: ControlId,
    pub name: String,
    pub desc: String,
    pub kind: ControlKind,
    pub value: ControlValue,
}

/// A control's change event, fed back into [`SettingsPanel::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelChange {
    PrimaryText(String),
    FeatureEnabled(bool),
    SelectedOption(OptionChoice),
    PrimarySource(String),
    RegisterPrimary,
    EntryLabel { index: usize, value: String },
    EntrySource { index: usize, value: String },
    AddEntry,
    RemoveEntry { index: usize },
}

/// Whether the host must re-project the surface after a change.
///
/// `KeepSurface` leaves per-widget bookkeeping to the host (it may remove a
/// single widget or leave the surface as-is); `Rerender` means the control
/// sequence no longer matches the underlying list and a fresh `render()`
/// pass is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    KeepSurface,
    Rerender,
}

/// Projects settings state into controls and applies their change events.
pub struct SettingsPanel {
    settings: Arc<RwLock<Settings>>,
    store: Arc<dyn SettingsStore>,
    entries: EntryList,
    registry: Arc<CommandRegistry>,
}

impl SettingsPanel {
    pub fn new(
        settings: Arc<RwLock<Settings>>,
        store: Arc<dyn SettingsStore>,
        entries: EntryList,
        registry: Arc<CommandRegistry>,
    ) -> Self {
        Self {
            settings,
            store,
            entries,
            registry,
        }
    }

    /// Deterministic re-projection of the current state into a flat control
    /// sequence: the fixed settings controls first, then one
    /// label/source/remove row per entry, then the add button.
    pub fn render(&self) -> Vec<ControlSpec> {
        let settings = self
            .settings
            .read()
            .expect("settings lock poisoned")
            .clone();

        let mut controls = vec![
            ControlSpec {
                id: ControlId::PrimaryText,
                name: "Primary text".to_string(),
                desc: "Free-form text setting".to_string(),
                kind: ControlKind::Text {
                    placeholder: "Enter your text".to_string(),
                },
                value: ControlValue::Text(settings.primary_text.clone()),
            },
            ControlSpec {
                id: ControlId::FeatureEnabled,
                name: "Enable feature".to_string(),
                desc: "Toggle this to enable or disable the feature".to_string(),
                kind: ControlKind::Toggle,
                value: ControlValue::Flag(settings.feature_enabled),
            },
            ControlSpec {
                id: ControlId::SelectedOption,
                name: "Select an option".to_string(),
                desc: "Choose an option from the dropdown".to_string(),
                kind: ControlKind::Dropdown {
                    options: OptionChoice::all()
                        .iter()
                        .map(|choice| (choice.key().to_string(), choice.label().to_string()))
                        .collect(),
                },
                value: ControlValue::Choice(settings.selected_option.key().to_string()),
            },
            ControlSpec {
                id: ControlId::PrimarySource,
                name: "Custom command code".to_string(),
                desc: "Code to run when the custom command is triggered".to_string(),
                kind: ControlKind::TextArea {
                    placeholder: "Enter your code here".to_string(),
                },
                value: ControlValue::Text(settings.primary_command_source.clone()),
            },
            ControlSpec {
                id: ControlId::RegisterPrimary,
                name: "Register custom command".to_string(),
                desc: "Register a command with the code you provided".to_string(),
                kind: ControlKind::Button {
                    text: "Register command".to_string(),
                },
                value: ControlValue::None,
            },
        ];

        for (index, entry) in self.entries.entries().into_iter().enumerate() {
            controls.push(ControlSpec {
                id: ControlId::EntryLabel(index),
                name: format!("Quote #{}", index + 1),
                desc: "Enter your favorite quote".to_string(),
                kind: ControlKind::Text {
                    placeholder: "Enter your quote".to_string(),
                },
                value: ControlValue::Text(entry.label),
            });
            controls.push(ControlSpec {
                id: ControlId::EntrySource(index),
                name: format!("Quote #{} code", index + 1),
                desc: "Code paired with this quote".to_string(),
                kind: ControlKind::TextArea {
                    placeholder: "Enter your code here".to_string(),
                },
                value: ControlValue::Text(entry.source),
            });
            controls.push(ControlSpec {
                id: ControlId::RemoveEntry(index),
                name: String::new(),
                desc: String::new(),
                kind: ControlKind::Button {
                    text: "Remove".to_string(),
                },
                value: ControlValue::None,
            });
        }

        controls.push(ControlSpec {
            id: ControlId::AddEntry,
            name: String::new(),
            desc: String::new(),
            kind: ControlKind::Button {
                text: "Add new quote".to_string(),
            },
            value: ControlValue::None,
        });

        controls
    }

    /// Apply a change event: mutate the record, persist, and tell the host
    /// whether the surface must be re-projected.
    pub async fn apply(&self, change: PanelChange) -> Result<RenderOutcome> {
        debug!(?change, "applying panel change");
        match change {
            PanelChange::PrimaryText(value) => {
                self.set_and_persist(|settings| settings.primary_text = value)
                    .await?;
                Ok(RenderOutcome::KeepSurface)
            }
            PanelChange::FeatureEnabled(value) => {
                self.set_and_persist(|settings| settings.feature_enabled = value)
                    .await?;
                Ok(RenderOutcome::KeepSurface)
            }
            PanelChange::SelectedOption(choice) => {
                self.set_and_persist(|settings| settings.selected_option = choice)
                    .await?;
                Ok(RenderOutcome::KeepSurface)
            }
            PanelChange::PrimarySource(value) => {
                self.set_and_persist(|settings| settings.primary_command_source = value)
                    .await?;
                Ok(RenderOutcome::KeepSurface)
            }
            PanelChange::RegisterPrimary => {
                self.registry.register_primary_command();
                Ok(RenderOutcome::KeepSurface)
            }
            PanelChange::EntryLabel { index, value } => {
                self.entries.update_label_at(index, &value).await?;
                Ok(RenderOutcome::KeepSurface)
            }
            PanelChange::EntrySource { index, value } => {
                self.entries.update_source_at(index, &value).await?;
                Ok(RenderOutcome::KeepSurface)
            }
            PanelChange::AddEntry => {
                self.entries.append("", "").await?;
                Ok(RenderOutcome::Rerender)
            }
            PanelChange::RemoveEntry { index } => {
                self.entries.remove_at(index).await?;
                Ok(RenderOutcome::Rerender)
            }
        }
    }

    async fn set_and_persist(&self, mutate: impl FnOnce(&mut Settings)) -> Result<()> {
        let snapshot = {
            let mut settings = self.settings.write().expect("settings lock poisoned");
            mutate(&mut settings);
            settings.clone()
        };
        self.store.save(&snapshot).await
    }
}
