//! Persisted settings record and its storage

mod store;

pub use store::{FileSettingsStore, MemorySettingsStore, SettingsStore};

use serde::{Deserialize, Serialize};

/// Root persisted settings record.
///
/// Every field carries a serde default, so a partial record written by an
/// older version merges cleanly with current defaults on load. The two
/// parallel sequences `quotes`/`codes` are the legacy persisted shape of the
/// entry list; [`crate::entries::EntryList`] keeps them index-aligned and is
/// the only code that should mutate them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Free-form primary text setting
    #[serde(default = "default_primary_text")]
    pub primary_text: String,

    /// Feature toggle
    #[serde(default)]
    pub feature_enabled: bool,

    /// Dropdown selection
    #[serde(default)]
    pub selected_option: OptionChoice,

    /// Source text of the primary user command
    #[serde(default)]
    pub primary_command_source: String,

    /// Entry labels (index-aligned with `codes`)
    #[serde(default)]
    pub quotes: Vec<String>,

    /// Entry source texts (index-aligned with `quotes`; may lag behind
    /// `quotes` in records written by older versions)
    #[serde(default)]
    pub codes: Vec<String>,
}

/// The dropdown options offered by the settings panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionChoice {
    #[default]
    Option1,
    Option2,
}

impl OptionChoice {
    /// Stable key used for persistence and change events
    pub fn key(&self) -> &'static str {
        match self {
            OptionChoice::Option1 => "option1",
            OptionChoice::Option2 => "option2",
        }
    }

    /// Human-readable dropdown label
    pub fn label(&self) -> &'static str {
        match self {
            OptionChoice::Option1 => "Option 1",
            OptionChoice::Option2 => "Option 2",
        }
    }

    /// Parse a stable key back into a choice
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "option1" => Some(OptionChoice::Option1),
            "option2" => Some(OptionChoice::Option2),
            _ => None,
        }
    }

    /// All choices, in dropdown order
    pub fn all() -> [OptionChoice; 2] {
        [OptionChoice::Option1, OptionChoice::Option2]
    }
}

fn default_primary_text() -> String {
    "default".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            primary_text: default_primary_text(),
            feature_enabled: false,
            selected_option: OptionChoice::default(),
            primary_command_source: String::new(),
            quotes: Vec::new(),
            codes: Vec::new(),
        }
    }
}
