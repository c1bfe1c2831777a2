//! Shared test utilities: a recording mock host.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use scrawl::{ActionCallback, ActionSpec, Host};

/// Host double that records notifications, selection replacements, and the
/// registered actions, deduplicated by id like a real palette.
pub struct MockHost {
    actions: Mutex<HashMap<String, ActionSpec>>,
    notifications: Mutex<Vec<String>>,
    replacements: Mutex<Vec<String>>,
    active_view: AtomicBool,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            actions: Mutex::new(HashMap::new()),
            notifications: Mutex::new(Vec::new()),
            replacements: Mutex::new(Vec::new()),
            active_view: AtomicBool::new(false),
        }
    }

    pub fn notifications(&self) -> Vec<String> {
        self.notifications.lock().expect("lock").clone()
    }

    pub fn clear_notifications(&self) {
        self.notifications.lock().expect("lock").clear();
    }

    pub fn replacements(&self) -> Vec<String> {
        self.replacements.lock().expect("lock").clone()
    }

    pub fn action_count(&self) -> usize {
        self.actions.lock().expect("lock").len()
    }

    pub fn has_action(&self, id: &str) -> bool {
        self.actions.lock().expect("lock").contains_key(id)
    }

    pub fn action_name(&self, id: &str) -> Option<String> {
        self.actions
            .lock()
            .expect("lock")
            .get(id)
            .map(|action| action.name.clone())
    }

    pub fn set_active_view(&self, active: bool) {
        self.active_view.store(active, Ordering::SeqCst);
    }

    /// Invoke an action like the palette would.
    pub fn trigger(&self, id: &str) {
        let actions = self.actions.lock().expect("lock");
        let action = actions
            .get(id)
            .unwrap_or_else(|| panic!("no action registered under id {id}"));
        match &action.callback {
            ActionCallback::Invoke(callback) => callback(),
            ActionCallback::CheckedInvoke(callback) => {
                callback(false);
            }
        }
    }

    /// Dry-run availability probe; plain actions are always available.
    pub fn check(&self, id: &str) -> bool {
        let actions = self.actions.lock().expect("lock");
        let action = actions
            .get(id)
            .unwrap_or_else(|| panic!("no action registered under id {id}"));
        match &action.callback {
            ActionCallback::Invoke(_) => true,
            ActionCallback::CheckedInvoke(callback) => callback(true),
        }
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for MockHost {
    fn register_action(&self, action: ActionSpec) {
        self.actions
            .lock()
            .expect("lock")
            .insert(action.id.clone(), action);
    }

    fn notify(&self, message: &str) {
        self.notifications
            .lock()
            .expect("lock")
            .push(message.to_string());
    }

    fn has_active_view(&self) -> bool {
        self.active_view.load(Ordering::SeqCst)
    }

    fn replace_selection(&self, text: &str) {
        self.replacements
            .lock()
            .expect("lock")
            .push(text.to_string());
    }
}
