//! Integration tests for command registration and invocation

mod common;

use std::sync::Arc;

use scrawl::{MemorySettingsStore, PRIMARY_COMMAND_ID, PanelChange, Plugin, Settings};

use common::MockHost;

async fn load_plugin(settings: Settings) -> (Arc<MockHost>, Arc<MemorySettingsStore>, Plugin) {
    let host = Arc::new(MockHost::new());
    let store = Arc::new(MemorySettingsStore::with_settings(settings));
    let plugin = Plugin::load(host.clone(), store.clone())
        .await
        .expect("plugin should load");
    (host, store, plugin)
}

#[tokio::test]
async fn load_registers_primary_command_and_acknowledges() {
    let (host, _store, _plugin) = load_plugin(Settings::default()).await;

    assert!(host.has_action(PRIMARY_COMMAND_ID));
    assert!(
        host.notifications()
            .iter()
            .any(|n| n == "Custom command registered successfully."),
        "registration should be acknowledged with a notification"
    );
}

#[tokio::test]
async fn throwing_source_never_propagates_and_notifies_once() {
    let settings = Settings {
        primary_command_source: "throw \"boom\";".to_string(),
        ..Settings::default()
    };
    let (host, _store, _plugin) = load_plugin(settings).await;
    host.clear_notifications();

    host.trigger(PRIMARY_COMMAND_ID);

    let notifications = host.notifications();
    assert_eq!(notifications.len(), 1);
    assert!(
        notifications[0].contains("boom"),
        "notification should carry the thrown message, got: {}",
        notifications[0]
    );
}

#[tokio::test]
async fn invocation_runs_latest_source_without_reregistration() {
    let settings = Settings {
        primary_command_source: "let x = 1;".to_string(),
        ..Settings::default()
    };
    let (host, _store, plugin) = load_plugin(settings).await;

    // Edit the stored source through the panel, without re-registering
    plugin
        .panel()
        .apply(PanelChange::PrimarySource("throw \"late failure\";".to_string()))
        .await
        .unwrap();
    host.clear_notifications();

    host.trigger(PRIMARY_COMMAND_ID);

    let notifications = host.notifications();
    assert_eq!(notifications.len(), 1);
    assert!(
        notifications[0].contains("late failure"),
        "invocation must recompile from the current source, got: {}",
        notifications[0]
    );
}

#[tokio::test]
async fn reregistration_is_idempotent() {
    let (host, _store, plugin) = load_plugin(Settings::default()).await;
    let actions_after_load = host.action_count();
    let commands_after_load = plugin.registry().command_count();

    plugin.register_user_command();
    plugin.register_user_command();

    assert_eq!(host.action_count(), actions_after_load);
    assert_eq!(plugin.registry().command_count(), commands_after_load);
}

#[tokio::test]
async fn entry_commands_are_registered_per_entry() {
    let settings = Settings {
        quotes: vec!["First quote".to_string(), String::new()],
        codes: vec![
            "notify(\"first quote\");".to_string(),
            "notify(\"second quote\");".to_string(),
        ],
        ..Settings::default()
    };
    let (host, _store, _plugin) = load_plugin(settings).await;

    assert_eq!(
        host.action_name("user-entry-command-0").as_deref(),
        Some("First quote")
    );
    // Blank labels fall back to a positional name
    assert_eq!(
        host.action_name("user-entry-command-1").as_deref(),
        Some("Entry #2")
    );

    host.clear_notifications();
    host.trigger("user-entry-command-1");
    assert_eq!(host.notifications(), vec!["second quote".to_string()]);
}

#[tokio::test]
async fn entry_command_reads_source_at_invoke_time() {
    let settings = Settings {
        quotes: vec!["quote".to_string()],
        codes: vec!["notify(\"old\");".to_string()],
        ..Settings::default()
    };
    let (host, _store, plugin) = load_plugin(settings).await;

    plugin
        .entries()
        .update_source_at(0, "notify(\"new\");")
        .await
        .unwrap();
    host.clear_notifications();

    host.trigger("user-entry-command-0");
    assert_eq!(host.notifications(), vec!["new".to_string()]);
}

#[tokio::test]
async fn checked_command_respects_active_view() {
    let (host, _store, _plugin) = load_plugin(Settings::default()).await;

    assert!(!host.check("show-welcome-when-editing"));

    host.set_active_view(true);
    assert!(host.check("show-welcome-when-editing"));

    host.clear_notifications();
    host.trigger("show-welcome-when-editing");
    assert_eq!(host.notifications(), vec!["Woah!".to_string()]);
}

#[tokio::test]
async fn builtin_editor_command_replaces_selection() {
    let (host, _store, _plugin) = load_plugin(Settings::default()).await;

    host.trigger("insert-sample-text");
    assert_eq!(
        host.replacements(),
        vec!["Sample editor command".to_string()]
    );
}

#[tokio::test]
async fn builtin_secondary_binding_runs_primary_source() {
    let settings = Settings {
        primary_command_source: "notify(\"primary ran\");".to_string(),
        ..Settings::default()
    };
    let (host, _store, _plugin) = load_plugin(settings).await;
    host.clear_notifications();

    host.trigger("run-primary-source");
    assert_eq!(host.notifications(), vec!["primary ran".to_string()]);
}
