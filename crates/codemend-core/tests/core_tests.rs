use codemend_core::config::Settings;
use codemend_core::*;
use tempfile::TempDir;

// ========================================================================
// Settings Tests (config/mod.rs)
// ========================================================================

#[test]
fn test_settings_default_values() {
    let settings = Settings::default();

    // Check backend defaults
    assert_eq!(settings.backend.base_url, "http://127.0.0.1:8000");
    assert_eq!(settings.backend.timeout_secs, 5);

    // Check repair defaults
    assert_eq!(settings.repair.max_iterations, 3);
}

#[test]
fn test_settings_load_returns_default_when_no_file() {
    // Loading from a non-existent config should return defaults
    // Note: This may load from actual config if it exists, but the function
    // is designed to gracefully return defaults when file doesn't exist
    let settings = Settings::load();

    // Just verify it doesn't panic and has some expected structure
    assert!(!settings.backend.base_url.is_empty());
    assert!(settings.repair.max_iterations >= 1);
}

#[test]
fn test_settings_save_and_reload_roundtrip() {
    // Create a temporary directory for testing
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    // Create custom settings
    let mut settings = Settings::default();
    settings.backend.base_url = "http://10.0.0.5:9000".to_string();
    settings.backend.timeout_secs = 30;
    settings.repair.max_iterations = 7;

    // Temporarily override config path by writing directly
    std::fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    let content = toml::to_string_pretty(&settings).unwrap();
    std::fs::write(&config_path, content).unwrap();

    // Load back and verify
    let loaded_content = std::fs::read_to_string(&config_path).unwrap();
    let loaded: Settings = toml::from_str(&loaded_content).unwrap();

    assert_eq!(loaded.backend.base_url, "http://10.0.0.5:9000");
    assert_eq!(loaded.backend.timeout_secs, 30);
    assert_eq!(loaded.repair.max_iterations, 7);
}

#[test]
fn test_settings_build_session_uses_configured_iterations() {
    let mut settings = Settings::default();
    settings.repair.max_iterations = 9;

    // Session construction should not require the backend to be reachable.
    let session = settings.build_session().unwrap();
    assert_eq!(session.current_code(), "");
    assert!(session.history().is_empty());
}

// ========================================================================
// PatchHistory Tests (session/history.rs)
// ========================================================================

#[test]
fn test_patch_history_push_selects_new_entry() {
    let mut history = PatchHistory::new();

    let first = history.push(PatchEntry::new("a", "b"));
    assert_eq!(first, 0);
    assert_eq!(history.selected(), Some(0));

    let second = history.push(PatchEntry::new("b", "c"));
    assert_eq!(second, 1);
    assert_eq!(history.selected(), Some(1));
    assert_eq!(history.len(), 2);
}

#[test]
fn test_patch_history_select_normalizes_out_of_range() {
    let mut history = PatchHistory::new();
    history.push(PatchEntry::new("a", "b"));

    history.select(Some(5));
    assert_eq!(history.selected(), None);

    history.select(Some(0));
    assert_eq!(history.selected(), Some(0));

    history.select(None);
    assert_eq!(history.selected(), None);
}

#[test]
fn test_patch_history_selected_entry_follows_cursor() {
    let mut history = PatchHistory::new();
    history.push(PatchEntry::new("a", "b"));
    history.push(PatchEntry::new("b", "c"));

    history.select(Some(0));
    assert_eq!(history.selected_entry().unwrap().next_code, "b");

    history.select(None);
    assert!(history.selected_entry().is_none());
}

#[test]
fn test_patch_history_mark_rejected_bounds() {
    let mut history = PatchHistory::new();
    history.push(PatchEntry::new("a", "b"));

    assert!(history.mark_rejected(0));
    assert!(history.get(0).unwrap().rejected);

    assert!(!history.mark_rejected(3));
}

#[test]
fn test_patch_history_next_active_after_skips_rejected() {
    let mut history = PatchHistory::new();
    history.push(PatchEntry::new("a", "b"));
    history.push(PatchEntry::new("b", "c"));
    history.push(PatchEntry::new("c", "d"));

    history.mark_rejected(1);

    assert_eq!(history.next_active_after(0), Some(2));
    assert_eq!(history.next_active_after(1), Some(2));
    assert_eq!(history.next_active_after(2), None);
}

#[test]
fn test_patch_history_clear_resets_selection() {
    let mut history = PatchHistory::new();
    history.push(PatchEntry::new("a", "b"));
    history.push(PatchEntry::new("b", "c"));

    history.clear();

    assert!(history.is_empty());
    assert_eq!(history.selected(), None);
    assert!(history.last().is_none());
}

// ========================================================================
// PatchEntry Tests (session/history.rs)
// ========================================================================

#[test]
fn test_patch_entry_builders_set_fields() {
    let entry = PatchEntry::new("old", "new")
        .with_stdout("ran fine")
        .with_stderr("one warning")
        .with_reasoning("renamed the variable");

    assert_eq!(entry.previous_code, "old");
    assert_eq!(entry.next_code, "new");
    assert_eq!(entry.stdout, "ran fine");
    assert_eq!(entry.stderr, "one warning");
    assert_eq!(entry.reasoning, "renamed the variable");
    assert!(!entry.rejected);
}

#[test]
fn test_patch_entry_unified_diff_shows_change() {
    let entry = PatchEntry::new("print('hi')\n", "print('hello')\n");

    let diff = entry.unified_diff();
    assert!(diff.contains("@@"));
    assert!(diff.contains("-print('hi')"));
    assert!(diff.contains("+print('hello')"));
}

#[test]
fn test_patch_entry_unified_diff_empty_for_identical_code() {
    let entry = PatchEntry::new("same\n", "same\n");
    assert!(entry.unified_diff().is_empty());
}

// ========================================================================
// ChatThread Tests (session/chat.rs)
// ========================================================================

#[test]
fn test_chat_thread_preserves_turn_order() {
    let mut thread = ChatThread::new();

    thread.push_user("Hello");
    thread.push_assistant("Hi there!");
    thread.push_user("How do I fix this?");

    let turns = thread.turns();
    assert_eq!(turns.len(), 3);
    assert_eq!(turns[0].role, ChatRole::User);
    assert_eq!(turns[0].text, "Hello");
    assert_eq!(turns[1].role, ChatRole::Assistant);
    assert_eq!(turns[2].text, "How do I fix this?");
}

#[test]
fn test_chat_thread_trims_oldest_when_exceeding_max() {
    let mut thread = ChatThread::new().with_max_turns(3);

    thread.push_user("Turn 1");
    thread.push_user("Turn 2");
    thread.push_user("Turn 3");
    thread.push_user("Turn 4"); // Should trigger trim
    thread.push_user("Turn 5"); // Should trigger trim

    let turns = thread.turns();
    assert_eq!(turns.len(), 3);
    assert_eq!(turns[0].text, "Turn 3");
    assert_eq!(turns[1].text, "Turn 4");
    assert_eq!(turns[2].text, "Turn 5");
}

#[test]
fn test_chat_thread_last_turn() {
    let mut thread = ChatThread::new();

    assert!(thread.last_turn().is_none());

    thread.push_user("First");
    assert_eq!(thread.last_turn().unwrap().text, "First");

    thread.push_assistant("Second");
    assert_eq!(thread.last_turn().unwrap().text, "Second");
    assert_eq!(thread.last_turn().unwrap().role, ChatRole::Assistant);
}

#[test]
fn test_chat_thread_clear_works() {
    let mut thread = ChatThread::new();

    thread.push_user("Turn 1");
    thread.push_assistant("Turn 2");
    assert_eq!(thread.len(), 2);

    thread.clear();
    assert_eq!(thread.len(), 0);
    assert!(thread.is_empty());
}
