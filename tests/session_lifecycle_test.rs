use curated_completion::core::ConfigProvider;
use curated_completion::{CandidateError, CompletionSession, FileStore, Settings};
use std::fs;
use tempfile::TempDir;

fn settings_for(temp_dir: &TempDir, restore: bool) -> Settings {
    let mut settings = Settings::default();
    settings.set_persistence_file_path(temp_dir.path().join(".candidates.json"));
    settings.restore_on_startup = restore;
    settings
}

fn open_session(settings: &Settings) -> CompletionSession<FileStore> {
    let backend = FileStore::new(settings.persistence_file_path());
    CompletionSession::from_config(backend, settings).unwrap()
}

#[test]
fn test_candidates_survive_restart() {
    let temp_dir = TempDir::new().unwrap();
    let settings = settings_for(&temp_dir, true);

    let mut first = open_session(&settings);
    assert_eq!(first.start().unwrap(), 0);
    first.add_candidate("alpha").unwrap();
    first.add_candidate("alp").unwrap();
    first.add_candidate("beta").unwrap();
    first.delete_candidate("beta");
    first.shutdown().unwrap();

    let mut second = open_session(&settings);
    assert_eq!(second.start().unwrap(), 2);
    assert_eq!(second.candidates("al"), vec!["alpha", "alp"]);
    assert_eq!(second.complete("(insert al", 10), vec!["alpha", "alp"]);
}

#[test]
fn test_restore_disabled_does_not_touch_file() {
    let temp_dir = TempDir::new().unwrap();
    let settings = settings_for(&temp_dir, false);
    fs::write(settings.persistence_file_path(), "[\"kept\"]\n").unwrap();

    let mut session = open_session(&settings);
    assert_eq!(session.start().unwrap(), 0);
    assert!(session.candidates("").is_empty());
    session.add_candidate("transient").unwrap();
    session.shutdown().unwrap();

    let content = fs::read_to_string(settings.persistence_file_path()).unwrap();
    assert_eq!(content, "[\"kept\"]\n");
}

#[test]
fn test_save_now_writes_even_when_restore_disabled() {
    let temp_dir = TempDir::new().unwrap();
    let settings = settings_for(&temp_dir, false);

    let mut session = open_session(&settings);
    session.start().unwrap();
    session.add_candidate("explicit").unwrap();
    session.save_now().unwrap();

    let reopened = settings_for(&temp_dir, true);
    let mut session = open_session(&reopened);
    session.start().unwrap();
    assert_eq!(session.candidates(""), vec!["explicit"]);
}

#[test]
fn test_malformed_file_falls_back_to_empty_session() {
    let temp_dir = TempDir::new().unwrap();
    let settings = settings_for(&temp_dir, true);
    fs::write(settings.persistence_file_path(), "(\"foo\" \"bar\")").unwrap();

    let mut session = open_session(&settings);
    let err = session.start().unwrap_err();
    assert!(matches!(err, CandidateError::CorruptStoreError { .. }));

    assert!(session.candidates("").is_empty());
    assert!(session.add_candidate("still-works").unwrap());
    assert_eq!(session.candidates("still"), vec!["still-works"]);
}

#[test]
fn test_clear_all_persists_empty_list() {
    let temp_dir = TempDir::new().unwrap();
    let settings = settings_for(&temp_dir, true);

    let mut session = open_session(&settings);
    session.start().unwrap();
    session.add_candidate("one").unwrap();
    session.add_candidate("two").unwrap();
    session.clear_all();
    session.shutdown().unwrap();

    let mut session = open_session(&settings);
    assert_eq!(session.start().unwrap(), 0);
    assert!(session.candidates("").is_empty());
}

#[test]
fn test_custom_symbol_chars_from_settings() {
    let temp_dir = TempDir::new().unwrap();
    let mut settings = settings_for(&temp_dir, true);
    settings.symbol_chars = r"\w\.".to_string();

    let mut session = open_session(&settings);
    session.start().unwrap();
    session.add_candidate("os.path.join").unwrap();
    session.add_candidate("os.listdir").unwrap();

    let text = "x = os.pa";
    assert_eq!(session.complete(text, text.len()), vec!["os.path.join"]);
}

#[test]
fn test_invalid_symbol_chars_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let mut settings = settings_for(&temp_dir, true);
    settings.symbol_chars = String::new();

    let backend = FileStore::new(settings.persistence_file_path());
    assert!(matches!(
        CompletionSession::from_config(backend, &settings),
        Err(CandidateError::InvalidConfigValueError { .. })
    ));
}
