//! ハッシュ付きルックアップからエクスポートまでの統合テスト

#![allow(clippy::unwrap_used)]
#![allow(clippy::missing_docs_in_private_items)]

use std::fs;
use std::path::Path;

use googletest::prelude::*;
use hashed_i18n::config::{
    ConfigManager,
    I18nSettings,
};
use hashed_i18n::export::write_export;
use hashed_i18n::store::catalog::FsBackend;
use hashed_i18n::{
    DefaultValueCache,
    ExportOptions,
    ReferenceLinker,
    TranslateOptions,
    TranslationError,
    TranslationStore,
};
use rstest::*;
use tempfile::TempDir;

fn write_locale(root: &Path, language: &str, namespace: &str, content: &str) {
    let dir = root.join("locales").join(language);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{namespace}.json")), content).unwrap();
}

#[fixture]
fn workspace() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(".hashed-i18n.json"),
        r#"{ "cacheDefaults": true, "sources": ["overrides", "."] }"#,
    )
    .unwrap();
    write_locale(temp_dir.path(), "en", "pokemon", r#"{ "Pikachu": "Pikachu" }"#);
    write_locale(temp_dir.path(), "de", "pokemon", r#"{ "Pikachu": "Pikachu-DE" }"#);
    write_locale(
        temp_dir.path(),
        "de",
        "questlines",
        r#"{ "Tutorial Quests": { "step 1.4199161944": "Fang ein [[pokemon::Pikachu]]!" } }"#,
    );
    temp_dir
}

fn load_settings(workspace: &TempDir) -> (I18nSettings, FsBackend) {
    let mut manager = ConfigManager::new();
    manager.load_settings(Some(workspace.path().to_path_buf())).unwrap();
    let backend = FsBackend::new(manager.source_roots());
    (manager.get_settings().clone(), backend)
}

#[rstest]
fn lookups_feed_the_export(workspace: TempDir) {
    let (settings, backend) = load_settings(&workspace);
    let store = TranslationStore::new(settings);
    store.change_language("en", &backend);

    let texts = [
        ("Tutorial Quests.displayName", "Tutorial Quests"),
        ("Tutorial Quests.description", "Welcome to the Kanto region."),
        ("Tutorial Quests.step 1", "Pikachu is here. Catch it!"),
        ("Tutorial Quests.step 10", "hello"),
        ("Tutorial Quests.step 2", "Hello"),
        ("Mining Expedition.displayName", "Mining Expedition"),
    ];
    for (key, text) in texts {
        let translated = store.get_hashed(key, "questlines", text, None).unwrap();
        assert_that!(translated.value(), eq(text));
    }

    let options = ExportOptions {
        reference_order: vec!["Tutorial Quests".to_string(), "Mining Expedition".to_string()],
        linker: Some(ReferenceLinker::new("pokemon", ["Pikachu"]).unwrap()),
    };
    let document = store.export("questlines", &options).unwrap();

    let expected = r#"{
  "Tutorial Quests": {
    "displayName.3460693715": "Tutorial Quests",
    "description.1825715479": "Welcome to the Kanto region.",
    "step 1.4199161944": "[[pokemon::Pikachu]] is here. Catch it!",
    "step 2.69609650": "Hello",
    "step 10.99162322": "hello"
  },
  "Mining Expedition.displayName.2472733393": "Mining Expedition"
}"#;
    assert_that!(document, eq(expected));

    let path = write_export(workspace.path(), "questlines", &document).unwrap();
    assert_that!(fs::read_to_string(path).unwrap(), eq(expected));
}

#[rstest]
fn exported_translation_is_used_after_language_change(workspace: TempDir) {
    let (settings, backend) = load_settings(&workspace);
    let store = TranslationStore::new(settings);
    store.change_language("en", &backend);
    let step = store
        .get_hashed("Tutorial Quests.step 1", "questlines", "Pikachu is here. Catch it!", None)
        .unwrap();
    assert_that!(step.value(), eq("Pikachu is here. Catch it!"));

    store.change_language("de", &backend);

    assert_that!(step.value(), eq("Fang ein Pikachu-DE!"));
    assert_that!(store.language_version(), eq(2));
}

#[rstest]
fn earlier_source_roots_take_precedence(workspace: TempDir) {
    write_locale(&workspace.path().join("overrides"), "en", "pokemon", r#"{ "Pikachu": "Sparky" }"#);
    let (settings, backend) = load_settings(&workspace);
    let store = TranslationStore::new(settings);

    store.change_language("en", &backend);

    assert_that!(store.get("Pikachu", "pokemon", None).value(), eq("Sparky"));
}

#[rstest]
fn options_interpolate_translated_names(workspace: TempDir) {
    let (settings, backend) = load_settings(&workspace);
    let store = TranslationStore::new(settings);
    store.change_language("de", &backend);

    let options = TranslateOptions::new().with_var("name", "Pikachu");
    let translated =
        store.get_hashed("catch", "logbook", "Caught {{name, pokemon}}", Some(options)).unwrap();

    assert_that!(translated.value(), eq("Caught Pikachu-DE"));
}

#[rstest]
fn cache_dump_round_trips_into_export(workspace: TempDir) {
    let (settings, backend) = load_settings(&workspace);
    let store = TranslationStore::new(settings);
    store.change_language("en", &backend);
    store.get_hashed("a.b.c", "settings", "z", None).unwrap();

    let dump = serde_json::to_string(&*store.default_values().unwrap()).unwrap();
    let restored: DefaultValueCache = serde_json::from_str(&dump).unwrap();
    let document = hashed_i18n::export::export_namespace(
        Some(&restored),
        "settings",
        &ExportOptions::default(),
    )
    .unwrap();

    assert_that!(document, eq("{\n  \"a.b.c.122\": \"z\"\n}"));
}

#[rstest]
fn mistyped_namespace_is_rejected_while_caching(workspace: TempDir) {
    let (settings, backend) = load_settings(&workspace);
    let store = TranslationStore::new(settings);
    store.change_language("en", &backend);

    let result = store.get_hashed("intro", "questline", "hello", None);

    assert!(matches!(result, Err(TranslationError::State(_))));
    assert!(matches!(
        store.export("questline", &ExportOptions::default()),
        Err(TranslationError::State(_))
    ));
}

#[rstest]
fn unknown_namespace_cannot_be_exported(workspace: TempDir) {
    let (settings, _backend) = load_settings(&workspace);
    let store = TranslationStore::new(settings);

    let result = store.export("moves", &ExportOptions::default());

    assert!(matches!(result, Err(TranslationError::State(_))));
}
