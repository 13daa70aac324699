//! 設定ファイルの型とバリデーション

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// 設定項目ひとつ分のバリデーションエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid setting '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "namespaces[0]")
    pub field_path: String,
    /// 修正方法を含むメッセージ
    pub message: String,
}

impl ValidationError {
    /// フィールドパスとメッセージからエラーを作成
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

/// 設定の読み込み・検証エラー
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 一つ以上の設定項目が不正
    #[error("Invalid .hashed-i18n.json settings:\n{}", list_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    /// 設定ファイルを読めなかった
    #[error("Failed to read .hashed-i18n.json: {0}")]
    IoError(#[from] std::io::Error),

    /// 設定ファイルが JSON として不正
    #[error("Failed to parse .hashed-i18n.json: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// エラーを番号付きの行にまとめる
fn list_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Separator between namespace and key in fully-qualified keys (`pokemon::Pikachu`).
pub const NAMESPACE_SEPARATOR: &str = "::";

/// `.hashed-i18n.json` の内容
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct I18nSettings {
    /// Namespaces loaded for every language and partitioned in the default value cache.
    pub namespaces: Vec<String>,

    /// Namespace searched when a key is missing from the requested one.
    pub fallback_namespace: Option<String>,

    /// Language searched when a key is missing from the current one.
    pub fallback_language: String,

    /// Locale roots tried in order; each holds `locales/{lng}/{ns}.json`.
    pub sources: Vec<String>,

    /// Record default text of hashed lookups for export.
    ///
    /// - `None`: enabled only in debug builds (default)
    /// - `Some(flag)`: forced on or off
    pub cache_defaults: Option<bool>,

    /// Maximum `[[...]]` nesting depth during interpolation.
    pub nesting_depth: usize,
}

impl I18nSettings {
    /// Whether hashed lookups should record their default text.
    #[must_use]
    pub fn cache_enabled(&self) -> bool {
        self.cache_defaults.unwrap_or(cfg!(debug_assertions))
    }

    /// すべての不正な項目をまとめて返す
    ///
    /// # Errors
    /// - Required field is empty
    /// - Namespace name contains the namespace separator
    /// - Fallback namespace is not a configured namespace
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.namespaces.is_empty() {
            errors.push(ValidationError::new(
                "namespaces",
                "At least one namespace is required. Example: [\"questlines\"]",
            ));
        }

        for (index, namespace) in self.namespaces.iter().enumerate() {
            if namespace.is_empty() {
                errors.push(ValidationError::new(
                    format!("namespaces[{index}]"),
                    "The namespace cannot be empty",
                ));
            } else if namespace.contains(NAMESPACE_SEPARATOR) {
                errors.push(ValidationError::new(
                    format!("namespaces[{index}]"),
                    format!("Invalid namespace '{namespace}': must not contain \"{NAMESPACE_SEPARATOR}\""),
                ));
            }
        }

        if let Some(fallback) = &self.fallback_namespace
            && !self.namespaces.contains(fallback)
        {
            errors.push(ValidationError::new(
                "fallbackNamespace",
                format!("Unknown namespace '{fallback}'. It must be listed in 'namespaces', or remove this field"),
            ));
        }

        if self.fallback_language.is_empty() {
            errors.push(ValidationError::new(
                "fallbackLanguage",
                "The language cannot be empty. Example: \"en\"",
            ));
        }

        if self.sources.is_empty() {
            errors.push(ValidationError::new(
                "sources",
                "At least one locale source is required. Example: [\".\"]",
            ));
        }

        if self.nesting_depth == 0 {
            errors.push(ValidationError::new("nestingDepth", "The depth must be at least 1"));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            namespaces: ["pokemon", "logbook", "settings", "questlines"]
                .into_iter()
                .map(String::from)
                .collect(),
            fallback_namespace: Some("pokemon".to_string()),
            fallback_language: "en".to_string(),
            sources: vec![".".to_string()],
            cache_defaults: None,
            nesting_depth: 8,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = I18nSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"cacheDefaults": true, "fallbackLanguage": "de"}"#;

        let settings: I18nSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.fallback_language, eq("de"));
        assert_that!(settings.cache_defaults, some(eq(true)));
        assert_that!(settings.namespaces, len(eq(4)));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let json = "{}";

        let settings: I18nSettings = serde_json::from_str(json).unwrap();

        assert_that!(
            settings.namespaces,
            elements_are![eq("pokemon"), eq("logbook"), eq("settings"), eq("questlines")]
        );
        assert_that!(settings.fallback_namespace, some(eq("pokemon")));
        assert_that!(settings.sources, elements_are![eq(".")]);
        assert_that!(settings.nesting_depth, eq(8));
    }

    #[rstest]
    #[case::forced_on(Some(true), true)]
    #[case::forced_off(Some(false), false)]
    #[case::build_default(None, cfg!(debug_assertions))]
    fn cache_enabled_resolution(#[case] flag: Option<bool>, #[case] expected: bool) {
        let settings = I18nSettings { cache_defaults: flag, ..I18nSettings::default() };

        assert_that!(settings.cache_enabled(), eq(expected));
    }

    #[rstest]
    fn validate_invalid_namespaces_empty() {
        let settings = I18nSettings {
            namespaces: vec![],
            fallback_namespace: None,
            ..I18nSettings::default()
        };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("namespaces")),
                field!(ValidationError.message, contains_substring("At least one namespace"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_namespace_with_separator() {
        let settings = I18nSettings {
            namespaces: vec!["pokemon".to_string(), "quest::lines".to_string()],
            ..I18nSettings::default()
        };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("namespaces[1]")),
                field!(ValidationError.message, contains_substring("quest::lines"))
            ]])
        );
    }

    #[rstest]
    fn validate_unknown_fallback_namespace() {
        let settings = I18nSettings {
            fallback_namespace: Some("items".to_string()),
            ..I18nSettings::default()
        };

        assert_that!(
            settings.validate(),
            err(elements_are![field!(ValidationError.field_path, eq("fallbackNamespace"))])
        );
    }

    #[rstest]
    fn validate_invalid_sources_and_depth() {
        let settings =
            I18nSettings { sources: vec![], nesting_depth: 0, ..I18nSettings::default() };

        assert_that!(
            settings.validate(),
            err(elements_are![
                field!(ValidationError.field_path, eq("sources")),
                field!(ValidationError.field_path, eq("nestingDepth"))
            ])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = I18nSettings {
            fallback_language: String::new(),
            sources: vec![],
            ..I18nSettings::default()
        };

        let errors = settings.validate().unwrap_err();
        let config_error = ConfigError::ValidationErrors(errors);

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Invalid .hashed-i18n.json settings"));
        assert_that!(error_message, contains_substring("1. fallbackLanguage"));
        assert_that!(error_message, contains_substring("2. sources"));
    }
}
