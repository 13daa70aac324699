//! ワークスペース単位の設定を保持するモジュール

use std::path::PathBuf;

use super::{
    ConfigError,
    I18nSettings,
    loader,
};

/// 読み込み済みの設定とワークスペースルート
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 検証済みの設定
    settings: I18nSettings,

    /// ロケールソースの基準ディレクトリ
    workspace_root: Option<PathBuf>,
}

impl ConfigManager {
    /// デフォルト設定・ルートなしで作成
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `.hashed-i18n.json` を読み込んで検証する
    ///
    /// 設定ファイルがなければデフォルト設定を使う。失敗した場合は以前の状態を保つ。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, workspace_root: Option<PathBuf>) -> Result<(), ConfigError> {
        let settings = match &workspace_root {
            Some(root) => loader::load_from_workspace(root)?.unwrap_or_else(|| {
                tracing::debug!(root = %root.display(), "No settings file, using defaults");
                I18nSettings::default()
            }),
            None => I18nSettings::default(),
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        tracing::debug!(?settings, "Settings loaded");
        self.settings = settings;
        self.workspace_root = workspace_root;
        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &I18nSettings {
        &self.settings
    }

    /// 設定済みのロケールソースをワークスペースルート基準のパスに解決する
    #[must_use]
    pub fn source_roots(&self) -> Vec<PathBuf> {
        self.settings
            .sources
            .iter()
            .map(|source| {
                self.workspace_root
                    .as_ref()
                    .map_or_else(|| PathBuf::from(source), |root| root.join(source))
            })
            .collect()
    }
}
