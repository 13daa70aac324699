//! `.hashed-i18n.json` の読み込み

use std::io::ErrorKind;
use std::path::Path;

use super::{
    ConfigError,
    I18nSettings,
};

/// ワークスペースルート直下の設定ファイル名
pub(super) const CONFIG_FILE_NAME: &str = ".hashed-i18n.json";

/// ワークスペースの設定ファイルを読み込む
///
/// 検証は呼び出し側 ([`super::ConfigManager`]) で行う。
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルをパースできた
/// - `Ok(None)`: 設定ファイルがない
/// - `Err(ConfigError)`: 読み込みまたはパースに失敗
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<I18nSettings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    let content = match std::fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %config_path.display(), "Settings file not found");
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };

    tracing::debug!(path = %config_path.display(), "Reading settings file");
    Ok(Some(serde_json::from_str(&content)?))
}
