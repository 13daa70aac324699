//! hashed-i18n
//!
//! デフォルト文言のハッシュで翻訳キーを作り、翻訳者向けのドキュメントとしてエクスポートする

/// 既定文言キャッシュ
pub mod cache;
/// 設定
pub mod config;
/// エラー型
pub mod error;
/// 翻訳者向けエクスポート
pub mod export;
/// キーのハッシュ
pub mod hash;
/// 翻訳の参照
pub mod store;
/// テスト用ユーティリティ
mod test_utils;

pub use cache::DefaultValueCache;
pub use error::TranslationError;
pub use export::{
    ExportOptions,
    ReferenceLinker,
};
pub use hash::{
    hash_text,
    hashed_key,
};
pub use store::{
    TranslateOptions,
    Translated,
    TranslationStore,
};
