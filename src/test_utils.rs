//! テスト用ユーティリティ
//!
//! 複数のテストモジュールで使用される共通のヘルパーを提供します。
#![cfg(test)]

use std::cell::RefCell;
use std::collections::{
    BTreeMap,
    HashMap,
};

use serde_json::Value;

use crate::store::catalog::LocaleBackend;

/// メモリ上のロケールドキュメントを返すバックエンド
///
/// 読み込み要求を記録するので、どの言語・namespace が取得されたかを検証できる。
#[derive(Debug, Default, Clone)]
pub(crate) struct MemoryBackend {
    documents: HashMap<(String, String), Value>,
    loads: RefCell<Vec<(String, String)>>,
}

impl MemoryBackend {
    /// ドキュメントを追加する
    pub(crate) fn with(mut self, language: &str, namespace: &str, document: Value) -> Self {
        self.documents.insert((language.to_string(), namespace.to_string()), document);
        self
    }

    /// これまでの読み込み要求（言語, namespace）
    pub(crate) fn loads(&self) -> Vec<(String, String)> {
        self.loads.borrow().clone()
    }
}

impl LocaleBackend for MemoryBackend {
    fn load(&self, language: &str, namespace: &str) -> Option<Value> {
        let key = (language.to_string(), namespace.to_string());
        self.loads.borrow_mut().push(key.clone());
        self.documents.get(&key).cloned()
    }
}

/// テスト用のフラットなキーと値のマップを作成する
pub(crate) fn flat(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries.iter().map(|(key, value)| ((*key).to_string(), (*value).to_string())).collect()
}
