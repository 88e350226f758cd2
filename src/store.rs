//! 語彙ストアモジュール
//!
//! タイプ・ブランド・特徴・容量の語彙と略語表をJSONファイルに保存する。
//! 解析時はスナップショット（`Vocabularies`のクローン）をコアに渡す。

use crate::error::{Result, TmpvError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tmpv_common::{AbbreviationRule, FieldKind, ImportSummary, Vocabularies};
use tracing::{debug, warn};

/// ストアファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyStore {
    /// バージョン（互換性チェック用）
    version: u32,
    vocabularies: Vocabularies,
}

impl VocabularyStore {
    const CURRENT_VERSION: u32 = 1;

    /// ストアを読み込み（ファイルがなければ空）
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "語彙ストアが存在しないため空で開始");
            return Ok(Self::default());
        }

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let store: VocabularyStore = serde_json::from_reader(reader)
            .map_err(|e| TmpvError::Store(format!("{}: {}", path.display(), e)))?;

        // バージョンチェック
        if store.version != Self::CURRENT_VERSION {
            warn!(
                found = store.version,
                expected = Self::CURRENT_VERSION,
                "語彙ストアのバージョン不一致、空で開始します"
            );
            return Ok(Self::default());
        }

        Ok(store)
    }

    /// ストアを保存
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// 解析用のスナップショット
    pub fn snapshot(&self) -> Vocabularies {
        self.vocabularies.clone()
    }

    pub fn vocabularies(&self) -> &Vocabularies {
        &self.vocabularies
    }

    /// 一覧（登録順）
    pub fn list(&self, kind: FieldKind) -> &[String] {
        self.vocabularies.get(kind).entries()
    }

    /// 追加（新規ならtrue）
    pub fn add(&mut self, kind: FieldKind, value: &str) -> bool {
        self.vocabularies.get_mut(kind).insert(value)
    }

    /// 削除（存在すればtrue）
    pub fn remove(&mut self, kind: FieldKind, value: &str) -> bool {
        self.vocabularies.get_mut(kind).remove(value)
    }

    /// 1行1件のテキストを取り込み
    pub fn import_text(&mut self, kind: FieldKind, content: &str) -> ImportSummary {
        self.vocabularies.get_mut(kind).import_lines(content)
    }

    pub fn abbreviations(&self) -> &[AbbreviationRule] {
        &self.vocabularies.abbreviations
    }

    pub fn add_abbreviation(&mut self, short: &str, full: &str) -> Result<AbbreviationRule> {
        Ok(self.vocabularies.add_abbreviation(short, full)?.clone())
    }

    pub fn remove_abbreviation(&mut self, short: &str) -> bool {
        self.vocabularies.remove_abbreviation(short)
    }

    /// 初期略語表を登録し、(追加数, 既存数)を返す
    pub fn seed_default_abbreviations(&mut self) -> (usize, usize) {
        self.vocabularies
            .seed_abbreviations(&tmpv_common::default_abbreviations())
    }
}

impl Default for VocabularyStore {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            vocabularies: Vocabularies::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove() {
        let mut store = VocabularyStore::default();
        assert!(store.add(FieldKind::Brand, "heineken"));
        assert!(!store.add(FieldKind::Brand, "HEINEKEN"));
        assert_eq!(store.list(FieldKind::Brand), &["HEINEKEN".to_string()]);
        assert!(store.list(FieldKind::Type).is_empty());
        assert!(store.remove(FieldKind::Brand, "Heineken"));
    }

    #[test]
    fn test_seed_default_abbreviations_twice() {
        let mut store = VocabularyStore::default();
        assert_eq!(store.seed_default_abbreviations(), (16, 0));
        assert_eq!(store.seed_default_abbreviations(), (0, 16));
    }

    #[test]
    fn test_add_abbreviation_duplicate() {
        let mut store = VocabularyStore::default();
        store.add_abbreviation("cerv", "cerveja").unwrap();
        let err = store.add_abbreviation("CERV", "X").unwrap_err();
        assert!(matches!(err, TmpvError::Core(_)));
    }
}
