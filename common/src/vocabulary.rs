//! 参照語彙モジュール
//!
//! タイプ・ブランド・特徴・容量の語彙と略語表を保持する。
//! 値は常にトリム済みの大文字で、種類ごとに重複しない。

use crate::error::{Error, Result};
use crate::types::{AbbreviationRule, FieldKind};
use serde::{Deserialize, Serialize};

/// 登録順を保持する重複なしの語彙
///
/// 読み込み時も`insert`を通るため、手編集されたファイルでも正規化される。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    entries: Vec<String>,
}

/// 一括取り込みの結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub added: Vec<String>,
    pub already_present: Vec<String>,
    pub total_processed: usize,
}

/// 語彙用に正規化（トリム + 大文字化）
pub fn normalize_entry(value: &str) -> String {
    value.trim().to_uppercase()
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// 値を追加（新規ならtrue）
    ///
    /// 空文字列は登録しない。
    pub fn insert(&mut self, value: &str) -> bool {
        let value = normalize_entry(value);
        if value.is_empty() || self.contains(&value) {
            return false;
        }
        self.entries.push(value);
        true
    }

    /// 値を削除（存在すればtrue）
    pub fn remove(&mut self, value: &str) -> bool {
        let value = normalize_entry(value);
        let before = self.entries.len();
        self.entries.retain(|e| e != &value);
        self.entries.len() != before
    }

    pub fn contains(&self, value: &str) -> bool {
        self.entries.iter().any(|e| e == value)
    }

    /// 1行1件のテキストから取り込み
    pub fn import_lines(&mut self, content: &str) -> ImportSummary {
        let mut summary = ImportSummary::default();

        for line in content.lines() {
            summary.total_processed += 1;
            let value = normalize_entry(line);
            if value.is_empty() {
                continue;
            }
            if self.insert(&value) {
                summary.added.push(value);
            } else {
                summary.already_present.push(value);
            }
        }

        summary
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 文字数の長い順（同じ長さなら登録順）
    pub fn sorted_longest_first(&self) -> Vec<&str> {
        let mut sorted: Vec<&str> = self.iter().collect();
        sorted.sort_by_key(|e| std::cmp::Reverse(e.chars().count()));
        sorted
    }
}

impl<S: AsRef<str>> FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut vocab = Vocabulary::new();
        for value in iter {
            vocab.insert(value.as_ref());
        }
        vocab
    }
}

impl From<Vec<String>> for Vocabulary {
    fn from(values: Vec<String>) -> Self {
        values.into_iter().collect()
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.entries
    }
}

/// 1回の解析に渡す語彙一式
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabularies {
    pub types: Vocabulary,
    pub brands: Vocabulary,
    pub particularities: Vocabulary,
    pub volumes: Vocabulary,
    /// 登録順に適用される
    pub abbreviations: Vec<AbbreviationRule>,
}

impl Vocabularies {
    pub fn get(&self, kind: FieldKind) -> &Vocabulary {
        match kind {
            FieldKind::Type => &self.types,
            FieldKind::Brand => &self.brands,
            FieldKind::Particularity => &self.particularities,
            FieldKind::Volume => &self.volumes,
        }
    }

    pub fn get_mut(&mut self, kind: FieldKind) -> &mut Vocabulary {
        match kind {
            FieldKind::Type => &mut self.types,
            FieldKind::Brand => &mut self.brands,
            FieldKind::Particularity => &mut self.particularities,
            FieldKind::Volume => &mut self.volumes,
        }
    }

    /// 略語を追加
    ///
    /// 略語・正式表記のどちらかが空、または略語が登録済みならエラー。
    pub fn add_abbreviation(&mut self, short: &str, full: &str) -> Result<&AbbreviationRule> {
        let short = normalize_entry(short);
        let full = normalize_entry(full);

        if short.is_empty() || full.is_empty() {
            return Err(Error::Vocabulary("略語と正式表記は空にできません".into()));
        }
        if self.abbreviations.iter().any(|r| r.short == short) {
            return Err(Error::Vocabulary(format!("略語は登録済みです: {}", short)));
        }

        self.abbreviations.push(AbbreviationRule::new(short, full));
        Ok(&self.abbreviations[self.abbreviations.len() - 1])
    }

    /// 略語を削除（存在すればtrue）
    pub fn remove_abbreviation(&mut self, short: &str) -> bool {
        let short = normalize_entry(short);
        let before = self.abbreviations.len();
        self.abbreviations.retain(|r| r.short != short);
        self.abbreviations.len() != before
    }

    /// 未登録の略語だけを追加し、(追加数, 既存数)を返す
    pub fn seed_abbreviations(&mut self, rules: &[AbbreviationRule]) -> (usize, usize) {
        let mut added = 0;
        let mut existing = 0;
        for rule in rules {
            match self.add_abbreviation(&rule.short, &rule.full) {
                Ok(_) => added += 1,
                Err(_) => existing += 1,
            }
        }
        (added, existing)
    }
}
