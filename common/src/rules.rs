//! 除外語・綴り修正ルールの設定
//!
//! 候補生成と信頼度計算で使う除外語を、用途ごとに1つの表にまとめる。
//! 組み込みの表をデフォルトとし、JSONで追加分を読み込める。

use crate::error::Result;
use crate::spelling::{builtin_spelling_fixes, SpellingFix};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 冠詞・前置詞・接続詞
const FUNCTION_WORDS: &[&str] = &[
    "DE", "DA", "DO", "DAS", "DOS", "COM", "PARA", "POR", "EM", "NA", "NO", "NAS", "NOS", "A",
    "O", "AS", "OS", "UM", "UMA", "E", "OU", "MAS", "SE", "QUE", "QUAL", "QUAIS",
];

/// 特徴としては一般的すぎる語
const GENERIC_PARTICULARITY_WORDS: &[&str] = &["MAIS", "SABOR", "TEMPERO", "KITANO", "NORDESTINO"];

const GENERIC_TYPE_WORDS: &[&str] = &["MAIS", "SABOR", "PREMIUM", "TRADICIONAL", "ORIGINAL"];

const GENERIC_BRAND_WORDS: &[&str] = &[
    "MAIS", "SABOR", "PREMIUM", "TRADICIONAL", "ORIGINAL", "ZERO", "LIGHT", "DIET",
];

/// カバー率計算で重要語から外す語
const COVERAGE_IGNORED_WORDS: &[&str] = &[
    "PARA", "COM", "DE", "DA", "DO", "DAS", "DOS", "MAIS", "SABOR", "TEMPERO", "KITANO",
    "NORDESTINO",
];

/// 除外語の用途
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IgnoreScope {
    TypeCandidates,
    BrandCandidates,
    ParticularityCandidates,
    /// 信頼度: 失われた重要語の判定
    LostWords,
    /// 信頼度: カバー率の重要語判定
    Coverage,
}

/// 用途ごとの除外語表
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IgnoreTable {
    pub type_candidates: BTreeSet<String>,
    pub brand_candidates: BTreeSet<String>,
    pub particularity_candidates: BTreeSet<String>,
    pub lost_words: BTreeSet<String>,
    pub coverage: BTreeSet<String>,
}

fn word_set(groups: &[&[&str]]) -> BTreeSet<String> {
    groups
        .iter()
        .flat_map(|g| g.iter())
        .map(|w| w.to_string())
        .collect()
}

impl IgnoreTable {
    /// 組み込みの除外語表
    pub fn builtin() -> Self {
        Self {
            type_candidates: word_set(&[FUNCTION_WORDS, GENERIC_TYPE_WORDS]),
            brand_candidates: word_set(&[FUNCTION_WORDS, GENERIC_BRAND_WORDS]),
            particularity_candidates: word_set(&[FUNCTION_WORDS, GENERIC_PARTICULARITY_WORDS]),
            lost_words: word_set(&[FUNCTION_WORDS]),
            coverage: word_set(&[COVERAGE_IGNORED_WORDS]),
        }
    }

    pub fn get(&self, scope: IgnoreScope) -> &BTreeSet<String> {
        match scope {
            IgnoreScope::TypeCandidates => &self.type_candidates,
            IgnoreScope::BrandCandidates => &self.brand_candidates,
            IgnoreScope::ParticularityCandidates => &self.particularity_candidates,
            IgnoreScope::LostWords => &self.lost_words,
            IgnoreScope::Coverage => &self.coverage,
        }
    }

    /// 除外語か判定
    pub fn is_ignored(&self, scope: IgnoreScope, word: &str) -> bool {
        self.get(scope).contains(word)
    }

    /// 別の表の語を追加
    pub fn merge(&mut self, other: &IgnoreTable) {
        let upper = |set: &BTreeSet<String>| -> Vec<String> {
            set.iter().map(|w| w.trim().to_uppercase()).collect()
        };
        self.type_candidates.extend(upper(&other.type_candidates));
        self.brand_candidates.extend(upper(&other.brand_candidates));
        self.particularity_candidates
            .extend(upper(&other.particularity_candidates));
        self.lost_words.extend(upper(&other.lost_words));
        self.coverage.extend(upper(&other.coverage));
    }
}

/// 正規化ルール一式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleSet {
    /// 宣言順に適用される綴り修正
    pub spelling_fixes: Vec<SpellingFix>,
    pub ignore: IgnoreTable,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            spelling_fixes: builtin_spelling_fixes(),
            ignore: IgnoreTable::builtin(),
        }
    }
}

impl RuleSet {
    /// 空のルール（追加分の読み込み用）
    pub fn empty() -> Self {
        Self {
            spelling_fixes: Vec::new(),
            ignore: IgnoreTable::default(),
        }
    }

    /// JSON文字列から追加分を読み込み、組み込みルールにマージ
    pub fn from_json(json: &str) -> Result<Self> {
        let overlay: RuleSet = serde_json::from_str(json)?;
        let mut rules = Self::default();
        rules.merge(&overlay);
        Ok(rules)
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// ルールをマージ（同じ誤記の修正は後から追加した方が優先）
    pub fn merge(&mut self, other: &RuleSet) {
        for fix in &other.spelling_fixes {
            let wrong = fix.wrong.trim().to_uppercase();
            let right = fix.right.trim().to_uppercase();
            if wrong.is_empty() {
                continue;
            }
            match self.spelling_fixes.iter_mut().find(|f| f.wrong == wrong) {
                Some(existing) => existing.right = right,
                None => self.spelling_fixes.push(SpellingFix { wrong, right }),
            }
        }
        self.ignore.merge(&other.ignore);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_scopes_differ() {
        let table = IgnoreTable::builtin();
        assert!(table.is_ignored(IgnoreScope::ParticularityCandidates, "SABOR"));
        assert!(!table.is_ignored(IgnoreScope::ParticularityCandidates, "PREMIUM"));
        assert!(table.is_ignored(IgnoreScope::TypeCandidates, "PREMIUM"));
        assert!(table.is_ignored(IgnoreScope::BrandCandidates, "DIET"));
        assert!(table.is_ignored(IgnoreScope::LostWords, "QUAIS"));
        assert!(!table.is_ignored(IgnoreScope::LostWords, "SABOR"));
        assert!(table.is_ignored(IgnoreScope::Coverage, "NORDESTINO"));
        assert!(!table.is_ignored(IgnoreScope::Coverage, "POR"));
    }

    #[test]
    fn test_from_json_extends_builtin() {
        let json = r#"{
            "spellingFixes": [{"wrong": "docedeleite", "right": "doce de leite"}],
            "ignore": {"coverage": ["lata"]}
        }"#;
        let rules = RuleSet::from_json(json).unwrap();

        assert!(rules.ignore.is_ignored(IgnoreScope::Coverage, "LATA"));
        assert!(rules.ignore.is_ignored(IgnoreScope::Coverage, "SABOR"));
        let last = rules.spelling_fixes.last().unwrap();
        assert_eq!(last.wrong, "DOCEDELEITE");
        assert_eq!(last.right, "DOCE DE LEITE");
    }

    #[test]
    fn test_merge_overrides_same_fix() {
        let mut rules = RuleSet::default();
        let count = rules.spelling_fixes.len();
        let mut overlay = RuleSet::empty();
        overlay.spelling_fixes.push(SpellingFix {
            wrong: "AOLEITE".into(),
            right: "AO  LEITE".into(),
        });
        rules.merge(&overlay);

        assert_eq!(rules.spelling_fixes.len(), count);
        let fix = rules.spelling_fixes.iter().find(|f| f.wrong == "AOLEITE").unwrap();
        assert_eq!(fix.right, "AO  LEITE");
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(RuleSet::from_json("{").is_err());
    }
}
