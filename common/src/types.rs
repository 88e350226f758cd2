//! 解析結果の型定義
//!
//! CLIとバッチ処理で共有される型:
//! - ParseInput: 1行分の入力（商品名 + 外部ID）
//! - FieldAssignment: 語彙照合で決まった4項目
//! - ParseResult: 最終出力（ラベル・パターン・信頼度・候補）

use serde::{Deserialize, Serialize};

/// 語彙の種類（TMPVの4項目）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Type,
    Brand,
    Particularity,
    Volume,
}

impl FieldKind {
    /// ラベルの並び順
    pub const ALL: [FieldKind; 4] = [
        FieldKind::Type,
        FieldKind::Brand,
        FieldKind::Particularity,
        FieldKind::Volume,
    ];

    /// 名前から種類を取得（英語・ポルトガル語どちらも可）
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "type" | "tipo" | "tipos" => Some(FieldKind::Type),
            "brand" | "marca" | "marcas" => Some(FieldKind::Brand),
            "particularity" | "particularidade" | "particularidades" => {
                Some(FieldKind::Particularity)
            }
            "volume" | "volumes" => Some(FieldKind::Volume),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Type => write!(f, "タイプ"),
            FieldKind::Brand => write!(f, "ブランド"),
            FieldKind::Particularity => write!(f, "特徴"),
            FieldKind::Volume => write!(f, "容量"),
        }
    }
}

impl std::str::FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            format!("Unknown kind: {}. Use type, brand, particularity, or volume", s)
        })
    }
}

/// 略語ルール（略語 → 正式表記）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbbreviationRule {
    pub short: String,
    pub full: String,
}

impl AbbreviationRule {
    pub fn new(short: impl Into<String>, full: impl Into<String>) -> Self {
        Self {
            short: short.into(),
            full: full.into(),
        }
    }
}

/// 入力1行（商品名と、解釈しない外部ID）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseInput {
    pub name: String,
    /// EANなど。コアでは参照しない
    #[serde(default)]
    pub identifier: String,
}

impl ParseInput {
    pub fn new(name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier: identifier.into(),
        }
    }
}

/// 容量の決定方法
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VolumeSource {
    /// 登録済み語彙に一致
    Registered,
    /// 数値+単位パターンから自動採用
    Extracted,
    /// 見つからない
    #[default]
    Missing,
}

/// 照合で決まった4項目
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldAssignment {
    #[serde(rename = "type")]
    pub product_type: String,
    pub brand: String,
    /// 見つかった特徴をスペース区切りで連結したもの
    pub(crate) particularity: String,
    /// 発見順（長いもの優先）の特徴一覧
    pub(crate) particularities: Vec<String>,
    pub volume: String,
}

impl FieldAssignment {
    /// 種類ごとの値
    pub fn get(&self, kind: FieldKind) -> &str {
        match kind {
            FieldKind::Type => &self.product_type,
            FieldKind::Brand => &self.brand,
            FieldKind::Particularity => &self.particularity,
            FieldKind::Volume => &self.volume,
        }
    }

    /// TMPV順の4項目
    pub fn in_label_order(&self) -> [&str; 4] {
        [
            &self.product_type,
            &self.brand,
            &self.particularity,
            &self.volume,
        ]
    }

    pub fn particularity(&self) -> &str {
        &self.particularity
    }

    pub fn particularities(&self) -> &[String] {
        &self.particularities
    }

    /// 特徴一覧を設定（連結文字列も更新）
    ///
    /// 2つの特徴フィールドはここでのみ書き換える。
    pub fn set_particularities(&mut self, parts: Vec<String>) {
        self.particularity = parts.join(" ");
        self.particularities = parts;
    }
}

/// 未登録項目の候補（長い順）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateSets {
    #[serde(rename = "type")]
    pub product_type: Vec<String>,
    pub brand: Vec<String>,
    pub particularity: Vec<String>,
    pub volume: Vec<String>,
}

impl CandidateSets {
    pub fn get(&self, kind: FieldKind) -> &[String] {
        match kind {
            FieldKind::Type => &self.product_type,
            FieldKind::Brand => &self.brand,
            FieldKind::Particularity => &self.particularity,
            FieldKind::Volume => &self.volume,
        }
    }

    pub fn is_empty(&self) -> bool {
        FieldKind::ALL.iter().all(|k| self.get(*k).is_empty())
    }
}

/// 信頼度の内訳
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfidenceReport {
    /// 最終スコア（0.0〜100.0、小数1桁）
    pub confidence: f64,
    /// 項目充足率によるベーススコア
    pub base: f64,
    pub char_factor: i32,
    pub lost_words_factor: i32,
    pub added_words_factor: i32,
    pub coverage_factor: i32,
    pub structure_factor: i32,
    pub lost_words: Vec<String>,
    pub important_lost_words: Vec<String>,
    pub added_words: Vec<String>,
    /// ラベル文字数 / 元の文字数（小数2桁）
    pub char_ratio: f64,
    /// 重要語カバー率（%、小数1桁）
    pub coverage_percent: f64,
}

/// 結果パターン
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Pattern {
    /// 4項目すべて
    Complete,
    /// タイプ+ブランド+容量（特徴なし）
    Partial,
    #[default]
    Incomplete,
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pattern::Complete => write!(f, "COMPLETE"),
            Pattern::Partial => write!(f, "PARTIAL"),
            Pattern::Incomplete => write!(f, "INCOMPLETE"),
        }
    }
}

/// 1件分の最終出力
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub original_name: String,

    #[serde(default)]
    pub identifier: String,

    /// 略語展開・綴り修正後の大文字テキスト
    #[serde(default)]
    pub normalized_name: String,

    #[serde(default)]
    pub fields: FieldAssignment,

    #[serde(default)]
    pub volume_source: VolumeSource,

    /// TMPVラベル
    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub pattern: Pattern,

    #[serde(default)]
    pub confidence: ConfidenceReport,

    #[serde(default)]
    pub candidates: CandidateSets,
}
