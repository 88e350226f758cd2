//! TMPV Common Library
//!
//! 商品名をTMPV（タイプ・ブランド・特徴・容量）ラベルに正規化するコア。
//! 入出力は行わず、語彙は呼び出しごとに引数で受け取る。

pub mod types;
pub mod error;
pub mod vocabulary;
pub mod abbreviation;
pub mod spelling;
pub mod rules;
pub mod matcher;
pub mod candidates;
pub mod confidence;
pub mod label;
pub mod parser;
pub mod export;

pub use types::{
    AbbreviationRule, CandidateSets, ConfidenceReport, FieldAssignment, FieldKind, ParseInput,
    ParseResult, Pattern, VolumeSource,
};
pub use error::{Error, Result};
pub use vocabulary::{ImportSummary, Vocabularies, Vocabulary};
pub use abbreviation::{default_abbreviations, expand_abbreviations};
pub use spelling::{normalize_spelling, SpellingFix};
pub use rules::{IgnoreScope, IgnoreTable, RuleSet};
pub use parser::{parse, parse_name, parse_with_rules};
