//! 未登録候補の生成
//!
//! 語彙で見つからなかった項目について、登録候補を商品名から提案する。
//! 容量以外の候補は提案のみで、自動採用はしない。

use crate::rules::{IgnoreScope, RuleSet};
use crate::types::{CandidateSets, FieldAssignment, FieldKind};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

lazy_static! {
    /// 数値+単位（小数点はカンマ・ドット、単位前のスペース可）
    static ref VOLUME_RE: Regex =
        Regex::new(r"(?i)\b\d+(?:[.,]\d+)?\s?(?:KG|MG|ML|CL|L|G)\b").unwrap();
    /// 単語に直結した数値+単位（例: FERTIL150G）
    static ref GLUED_VOLUME_RE: Regex =
        Regex::new(r"(?i)\p{L}(\d+(?:[.,]\d+)?(?:KG|MG|ML|CL|L|G))\b").unwrap();
    /// 文字だけの単語
    static ref LETTERS_RE: Regex = Regex::new(r"\b\p{L}+\b").unwrap();
    /// 数値+単位だけの語（容量として扱い済み）
    static ref NUMERIC_UNIT_RE: Regex = Regex::new(r"^\d+[A-Z]*$").unwrap();
}

const MIN_CANDIDATE_CHARS: usize = 3;

/// 種類ごとの候補生成設定
fn scope_for(kind: FieldKind) -> Option<(IgnoreScope, usize)> {
    match kind {
        FieldKind::Type => Some((IgnoreScope::TypeCandidates, 3)),
        FieldKind::Brand => Some((IgnoreScope::BrandCandidates, 3)),
        FieldKind::Particularity => Some((IgnoreScope::ParticularityCandidates, 4)),
        FieldKind::Volume => None,
    }
}

/// 重複を除き、文字数の長い順に並べる（同じ長さは発見順）
fn dedupe_longest_first(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique: Vec<String> = values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect();
    unique.sort_by_key(|v| std::cmp::Reverse(v.chars().count()));
    unique
}

/// 容量候補を抽出する
pub fn volume_candidates(text: &str) -> Vec<String> {
    let mut found: Vec<String> = VOLUME_RE
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .collect();

    found.extend(
        GLUED_VOLUME_RE
            .captures_iter(text)
            .map(|cap| cap[1].to_string()),
    );

    dedupe_longest_first(found)
}

/// 連続する2〜max_span語のフレーズ候補
fn phrase_candidates(
    tokens: &[&str],
    max_span: usize,
    excluded: &[&str],
    ignore: &dyn Fn(&str) -> bool,
) -> Vec<String> {
    let mut phrases = Vec::new();

    for start in 0..tokens.len() {
        for span in 2..=max_span {
            if start + span > tokens.len() {
                break;
            }
            let words = &tokens[start..start + span];
            let phrase = words.join(" ");

            if phrase.chars().count() >= MIN_CANDIDATE_CHARS
                && !excluded.contains(&phrase.as_str())
                && !words.iter().any(|w| ignore(w))
                && !NUMERIC_UNIT_RE.is_match(&phrase)
            {
                phrases.push(phrase);
            }
        }
    }

    phrases
}

/// 1語の候補
fn word_candidates(text: &str, excluded: &[&str], ignore: &dyn Fn(&str) -> bool) -> Vec<String> {
    LETTERS_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|w| w.chars().count() >= MIN_CANDIDATE_CHARS)
        .filter(|w| !excluded.contains(w))
        .filter(|w| !ignore(w))
        .filter(|w| !NUMERIC_UNIT_RE.is_match(w))
        .map(|w| w.to_string())
        .collect()
}

/// 1項目分の候補を生成
pub fn field_candidates(
    kind: FieldKind,
    text: &str,
    fields: &FieldAssignment,
    rules: &RuleSet,
) -> Vec<String> {
    let Some((scope, max_span)) = scope_for(kind) else {
        return volume_candidates(text);
    };

    let mut excluded: Vec<&str> = fields
        .in_label_order()
        .into_iter()
        .filter(|v| !v.is_empty())
        .collect();
    excluded.extend(fields.particularities().iter().map(|p| p.as_str()));

    let ignore = |word: &str| rules.ignore.is_ignored(scope, word);
    let tokens: Vec<&str> = text.split_whitespace().collect();

    let mut candidates = phrase_candidates(&tokens, max_span, &excluded, &ignore);
    candidates.extend(word_candidates(text, &excluded, &ignore));

    dedupe_longest_first(candidates)
}

/// 空の項目すべてについて候補を生成
///
/// 容量は語彙外から自動採用された場合も、登録用に候補を残す。
pub fn generate_candidates(
    text: &str,
    fields: &FieldAssignment,
    volume_registered: bool,
    rules: &RuleSet,
) -> CandidateSets {
    let for_kind = |kind: FieldKind| -> Vec<String> {
        let missing = match kind {
            FieldKind::Volume => !volume_registered,
            _ => fields.get(kind).is_empty(),
        };
        if missing {
            field_candidates(kind, text, fields, rules)
        } else {
            Vec::new()
        }
    };

    let sets = CandidateSets {
        product_type: for_kind(FieldKind::Type),
        brand: for_kind(FieldKind::Brand),
        particularity: for_kind(FieldKind::Particularity),
        volume: for_kind(FieldKind::Volume),
    };

    debug!(
        type_count = sets.product_type.len(),
        brand_count = sets.brand.len(),
        particularity_count = sets.particularity.len(),
        volume_count = sets.volume.len(),
        "候補生成"
    );

    sets
}
