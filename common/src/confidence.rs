//! 信頼度計算モジュール
//!
//! 生成したラベルがどの程度信頼できるかを0〜100で評価する。
//!
//! ## 評価要素
//! 1. 項目充足率（ベース）
//! 2. 文字数比（ラベル / 元の名前）
//! 3. 失われた重要語・追加された語
//! 4. 重要語のカバー率
//! 5. 構造ボーナス

use crate::label::compose_label;
use crate::rules::{IgnoreScope, RuleSet};
use crate::types::{ConfidenceReport, FieldAssignment};
use std::collections::HashSet;

const LOST_WORD_PENALTY: i32 = 8;
const ADDED_WORD_PENALTY: i32 = 3;
const MIN_IMPORTANT_CHARS: usize = 3;
const CORE_STRUCTURE_BONUS: i32 = 5;
const PARTICULARITY_BONUS: i32 = 3;

fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

/// 項目充足率（特徴は見つかった場合のみ分母に含める）
pub fn base_score(fields: &FieldAssignment) -> f64 {
    let mut identified = 0u32;
    let mut total = 3u32;

    for value in [&fields.product_type, &fields.brand, &fields.volume] {
        if !value.is_empty() {
            identified += 1;
        }
    }
    if !fields.particularity().is_empty() {
        identified += 1;
        total += 1;
    }

    identified as f64 / total as f64 * 100.0
}

/// 比率に応じた段階的な減点
fn tiered_penalty(ratio: f64) -> i32 {
    if ratio < 0.5 {
        -20
    } else if ratio < 0.7 {
        -10
    } else if ratio < 0.9 {
        -5
    } else {
        0
    }
}

/// 文字数比の減点（長すぎるラベルも減点）
fn char_ratio_factor(ratio: f64) -> i32 {
    if ratio <= 1.2 {
        tiered_penalty(ratio)
    } else {
        -5
    }
}

fn char_count_without_spaces(text: &str) -> usize {
    text.chars().filter(|c| *c != ' ').count()
}

/// 空白区切りの単語（重複なし、出現順）
fn unique_words(text: &str) -> Vec<&str> {
    let mut seen = HashSet::new();
    text.split_whitespace().filter(|w| seen.insert(*w)).collect()
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// 信頼度を計算する
///
/// # Arguments
/// * `name` - 照合に使った正規化済みの商品名
/// * `fields` - 照合結果
/// * `rules` - 除外語表
pub fn score(name: &str, fields: &FieldAssignment, rules: &RuleSet) -> ConfidenceReport {
    let base = base_score(fields);
    let label = compose_label(fields);

    if label.is_empty() {
        return ConfidenceReport {
            base: round_to(base, 1),
            ..Default::default()
        };
    }

    // 文字数比
    let original_chars = char_count_without_spaces(name);
    let (char_ratio, char_factor) = if original_chars > 0 {
        let ratio = char_count_without_spaces(&label) as f64 / original_chars as f64;
        (ratio, char_ratio_factor(ratio))
    } else {
        (0.0, 0)
    };

    // 失われた語・追加された語
    let original_words = unique_words(name);
    let label_words = unique_words(&label);
    let original_set: HashSet<&str> = original_words.iter().copied().collect();
    let label_set: HashSet<&str> = label_words.iter().copied().collect();

    let lost: Vec<&str> = original_words
        .iter()
        .copied()
        .filter(|w| !label_set.contains(w))
        .collect();
    let important_lost: Vec<&str> = lost
        .iter()
        .copied()
        .filter(|w| w.chars().count() >= MIN_IMPORTANT_CHARS)
        .filter(|w| !rules.ignore.is_ignored(IgnoreScope::LostWords, w))
        .collect();
    let added: Vec<&str> = label_words
        .iter()
        .copied()
        .filter(|w| !original_set.contains(w))
        .collect();

    let lost_words_factor = -(important_lost.len() as i32) * LOST_WORD_PENALTY;
    let added_words_factor = -(added.len() as i32) * ADDED_WORD_PENALTY;

    // カバー率（ラベルまたはいずれかの項目に部分文字列として含まれれば可）
    let important: Vec<&str> = original_words
        .iter()
        .copied()
        .filter(|w| w.chars().count() >= MIN_IMPORTANT_CHARS)
        .filter(|w| !rules.ignore.is_ignored(IgnoreScope::Coverage, w))
        .collect();
    let covered = important
        .iter()
        .filter(|w| {
            label.contains(*w)
                || fields
                    .in_label_order()
                    .iter()
                    .any(|field| !field.is_empty() && field.contains(*w))
        })
        .count();
    let (coverage, coverage_factor) = if important.is_empty() {
        (0.0, 0)
    } else {
        let coverage = covered as f64 / important.len() as f64;
        (coverage, tiered_penalty(coverage))
    };

    // 構造ボーナス
    let mut structure_factor = 0;
    if !fields.product_type.is_empty() && !fields.brand.is_empty() && !fields.volume.is_empty() {
        structure_factor += CORE_STRUCTURE_BONUS;
    }
    if !fields.particularity().is_empty() {
        structure_factor += PARTICULARITY_BONUS;
    }

    let total = base
        + (char_factor + lost_words_factor + added_words_factor + coverage_factor + structure_factor)
            as f64;

    ConfidenceReport {
        confidence: round_to(total.clamp(0.0, 100.0), 1),
        base: round_to(base, 1),
        char_factor,
        lost_words_factor,
        added_words_factor,
        coverage_factor,
        structure_factor,
        lost_words: to_strings(&lost),
        important_lost_words: to_strings(&important_lost),
        added_words: to_strings(&added),
        char_ratio: round_to(char_ratio, 2),
        coverage_percent: round_to(coverage * 100.0, 1),
    }
}
