//! 語彙照合モジュール
//!
//! 正規化済みの商品名から、タイプ・ブランド・容量・特徴を語彙で探す。
//!
//! ## 照合ルール
//! 1. 語彙は文字数の長い順に試す（複合語を単語より優先）
//! 2. 前後が単語境界の箇所だけを一致とみなす
//! 3. 特徴は複数取得し、一致した範囲を空白で消して重複一致を防ぐ

use crate::candidates::volume_candidates;
use crate::types::{FieldAssignment, VolumeSource};
use crate::vocabulary::{Vocabularies, Vocabulary};
use regex::{Captures, Regex, RegexBuilder};
use tracing::debug;

/// 語の前後を単語境界で囲んだ正規表現を作る
///
/// 語彙の値はエスケープするため、記号を含んでいても安全に照合できる。
pub fn word_regex(term: &str, case_insensitive: bool) -> Option<Regex> {
    RegexBuilder::new(&format!(r"\b{}\b", regex::escape(term)))
        .case_insensitive(case_insensitive)
        .build()
        .ok()
}

/// 単語境界で一致するか判定
pub fn contains_word(text: &str, term: &str) -> bool {
    !term.is_empty()
        && word_regex(term, false)
            .map(|re| re.is_match(text))
            .unwrap_or(false)
}

/// 長い順に試して最初に一致した語彙を返す
pub fn find_longest_match(text: &str, vocabulary: &Vocabulary) -> Option<String> {
    vocabulary
        .sorted_longest_first()
        .into_iter()
        .find(|entry| contains_word(text, entry))
        .map(|entry| entry.to_string())
}

/// 特徴をすべて探す
///
/// # Arguments
/// * `text` - 正規化済みの商品名
/// * `vocabulary` - 特徴の語彙
/// * `used` - タイプ・ブランド・容量として採用済みの値（除外する）
///
/// # Returns
/// 発見順（長い順）の特徴一覧
pub fn find_all_particularities(text: &str, vocabulary: &Vocabulary, used: &[&str]) -> Vec<String> {
    let mut found = Vec::new();
    let mut remaining = text.to_string();

    for entry in vocabulary.sorted_longest_first() {
        if used.contains(&entry) {
            continue;
        }
        let Some(re) = word_regex(entry, false) else {
            continue;
        };
        if !re.is_match(&remaining) {
            continue;
        }

        found.push(entry.to_string());
        // 同じ長さの空白で消して、短い語彙が同じ箇所に再一致しないようにする
        remaining = re
            .replace_all(&remaining, |caps: &Captures| " ".repeat(caps[0].chars().count()))
            .into_owned();
    }

    found
}

/// 容量を決定する
///
/// 登録済み語彙になければ、数値+単位パターンの最長候補を採用する。
pub fn resolve_volume(text: &str, vocabulary: &Vocabulary) -> (String, VolumeSource) {
    if let Some(volume) = find_longest_match(text, vocabulary) {
        return (volume, VolumeSource::Registered);
    }

    match volume_candidates(text).into_iter().next() {
        Some(extracted) => (extracted, VolumeSource::Extracted),
        None => (String::new(), VolumeSource::Missing),
    }
}

/// 4項目を照合する
pub fn match_fields(text: &str, vocabularies: &Vocabularies) -> (FieldAssignment, VolumeSource) {
    let product_type = find_longest_match(text, &vocabularies.types).unwrap_or_default();
    let brand = find_longest_match(text, &vocabularies.brands).unwrap_or_default();
    let (volume, volume_source) = resolve_volume(text, &vocabularies.volumes);

    let used = [product_type.as_str(), brand.as_str(), volume.as_str()];
    let particularities = find_all_particularities(text, &vocabularies.particularities, &used);

    debug!(
        text,
        product_type = %product_type,
        brand = %brand,
        volume = %volume,
        particularities = particularities.len(),
        "語彙照合"
    );

    let mut fields = FieldAssignment {
        product_type,
        brand,
        volume,
        ..Default::default()
    };
    fields.set_particularities(particularities);

    (fields, volume_source)
}
