//! 商品名の解析パイプライン
//!
//! 生の商品名 → 略語展開 → 綴り修正 → 語彙照合 → 候補生成 → ラベル → 信頼度

use crate::abbreviation::expand_abbreviations;
use crate::candidates::generate_candidates;
use crate::confidence::score;
use crate::label::{classify, compose_label};
use crate::matcher::match_fields;
use crate::rules::RuleSet;
use crate::spelling::normalize_spelling;
use crate::types::{ParseInput, ParseResult, VolumeSource};
use crate::vocabulary::Vocabularies;
use tracing::debug;

/// 組み込みルールで解析する
pub fn parse(input: &ParseInput, vocabularies: &Vocabularies) -> ParseResult {
    parse_with_rules(input, vocabularies, &RuleSet::default())
}

/// ルールを指定して解析する
///
/// どの入力に対しても結果を返す（失敗しない）。
pub fn parse_with_rules(
    input: &ParseInput,
    vocabularies: &Vocabularies,
    rules: &RuleSet,
) -> ParseResult {
    let expanded = expand_abbreviations(&input.name, &vocabularies.abbreviations);
    let normalized = normalize_spelling(&expanded, &rules.spelling_fixes);

    let (fields, volume_source) = match_fields(&normalized, vocabularies);
    let candidates = generate_candidates(
        &normalized,
        &fields,
        volume_source == VolumeSource::Registered,
        rules,
    );

    let label = compose_label(&fields);
    let pattern = classify(&fields);
    let confidence = score(&normalized, &fields, rules);

    debug!(
        identifier = %input.identifier,
        label = %label,
        pattern = %pattern,
        confidence = confidence.confidence,
        "解析完了"
    );

    ParseResult {
        original_name: input.name.clone(),
        identifier: input.identifier.clone(),
        normalized_name: normalized,
        fields,
        volume_source,
        label,
        pattern,
        confidence,
        candidates,
    }
}

/// 商品名だけを解析する
pub fn parse_name(name: &str, vocabularies: &Vocabularies) -> ParseResult {
    parse(&ParseInput::new(name, ""), vocabularies)
}
