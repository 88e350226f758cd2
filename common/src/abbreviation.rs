//! 略語展開モジュール
//!
//! 商品名を大文字化し、登録済みの略語を単語単位で正式表記に置換する。
//! ルールは登録順に適用されるため、重なり合うルールの結果は順序に依存する。

use crate::matcher::word_regex;
use crate::types::AbbreviationRule;
use regex::NoExpand;
use tracing::trace;

/// 略語を展開した大文字テキストを返す
pub fn expand_abbreviations(text: &str, rules: &[AbbreviationRule]) -> String {
    let mut expanded = text.to_uppercase();

    for rule in rules {
        if rule.short.is_empty() {
            continue;
        }
        let Some(re) = word_regex(&rule.short, true) else {
            continue;
        };
        if re.is_match(&expanded) {
            trace!(short = %rule.short, full = %rule.full, "略語を展開");
            expanded = re
                .replace_all(&expanded, NoExpand(rule.full.as_str()))
                .into_owned();
        }
    }

    expanded
}

/// 初期登録用の略語表
pub fn default_abbreviations() -> Vec<AbbreviationRule> {
    [
        ("CERV", "CERVEJA"),
        ("C/", "COM"),
        ("REFRIG", "REFRIGERANTE"),
        ("CHOC", "CHOCOLATE"),
        ("CERVEJ", "CERVEJA"),
        ("REFRIGER", "REFRIGERANTE"),
        ("CHOCOL", "CHOCOLATE"),
        ("ACUC", "ACUCAR"),
        ("ARRO", "ARROZ"),
        ("FEIJ", "FEIJAO"),
        ("CAF", "CAFE"),
        ("CAFE", "CAFE"),
        ("LT", "LATA"),
        ("ML", "MILILITROS"),
        ("KG", "QUILOGRAMA"),
        ("G", "GRAMA"),
    ]
    .into_iter()
    .map(|(short, full)| AbbreviationRule::new(short, full))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(pairs: &[(&str, &str)]) -> Vec<AbbreviationRule> {
        pairs
            .iter()
            .map(|(s, f)| AbbreviationRule::new(*s, *f))
            .collect()
    }

    #[test]
    fn test_expand_uppercases_without_rules() {
        assert_eq!(expand_abbreviations("Cerveja Heineken", &[]), "CERVEJA HEINEKEN");
    }

    #[test]
    fn test_expand_whole_words_only() {
        let rules = rules(&[("CERV", "CERVEJA"), ("LT", "LATA")]);
        assert_eq!(
            expand_abbreviations("cerv heineken lt 350ml", &rules),
            "CERVEJA HEINEKEN LATA 350ML"
        );
        // 単語の一部は置換しない
        assert_eq!(expand_abbreviations("CERVEJARIA ALTO", &rules), "CERVEJARIA ALTO");
    }

    #[test]
    fn test_expand_is_case_insensitive() {
        let rules = rules(&[("choc", "CHOCOLATE")]);
        assert_eq!(expand_abbreviations("Choc Lacta", &rules), "CHOCOLATE LACTA");
    }

    #[test]
    fn test_expand_replacement_is_literal() {
        let rules = rules(&[("X", "$1 DOLAR")]);
        assert_eq!(expand_abbreviations("X", &rules), "$1 DOLAR");
    }

    #[test]
    fn test_expand_order_dependent() {
        // 先に登録したルールの結果に後のルールが適用される
        let rules = rules(&[("REFRIG", "REFRIG ZERO"), ("ZERO", "0")]);
        assert_eq!(expand_abbreviations("REFRIG", &rules), "REFRIG 0");
    }

    #[test]
    fn test_expand_punctuated_short_form() {
        let rules = rules(&[("C/", "COM")]);
        // 末尾が記号の略語は、直後が単語文字のときだけ境界が成立する
        assert_eq!(expand_abbreviations("CAFE C/LEITE", &rules), "CAFE COMLEITE");
        assert_eq!(expand_abbreviations("CAFE C/ LEITE", &rules), "CAFE C/ LEITE");
    }

    #[test]
    fn test_default_abbreviations() {
        let defaults = default_abbreviations();
        assert_eq!(defaults.len(), 16);
        assert_eq!(defaults[0], AbbreviationRule::new("CERV", "CERVEJA"));
    }
}
