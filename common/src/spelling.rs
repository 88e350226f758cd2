//! 綴り修正モジュール
//!
//! スペース抜けで連結された語（例: FRUTASVERMELHAS）を正しい表記に戻す。
//! 単語境界を見ない部分文字列置換で、表の宣言順に適用する。

use serde::{Deserialize, Serialize};

/// 連結誤記とその修正
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellingFix {
    pub wrong: String,
    pub right: String,
}

/// 既知の連結誤記（宣言順）
const BUILTIN_FIXES: &[(&str, &str)] = &[
    ("FRUTASVERMELHAS", "FRUTAS VERMELHAS"),
    ("FRUTASAMARELAS", "FRUTAS AMARELAS"),
    ("FARINHALACTEA", "FARINHA LACTEA"),
    ("LEITECONDENSADO", "LEITE CONDENSADO"),
    ("CREMEDELEITE", "CREME DE LEITE"),
    ("DOCEDELEITE", "DOCE DE LEITE"),
    ("AOLEITE", "AO LEITE"),
    ("ZEROACUCAR", "ZERO ACUCAR"),
    ("SEMACUCAR", "SEM ACUCAR"),
    ("SEMALCOOL", "SEM ALCOOL"),
    ("SEMLACTOSE", "SEM LACTOSE"),
    ("SEMGLUTEN", "SEM GLUTEN"),
    ("EMGRAOS", "EM GRAOS"),
    ("PARACARNE", "PARA CARNE"),
    ("PARAFRANGO", "PARA FRANGO"),
    ("COCACOLA", "COCA COLA"),
];

/// 組み込みの綴り修正表
pub fn builtin_spelling_fixes() -> Vec<SpellingFix> {
    BUILTIN_FIXES
        .iter()
        .map(|(wrong, right)| SpellingFix {
            wrong: wrong.to_string(),
            right: right.to_string(),
        })
        .collect()
}

/// 綴り修正を適用
pub fn normalize_spelling(text: &str, fixes: &[SpellingFix]) -> String {
    let mut result = text.to_string();

    for fix in fixes {
        if fix.wrong.is_empty() {
            continue;
        }
        if result.contains(fix.wrong.as_str()) {
            result = result.replace(fix.wrong.as_str(), &fix.right);
        }
    }

    result
}
