//! TMPVラベルの組み立てとパターン判定

use crate::types::{FieldAssignment, Pattern};

/// 重複・空欄を除いてT→M→P→Vの順に連結する
pub fn compose_label(fields: &FieldAssignment) -> String {
    let mut unique: Vec<&str> = Vec::new();
    for value in fields.in_label_order() {
        if !value.is_empty() && !unique.contains(&value) {
            unique.push(value);
        }
    }

    let mut label = unique.join(" ");
    while label.contains("  ") {
        label = label.replace("  ", " ");
    }
    label.trim().to_string()
}

/// 結果パターンを判定
pub fn classify(fields: &FieldAssignment) -> Pattern {
    let has_core = !fields.product_type.is_empty()
        && !fields.brand.is_empty()
        && !fields.volume.is_empty();

    match (has_core, fields.particularity().is_empty()) {
        (true, false) => Pattern::Complete,
        (true, true) => Pattern::Partial,
        _ => Pattern::Incomplete,
    }
}
