//! 候補の対話登録モジュール
//!
//! 解析結果の候補から1つを選んで語彙ストアに登録する。
//! 登録した語は次回の解析から照合対象になる。

use crate::error::{Result, TmpvError};
use crate::store::VocabularyStore;
use dialoguer::Select;
use tmpv_common::{FieldKind, ParseResult};

/// 候補を確認する順序
pub const REVIEW_ORDER: [FieldKind; 3] =
    [FieldKind::Particularity, FieldKind::Type, FieldKind::Brand];

/// 確認対象（結果の位置と欄）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    pub index: usize,
    pub kind: FieldKind,
}

/// 対話アクション
pub enum ReviewAction {
    /// 候補を登録
    Register(String),
    /// この欄をスキップ
    Skip,
    /// 終了
    Quit,
}

/// 未登録の候補がある欄を列挙
pub fn collect_review_items(results: &[ParseResult], store: &VocabularyStore) -> Vec<ReviewItem> {
    results
        .iter()
        .enumerate()
        .flat_map(|(index, result)| {
            REVIEW_ORDER
                .into_iter()
                .filter(move |&kind| !pending_candidates(result, kind, store).is_empty())
                .map(move |kind| ReviewItem { index, kind })
        })
        .collect()
}

/// 登録済みの語を除いた候補
pub fn pending_candidates(
    result: &ParseResult,
    kind: FieldKind,
    store: &VocabularyStore,
) -> Vec<String> {
    let vocabulary = store.vocabularies().get(kind);
    result
        .candidates
        .get(kind)
        .iter()
        .filter(|c| !vocabulary.contains(c.as_str()))
        .cloned()
        .collect()
}

/// 対話で候補を登録し、登録件数を返す（保存は呼び出し側）
pub fn run_interactive_review(results: &[ParseResult], store: &mut VocabularyStore) -> Result<usize> {
    let items = collect_review_items(results, store);

    if items.is_empty() {
        println!("✓ 登録候補はありません");
        return Ok(0);
    }

    println!("📝 候補のある欄: {}件", items.len());
    println!("---\n");

    let mut registered = 0;

    for (count, item) in items.iter().enumerate() {
        let result = &results[item.index];
        // 途中で登録した語だけが候補だった欄は飛ばす
        let candidates = pending_candidates(result, item.kind, store);
        if candidates.is_empty() {
            continue;
        }

        println!(
            "[{}/{}] {} ({})",
            count + 1,
            items.len(),
            result.original_name,
            result.identifier
        );
        println!("  ラベル: {}", result.label);

        match prompt_review_action(item.kind, &candidates)? {
            ReviewAction::Register(value) => {
                if store.add(item.kind, &value) {
                    registered += 1;
                    println!("  → {}に登録: {}\n", item.kind, value);
                } else {
                    println!("  → 登録済み\n");
                }
            }
            ReviewAction::Skip => {
                println!("  → スキップ\n");
            }
            ReviewAction::Quit => {
                println!("終了します...");
                break;
            }
        }
    }

    Ok(registered)
}

fn prompt_review_action(kind: FieldKind, candidates: &[String]) -> Result<ReviewAction> {
    let mut items: Vec<&str> = candidates.iter().map(String::as_str).collect();
    items.push("（スキップ）");
    items.push("（終了）");

    let selection = Select::new()
        .with_prompt(format!("{}の候補", kind))
        .items(&items)
        .default(0)
        .interact()
        .map_err(|e| TmpvError::Prompt(e.to_string()))?;

    Ok(match selection {
        i if i < candidates.len() => ReviewAction::Register(candidates[i].clone()),
        i if i == candidates.len() => ReviewAction::Skip,
        _ => ReviewAction::Quit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tmpv_common::CandidateSets;

    fn result_with(particularity: &[&str], brand: &[&str]) -> ParseResult {
        ParseResult {
            candidates: CandidateSets {
                particularity: particularity.iter().map(|s| s.to_string()).collect(),
                brand: brand.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_collect_review_items_order() {
        let results = vec![
            result_with(&["LATA"], &["LATA"]),
            ParseResult::default(),
            result_with(&[], &["PILAO"]),
        ];
        let items = collect_review_items(&results, &VocabularyStore::default());
        assert_eq!(
            items,
            vec![
                ReviewItem { index: 0, kind: FieldKind::Particularity },
                ReviewItem { index: 0, kind: FieldKind::Brand },
                ReviewItem { index: 2, kind: FieldKind::Brand },
            ]
        );
    }

    #[test]
    fn test_collect_review_items_excludes_fully_registered() {
        let mut store = VocabularyStore::default();
        store.add(FieldKind::Particularity, "LATA");
        store.add(FieldKind::Brand, "PILAO");
        let results = vec![
            result_with(&["LATA"], &["PILAO"]),
            result_with(&["LATA", "PURO MALTE"], &[]),
        ];
        let items = collect_review_items(&results, &store);
        assert_eq!(items, vec![ReviewItem { index: 1, kind: FieldKind::Particularity }]);
    }

    #[test]
    fn test_pending_candidates_skip_registered() {
        let mut store = VocabularyStore::default();
        store.add(FieldKind::Particularity, "LATA");
        let result = result_with(&["LATA 350ML", "LATA"], &[]);
        assert_eq!(
            pending_candidates(&result, FieldKind::Particularity, &store),
            vec!["LATA 350ML".to_string()]
        );
    }
}
