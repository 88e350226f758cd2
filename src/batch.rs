//! 一括解析
//!
//! 各行を独立にコアへ渡す。語彙とルールは読み取り専用で全ワーカーが共有する。

use crate::error::{Result, TmpvError};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tmpv_common::{parse_with_rules, ParseInput, ParseResult, Pattern, RuleSet, Vocabularies};
use tracing::info;

/// パターン別件数と平均信頼度
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: usize,
    pub complete: usize,
    pub partial: usize,
    pub incomplete: usize,
    pub mean_confidence: f64,
}

impl BatchSummary {
    pub fn from_results(results: &[ParseResult]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Default::default()
        };
        for result in results {
            match result.pattern {
                Pattern::Complete => summary.complete += 1,
                Pattern::Partial => summary.partial += 1,
                Pattern::Incomplete => summary.incomplete += 1,
            }
        }
        if !results.is_empty() {
            let sum: f64 = results.iter().map(|r| r.confidence.confidence).sum();
            summary.mean_confidence = (sum / results.len() as f64 * 10.0).round() / 10.0;
        }
        summary
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub results: Vec<ParseResult>,
    pub summary: BatchSummary,
}

/// 一括解析のオプション
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// 受け付ける最大行数
    pub max_rows: usize,
    /// 進捗バーを表示するか
    pub show_progress: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_rows: 10_000,
            show_progress: false,
        }
    }
}

pub fn run_batch(
    inputs: &[ParseInput],
    vocabularies: &Vocabularies,
    rules: &RuleSet,
    options: &BatchOptions,
) -> Result<BatchReport> {
    if inputs.len() > options.max_rows {
        return Err(TmpvError::BatchTooLarge {
            rows: inputs.len(),
            limit: options.max_rows,
        });
    }

    let pb = if options.show_progress {
        let pb = ProgressBar::new(inputs.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    // 入力順を保つ
    let results: Vec<ParseResult> = inputs
        .par_iter()
        .map(|input| {
            let result = parse_with_rules(input, vocabularies, rules);
            pb.inc(1);
            result
        })
        .collect();
    pb.finish_and_clear();

    let summary = BatchSummary::from_results(&results);
    info!(
        total = summary.total,
        complete = summary.complete,
        partial = summary.partial,
        incomplete = summary.incomplete,
        "一括解析完了"
    );

    Ok(BatchReport { results, summary })
}
