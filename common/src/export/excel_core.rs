//! Excel生成（共通ライブラリ）
//!
//! 解析結果を1行1商品の一覧シートに出力する。
//! 列名は取り込み側システムのキー名に合わせる。

use crate::types::{ParseResult, VolumeSource};
use rust_xlsxwriter::*;

/// (列名, 列幅)
const COLUMNS: &[(&str, f64)] = &[
    ("ean", 16.0),
    ("nome_original", 40.0),
    ("sugestao_tmpv", 40.0),
    ("tipo", 16.0),
    ("marca", 16.0),
    ("particularidade", 24.0),
    ("volume", 10.0),
    ("origem_volume", 12.0),
    ("padrao", 12.0),
    ("confiabilidade", 14.0),
    ("palavras_importantes_perdidas", 28.0),
    ("palavras_adicionadas", 20.0),
    ("sugestoes_tipo", 30.0),
    ("sugestoes_marca", 30.0),
    ("sugestoes_particularidades", 40.0),
    ("sugestoes_volume", 20.0),
];

const LIST_SEPARATOR: &str = " | ";

fn volume_source_label(source: VolumeSource) -> &'static str {
    match source {
        VolumeSource::Registered => "cadastrado",
        VolumeSource::Extracted => "extraido",
        VolumeSource::Missing => "",
    }
}

/// 1行分の文字列セル（信頼度以外）
fn row_values(result: &ParseResult) -> Vec<String> {
    vec![
        result.identifier.clone(),
        result.original_name.clone(),
        result.label.clone(),
        result.fields.product_type.clone(),
        result.fields.brand.clone(),
        result.fields.particularity().to_string(),
        result.fields.volume.clone(),
        volume_source_label(result.volume_source).to_string(),
        result.pattern.to_string(),
        String::new(),
        result.confidence.important_lost_words.join(LIST_SEPARATOR),
        result.confidence.added_words.join(LIST_SEPARATOR),
        result.candidates.product_type.join(LIST_SEPARATOR),
        result.candidates.brand.join(LIST_SEPARATOR),
        result.candidates.particularity.join(LIST_SEPARATOR),
        result.candidates.volume.join(LIST_SEPARATOR),
    ]
}

const CONFIDENCE_COL: u16 = 9;

/// Excelをバッファに生成
///
/// # Arguments
/// * `results` - 解析結果
/// * `sheet_name` - シート名
pub fn generate_excel_buffer(results: &[ParseResult], sheet_name: &str) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0x333333))
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));
    let low_confidence_format = Format::new()
        .set_num_format("0.0")
        .set_font_color(Color::RGB(0xC00000));
    let confidence_format = Format::new().set_num_format("0.0");

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    for (col, (title, width)) in COLUMNS.iter().enumerate() {
        let col = col as u16;
        worksheet
            .set_column_width(col, *width)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
        worksheet
            .write_string_with_format(0, col, *title, &header_format)
            .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;
    }
    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| format!("ウィンドウ枠固定エラー: {}", e))?;

    for (index, result) in results.iter().enumerate() {
        let row = index as u32 + 1;

        for (col, value) in row_values(result).iter().enumerate() {
            let col = col as u16;
            if col == CONFIDENCE_COL {
                continue;
            }
            worksheet
                .write_string(row, col, value)
                .map_err(|e| format!("セル書き込みエラー: {}", e))?;
        }

        // 60未満は赤字
        let format = if result.confidence.confidence < 60.0 {
            &low_confidence_format
        } else {
            &confidence_format
        };
        worksheet
            .write_number_with_format(row, CONFIDENCE_COL, result.confidence.confidence, format)
            .map_err(|e| format!("信頼度書き込みエラー: {}", e))?;
    }

    if !results.is_empty() {
        worksheet
            .autofilter(0, 0, results.len() as u32, COLUMNS.len() as u16 - 1)
            .map_err(|e| format!("フィルタ設定エラー: {}", e))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Pattern;

    #[test]
    fn test_row_values_align_with_columns() {
        let result = ParseResult {
            identifier: "789".into(),
            original_name: "CERVEJA HEINEKEN 350ML".into(),
            label: "CERVEJA HEINEKEN 350ML".into(),
            pattern: Pattern::Partial,
            ..Default::default()
        };
        let values = row_values(&result);
        assert_eq!(values.len(), COLUMNS.len());
        assert_eq!(COLUMNS[CONFIDENCE_COL as usize].0, "confiabilidade");
        assert_eq!(values[8], "PARTIAL");
    }

    #[test]
    fn test_generate_excel_buffer() {
        let results = vec![ParseResult {
            identifier: "7891234567890".into(),
            original_name: "CERVEJA HEINEKEN LATA 350ML".into(),
            ..Default::default()
        }];
        let buffer = generate_excel_buffer(&results, "produtos").unwrap();
        // XLSXはZIP形式
        assert_eq!(&buffer[..2], b"PK");
    }

    #[test]
    fn test_generate_excel_buffer_empty() {
        assert!(generate_excel_buffer(&[], "produtos").is_ok());
    }
}
