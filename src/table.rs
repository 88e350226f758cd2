//! 商品表の読み込み
//!
//! CSVまたは表計算ファイル（xlsx/xls/ods）の先頭シートから
//! `nome`（商品名）と`ean`（識別子）の列を取り出す。

use crate::error::{Result, TmpvError};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tmpv_common::ParseInput;
use tracing::debug;

const NAME_HEADER: &str = "nome";
const IDENTIFIER_HEADER: &str = "ean";

/// 拡張子から読み込み方法を選んで商品表を読む
pub fn read_products(path: &Path) -> Result<Vec<ParseInput>> {
    if !path.exists() {
        return Err(TmpvError::FileNotFound(path.display().to_string()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let rows = match extension.as_str() {
        "csv" => {
            let content = std::fs::read_to_string(path)?;
            read_csv_rows(&content)?
        }
        "xlsx" | "xlsm" | "xls" | "ods" => read_sheet_rows(path)?,
        _ => return Err(TmpvError::UnsupportedFormat(path.display().to_string())),
    };

    let products = rows_to_inputs(rows)?;
    debug!(path = %path.display(), rows = products.len(), "商品表を読み込み");
    Ok(products)
}

/// CSVテキストを行ごとのセル列に分解
///
/// 区切り文字はヘッダー行で1回だけ決める。
pub fn read_csv_rows(content: &str) -> Result<Vec<Vec<String>>> {
    let content = content.trim_start_matches('\u{feff}');
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(sniff_delimiter(content))
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        rows.push(record.iter().map(String::from).collect());
    }
    Ok(rows)
}

/// ヘッダー行が`;`区切りで`,`を含まないときだけ`;`
fn sniff_delimiter(content: &str) -> u8 {
    let header = content
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or_default();
    if header.contains(';') && !header.contains(',') {
        b';'
    } else {
        b','
    }
}

fn read_sheet_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| TmpvError::Spreadsheet(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| TmpvError::Spreadsheet("シートがありません".into()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| TmpvError::Spreadsheet(e.to_string()))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

/// セル値を文字列化（整数値の数値セルは小数点なし）
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e17 => format!("{:.0}", f),
        other => other.to_string(),
    }
}

/// 先頭行をヘッダーとして入力レコードに変換
pub fn rows_to_inputs(rows: Vec<Vec<String>>) -> Result<Vec<ParseInput>> {
    let mut rows = rows.into_iter();
    let header = rows.next().unwrap_or_default();

    let find_column = |name: &str| {
        header
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };

    let (name_col, id_col) = match (find_column(NAME_HEADER), find_column(IDENTIFIER_HEADER)) {
        (Some(n), Some(i)) => (n, i),
        _ => return Err(TmpvError::MissingColumns(header.join(", "))),
    };

    Ok(rows
        .filter_map(|row| {
            let name = row.get(name_col).map(|s| s.trim()).unwrap_or_default();
            if name.is_empty() {
                return None;
            }
            let identifier = row.get(id_col).map(|s| s.trim()).unwrap_or_default();
            Some(ParseInput::new(name, identifier))
        })
        .collect())
}
