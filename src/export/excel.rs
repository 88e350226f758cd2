//! Excel生成（CLI版）
//!
//! 共通ライブラリでバッファを生成してファイルに書き出す

use crate::error::{Result, TmpvError};
use std::path::Path;
use tmpv_common::export::excel_core::generate_excel_buffer;
use tmpv_common::ParseResult;

const SHEET_NAME: &str = "produtos";

pub fn generate_excel(results: &[ParseResult], output_path: &Path) -> Result<()> {
    let buffer = generate_excel_buffer(results, SHEET_NAME).map_err(TmpvError::ExcelGeneration)?;
    std::fs::write(output_path, buffer)?;
    Ok(())
}
