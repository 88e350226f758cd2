use thiserror::Error;

#[derive(Error, Debug)]
pub enum TmpvError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("未対応のファイル形式です: {0}（csv/xlsx/xls/odsのみ）")]
    UnsupportedFormat(String),

    #[error("表には 'nome' と 'ean' の列が必要です（見つかった列: {0}）")]
    MissingColumns(String),

    #[error("表の読み込みエラー: {0}")]
    Spreadsheet(String),

    #[error("CSV読み込みエラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("行数が上限を超えています: {rows}行（上限 {limit}行）")]
    BatchTooLarge { rows: usize, limit: usize },

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("語彙ストアエラー: {0}")]
    Store(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error(transparent)]
    Core(#[from] tmpv_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TmpvError>;
