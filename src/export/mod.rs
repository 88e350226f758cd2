pub mod excel;

use crate::batch::BatchReport;
use crate::error::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// 出力形式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Excel,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Excel => "xlsx",
        }
    }

    /// 出力ファイルの拡張子から推定
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| e.parse().ok())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            _ => Err(format!("Unknown format: {}. Use json or excel", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Excel => write!(f, "excel"),
        }
    }
}

/// JSON出力の外枠
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonExport<'a> {
    generated_at: String,
    #[serde(flatten)]
    report: &'a BatchReport,
}

/// 出力先が拡張子なしなら形式に合わせて補う
pub fn output_path_for_format(output: &Path, format: ExportFormat) -> PathBuf {
    if output.is_dir() {
        output.join(format!("tmpv.{}", format.extension()))
    } else if output.extension().is_none() {
        output.with_extension(format.extension())
    } else {
        output.to_path_buf()
    }
}

pub fn render_json(report: &BatchReport) -> Result<String> {
    let export = JsonExport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        report,
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

/// 解析結果を書き出し、書き出したパスを返す
pub fn export_report(report: &BatchReport, format: ExportFormat, output: &Path) -> Result<PathBuf> {
    let output_path = output_path_for_format(output, format);
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    match format {
        ExportFormat::Json => {
            println!("- JSONを書き出し中...");
            std::fs::write(&output_path, render_json(report)?)?;
        }
        ExportFormat::Excel => {
            println!("- Excelを生成中...");
            excel::generate_excel(&report.results, &output_path)?;
        }
    }
    println!("✔ 出力: {}", output_path.display());

    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("xlsx".parse::<ExportFormat>().unwrap(), ExportFormat::Excel);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ExportFormat::from_path(Path::new("out/result.xlsx")),
            Some(ExportFormat::Excel)
        );
        assert_eq!(ExportFormat::from_path(Path::new("result")), None);
    }

    #[test]
    fn test_render_json_has_timestamp_and_summary() {
        let json = render_json(&BatchReport::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["generatedAt"].is_string());
        assert_eq!(value["summary"]["total"], 0);
        assert!(value["results"].as_array().unwrap().is_empty());
    }
}
