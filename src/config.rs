use crate::error::{Result, TmpvError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 語彙ストアの場所を上書きする環境変数
pub const STORE_ENV: &str = "TMPV_STORE";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 語彙ストア（JSON）のパス。未設定なら設定ディレクトリ内
    pub store_path: Option<PathBuf>,
    /// 除外語・綴り修正の追加ルール（JSON）
    pub rules_path: Option<PathBuf>,
    /// 1回の解析で受け付ける最大行数
    pub max_batch_rows: usize,
    /// 出力形式の既定値（json/excel）
    pub default_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: None,
            rules_path: None,
            max_batch_rows: 10_000,
            default_format: "json".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| TmpvError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("tmpv"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// 語彙ストアのパスを決定（CLI引数 > 環境変数 > 設定 > 既定）
    pub fn resolve_store_path(&self, cli_override: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(path) = cli_override {
            return Ok(path);
        }
        if let Ok(path) = std::env::var(STORE_ENV) {
            if !path.trim().is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        if let Some(path) = &self.store_path {
            return Ok(path.clone());
        }
        Ok(Self::config_dir()?.join("vocabulary.json"))
    }

    /// 追加ルールを読み込む（未設定なら組み込みルール）
    pub fn load_rules(&self) -> Result<tmpv_common::RuleSet> {
        match &self.rules_path {
            Some(path) if path.exists() => Ok(tmpv_common::RuleSet::from_file(path)?),
            Some(path) => Err(TmpvError::FileNotFound(path.display().to_string())),
            None => Ok(tmpv_common::RuleSet::default()),
        }
    }
}
