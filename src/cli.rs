use clap::{Parser, Subcommand};
use crate::export::ExportFormat;
use std::path::PathBuf;
use tmpv_common::FieldKind;

#[derive(Parser)]
#[command(name = "tmpv")]
#[command(about = "商品名をTMPV（タイプ・ブランド・特徴・容量）形式に正規化するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 語彙ストア（JSON）のパス
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 商品表（csv/xlsx/xls/ods）を解析して出力
    Parse {
        /// 商品表ファイル（nome, ean列が必要）
        #[arg(required = true)]
        file: PathBuf,

        /// 出力ファイル（省略時は標準出力にJSON）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (json/excel)。省略時は出力ファイルの拡張子か設定値
        #[arg(short, long)]
        format: Option<ExportFormat>,
    },

    /// 商品名1件を解析して結果を表示
    Suggest {
        /// 商品名
        #[arg(required = true)]
        name: String,

        /// 識別子（EAN）
        #[arg(short, long, default_value = "")]
        ean: String,
    },

    /// 語彙の管理
    Vocab {
        #[command(subcommand)]
        action: VocabAction,
    },

    /// 略語表の管理
    Abbrev {
        #[command(subcommand)]
        action: AbbrevAction,
    },

    /// 解析結果の候補を対話的に語彙へ登録
    Review {
        /// 商品表ファイル
        #[arg(required = true)]
        file: PathBuf,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 語彙ストアのパスを設定
        #[arg(long)]
        set_store: Option<PathBuf>,

        /// 追加ルールファイルを設定
        #[arg(long)]
        set_rules: Option<PathBuf>,

        /// 最大行数を設定
        #[arg(long)]
        set_max_rows: Option<usize>,
    },
}

#[derive(Subcommand)]
pub enum VocabAction {
    /// 登録語の一覧
    List {
        /// 種類 (type/brand/particularity/volume)
        kind: FieldKind,
    },
    /// 語を追加
    Add {
        kind: FieldKind,
        #[arg(required = true)]
        values: Vec<String>,
    },
    /// 語を削除
    Remove {
        kind: FieldKind,
        #[arg(required = true)]
        values: Vec<String>,
    },
    /// テキストファイル（1行1語）から取り込み
    Import {
        kind: FieldKind,
        file: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum AbbrevAction {
    /// 略語の一覧
    List,
    /// 略語を追加
    Add { short: String, full: String },
    /// 略語を削除
    Remove { short: String },
    /// 初期略語表を登録
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_vocab_add() {
        let cli = Cli::parse_from(["tmpv", "vocab", "add", "marca", "HEINEKEN", "PILAO"]);
        match cli.command {
            Commands::Vocab {
                action: VocabAction::Add { kind, values },
            } => {
                assert_eq!(kind, FieldKind::Brand);
                assert_eq!(values, vec!["HEINEKEN", "PILAO"]);
            }
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn test_parse_global_store_flag() {
        let cli = Cli::parse_from(["tmpv", "suggest", "CERV HEINEKEN 350ML", "--store", "v.json"]);
        assert_eq!(cli.store, Some(PathBuf::from("v.json")));
    }
}
