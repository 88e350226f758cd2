use clap::Parser;
use std::path::PathBuf;
use tmpv_common::{parse_with_rules, FieldKind, ParseInput};
use tmpv_namer::{batch, cli, config, error, export, review, store, table};
use batch::BatchOptions;
use cli::{AbbrevAction, Cli, Commands, VocabAction};
use config::Config;
use error::Result;
use export::ExportFormat;
use store::VocabularyStore;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load()?;
    let store_path = config.resolve_store_path(cli.store.clone())?;

    match cli.command {
        Commands::Parse { file, output, format } => {
            let format = format
                .or_else(|| output.as_deref().and_then(ExportFormat::from_path))
                .or_else(|| config.default_format.parse().ok())
                .unwrap_or_default();
            // 標準出力にJSONを出すときは進捗表示を抑える
            let to_stdout = output.is_none() && format == ExportFormat::Json;

            if !to_stdout {
                println!("🏷  tmpv - 商品名解析\n");
                println!("[1/3] 商品表を読み込み中...");
            }
            let inputs = table::read_products(&file)?;
            let store = VocabularyStore::load(&store_path)?;
            let rules = config.load_rules()?;
            if !to_stdout {
                println!("✔ {}件の商品を検出\n", inputs.len());
                println!("[2/3] 解析中...");
            }

            let options = BatchOptions {
                max_rows: config.max_batch_rows,
                show_progress: !to_stdout,
            };
            let report = batch::run_batch(&inputs, &store.snapshot(), &rules, &options)?;

            if to_stdout {
                println!("{}", export::render_json(&report)?);
                return Ok(());
            }

            let summary = &report.summary;
            println!(
                "✔ 解析完了 (COMPLETE {} / PARTIAL {} / INCOMPLETE {}, 平均信頼度 {:.1})\n",
                summary.complete, summary.partial, summary.incomplete, summary.mean_confidence
            );

            println!("[3/3] 結果を保存中...");
            let output = output.unwrap_or_else(|| PathBuf::from("."));
            export::export_report(&report, format, &output)?;

            println!("\n✅ 完了");
        }

        Commands::Suggest { name, ean } => {
            let store = VocabularyStore::load(&store_path)?;
            let rules = config.load_rules()?;
            let result = parse_with_rules(&ParseInput::new(name, ean), &store.snapshot(), &rules);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Vocab { action } => {
            let mut store = VocabularyStore::load(&store_path)?;
            match action {
                VocabAction::List { kind } => {
                    let entries = store.list(kind);
                    println!("{} ({}件):", kind, entries.len());
                    for entry in entries {
                        println!("  {}", entry);
                    }
                    return Ok(());
                }
                VocabAction::Add { kind, values } => {
                    for value in &values {
                        if store.add(kind, value) {
                            println!("✔ {}に追加: {}", kind, value.trim().to_uppercase());
                        } else {
                            println!("- 登録済みまたは空: {}", value);
                        }
                    }
                }
                VocabAction::Remove { kind, values } => {
                    for value in &values {
                        if store.remove(kind, value) {
                            println!("✔ {}から削除: {}", kind, value.trim().to_uppercase());
                        } else {
                            println!("- 未登録: {}", value);
                        }
                    }
                }
                VocabAction::Import { kind, file } => {
                    if !file.exists() {
                        return Err(error::TmpvError::FileNotFound(file.display().to_string()));
                    }
                    let content = std::fs::read_to_string(&file)?;
                    let summary = store.import_text(kind, &content);
                    println!(
                        "✔ {}: 追加 {}件 / 登録済み {}件 / 処理 {}行",
                        kind,
                        summary.added.len(),
                        summary.already_present.len(),
                        summary.total_processed
                    );
                }
            }
            store.save(&store_path)?;
        }

        Commands::Abbrev { action } => {
            let mut store = VocabularyStore::load(&store_path)?;
            match action {
                AbbrevAction::List => {
                    let rules = store.abbreviations();
                    println!("略語 ({}件):", rules.len());
                    for rule in rules {
                        println!("  {} → {}", rule.short, rule.full);
                    }
                    return Ok(());
                }
                AbbrevAction::Add { short, full } => {
                    let rule = store.add_abbreviation(&short, &full)?;
                    println!("✔ 略語を追加: {} → {}", rule.short, rule.full);
                }
                AbbrevAction::Remove { short } => {
                    if store.remove_abbreviation(&short) {
                        println!("✔ 略語を削除: {}", short);
                    } else {
                        println!("- 未登録: {}", short);
                    }
                }
                AbbrevAction::Init => {
                    let (added, existing) = store.seed_default_abbreviations();
                    println!("✔ 初期略語表: 追加 {}件 / 登録済み {}件", added, existing);
                }
            }
            store.save(&store_path)?;
        }

        Commands::Review { file } => {
            println!("📝 tmpv - 候補登録\n");
            let inputs = table::read_products(&file)?;
            let mut store = VocabularyStore::load(&store_path)?;
            let rules = config.load_rules()?;
            let options = BatchOptions {
                max_rows: config.max_batch_rows,
                show_progress: true,
            };
            let report = batch::run_batch(&inputs, &store.snapshot(), &rules, &options)?;

            let registered = review::run_interactive_review(&report.results, &mut store)?;
            if registered > 0 {
                store.save(&store_path)?;
            }
            println!("\n✓ {}件を登録しました: {}", registered, store_path.display());
        }

        Commands::Config { show, set_store, set_rules, set_max_rows } => {
            let mut config = config;
            let changed = set_store.is_some() || set_rules.is_some() || set_max_rows.is_some();

            if let Some(path) = set_store {
                config.store_path = Some(path);
            }
            if let Some(path) = set_rules {
                config.rules_path = Some(path);
            }
            if let Some(rows) = set_max_rows {
                config.max_batch_rows = rows;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                let store = VocabularyStore::load(&store_path)?;
                println!("設定:");
                println!("  語彙ストア: {}", store_path.display());
                println!(
                    "  追加ルール: {}",
                    config
                        .rules_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "なし".into())
                );
                println!("  最大行数: {}", config.max_batch_rows);
                println!("  出力形式: {}", config.default_format);
                for kind in FieldKind::ALL {
                    println!("  {}: {}件", kind, store.list(kind).len());
                }
                println!("  略語: {}件", store.abbreviations().len());
            }
        }
    }

    Ok(())
}
