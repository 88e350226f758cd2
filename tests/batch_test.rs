//! 一括解析テスト
//!
//! 商品表の読み込みから解析結果まで通しで検証

use tempfile::tempdir;
use tmpv_common::{FieldKind, ParseInput, Pattern, RuleSet, VolumeSource};
use tmpv_namer::batch::{run_batch, BatchOptions};
use tmpv_namer::error::TmpvError;
use tmpv_namer::store::VocabularyStore;
use tmpv_namer::table;

fn grocery_store() -> VocabularyStore {
    let mut store = VocabularyStore::default();
    for value in ["ARROZ", "CAFE", "CERVEJA"] {
        store.add(FieldKind::Type, value);
    }
    for value in ["CAMIL", "PILAO", "HEINEKEN"] {
        store.add(FieldKind::Brand, value);
    }
    for value in ["INTEGRAL", "ORGANICO", "TRADICIONAL"] {
        store.add(FieldKind::Particularity, value);
    }
    for value in ["1KG", "500G", "350ML"] {
        store.add(FieldKind::Volume, value);
    }
    store
}

#[test]
fn test_csv_batch_end_to_end() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("produtos.csv");
    std::fs::write(
        &path,
        "nome,ean\n\
         ARROZ INTEGRAL CAMIL ORGANICO 1KG,7896006716112\n\
         CAFE PILAO TRADICIONAL 500G,7896089011395\n\
         CERVEJA HEINEKEN LATA 350ML,7891234567890\n\
         BISCOITO MARIA,7890000000000\n",
    )
    .unwrap();

    let inputs = table::read_products(&path).unwrap();
    let store = grocery_store();
    let report = run_batch(
        &inputs,
        &store.snapshot(),
        &RuleSet::default(),
        &BatchOptions::default(),
    )
    .unwrap();

    assert_eq!(report.results.len(), 4);

    // 入力順が保たれる
    let arroz = &report.results[0];
    assert_eq!(arroz.identifier, "7896006716112");
    assert_eq!(arroz.fields.particularity(), "INTEGRAL ORGANICO");
    assert_eq!(arroz.label, "ARROZ CAMIL INTEGRAL ORGANICO 1KG");
    assert_eq!(arroz.pattern, Pattern::Complete);
    assert_eq!(arroz.confidence.confidence, 100.0);

    let cafe = &report.results[1];
    assert_eq!(cafe.label, "CAFE PILAO TRADICIONAL 500G");
    assert_eq!(cafe.pattern, Pattern::Complete);

    let cerveja = &report.results[2];
    assert_eq!(cerveja.label, "CERVEJA HEINEKEN 350ML");
    assert_eq!(cerveja.pattern, Pattern::Partial);
    assert_eq!(cerveja.volume_source, VolumeSource::Registered);

    let biscoito = &report.results[3];
    assert_eq!(biscoito.label, "");
    assert_eq!(biscoito.pattern, Pattern::Incomplete);
    assert_eq!(biscoito.confidence.confidence, 0.0);

    assert_eq!(report.summary.total, 4);
    assert_eq!(report.summary.complete, 2);
    assert_eq!(report.summary.partial, 1);
    assert_eq!(report.summary.incomplete, 1);
}

#[test]
fn test_abbreviations_from_store() {
    let mut store = grocery_store();
    store.add(FieldKind::Particularity, "LATA");
    store.seed_default_abbreviations();

    let inputs = vec![ParseInput::new("cerv heineken lt 350ml", "1")];
    let report = run_batch(
        &inputs,
        &store.snapshot(),
        &RuleSet::default(),
        &BatchOptions::default(),
    )
    .unwrap();

    let result = &report.results[0];
    assert_eq!(result.normalized_name, "CERVEJA HEINEKEN LATA 350ML");
    assert_eq!(result.label, "CERVEJA HEINEKEN LATA 350ML");
    assert_eq!(result.pattern, Pattern::Complete);
}

#[test]
fn test_empty_vocabularies_scenario() {
    let inputs = vec![
        ParseInput::new("CERVEJA HEINEKEN LATA 350ML", "1"),
        ParseInput::new("Biscoito Maria Tradicional", "2"),
    ];
    let report = run_batch(
        &inputs,
        &VocabularyStore::default().snapshot(),
        &RuleSet::default(),
        &BatchOptions::default(),
    )
    .unwrap();

    for result in &report.results {
        assert_eq!(result.label, "");
        assert_eq!(result.fields.product_type, "");
        assert_eq!(result.fields.brand, "");
        assert_eq!(result.fields.particularity(), "");
        assert_eq!(result.pattern, Pattern::Incomplete);
        assert_eq!(result.confidence.confidence, 0.0);
    }
    assert_eq!(report.summary.mean_confidence, 0.0);
}

#[test]
fn test_row_limit_checked_before_parsing() {
    let inputs = vec![ParseInput::new("ARROZ CAMIL 1KG", ""); 11];
    let options = BatchOptions {
        max_rows: 10,
        show_progress: false,
    };
    let err = run_batch(
        &inputs,
        &grocery_store().snapshot(),
        &RuleSet::default(),
        &options,
    )
    .unwrap_err();
    assert!(matches!(err, TmpvError::BatchTooLarge { rows: 11, limit: 10 }));
}
