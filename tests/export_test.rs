//! エクスポートテスト
//!
//! JSON/Excel出力をtempdirに書き出して検証

use tempfile::tempdir;
use tmpv_common::{FieldKind, ParseInput, RuleSet};
use tmpv_namer::batch::{run_batch, BatchOptions, BatchReport};
use tmpv_namer::export::{export_report, ExportFormat};
use tmpv_namer::store::VocabularyStore;

fn sample_report() -> BatchReport {
    let mut store = VocabularyStore::default();
    store.add(FieldKind::Type, "CERVEJA");
    store.add(FieldKind::Brand, "HEINEKEN");
    store.add(FieldKind::Volume, "350ML");

    let inputs = vec![
        ParseInput::new("CERVEJA HEINEKEN LATA 350ML", "7891234567890"),
        ParseInput::new("AGUA MINERAL 500ML", "7890000000000"),
    ];
    run_batch(&inputs, &store.snapshot(), &RuleSet::default(), &BatchOptions::default()).unwrap()
}

#[test]
fn test_export_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = export_report(&sample_report(), ExportFormat::Json, &dir.path().join("saida.json"))
        .unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();

    assert!(value["generatedAt"].is_string());
    assert_eq!(value["summary"]["total"], 2);
    assert_eq!(value["summary"]["partial"], 1);

    let first = &value["results"][0];
    assert_eq!(first["label"], "CERVEJA HEINEKEN 350ML");
    assert_eq!(first["pattern"], "PARTIAL");
    assert_eq!(first["fields"]["type"], "CERVEJA");
}

#[test]
fn test_export_excel() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = export_report(&sample_report(), ExportFormat::Excel, &dir.path().join("saida.xlsx"))
        .unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.len() > 100);
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn test_export_to_directory_uses_default_name() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = export_report(&sample_report(), ExportFormat::Excel, dir.path()).unwrap();
    assert_eq!(path, dir.path().join("tmpv.xlsx"));
    assert!(path.exists());
}

#[test]
fn test_export_adds_missing_extension() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = export_report(&sample_report(), ExportFormat::Json, &dir.path().join("saida")).unwrap();
    assert_eq!(path, dir.path().join("saida.json"));
}
