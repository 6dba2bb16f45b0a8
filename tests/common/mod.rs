#![allow(dead_code)]

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use chrono::{DateTime, TimeZone, Utc};
use expense_categorizer::{
    config::{Config, ConfigManager},
    domain::{CategorySet, FixedClock},
    model::{LinearClassifier, TfidfExtractor, TfidfOptions},
    normalizer::{spelling::DictionaryCorrector, Normalizer},
    storage::{memory::MemoryLedgerStore, LedgerStore},
    Categorizer, SuggestionWorkflow,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

const TERMS: [&str; 8] = [
    "bill",
    "cab",
    "electricity",
    "food",
    "order",
    "ride",
    "swiggy",
    "uber",
];

/// A fresh directory that outlives the calling test.
pub fn temp_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap()
}

/// Three-category model small enough to reason about by hand.
///
/// Text with no known terms scores zero everywhere and falls to `Bills`, the
/// first class.
pub fn fixture_categorizer() -> Categorizer {
    let vocabulary: HashMap<String, usize> = TERMS
        .iter()
        .enumerate()
        .map(|(index, term)| (term.to_string(), index))
        .collect();
    let extractor =
        TfidfExtractor::new(vocabulary, vec![1.0; TERMS.len()], TfidfOptions::default())
            .expect("fixture extractor");

    let categories = CategorySet::new(["Bills", "Food", "Transport"]).expect("fixture categories");
    let coef = vec![
        vec![1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 1.0, 0.5, 0.0, 1.0, 0.0],
        vec![0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0],
    ];
    let classifier =
        LinearClassifier::new(categories, coef, vec![0.0; 3]).expect("fixture classifier");

    let dictionary = DictionaryCorrector::from_terms(TERMS, 2);
    Categorizer::new(
        Normalizer::new(Arc::new(dictionary)),
        Arc::new(extractor),
        Arc::new(classifier),
    )
    .expect("fixture categorizer")
}

/// Workflow over an in-memory ledger with the clock pinned to [`fixed_now`].
pub fn memory_workflow() -> (SuggestionWorkflow, Arc<MemoryLedgerStore>) {
    let store = Arc::new(MemoryLedgerStore::new());
    let shared: Arc<dyn LedgerStore> = store.clone();
    let workflow = SuggestionWorkflow::with_clock(
        fixture_categorizer(),
        shared,
        Arc::new(FixedClock(fixed_now())),
    );
    (workflow, store)
}

pub fn shipped_models_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("models")
}

/// Sets up an application home holding copies of the shipped models and a
/// config pointing at them.
pub fn setup_home() -> (PathBuf, ConfigManager) {
    let base = temp_dir();
    let models = base.join("models");
    fs::create_dir_all(&models).expect("create models dir");
    for name in ["extractor.json", "classifier.json", "dictionary.json"] {
        fs::copy(shipped_models_dir().join(name), models.join(name)).expect("copy model artifact");
    }

    let manager = ConfigManager::with_base_dir(base.clone()).expect("config manager");
    let config = Config {
        dictionary_path: Some(PathBuf::from("models/dictionary.json")),
        owner: "asha".into(),
        ..Config::default()
    };
    manager.save(&config).expect("save config");
    (base, manager)
}
