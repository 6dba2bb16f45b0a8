mod common;

use std::{fs, sync::Arc, thread};

use chrono::Duration;
use expense_categorizer::{
    domain::{CategorySet, ExpenseEntry, OwnerId},
    errors::StoreError,
    storage::{JsonLedgerStore, LedgerStore, MemoryLedgerStore},
};
use uuid::Uuid;

fn entry(owner: &str, description: &str, minutes: i64) -> ExpenseEntry {
    let categories = CategorySet::new(["Food"]).expect("category set");
    let category = categories.label_at(0).cloned().expect("food label");
    ExpenseEntry {
        id: Uuid::new_v4(),
        description: description.into(),
        amount: 100,
        category,
        owner: OwnerId::new(owner),
        created_at: common::fixed_now() + Duration::minutes(minutes),
    }
}

fn json_store() -> JsonLedgerStore {
    JsonLedgerStore::open(common::temp_dir().join("ledger.json")).expect("open json ledger")
}

fn check_recent_is_newest_first_and_owner_scoped(store: &dyn LedgerStore) {
    store.create(entry("asha", "first", 0)).unwrap();
    store.create(entry("ravi", "other", 5)).unwrap();
    store.create(entry("asha", "third", 10)).unwrap();
    store.create(entry("asha", "second", 3)).unwrap();

    let recent = store.list_recent(&OwnerId::new("asha"), 10).unwrap();
    let descriptions: Vec<_> = recent.iter().map(|e| e.description.as_str()).collect();
    assert_eq!(descriptions, vec!["third", "second", "first"]);
}

fn check_limit_is_clamped(store: &dyn LedgerStore) {
    for minute in 0..105 {
        store.create(entry("asha", "bulk", minute)).unwrap();
    }
    let owner = OwnerId::new("asha");
    assert_eq!(store.list_recent(&owner, 0).unwrap().len(), 1);
    assert_eq!(store.list_recent(&owner, 7).unwrap().len(), 7);
    assert_eq!(store.list_recent(&owner, 1_000).unwrap().len(), 100);
}

fn check_delete_is_owner_scoped(store: &dyn LedgerStore) {
    let id = store.create(entry("asha", "mine", 0)).unwrap();
    assert!(!store.delete(id, &OwnerId::new("ravi")).unwrap());
    assert_eq!(store.list_recent(&OwnerId::new("asha"), 10).unwrap().len(), 1);
    assert!(store.delete(id, &OwnerId::new("asha")).unwrap());
    assert!(store.list_recent(&OwnerId::new("asha"), 10).unwrap().is_empty());
    assert!(!store.delete(Uuid::new_v4(), &OwnerId::new("asha")).unwrap());
}

#[test]
fn memory_store_honours_ledger_contract() {
    check_recent_is_newest_first_and_owner_scoped(&MemoryLedgerStore::new());
    check_limit_is_clamped(&MemoryLedgerStore::new());
    check_delete_is_owner_scoped(&MemoryLedgerStore::new());
}

#[test]
fn json_store_honours_ledger_contract() {
    check_recent_is_newest_first_and_owner_scoped(&json_store());
    check_limit_is_clamped(&json_store());
    check_delete_is_owner_scoped(&json_store());
}

#[test]
fn json_store_survives_reopen() {
    let path = common::temp_dir().join("ledger.json");
    let original = entry("asha", "persisted", 0);
    {
        let store = JsonLedgerStore::open(&path).unwrap();
        store.create(original.clone()).unwrap();
    }
    let reopened = JsonLedgerStore::open(&path).unwrap();
    let recent = reopened.list_recent(&OwnerId::new("asha"), 10).unwrap();
    assert_eq!(recent, vec![original]);

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"schema_version\": 1"));
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn concurrent_creates_are_all_kept() {
    let store = Arc::new(json_store());
    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for minute in 0..5 {
                    store
                        .create(entry("asha", &format!("w{worker}"), minute))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    let recent = store.list_recent(&OwnerId::new("asha"), 100).unwrap();
    assert_eq!(recent.len(), 40);
}

#[test]
fn unreadable_ledger_fails_to_open() {
    let path = common::temp_dir().join("ledger.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        JsonLedgerStore::open(&path),
        Err(StoreError::Serde(_))
    ));
}
