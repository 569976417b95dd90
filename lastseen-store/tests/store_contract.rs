use lastseen_model::{Identity, StorageConfig};
use lastseen_store::{LastSeenDb, LastSeenStore, StoreOptions};
use tempfile::tempdir;

fn id(name: &str) -> Identity {
    Identity::new(name)
}

fn open_memory() -> LastSeenDb {
    LastSeenDb::open(&StorageConfig::InMemory, StoreOptions::default()).unwrap()
}

#[test]
fn test_set_get_delete() {
    let store = open_memory();

    assert_eq!(store.get(&id("Carl")).unwrap(), None);

    store.set(&id("Carl"), 1000).unwrap();
    assert_eq!(store.get(&id("Carl")).unwrap(), Some(1000));

    store.set(&id("Carl"), 1500).unwrap();
    assert_eq!(store.get(&id("Carl")).unwrap(), Some(1500));

    store.delete(&id("Carl")).unwrap();
    assert_eq!(store.get(&id("Carl")).unwrap(), None);

    // Deleting a missing record is fine
    store.delete(&id("Carl")).unwrap();
}

#[test]
fn test_cached_miss_is_invalidated_by_set() {
    let store = open_memory();

    // Warm a negative entry
    assert_eq!(store.get(&id("Dave")).unwrap(), None);
    assert_eq!(store.cache().get(&id("Dave")), Some(None));

    store.set(&id("Dave"), 42).unwrap();
    assert_eq!(store.get(&id("Dave")).unwrap(), Some(42));
}

#[test]
fn test_delete_invalidates_cache() {
    let store = open_memory();
    store.set(&id("Bob"), 7).unwrap();
    assert_eq!(store.get(&id("Bob")).unwrap(), Some(7));

    store.delete(&id("Bob")).unwrap();
    assert_eq!(store.get(&id("Bob")).unwrap(), None);
}

#[test]
fn test_migrate_moves_record() {
    let store = open_memory();
    store.set(&id("Alice"), 1000).unwrap();

    // Warm both cache entries so a stale read would show up
    assert_eq!(store.get(&id("Alice")).unwrap(), Some(1000));
    assert_eq!(store.get(&id("Alice2")).unwrap(), None);

    store.migrate(&id("Alice"), &id("Alice2")).unwrap();

    assert_eq!(store.get(&id("Alice2")).unwrap(), Some(1000));
    assert_eq!(store.get(&id("Alice")).unwrap(), None);
    assert_eq!(store.len().unwrap(), 1);
}

#[test]
fn test_migrate_later_timestamp_wins() {
    let store = open_memory();

    // Existing target is newer: keep it
    store.set(&id("old"), 1000).unwrap();
    store.set(&id("new"), 3000).unwrap();
    store.migrate(&id("old"), &id("new")).unwrap();
    assert_eq!(store.get(&id("new")).unwrap(), Some(3000));
    assert_eq!(store.get(&id("old")).unwrap(), None);

    // Source is newer: it replaces the target
    store.set(&id("old"), 5000).unwrap();
    store.migrate(&id("old"), &id("new")).unwrap();
    assert_eq!(store.get(&id("new")).unwrap(), Some(5000));
}

#[test]
fn test_migrate_without_source_is_noop() {
    let store = open_memory();
    store.set(&id("Target"), 10).unwrap();

    store.migrate(&id("Ghost"), &id("Target")).unwrap();

    assert_eq!(store.get(&id("Target")).unwrap(), Some(10));
    assert_eq!(store.get(&id("Ghost")).unwrap(), None);
}

#[test]
fn test_migrate_to_self_keeps_record() {
    let store = open_memory();
    store.set(&id("Same"), 10).unwrap();
    store.migrate(&id("Same"), &id("Same")).unwrap();
    assert_eq!(store.get(&id("Same")).unwrap(), Some(10));
}

#[test]
fn test_clear_cache_keeps_records() {
    let store = open_memory();
    store.set(&id("Eve"), 5000).unwrap();
    assert_eq!(store.get(&id("Eve")).unwrap(), Some(5000));
    assert!(!store.cache().is_empty());

    store.clear_cache();

    assert!(store.cache().is_empty());
    assert_eq!(store.get(&id("Eve")).unwrap(), Some(5000));
}

#[test]
fn test_records_survive_reopen() {
    let dir = tempdir().unwrap();
    let config = StorageConfig::File(dir.path().join("state"));

    {
        let store = LastSeenDb::open(&config, StoreOptions::default()).unwrap();
        store.set(&id("Zezima"), 1_700_000_000_000).unwrap();
        store.set(&id("Bob"), 1).unwrap();
        store.delete(&id("Bob")).unwrap();
    }

    let store = LastSeenDb::open(&config, StoreOptions::default()).unwrap();
    assert_eq!(store.get(&id("Zezima")).unwrap(), Some(1_700_000_000_000));
    assert_eq!(store.get(&id("Bob")).unwrap(), None);
    assert!(dir.path().join("state").join("lastseen.db").exists());
}

#[test]
fn test_list_all_sorted_by_identity() {
    let store = open_memory();
    store.set(&id("b"), 2).unwrap();
    store.set(&id("a"), 1).unwrap();

    let all = store.list_all().unwrap();
    assert_eq!(all, vec![(id("a"), 1), (id("b"), 2)]);
}

#[test]
fn test_usable_as_trait_object() {
    let store: std::sync::Arc<dyn LastSeenStore> = std::sync::Arc::new(open_memory());
    store.set(&id("x"), 9).unwrap();
    assert_eq!(store.get(&id("x")).unwrap(), Some(9));
}

#[test]
fn test_second_open_reports_lock() {
    let dir = tempdir().unwrap();
    let config = StorageConfig::File(dir.path().to_path_buf());

    let _running = LastSeenDb::open(&config, StoreOptions::default()).unwrap();
    let err = LastSeenDb::open(&config, StoreOptions::default()).unwrap_err();

    assert!(err.is_already_open(), "unexpected error: {err}");
}
