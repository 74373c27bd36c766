//! Integration tests for the on-disk game catalog

use mygamedb_config::StoreConfig;
use mygamedb_library::{CatalogError, CatalogStore, GameField, Platform, Rating};
use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment holding a catalog file in a temporary directory
struct CatalogTestEnv {
    #[allow(dead_code)]
    temp_dir: TempDir,
    db_path: PathBuf,
}

impl CatalogTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("myGameCollection.db");

        Self { temp_dir, db_path }
    }

    fn open(&self) -> CatalogStore {
        CatalogStore::open(&self.db_path, "games").expect("Failed to open catalog")
    }
}

#[test]
fn test_initialize_creates_file() {
    let env = CatalogTestEnv::new();
    let store = env.open();
    store.close().unwrap();

    assert!(env.db_path.exists());
}

#[test]
fn test_closed_session_is_durable() {
    let env = CatalogTestEnv::new();

    let store = env.open();
    store
        .insert("Halo 5", Platform::Xone.as_str(), Rating::Teen.as_str())
        .unwrap();
    store
        .insert("Bloodborne", Platform::Ps4.as_str(), Rating::Mature.as_str())
        .unwrap();
    store.close().unwrap();

    let store = env.open();
    assert_eq!(store.count().unwrap(), 2);
    assert!(store.exists("Halo 5").unwrap());
    assert_eq!(store.next_id().unwrap(), 3);
    store.close().unwrap();
}

#[test]
fn test_reinitialize_keeps_rows() {
    let env = CatalogTestEnv::new();

    let store = env.open();
    store.insert("Splatoon", "WiiU", "E10+").unwrap();
    store.close().unwrap();

    for _ in 0..3 {
        let store = env.open();
        assert_eq!(store.count().unwrap(), 1);
        store.close().unwrap();
    }
}

#[test]
fn test_dropped_session_loses_pending_writes() {
    let env = CatalogTestEnv::new();

    let store = env.open();
    store.insert("Committed", "PS4", "T").unwrap();
    store.close().unwrap();

    {
        let store = env.open();
        store.insert("Uncommitted", "PS4", "T").unwrap();
        store.delete("Committed").unwrap();
    }

    let store = env.open();
    assert!(store.exists("Committed").unwrap());
    assert!(!store.exists("Uncommitted").unwrap());
    store.close().unwrap();
}

#[test]
fn test_open_with_store_config() {
    let env = CatalogTestEnv::new();
    let config = StoreConfig {
        path: env.db_path.clone(),
        table: "collection".to_string(),
    };

    let store = CatalogStore::open_with(&config).unwrap();
    assert_eq!(store.table(), "collection");
    store.insert("Forza 6", "XONE", "E10+").unwrap();
    store.close().unwrap();

    // A different table in the same file is a separate catalog
    let other = env.open();
    assert_eq!(other.count().unwrap(), 0);
    other.close().unwrap();

    let store = CatalogStore::open_with(&config).unwrap();
    assert_eq!(store.count().unwrap(), 1);
    store.close().unwrap();
}

#[test]
fn test_open_rejects_bad_table() {
    let env = CatalogTestEnv::new();
    let result = CatalogStore::open(&env.db_path, "games\"--");

    assert!(matches!(result, Err(CatalogError::InvalidTable(_))));
}

#[test]
fn test_search_across_sessions() {
    let env = CatalogTestEnv::new();

    let store = env.open();
    for (name, platform, rating) in [
        ("Mario Kart 8", Platform::WiiU, Rating::E10Plus),
        ("Mario", Platform::WiiU, Rating::E10Plus),
        ("Super Mario", Platform::WiiU, Rating::E10Plus),
        ("Halo 5", Platform::Xone, Rating::Teen),
    ] {
        store.insert(name, platform.as_str(), rating.as_str()).unwrap();
    }
    store.close().unwrap();

    let store = env.open();
    let series = store.find_by_name_prefix("Mario").unwrap();
    assert_eq!(series.len(), 2);
    assert!(series.iter().all(|g| g.name.starts_with("Mario")));

    let teen = store.find_by_field(GameField::Rating, "T").unwrap();
    assert_eq!(teen.len(), 1);
    assert_eq!(teen[0].to_string(), "Halo 5 : XONE : T");

    let field: GameField = "platform".parse().unwrap();
    assert_eq!(store.find_by_field(field, "WiiU").unwrap().len(), 3);
    store.close().unwrap();
}
