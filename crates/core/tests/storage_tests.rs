// ═══════════════════════════════════════════════════════════════════
// Storage Tests — backends, StorageService merge/fallback semantics
// ═══════════════════════════════════════════════════════════════════

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use cashflow_core::errors::CoreError;
use cashflow_core::models::account::{AccountType, CashAccount, Owner};
use cashflow_core::models::document::{DocumentPatch, StorageDocument, CURRENT_VERSION};
use cashflow_core::models::event::{Event, EventProgress, EventType};
use cashflow_core::storage::backend::{FileBackend, MemoryBackend, StorageBackend};
use cashflow_core::storage::manager::{StorageService, STORAGE_KEY};

fn account(name: &str) -> CashAccount {
    CashAccount {
        id: Uuid::new_v4(),
        name: name.into(),
        account_type: AccountType::Checking,
        account_number: "5678".into(),
        current_balance: 1000.0,
        current_inflows: 200.0,
        current_outflows: 50.0,
        surplus_deficit: 150.0,
        year_end_projected: 1500.0,
        owner: Owner {
            name: "Colin".into(),
            avatar: None,
        },
    }
}

fn event(name: &str, amount: f64) -> Event {
    Event {
        id: Uuid::new_v4(),
        event_type: EventType::Vacation,
        name: name.into(),
        amount,
        date: NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(),
        progress: EventProgress::OnTrack,
    }
}

// ═══════════════════════════════════════════════════════════════════
//  MemoryBackend
// ═══════════════════════════════════════════════════════════════════

mod memory_backend {
    use super::*;

    #[tokio::test]
    async fn get_missing_key_is_none() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get() {
        let backend = MemoryBackend::new();
        backend.set("k", "v").await.unwrap();
        assert_eq!(backend.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn set_replaces_existing_value() {
        let backend = MemoryBackend::new();
        backend.set("k", "v1").await.unwrap();
        backend.set("k", "v2").await.unwrap();
        assert_eq!(backend.get("k").await.unwrap().as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn remove_missing_key_is_ok() {
        let backend = MemoryBackend::new();
        assert!(backend.remove("nope").await.is_ok());
    }

    #[tokio::test]
    async fn remove_deletes_value() {
        let backend = MemoryBackend::new();
        backend.set("k", "v").await.unwrap();
        backend.remove("k").await.unwrap();
        assert_eq!(backend.get("k").await.unwrap(), None);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  FileBackend
// ═══════════════════════════════════════════════════════════════════

mod file_backend {
    use super::*;

    #[tokio::test]
    async fn roundtrip_through_directory() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());
        backend.set("cash", "{\"x\":1}").await.unwrap();
        assert_eq!(
            backend.get("cash").await.unwrap().as_deref(),
            Some("{\"x\":1}")
        );
        assert!(dir.path().join("cash.json").exists());
    }

    #[tokio::test]
    async fn get_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());
        assert_eq!(backend.get("cash").await.unwrap(), None);
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());
        backend.set("cash", "v").await.unwrap();
        backend.remove("cash").await.unwrap();
        backend.remove("cash").await.unwrap();
        assert_eq!(backend.get("cash").await.unwrap(), None);
    }

    #[tokio::test]
    async fn leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());
        backend.set("cash", "v").await.unwrap();
        assert!(!dir.path().join("cash.json.tmp").exists());
    }

    #[tokio::test]
    async fn full_service_over_files() {
        let dir = tempfile::tempdir().unwrap();
        let service = StorageService::new(Arc::new(FileBackend::new(dir.path())));
        service
            .save_data(DocumentPatch::accounts(vec![account("A")]))
            .await
            .unwrap();
        let loaded = service.load_data().await;
        assert_eq!(loaded.accounts.len(), 1);
        assert_eq!(loaded.accounts[0].name, "A");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  StorageService — load
// ═══════════════════════════════════════════════════════════════════

mod load_data {
    use super::*;

    #[tokio::test]
    async fn missing_blob_yields_default_document() {
        let service = StorageService::in_memory();
        let doc = service.load_data().await;
        assert!(doc.accounts.is_empty());
        assert!(doc.events.is_empty());
        assert_eq!(doc.version, CURRENT_VERSION);
    }

    #[tokio::test]
    async fn corrupt_blob_yields_default_document() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set(STORAGE_KEY, "not json at all {{{").await.unwrap();
        let service = StorageService::new(backend);
        let doc = service.load_data().await;
        assert!(doc.accounts.is_empty());
        assert!(doc.events.is_empty());
        assert_eq!(doc.version, CURRENT_VERSION);
    }

    #[tokio::test]
    async fn invalid_stored_records_yield_default_document() {
        let backend = Arc::new(MemoryBackend::new());
        let mut bad = account("ok");
        bad.account_number = "12".into(); // too short
        let doc = StorageDocument {
            accounts: vec![bad],
            ..StorageDocument::default()
        };
        backend
            .set(STORAGE_KEY, &serde_json::to_string(&doc).unwrap())
            .await
            .unwrap();
        let service = StorageService::new(backend);
        let loaded = service.load_data().await;
        assert!(loaded.accounts.is_empty());
    }

    #[tokio::test]
    async fn version_mismatch_is_tolerated() {
        let backend = Arc::new(MemoryBackend::new());
        let doc = StorageDocument {
            accounts: vec![account("old")],
            version: 0,
            ..StorageDocument::default()
        };
        backend
            .set(STORAGE_KEY, &serde_json::to_string(&doc).unwrap())
            .await
            .unwrap();
        let service = StorageService::new(backend);
        let loaded = service.load_data().await;
        // No migration: the document is still served
        assert_eq!(loaded.accounts.len(), 1);
        assert_eq!(loaded.version, 0);
    }

    #[tokio::test]
    async fn loaded_records_are_sanitized() {
        let backend = Arc::new(MemoryBackend::new());
        let mut padded = account("padded");
        padded.name = "  padded  ".into();
        padded.account_number = "1234-5678".into();
        let doc = StorageDocument {
            accounts: vec![padded],
            ..StorageDocument::default()
        };
        backend
            .set(STORAGE_KEY, &serde_json::to_string(&doc).unwrap())
            .await
            .unwrap();
        let service = StorageService::new(backend);
        let loaded = service.load_data().await;
        assert_eq!(loaded.accounts[0].name, "padded");
        assert_eq!(loaded.accounts[0].account_number, "12345678");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  StorageService — save
// ═══════════════════════════════════════════════════════════════════

mod save_data {
    use super::*;

    #[tokio::test]
    async fn roundtrip_preserves_accounts() {
        let service = StorageService::in_memory();
        let accounts = vec![account("A"), account("B")];
        service
            .save_data(DocumentPatch::accounts(accounts.clone()))
            .await
            .unwrap();
        let loaded = service.load_data().await;
        assert_eq!(loaded.accounts, accounts);
    }

    #[tokio::test]
    async fn partial_account_save_leaves_events_untouched() {
        let service = StorageService::in_memory();
        service
            .save_data(DocumentPatch::events(vec![event("Trip", 500.0)]))
            .await
            .unwrap();
        service
            .save_data(DocumentPatch::accounts(vec![account("A")]))
            .await
            .unwrap();

        let loaded = service.load_data().await;
        assert_eq!(loaded.accounts.len(), 1);
        assert_eq!(loaded.events.len(), 1);
        assert_eq!(loaded.events[0].name, "Trip");
    }

    #[tokio::test]
    async fn partial_event_save_leaves_accounts_untouched() {
        let service = StorageService::in_memory();
        service
            .save_data(DocumentPatch::accounts(vec![account("A")]))
            .await
            .unwrap();
        service
            .save_data(DocumentPatch::events(vec![event("Trip", 500.0)]))
            .await
            .unwrap();

        let loaded = service.load_data().await;
        assert_eq!(loaded.accounts.len(), 1);
        assert_eq!(loaded.accounts[0].name, "A");
    }

    #[tokio::test]
    async fn invalid_record_aborts_without_writing() {
        let service = StorageService::in_memory();
        service
            .save_data(DocumentPatch::accounts(vec![account("keep")]))
            .await
            .unwrap();

        let mut bad = event("Bad", 500.0);
        bad.name = "   ".into();
        let result = service.save_data(DocumentPatch::events(vec![bad])).await;
        assert!(matches!(result, Err(CoreError::Validation(_))));

        // Prior document is intact and the rejected slice never landed
        let loaded = service.load_data().await;
        assert_eq!(loaded.accounts.len(), 1);
        assert!(loaded.events.is_empty());
    }

    #[tokio::test]
    async fn save_sanitizes_before_writing() {
        let service = StorageService::in_memory();
        let mut padded = account("ok");
        padded.name = "  ok  ".into();
        service
            .save_data(DocumentPatch::accounts(vec![padded]))
            .await
            .unwrap();
        let loaded = service.load_data().await;
        assert_eq!(loaded.accounts[0].name, "ok");
    }

    #[tokio::test]
    async fn save_stamps_version_and_timestamp() {
        let backend = Arc::new(MemoryBackend::new());
        let service = StorageService::new(backend.clone());
        let before = chrono::Utc::now();
        service
            .save_data(DocumentPatch::accounts(vec![account("A")]))
            .await
            .unwrap();

        let raw = backend.get(STORAGE_KEY).await.unwrap().unwrap();
        let stored: StorageDocument = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.version, CURRENT_VERSION);
        assert!(stored.last_updated >= before);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  StorageService — clear
// ═══════════════════════════════════════════════════════════════════

mod clear_data {
    use super::*;

    #[tokio::test]
    async fn clear_removes_stored_document() {
        let backend = Arc::new(MemoryBackend::new());
        let service = StorageService::new(backend.clone());
        service
            .save_data(DocumentPatch::accounts(vec![account("A")]))
            .await
            .unwrap();
        service.clear_data().await.unwrap();
        assert_eq!(backend.get(STORAGE_KEY).await.unwrap(), None);
        assert!(service.load_data().await.accounts.is_empty());
    }

    #[tokio::test]
    async fn clear_on_empty_store_is_ok() {
        let service = StorageService::in_memory();
        assert!(service.clear_data().await.is_ok());
    }
}
