use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use crate::errors::CoreError;
use crate::models::account::AccountDraft;
use crate::models::document::{DocumentPatch, StorageDocument, CURRENT_VERSION};
use crate::models::event::EventDraft;
use crate::services::sanitize_service::SanitizeService;
use crate::services::validation_service::{FieldError, ValidationService};
use crate::storage::backend::{MemoryBackend, StorageBackend};

/// Fixed key under which the whole document is stored.
pub const STORAGE_KEY: &str = "cash_flow_data";

/// High-level persistence: reads and writes the single JSON document,
/// sanitizing and validating on both sides so nothing malformed ever
/// crosses the storage boundary.
pub struct StorageService {
    backend: Arc<dyn StorageBackend>,
}

impl StorageService {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Service over a fresh volatile backend. Data lives only as long
    /// as the service.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Merge `patch` over the stored document and write the result.
    ///
    /// Flow: load existing → shallow-merge the patched slices →
    /// sanitize → validate (any invalid record aborts the save with
    /// nothing written) → stamp `last_updated` and `version` → replace
    /// the stored blob in a single write.
    pub async fn save_data(&self, patch: DocumentPatch) -> Result<(), CoreError> {
        let mut document = self.load_data().await;
        if let Some(accounts) = patch.accounts {
            document.accounts = accounts;
        }
        if let Some(events) = patch.events {
            document.events = events;
        }

        let mut document = SanitizeService::sanitize_document(document);
        Self::validate_document(&document)?;

        document.last_updated = Utc::now();
        document.version = CURRENT_VERSION;

        let json = serde_json::to_string(&document)
            .map_err(|e| CoreError::Serialization(e.to_string()))?;
        self.backend.set(STORAGE_KEY, &json).await
    }

    /// Load the stored document. Never fails: a missing key, unreadable
    /// backend, parse failure, or invalid content all degrade to the
    /// default empty document (logged as warnings, since downstream
    /// consumers treat this as a recovered condition).
    pub async fn load_data(&self) -> StorageDocument {
        let raw = match self.backend.get(STORAGE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return StorageDocument::default(),
            Err(e) => {
                warn!("failed to read stored document: {e}");
                return StorageDocument::default();
            }
        };

        let document: StorageDocument = match serde_json::from_str(&raw) {
            Ok(document) => document,
            Err(e) => {
                warn!("failed to parse stored document: {e}");
                return StorageDocument::default();
            }
        };

        // No migration is performed; the document is used as-is.
        if document.version != CURRENT_VERSION {
            warn!(
                stored = document.version,
                current = CURRENT_VERSION,
                "stored document version mismatch, migrations may be needed"
            );
        }

        let document = SanitizeService::sanitize_document(document);
        if let Err(e) = Self::validate_document(&document) {
            warn!("stored document failed validation, falling back to empty: {e}");
            return StorageDocument::default();
        }

        document
    }

    /// Remove the stored document entirely.
    pub async fn clear_data(&self) -> Result<(), CoreError> {
        self.backend.remove(STORAGE_KEY).await
    }

    /// Check every record in the document against the business rules.
    fn validate_document(document: &StorageDocument) -> Result<(), CoreError> {
        for account in &document.accounts {
            let result = ValidationService::validate_account(&AccountDraft::from(account));
            if !result.is_valid {
                return Err(CoreError::Validation(format!(
                    "account '{}': {}",
                    account.name,
                    join_errors(&result.errors)
                )));
            }
        }

        for event in &document.events {
            let result = ValidationService::validate_event(&EventDraft::from(event));
            if !result.is_valid {
                return Err(CoreError::Validation(format!(
                    "event '{}': {}",
                    event.name,
                    join_errors(&result.errors)
                )));
            }
        }

        Ok(())
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(FieldError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
