//! Storage layer for roster
//!
//! The roster is a single document: the full student list, read wholesale at
//! startup and overwritten wholesale after every change. `Storage` owns the
//! in-memory list, the document store behind it and the audit log.

pub mod document;
pub mod file_io;
pub mod init;
pub mod students;
pub mod usage;

pub use document::{DocumentStore, JsonFileStore};
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use students::StudentRepository;
pub use usage::StorageUsage;

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::RosterPaths;
use crate::config::settings::{Settings, SyncPolicy};
use crate::error::{RosterError, RosterResult};

/// Main storage coordinator
pub struct Storage {
    paths: RosterPaths,
    settings: Settings,
    store: Box<dyn DocumentStore>,
    audit: AuditLogger,
    pub students: StudentRepository,
}

impl Storage {
    /// Create storage backed by the JSON document named in `settings`
    pub fn new(paths: RosterPaths, settings: Settings) -> RosterResult<Self> {
        let store = JsonFileStore::new(settings.document_path(&paths));
        Self::with_store(paths, settings, Box::new(store))
    }

    /// Create storage over any document store
    pub fn with_store(
        paths: RosterPaths,
        settings: Settings,
        store: Box<dyn DocumentStore>,
    ) -> RosterResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            students: StudentRepository::new(),
            paths,
            settings,
            store,
        })
    }

    pub fn paths(&self) -> &RosterPaths {
        &self.paths
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Read the whole document into memory
    pub fn load(&self) -> RosterResult<()> {
        let students = self.store.load()?;
        tracing::debug!(
            count = students.len(),
            location = %self.store.location(),
            "loaded student document"
        );
        self.students.replace(students)
    }

    /// Overwrite the stored document with the in-memory list
    ///
    /// This is the only write path to the store. Under `SyncPolicy::Lenient`
    /// a failed write is logged and the in-memory state stays authoritative.
    pub fn commit(&self) -> RosterResult<()> {
        let snapshot = self.students.snapshot()?;

        match self.store.replace_all(&snapshot) {
            Ok(()) => {
                tracing::debug!(count = snapshot.len(), "synced student document");
                Ok(())
            }
            Err(e) => {
                let err = RosterError::Sync(format!(
                    "could not write {}: {}",
                    self.store.location(),
                    e
                ));
                match self.settings.sync_policy {
                    SyncPolicy::Strict => Err(err),
                    SyncPolicy::Lenient => {
                        tracing::warn!(error = %err, "sync failed, keeping local changes");
                        Ok(())
                    }
                }
            }
        }
    }

    /// Size of the roster against the configured quota
    pub fn usage(&self) -> RosterResult<StorageUsage> {
        StorageUsage::measure(&self.students.snapshot()?, self.settings.storage_limit_kb)
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        code: impl Into<String>,
        name: Option<String>,
        entity: &T,
    ) -> RosterResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, code, name, entity))
    }

    /// Log an update with a diff summary of the changed fields
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        code: impl Into<String>,
        name: Option<String>,
        before: &T,
        after: &T,
    ) -> RosterResult<()> {
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        self.audit.log(&AuditEntry::update(
            entity_type,
            code,
            name,
            before,
            after,
            diff,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        code: impl Into<String>,
        name: Option<String>,
        entity: &T,
    ) -> RosterResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, code, name, entity))
    }

    pub fn log_batch(&self, entries: &[AuditEntry]) -> RosterResult<()> {
        self.audit.log_batch(entries)
    }
}
