//! `PostgreSQL` mapping and backup store adapters.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

use super::models::{EntryBackupRow, TimesheetMappingRow};
use super::schema::{entry_backups, task_mappings, timesheet_mappings};
use crate::connect::domain::{LabelId, SourceEntryId};
use crate::entry::domain::{EntryBackup, EntryMapping};
use crate::entry::ports::{
    BackupStore, MappingPage, MappingStore, MappingStoreError, MappingStoreResult,
};

/// `PostgreSQL` connection pool type used by the entry store adapters.
pub type EntryPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed mapping store.
#[derive(Debug, Clone)]
pub struct PostgresMappingStore {
    pool: EntryPgPool,
}

impl PostgresMappingStore {
    /// Creates a store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: EntryPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> MappingStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> MappingStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        run_on_pool(self.pool.clone(), f).await
    }
}

/// Offloads a synchronous Diesel operation to the blocking thread pool.
async fn run_on_pool<F, T>(pool: EntryPgPool, f: F) -> MappingStoreResult<T>
where
    F: FnOnce(&mut PgConnection) -> MappingStoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut connection = pool
            .get()
            .map_err(|err| MappingStoreError::connection(err.to_string()))?;
        f(&mut connection)
    })
    .await
    .map_err(MappingStoreError::persistence)?
}

#[async_trait]
impl MappingStore for PostgresMappingStore {
    async fn task_name(&self, label: LabelId) -> MappingStoreResult<Option<String>> {
        self.run_blocking(move |connection| {
            task_mappings::table
                .filter(task_mappings::label_id.eq(label.value()))
                .select(task_mappings::task_name)
                .first::<String>(connection)
                .optional()
                .map_err(MappingStoreError::persistence)
        })
        .await
    }

    async fn fetch(&self, source: SourceEntryId) -> MappingStoreResult<Option<EntryMapping>> {
        self.run_blocking(move |connection| {
            let row = timesheet_mappings::table
                .filter(timesheet_mappings::source_id.eq(source.value()))
                .select(TimesheetMappingRow::as_select())
                .first::<TimesheetMappingRow>(connection)
                .optional()
                .map_err(MappingStoreError::persistence)?;
            Ok(row.map(EntryMapping::from))
        })
        .await
    }

    async fn put(&self, mapping: &EntryMapping) -> MappingStoreResult<()> {
        let row = TimesheetMappingRow::from(mapping);
        self.run_blocking(move |connection| {
            diesel::insert_into(timesheet_mappings::table)
                .values(&row)
                .on_conflict(timesheet_mappings::source_id)
                .do_update()
                .set(&row)
                .execute(connection)
                .map_err(MappingStoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn delete(&self, source: SourceEntryId) -> MappingStoreResult<()> {
        self.run_blocking(move |connection| {
            diesel::delete(
                timesheet_mappings::table
                    .filter(timesheet_mappings::source_id.eq(source.value())),
            )
            .execute(connection)
            .map_err(MappingStoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn scan_older_than(
        &self,
        cutoff: NaiveDate,
        after: Option<SourceEntryId>,
        limit: u32,
    ) -> MappingStoreResult<MappingPage> {
        self.run_blocking(move |connection| {
            let mut query = timesheet_mappings::table
                .filter(timesheet_mappings::day.lt(cutoff))
                .select(TimesheetMappingRow::as_select())
                .into_boxed();
            if let Some(key) = after {
                query = query.filter(timesheet_mappings::source_id.gt(key.value()));
            }

            // One extra row decides whether another page follows.
            let fetch = i64::from(limit).saturating_add(1);
            let mut rows = query
                .order(timesheet_mappings::source_id.asc())
                .limit(fetch)
                .load::<TimesheetMappingRow>(connection)
                .map_err(MappingStoreError::persistence)?;

            let page_len = usize::try_from(limit).unwrap_or(usize::MAX);
            let next = if rows.len() > page_len {
                rows.truncate(page_len);
                rows.last().map(|row| SourceEntryId::new(row.source_id))
            } else {
                None
            };

            Ok(MappingPage {
                rows: rows.into_iter().map(EntryMapping::from).collect(),
                next,
            })
        })
        .await
    }
}

/// `PostgreSQL`-backed backup store.
#[derive(Debug, Clone)]
pub struct PostgresBackupStore {
    pool: EntryPgPool,
}

impl PostgresBackupStore {
    /// Creates a store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: EntryPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BackupStore for PostgresBackupStore {
    async fn put(&self, backup: &EntryBackup) -> MappingStoreResult<()> {
        let row = EntryBackupRow::from(backup);
        run_on_pool(self.pool.clone(), move |connection| {
            diesel::insert_into(entry_backups::table)
                .values(&row)
                .on_conflict(entry_backups::source_id)
                .do_update()
                .set(&row)
                .execute(connection)
                .map_err(MappingStoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn fetch(&self, source: SourceEntryId) -> MappingStoreResult<Option<EntryBackup>> {
        run_on_pool(self.pool.clone(), move |connection| {
            let row = entry_backups::table
                .filter(entry_backups::source_id.eq(source.value()))
                .select(EntryBackupRow::as_select())
                .first::<EntryBackupRow>(connection)
                .optional()
                .map_err(MappingStoreError::persistence)?;
            Ok(row.map(EntryBackup::from))
        })
        .await
    }

    async fn delete(&self, source: SourceEntryId) -> MappingStoreResult<bool> {
        run_on_pool(self.pool.clone(), move |connection| {
            let removed = diesel::delete(
                entry_backups::table.filter(entry_backups::source_id.eq(source.value())),
            )
            .execute(connection)
            .map_err(MappingStoreError::persistence)?;
            Ok(removed > 0)
        })
        .await
    }
}
