use std::fmt::Debug;
use std::path::Path;

use async_trait::async_trait;
use libsql::params::IntoParams;
use serde::de;

use shared_lib::webhook_structs::{NewWebhook, WebhookId, WebhookRecord};

use crate::codec::{self, StoredRow};
use crate::{decode_stored, DBTable, RecordStore, StoreError};

const BUSY_TIMEOUT_MS: u64 = 5_000;

/// libsql-backed store, either a local database file or an embedded replica
/// of a remote primary.
pub struct LibsqlStore {
    db: libsql::Database,
    replicated: bool,
}

impl LibsqlStore {
    pub async fn open_local(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db = libsql::Builder::new_local(path.as_ref()).build().await?;

        tracing::debug!("Opened local db at {}", path.as_ref().display());

        let store = LibsqlStore {
            db,
            replicated: false,
        };
        store.init_tables().await?;
        Ok(store)
    }

    pub async fn open_replica(
        path: impl AsRef<Path>,
        url: String,
        token: String,
    ) -> Result<Self, StoreError> {
        let db = libsql::Builder::new_remote_replica(path.as_ref(), url, token)
            .build()
            .await?;

        tracing::debug!("Initialized db replica");

        let _sync = db.sync().await?;

        tracing::trace!("Synced remote db to local disk");

        let store = LibsqlStore {
            db,
            replicated: true,
        };
        store.init_tables().await?;
        Ok(store)
    }

    pub async fn init_tables(&self) -> Result<(), StoreError> {
        let conn = self.connect().await?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS webhooks (\
                id INTEGER PRIMARY KEY AUTOINCREMENT, \
                body TEXT NOT NULL, \
                headers TEXT NOT NULL, \
                query_params TEXT NOT NULL, \
                received_at TEXT NOT NULL)",
            libsql::params!(),
        )
        .await?;

        tracing::debug!("{} table ready", DBTable::Webhooks);
        Ok(())
    }

    // one connection per unit of work, dropped when the caller is done with it
    async fn connect(&self) -> Result<libsql::Connection, StoreError> {
        let conn = self.db.connect()?;
        // PRAGMA busy_timeout reports the new value as a row, so it has to go through query
        let mut pragma = conn
            .query(
                &format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}"),
                libsql::params!(),
            )
            .await?;
        pragma.next().await?;
        drop(pragma);
        Ok(conn)
    }

    async fn query_many<T>(&self, statement: &str, params: impl IntoParams) -> Result<Vec<T>, StoreError>
    where
        T: de::DeserializeOwned,
        T: Debug,
    {
        let conn = self.connect().await?;
        let mut result_set = conn.query(statement, params).await?;

        let mut rows = Vec::new();
        while let Some(row) = result_set.next().await? {
            rows.push(libsql::de::from_row::<T>(&row)?);
        }

        Ok(rows)
    }

    async fn query_optional<T>(
        &self,
        statement: &str,
        params: impl IntoParams,
    ) -> Result<Option<T>, StoreError>
    where
        T: de::DeserializeOwned,
        T: Debug,
    {
        let conn = self.connect().await?;
        let mut result_set = conn.query(statement, params).await?;

        match result_set.next().await? {
            Some(row) => Ok(Some(libsql::de::from_row::<T>(&row)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl RecordStore for LibsqlStore {
    async fn create(&self, webhook: NewWebhook) -> Result<WebhookId, StoreError> {
        let encoded = codec::encode_webhook(&webhook).map_err(StoreError::Encode)?;

        #[derive(Debug, serde::Deserialize)]
        struct InsertedRow {
            id: i64,
        }

        let inserted = self
            .query_optional::<InsertedRow>(
                "INSERT INTO webhooks (body, headers, query_params, received_at) \
                VALUES (?1, ?2, ?3, ?4) \
                RETURNING id",
                libsql::params![
                    encoded.body,
                    encoded.headers,
                    encoded.query_params,
                    encoded.received_at
                ],
            )
            .await?
            .ok_or_else(|| StoreError::MissingId(DBTable::Webhooks.to_string()))?;

        tracing::trace!("{} row {} inserted", DBTable::Webhooks, inserted.id);

        // the row is committed at this point, a failed sync must not turn it into an error
        if self.replicated {
            if let Err(err) = self.db.sync().await {
                tracing::warn!(
                    "{} row {} stored but replica sync failed: {}",
                    DBTable::Webhooks,
                    inserted.id,
                    err
                );
            }
        }

        Ok(WebhookId(inserted.id))
    }

    async fn get_by_id(&self, id: WebhookId) -> Result<Option<WebhookRecord>, StoreError> {
        let row = self
            .query_optional::<StoredRow>(
                "SELECT id, body, headers, query_params, received_at FROM webhooks WHERE id = ?1",
                libsql::params![id.0],
            )
            .await?;

        row.as_ref().map(decode_stored).transpose()
    }

    async fn list_all(&self) -> Result<Vec<WebhookRecord>, StoreError> {
        let rows = self
            .query_many::<StoredRow>(
                "SELECT id, body, headers, query_params, received_at FROM webhooks ORDER BY id ASC",
                libsql::params!(),
            )
            .await?;

        rows.iter().map(decode_stored).collect()
    }

    async fn count(&self) -> Result<u64, StoreError> {
        #[derive(Debug, serde::Deserialize)]
        struct CountRow {
            total: i64,
        }

        let count = self
            .query_optional::<CountRow>("SELECT COUNT(*) AS total FROM webhooks", libsql::params!())
            .await?;

        Ok(count.map(|row| row.total as u64).unwrap_or_default())
    }
}
