//! `tower_sessions::SessionStore` backed by a MongoDB collection.
//!
//! Each session is one document:
//!
//! ```json
//! { "_id": "<session id>", "data": "<json>", "expireAt": ISODate(...) }
//! ```
//!
//! A TTL index on `expireAt` lets MongoDB drop stale sessions on its own;
//! [`spawn_expired_session_cleanup`] also purges them on a fixed interval.

use async_trait::async_trait;
use database::mongodb::is_duplicate_key_error;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{self, doc},
    options::IndexOptions,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tower_sessions::cookie::time::OffsetDateTime;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, ExpiredDeletion, SessionStore};

const COLLECTION: &str = "sessions";
const TTL_INDEX: &str = "idx_sessions_expire_at_ttl";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionDocument {
    #[serde(rename = "_id")]
    id: String,
    data: String,
    #[serde(rename = "expireAt")]
    expire_at: bson::DateTime,
}

impl SessionDocument {
    fn from_record(record: &Record) -> session_store::Result<Self> {
        let data = serde_json::to_string(&record.data)
            .map_err(|e| session_store::Error::Encode(e.to_string()))?;
        Ok(Self {
            id: record.id.to_string(),
            data,
            expire_at: to_bson_datetime(record.expiry_date),
        })
    }

    fn into_record(self, id: Id) -> session_store::Result<Record> {
        let data: HashMap<String, serde_json::Value> = serde_json::from_str(&self.data)
            .map_err(|e| session_store::Error::Decode(e.to_string()))?;
        let expiry_date = from_bson_datetime(self.expire_at)?;
        Ok(Record {
            id,
            data,
            expiry_date,
        })
    }
}

fn to_bson_datetime(at: OffsetDateTime) -> bson::DateTime {
    bson::DateTime::from_millis((at.unix_timestamp_nanos() / 1_000_000) as i64)
}

fn from_bson_datetime(at: bson::DateTime) -> session_store::Result<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(at.timestamp_millis()) * 1_000_000)
        .map_err(|e| session_store::Error::Decode(e.to_string()))
}

fn backend(err: mongodb::error::Error) -> session_store::Error {
    session_store::Error::Backend(err.to_string())
}

/// Session store sharing the application's [`Database`].
#[derive(Clone)]
pub struct MongoSessionStore {
    collection: Collection<SessionDocument>,
}

impl fmt::Debug for MongoSessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MongoSessionStore")
            .field("collection", &self.collection.name())
            .finish()
    }
}

impl MongoSessionStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<SessionDocument>(COLLECTION),
        }
    }

    /// TTL index: MongoDB removes a session once `expireAt` has passed.
    pub async fn init_indexes(&self) -> mongodb::error::Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "expireAt": 1 })
            .options(
                IndexOptions::builder()
                    .name(TTL_INDEX.to_string())
                    .expire_after(Duration::ZERO)
                    .build(),
            )
            .build();
        self.collection.create_index(index).await?;
        tracing::info!("Session indexes created successfully");
        Ok(())
    }
}

#[async_trait]
impl SessionStore for MongoSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        loop {
            let document = SessionDocument::from_record(record)?;
            match self.collection.insert_one(&document).await {
                Ok(_) => return Ok(()),
                Err(e) if is_duplicate_key_error(&e) => record.id = Id::default(),
                Err(e) => return Err(backend(e)),
            }
        }
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        let document = SessionDocument::from_record(record)?;
        self.collection
            .replace_one(doc! { "_id": document.id.as_str() }, &document)
            .upsert(true)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let filter = doc! {
            "_id": session_id.to_string(),
            "expireAt": { "$gt": bson::DateTime::now() },
        };
        match self.collection.find_one(filter).await.map_err(backend)? {
            Some(document) => document.into_record(*session_id).map(Some),
            None => Ok(None),
        }
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.collection
            .delete_one(doc! { "_id": session_id.to_string() })
            .await
            .map_err(backend)?;
        Ok(())
    }
}

#[async_trait]
impl ExpiredDeletion for MongoSessionStore {
    async fn delete_expired(&self) -> session_store::Result<()> {
        let result = self
            .collection
            .delete_many(doc! { "expireAt": { "$lte": bson::DateTime::now() } })
            .await
            .map_err(backend)?;
        if result.deleted_count > 0 {
            tracing::debug!(deleted = result.deleted_count, "Expired sessions removed");
        }
        Ok(())
    }
}

/// Run `delete_expired` every `period` until the runtime shuts down.
pub fn spawn_expired_session_cleanup<S>(store: S, period: Duration) -> JoinHandle<()>
where
    S: ExpiredDeletion,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            if let Err(e) = store.delete_expired().await {
                tracing::warn!(error = %e, "Expired session cleanup failed");
            }
        }
    })
}
