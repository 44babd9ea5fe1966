// SPDX-License-Identifier: MIT

//! MongoDB-backed wrap history, one document per user.
//!
//! The driver's `Client` pools connections internally, so one store
//! instance created at startup is shared by all requests. Every write
//! is keyed by `user_id` and last-write-wins at the document level; no
//! operation needs mutual exclusion beyond that.

use mongodb::bson::{doc, to_bson, Bson, Document};
use mongodb::{Client, Collection};

use crate::db::collections;
use crate::error::AppError;
use crate::models::{UserSummary, Wrap};

/// Wrap history store keyed by provider user id.
#[derive(Clone)]
pub struct SummaryStore {
    collection: Option<Collection<UserSummary>>,
}

impl SummaryStore {
    /// Connect to MongoDB and bind the `user_summaries` collection.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self, AppError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to MongoDB: {}", e)))?;

        let collection = client
            .database(db_name)
            .collection(collections::USER_SUMMARIES);

        tracing::info!(database = db_name, "Connected to MongoDB");

        Ok(Self {
            collection: Some(collection),
        })
    }

    /// Create a mock store for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { collection: None }
    }

    fn collection(&self) -> Result<&Collection<UserSummary>, AppError> {
        self.collection
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    /// Append a wrap to the user's history, creating the document on
    /// first save.
    pub async fn save(&self, user_id: &str, wrap: &Wrap) -> Result<(), AppError> {
        let wrap_bson = to_bson(wrap)
            .map_err(|e| AppError::Database(format!("Failed to encode wrap: {}", e)))?;

        self.collection()?
            .update_one(
                doc! { "user_id": user_id },
                doc! { "$push": { "summary_list": wrap_bson } },
            )
            .upsert(true)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    /// All of the user's wraps in creation order; empty when the
    /// document does not exist.
    pub async fn list(&self, user_id: &str) -> Result<Vec<Wrap>, AppError> {
        let document = self
            .collection()?
            .find_one(doc! { "user_id": user_id })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(document.map(|d| d.summary_list).unwrap_or_default())
    }

    /// One wrap by position.
    pub async fn get(&self, user_id: &str, index: usize) -> Result<Wrap, AppError> {
        let list = self.list(user_id).await?;
        let len = list.len();
        list.into_iter()
            .nth(index)
            .ok_or(AppError::IndexOutOfRange { index, len })
    }

    /// Empty the user's history. Idempotent: clearing an absent or
    /// already-empty document is not an error.
    pub async fn clear(&self, user_id: &str) -> Result<Vec<Wrap>, AppError> {
        self.collection()?
            .update_one(
                doc! { "user_id": user_id },
                doc! { "$set": { "summary_list": [] } },
            )
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.list(user_id).await
    }

    /// Remove one wrap by position, shifting the rest left.
    ///
    /// Positional removal is not a primitive on MongoDB arrays: unset
    /// the slot to null first, then pull the null out to compact.
    pub async fn delete(&self, user_id: &str, index: usize) -> Result<Vec<Wrap>, AppError> {
        let len = self.list(user_id).await?.len();
        check_index(index, len)?;

        let mut slot = Document::new();
        slot.insert(format!("summary_list.{}", index), "");
        self.collection()?
            .update_one(doc! { "user_id": user_id }, doc! { "$unset": slot })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.collection()?
            .update_one(
                doc! { "user_id": user_id },
                doc! { "$pull": { "summary_list": Bson::Null } },
            )
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.list(user_id).await
    }
}

fn check_index(index: usize, len: usize) -> Result<(), AppError> {
    if index >= len {
        return Err(AppError::IndexOutOfRange { index, len });
    }
    Ok(())
}
