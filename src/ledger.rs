use serde_json::json;
use tracing::{debug, warn};

use crate::{
    appwrite::{AppwriteClient, Query, StoreError},
    images::{ImageSize, ImageUrls},
    models::{MovieSummary, TrendingRecord},
};

/// How many records the home page's trending shelf shows.
pub const DEFAULT_TRENDING_LIMIT: usize = 5;

/// Ceiling for caller-supplied trending limits.
pub const MAX_TRENDING_LIMIT: usize = 20;

/// Tracks how often each movie surfaces as the top hit of a search, one
/// document per movie in the backing collection.
pub struct SearchLedger {
    store: AppwriteClient,
    images: ImageUrls,
}

impl SearchLedger {
    pub fn new(store: AppwriteClient, images: ImageUrls) -> Self {
        Self { store, images }
    }

    /// Records that `top` came back as the first result for `query`.
    ///
    /// Never fails from the caller's point of view; store errors are
    /// logged and swallowed.
    pub async fn record_observation(&self, query: &str, top: &MovieSummary) {
        let query = query.trim();
        if query.is_empty() {
            debug!("skipping observation for blank query");
            return;
        }

        if let Err(err) = self.upsert_observation(query, top).await {
            warn!(movie_id = top.id, error = %err, "failed to record search observation");
        }
    }

    async fn upsert_observation(&self, query: &str, top: &MovieSummary) -> Result<(), StoreError> {
        let poster_url = self.images.url(ImageSize::W500, top.poster_path.as_deref());

        // Equality lookup rather than a get by document id: records written
        // by older deploys carry server-generated ids.
        let found = self
            .store
            .list_documents::<TrendingRecord>(&[Query::equal("movie_id", top.id), Query::Limit(1)])
            .await?;

        if let Some(record) = found.documents.first() {
            self.bump_record(&record.id, query, &poster_url, &top.title).await?;
            debug!(movie_id = top.id, "bumped trending count");
            return Ok(());
        }

        let document_id = top.id.to_string();
        let data = json!({
            "searchTerm": query,
            "count": 1,
            "movie_id": top.id,
            "poster_url": poster_url,
            "title": top.title,
        });

        match self.store.create_document(&document_id, &data).await {
            Ok(()) => {
                debug!(movie_id = top.id, "created trending record");
                Ok(())
            },
            // Another writer created the record between our lookup and the
            // create.
            Err(StoreError::Conflict) => {
                debug!(movie_id = top.id, "record appeared concurrently, bumping it instead");
                self.bump_record(&document_id, query, &poster_url, &top.title).await
            },
            Err(err) => Err(err),
        }
    }

    /// One more observation of an existing record: count goes up and the
    /// display fields follow the latest search.
    async fn bump_record(
        &self,
        document_id: &str,
        query: &str,
        poster_url: &str,
        title: &str,
    ) -> Result<(), StoreError> {
        self.store.increment_attribute(document_id, "count", 1).await?;
        self.store
            .update_document(
                document_id,
                &json!({ "searchTerm": query, "poster_url": poster_url, "title": title }),
            )
            .await
    }

    /// The most-searched movies, highest count first; equal counts order by
    /// most recent observation. Store failures degrade to an empty list.
    pub async fn top_trending(&self, limit: usize) -> Vec<TrendingRecord> {
        if limit == 0 {
            return Vec::new();
        }

        let queries =
            [Query::OrderDesc("count"), Query::OrderDesc("$updatedAt"), Query::Limit(limit)];

        match self.store.list_documents::<TrendingRecord>(&queries).await {
            Ok(list) => list.documents,
            Err(err) => {
                warn!(error = %err, "failed to load trending movies");
                Vec::new()
            },
        }
    }
}
