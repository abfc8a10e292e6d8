//! Qdrant vector store backend implementation.

use async_trait::async_trait;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder, UpsertPointsBuilder,
    VectorParamsBuilder,
};
use std::collections::HashMap;

use super::{CollectionInfo, VectorStore};
use crate::error::VectorStoreError;
use crate::models::{QueryHit, Record, VectorStoreConfig};

/// Qdrant vector store backend.
///
/// Holds one long-lived client for the whole process. All records in a
/// collection share the configured embedding dimension; Qdrant rejects
/// mismatched vectors at write time.
pub struct QdrantStore {
    client: Qdrant,
    dimension: u64,
}

impl QdrantStore {
    /// Create a new Qdrant backend from configuration.
    pub fn new(config: &VectorStoreConfig, dimension: u64) -> Result<Self, VectorStoreError> {
        let mut builder = Qdrant::from_url(&config.url);

        if let Some(ref api_key) = config.api_key {
            builder = builder.api_key(api_key.clone());
        }

        let client = builder
            .build()
            .map_err(|e| VectorStoreError::ConnectionError(e.to_string()))?;

        Ok(Self { client, dimension })
    }

    fn payload_str(
        payload: &HashMap<String, qdrant_client::qdrant::Value>,
        key: &str,
    ) -> Option<String> {
        payload.get(key).and_then(|v| match &v.kind {
            Some(qdrant_client::qdrant::value::Kind::StringValue(s)) => Some(s.clone()),
            _ => None,
        })
    }
}

#[async_trait]
impl VectorStore for QdrantStore {
    async fn health_check(&self) -> Result<bool, VectorStoreError> {
        self.client
            .health_check()
            .await
            .map(|_| true)
            .map_err(|e| VectorStoreError::ConnectionError(e.to_string()))
    }

    async fn collection_info(
        &self,
        name: &str,
    ) -> Result<Option<CollectionInfo>, VectorStoreError> {
        match self.client.collection_info(name).await {
            Ok(info) => Ok(Some(CollectionInfo {
                points_count: info.result.map_or(0, |r| r.points_count.unwrap_or(0)),
            })),
            Err(e) => {
                let msg = e.to_string();
                if msg.contains("not found") || msg.contains("doesn't exist") {
                    Ok(None)
                } else {
                    Err(VectorStoreError::CollectionError(msg))
                }
            }
        }
    }

    async fn create_collection(&self, name: &str) -> Result<(), VectorStoreError> {
        let create_collection = CreateCollectionBuilder::new(name)
            .vectors_config(VectorParamsBuilder::new(self.dimension, Distance::Cosine));

        match self.client.create_collection(create_collection).await {
            Ok(_) => Ok(()),
            Err(e) => {
                // A concurrent create-or-get may have won the race
                let msg = e.to_string();
                if msg.contains("already exists") {
                    Ok(())
                } else {
                    Err(VectorStoreError::CollectionError(msg))
                }
            }
        }
    }

    async fn delete_collection(&self, name: &str) -> Result<(), VectorStoreError> {
        self.client
            .delete_collection(name)
            .await
            .map_err(|e| VectorStoreError::CollectionError(e.to_string()))?;

        Ok(())
    }

    async fn upsert(
        &self,
        collection: &str,
        records: Vec<Record>,
    ) -> Result<(), VectorStoreError> {
        if records.is_empty() {
            return Ok(());
        }

        let points: Vec<PointStruct> = records
            .into_iter()
            .map(|record| {
                let mut payload: HashMap<String, qdrant_client::qdrant::Value> = HashMap::new();
                payload.insert("text".to_string(), record.text.into());
                payload.insert("source".to_string(), record.metadata.source.into());
                payload.insert(
                    "created_at".to_string(),
                    record.metadata.created_at.into(),
                );

                PointStruct::new(record.id, record.vector, payload)
            })
            .collect();

        let upsert = UpsertPointsBuilder::new(collection, points);

        self.client
            .upsert_points(upsert)
            .await
            .map_err(|e| VectorStoreError::UpsertError(e.to_string()))?;

        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        vector: Vec<f32>,
        limit: u64,
    ) -> Result<Vec<QueryHit>, VectorStoreError> {
        let search =
            SearchPointsBuilder::new(collection, vector, limit).with_payload(true);

        let results = self
            .client
            .search_points(search)
            .await
            .map_err(|e| VectorStoreError::QueryError(e.to_string()))?;

        let hits: Vec<QueryHit> = results
            .result
            .into_iter()
            .map(|point| {
                let text = Self::payload_str(&point.payload, "text").unwrap_or_default();
                let source = Self::payload_str(&point.payload, "source").unwrap_or_default();

                let id = match &point.id {
                    Some(id) => match &id.point_id_options {
                        Some(qdrant_client::qdrant::point_id::PointIdOptions::Uuid(uuid)) => {
                            uuid.clone()
                        }
                        Some(qdrant_client::qdrant::point_id::PointIdOptions::Num(num)) => {
                            num.to_string()
                        }
                        None => String::new(),
                    },
                    None => String::new(),
                };

                QueryHit {
                    id,
                    score: point.score,
                    text,
                    source,
                }
            })
            .collect();

        Ok(hits)
    }
}
