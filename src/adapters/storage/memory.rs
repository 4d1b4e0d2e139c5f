use crate::adapters::storage::new_parcel_id;
use crate::domain::model::{NewParcel, ParcelRecord};
use crate::domain::ports::ParcelStore;
use crate::utils::error::{DeliveryError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryParcelStore {
    parcels: RwLock<HashMap<String, NewParcel>>,
}

impl MemoryParcelStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ParcelStore for MemoryParcelStore {
    async fn insert(&self, parcel: NewParcel) -> Result<String> {
        if !parcel.is_finite() {
            return Err(DeliveryError::storage(
                "refusing to store a parcel with non-finite numbers",
            ));
        }
        let id = new_parcel_id();
        self.parcels.write().await.insert(id.clone(), parcel);
        tracing::debug!("Stored parcel {} in memory", id);
        Ok(id)
    }

    async fn find(&self, id: &str) -> Result<Option<ParcelRecord>> {
        let parcels = self.parcels.read().await;
        Ok(parcels.get(id).map(|parcel| ParcelRecord {
            id: id.to_string(),
            parcel: parcel.clone(),
        }))
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.parcels.read().await.len() as u64)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
