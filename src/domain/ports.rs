use crate::domain::model::{NewParcel, ParcelRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Document store holding parcel bookings.
#[async_trait]
pub trait ParcelStore: Send + Sync {
    /// Persists the parcel and returns its server-assigned id.
    async fn insert(&self, parcel: NewParcel) -> Result<String>;
    async fn find(&self, id: &str) -> Result<Option<ParcelRecord>>;
    async fn count(&self) -> Result<u64>;
    /// Cheap liveness check used by the status endpoint.
    async fn ping(&self) -> Result<()>;
}

pub trait ServerSettings: Send + Sync {
    fn bind_address(&self) -> String;
    fn jwt_secret(&self) -> &str;
    fn token_ttl_days(&self) -> i64;
    fn cors_max_age_seconds(&self) -> u64;
}
