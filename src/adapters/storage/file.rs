use crate::adapters::storage::new_parcel_id;
use crate::domain::model::{NewParcel, ParcelRecord};
use crate::domain::ports::ParcelStore;
use crate::utils::error::{DeliveryError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

const PARCELS_FILE: &str = "parcels.jsonl";

/// Document store backed by a JSON-lines file, one parcel per line.
#[derive(Debug)]
pub struct FileParcelStore {
    base_path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileParcelStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Creates the data directory if needed.
    pub async fn open(base_path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(base_path);
        fs::create_dir_all(&store.base_path).await?;
        tracing::info!("Parcel store ready at {}", store.parcels_path().display());
        Ok(store)
    }

    fn parcels_path(&self) -> PathBuf {
        self.base_path.join(PARCELS_FILE)
    }

    async fn read_records(&self) -> Result<Vec<ParcelRecord>> {
        let content = match fs::read_to_string(self.parcels_path()).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(DeliveryError::from))
            .collect()
    }
}

#[async_trait]
impl ParcelStore for FileParcelStore {
    async fn insert(&self, parcel: NewParcel) -> Result<String> {
        // serde_json writes NaN and infinity as null, which would make the
        // whole file unreadable.
        if !parcel.is_finite() {
            return Err(DeliveryError::storage(
                "refusing to store a parcel with non-finite numbers",
            ));
        }
        let record = ParcelRecord {
            id: new_parcel_id(),
            parcel,
        };
        let mut line = serde_json::to_vec(&record)?;
        line.push(b'\n');

        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.parcels_path())
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;

        tracing::debug!("Appended parcel {} to {}", record.id, PARCELS_FILE);
        Ok(record.id)
    }

    async fn find(&self, id: &str) -> Result<Option<ParcelRecord>> {
        Ok(self
            .read_records()
            .await?
            .into_iter()
            .find(|record| record.id == id))
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.read_records().await?.len() as u64)
    }

    async fn ping(&self) -> Result<()> {
        let metadata = fs::metadata(&self.base_path).await?;
        if !metadata.is_dir() {
            return Err(DeliveryError::storage(format!(
                "{} is not a directory",
                self.base_path.display()
            )));
        }
        Ok(())
    }
}
