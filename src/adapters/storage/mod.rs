pub mod file;
pub mod memory;

pub use file::FileParcelStore;
pub use memory::MemoryParcelStore;

pub(crate) fn new_parcel_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
