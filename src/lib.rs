pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::auth::{Claims, TokenAuthority};
pub use adapters::http::EstimateClient;
pub use adapters::storage::{FileParcelStore, MemoryParcelStore};
pub use app::{create_router, start_server, AppState};
pub use config::ServerConfig;
pub use crate::core::pricing::compute_price;
pub use domain::model::{Dimensions, ParcelQuote, PriceBreakdown, Pricing, ServiceLevel};
pub use utils::error::{DeliveryError, Result};
