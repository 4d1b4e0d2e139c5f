pub mod normalize;
pub mod pricing;

pub use crate::domain::model::{ParcelQuote, PriceBreakdown, Pricing};
pub use crate::domain::ports::{ParcelStore, ServerSettings};
pub use crate::utils::error::Result;
