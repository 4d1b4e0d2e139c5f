// Adapters layer: concrete implementations for external systems (storage, auth tokens, http).

pub mod auth;
pub mod http;
pub mod storage;
