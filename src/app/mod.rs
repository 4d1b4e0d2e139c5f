// HTTP layer: axum router, handlers, bearer auth and error responses.

pub mod auth;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use routes::create_router;
pub use server::start_server;
pub use state::AppState;
